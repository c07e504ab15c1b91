//! Field definitions shared between record schemas.
//!
//! Records are assembled from the same groups of fields the engine's record
//! classes share: every record has a base group (name, description, icon,
//! note), skills and items share the usable group (scope, occasion, ...) and the
//! damage group, weapons and armors share the equip group.

use crate::kind::TextField;
use crate::symbols::TableKind;

use super::{FieldDefault, FieldKind, FieldSpec};

// ============================================================================
// Base group
// ============================================================================

pub fn name(default: &'static str) -> FieldSpec {
    FieldSpec::new(
        "name",
        FieldKind::LazyText(TextField::Name),
        FieldDefault::Text(default),
    )
}

pub fn description() -> FieldSpec {
    FieldSpec::new(
        "description",
        FieldKind::LazyText(TextField::Description),
        FieldDefault::Text(""),
    )
    .synonyms(&["desc"])
}

pub fn icon() -> FieldSpec {
    FieldSpec::new("icon", FieldKind::Int, FieldDefault::Int(0)).synonyms(&["icon_index"])
}

pub fn note() -> FieldSpec {
    FieldSpec::new("note", FieldKind::Text, FieldDefault::Text(""))
}

// ============================================================================
// Usable group (skills, items)
// ============================================================================

pub fn scope(default: i64) -> FieldSpec {
    FieldSpec::new(
        "scope",
        FieldKind::Enum(TableKind::Scope),
        FieldDefault::Int(default),
    )
}

pub fn occasion() -> FieldSpec {
    FieldSpec::new(
        "occasion",
        FieldKind::Enum(TableKind::Occasion),
        FieldDefault::Int(0),
    )
}

pub fn speed() -> FieldSpec {
    FieldSpec::new("speed", FieldKind::Int, FieldDefault::Int(0))
}

pub fn success_rate() -> FieldSpec {
    FieldSpec::new("success_rate", FieldKind::Int, FieldDefault::Int(100))
}

pub fn repeats() -> FieldSpec {
    FieldSpec::new("repeats", FieldKind::Int, FieldDefault::Int(1))
}

pub fn tp_gain() -> FieldSpec {
    FieldSpec::new("tp_gain", FieldKind::Int, FieldDefault::Int(0))
}

pub fn hit_type() -> FieldSpec {
    FieldSpec::new(
        "hit_type",
        FieldKind::Enum(TableKind::HitType),
        FieldDefault::Int(0),
    )
}

pub fn animation() -> FieldSpec {
    FieldSpec::new("animation", FieldKind::Int, FieldDefault::Int(0)).synonyms(&["anim"])
}

// ============================================================================
// Damage group (skills, items)
// ============================================================================

pub fn damage_type() -> FieldSpec {
    FieldSpec::new(
        "damage_type",
        FieldKind::Enum(TableKind::DamageType),
        FieldDefault::Int(0),
    )
    .synonyms(&["damage"])
}

pub fn damage_element() -> FieldSpec {
    FieldSpec::new(
        "damage_element",
        FieldKind::Enum(TableKind::Element),
        FieldDefault::Int(0),
    )
    .synonyms(&["element"])
}

pub fn formula() -> FieldSpec {
    FieldSpec::new("formula", FieldKind::Text, FieldDefault::Text("0")).synonyms(&["damage_formula"])
}

pub fn variance() -> FieldSpec {
    FieldSpec::new("variance", FieldKind::Int, FieldDefault::Int(20)).synonyms(&["damage_variance"])
}

pub fn critical() -> FieldSpec {
    FieldSpec::new("critical", FieldKind::Bool, FieldDefault::Bool(false)).synonyms(&["can_crit"])
}

// ============================================================================
// Equip group (weapons, armors)
// ============================================================================

pub fn parameters() -> FieldSpec {
    FieldSpec::new(
        "parameters",
        FieldKind::Params,
        FieldDefault::Ints(&[0, 0, 0, 0, 0, 0, 0, 0]),
    )
    .synonyms(&["params"])
}

pub fn price() -> FieldSpec {
    FieldSpec::new("price", FieldKind::Int, FieldDefault::Int(0))
}

pub fn int(name: &'static str, default: i64) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Int, FieldDefault::Int(default))
}

pub fn text(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Text, FieldDefault::Text(""))
}
