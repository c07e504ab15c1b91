//! Record schemas: the ordered, typed field definitions of each record kind.
//!
//! A schema drives both calling forms of `create_*`. Field order is the
//! positional argument order; field names and their synonyms are the keys of the
//! mapping form.

pub mod fields;

use std::collections::HashMap;

use crate::kind::{RecordKind, TextField};
use crate::symbols::TableKind;

/// Expected value kind of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// A literal string.
    Text,
    /// A literal string or a deferred computation of the given category.
    LazyText(TextField),
    Int,
    Bool,
    /// Raw code or a name from the given table.
    Enum(TableKind),
    /// Exactly `n` integers.
    IntArray(usize),
    /// Eight integers, or a mapping from parameter name to value.
    Params,
    /// Eight curve formulas, or a full parameter table.
    Curves,
}

impl FieldKind {
    /// Short description of the accepted values, used in error messages.
    pub const fn expected(&self) -> &'static str {
        match self {
            Self::Text => "a String",
            Self::LazyText(_) => "a String or Proc",
            Self::Int => "an Integer",
            Self::Bool => "a Boolean",
            Self::Enum(_) => "an Integer or a valid Symbol",
            Self::IntArray(_) => "an Array of Integers",
            Self::Params => "an Array of 8 Integers or a Hash of parameters",
            Self::Curves => "an Array of 8 formulas or a parameter Table",
        }
    }
}

/// Value a field takes when the caller leaves it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDefault {
    Text(&'static str),
    Int(i64),
    Bool(bool),
    Ints(&'static [i64]),
    /// The stock class parameter curves.
    Curves,
}

/// Definition of one record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
    /// Alternative keys, checked in order after `name`.
    pub synonyms: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind, default: FieldDefault) -> Self {
        Self {
            name,
            kind,
            default,
            synonyms: &[],
        }
    }

    #[must_use]
    pub const fn synonyms(mut self, synonyms: &'static [&'static str]) -> Self {
        self.synonyms = synonyms;
        self
    }

    /// True when `key` is the field's name or one of its synonyms.
    pub fn answers_to(&self, key: &str) -> bool {
        self.name == key || self.synonyms.contains(&key)
    }

    /// The name followed by the synonyms, in lookup order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + use<> {
        let synonyms: &'static [&'static str] = self.synonyms;
        std::iter::once(self.name).chain(synonyms.iter().copied())
    }
}

/// Ordered field definitions for one record kind.
#[derive(Clone, Debug)]
pub struct RecordSchema {
    kind: RecordKind,
    fields: Vec<FieldSpec>,
    positions: HashMap<&'static str, usize>,
}

impl RecordSchema {
    pub fn new(kind: RecordKind, fields: Vec<FieldSpec>) -> Self {
        let positions = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name, index))
            .collect();
        Self {
            kind,
            fields,
            positions,
        }
    }

    /// The stock schema for `kind`.
    pub fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Actor => Self::actor(),
            RecordKind::Class => Self::class(),
            RecordKind::Skill => Self::skill(),
            RecordKind::Item => Self::item(),
            RecordKind::Weapon => Self::weapon(),
            RecordKind::Armor => Self::armor(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of positional arguments the schema accepts.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Positional index of the field called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.position(name).map(|index| &self.fields[index])
    }

    fn actor() -> Self {
        use fields::*;
        Self::new(
            RecordKind::Actor,
            vec![
                name("Actor"),
                FieldSpec::new(
                    "nickname",
                    FieldKind::LazyText(TextField::Nickname),
                    FieldDefault::Text(""),
                ),
                int("class", 0).synonyms(&["class_id"]),
                int("initial_level", 1).synonyms(&["level"]),
                int("max_level", 99),
                description(),
                text("character_name"),
                int("character_index", 0),
                text("face_name"),
                int("face_index", 0),
                FieldSpec::new(
                    "equips",
                    FieldKind::IntArray(5),
                    FieldDefault::Ints(&[0, 0, 0, 0, 0]),
                ),
                note(),
            ],
        )
    }

    fn class() -> Self {
        use fields::*;
        Self::new(
            RecordKind::Class,
            vec![
                name("Class"),
                FieldSpec::new(
                    "exp_curve",
                    FieldKind::IntArray(4),
                    FieldDefault::Ints(&[30, 20, 30, 30]),
                )
                .synonyms(&["exp_parameter", "exp_param"]),
                FieldSpec::new(
                    "parameter_curves",
                    FieldKind::Curves,
                    FieldDefault::Curves,
                )
                .synonyms(&["param_curves", "params"]),
                note(),
            ],
        )
    }

    fn skill() -> Self {
        use fields::*;
        Self::new(
            RecordKind::Skill,
            vec![
                name("Skill"),
                description(),
                icon(),
                FieldSpec::new(
                    "skill_type",
                    FieldKind::Enum(TableKind::SkillType),
                    FieldDefault::Int(1),
                )
                .synonyms(&["skill_type_id", "stype_id"]),
                int("mp_cost", 0),
                int("tp_cost", 0),
                scope(1),
                occasion(),
                speed(),
                success_rate(),
                repeats(),
                tp_gain(),
                hit_type(),
                animation(),
                FieldSpec::new(
                    "message1",
                    FieldKind::LazyText(TextField::Message1),
                    FieldDefault::Text(""),
                ),
                FieldSpec::new(
                    "message2",
                    FieldKind::LazyText(TextField::Message2),
                    FieldDefault::Text(""),
                ),
                FieldSpec::new(
                    "required_weapon_type1",
                    FieldKind::Enum(TableKind::WeaponType),
                    FieldDefault::Int(0),
                )
                .synonyms(&["weapon_type1", "required_wtype_id1"]),
                FieldSpec::new(
                    "required_weapon_type2",
                    FieldKind::Enum(TableKind::WeaponType),
                    FieldDefault::Int(0),
                )
                .synonyms(&["weapon_type2", "required_wtype_id2"]),
                damage_type(),
                damage_element(),
                formula(),
                variance(),
                critical(),
                note(),
            ],
        )
    }

    fn item() -> Self {
        use fields::*;
        Self::new(
            RecordKind::Item,
            vec![
                name("Item"),
                description(),
                icon(),
                FieldSpec::new(
                    "item_type",
                    FieldKind::Enum(TableKind::ItemType),
                    FieldDefault::Int(1),
                )
                .synonyms(&["item_type_id", "itype_id"]),
                price(),
                FieldSpec::new("consumable", FieldKind::Bool, FieldDefault::Bool(true))
                    .synonyms(&["consume"]),
                scope(7),
                occasion(),
                speed(),
                success_rate(),
                repeats(),
                tp_gain(),
                hit_type(),
                animation(),
                damage_type(),
                damage_element(),
                formula(),
                variance(),
                critical(),
                note(),
            ],
        )
    }

    fn weapon() -> Self {
        use fields::*;
        Self::new(
            RecordKind::Weapon,
            vec![
                name("Weapon"),
                description(),
                FieldSpec::new(
                    "weapon_type",
                    FieldKind::Enum(TableKind::WeaponType),
                    FieldDefault::Int(0),
                )
                .synonyms(&["wtype_id", "wtype"]),
                parameters(),
                icon(),
                animation(),
                price(),
                note(),
            ],
        )
    }

    fn armor() -> Self {
        use fields::*;
        Self::new(
            RecordKind::Armor,
            vec![
                name("Armor"),
                description(),
                FieldSpec::new(
                    "armor_type",
                    FieldKind::Enum(TableKind::ArmorType),
                    FieldDefault::Int(0),
                )
                .synonyms(&["atype_id", "atype"]),
                FieldSpec::new(
                    "equip_type",
                    FieldKind::Enum(TableKind::EquipType),
                    FieldDefault::Int(1),
                )
                .synonyms(&["etype_id", "etype"]),
                parameters(),
                icon(),
                price(),
                note(),
            ],
        )
    }
}

/// The stock schemas of all record kinds, built once per context.
#[derive(Clone, Debug)]
pub struct SchemaSet {
    schemas: HashMap<RecordKind, RecordSchema>,
}

impl SchemaSet {
    pub fn new() -> Self {
        Self {
            schemas: RecordKind::ALL
                .into_iter()
                .map(|kind| (kind, RecordSchema::for_kind(kind)))
                .collect(),
        }
    }

    pub fn get(&self, kind: RecordKind) -> &RecordSchema {
        // `new` inserts every RecordKind.
        &self.schemas[&kind]
    }
}

impl Default for SchemaSet {
    fn default() -> Self {
        Self::new()
    }
}
