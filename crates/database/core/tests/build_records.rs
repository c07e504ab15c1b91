//! End-to-end validation of every record kind through the public API.

use database_core::{
    AttrInput, AttrValue, Attributes, BuildError, Record, RecordKind, RecordSchema, Skill,
    SymbolTables, Text, Weapon, validate,
};

fn build<R: Record>(input: AttrInput, symbols: &SymbolTables) -> Result<R, BuildError> {
    let schema = RecordSchema::for_kind(R::KIND);
    let attributes = Attributes::normalize(&schema, input)?;
    let validated = validate(&schema, &attributes, symbols, "mod:test")?;
    Ok(R::from_validated(1, &validated))
}

#[test]
fn integer_name_is_rejected_for_every_kind() {
    for kind in RecordKind::ALL {
        let schema = RecordSchema::for_kind(kind);
        let attributes =
            Attributes::normalize(&schema, AttrInput::keyed([("name", 42.into())])).unwrap();
        let err = validate(&schema, &attributes, &SymbolTables::builtin(), "k").unwrap_err();

        assert!(
            matches!(err, BuildError::TypeMismatch { field: "name", found: "Integer", .. }),
            "{kind}: {err}"
        );
    }
}

#[test]
fn custom_symbols_feed_enum_fields() {
    let mut symbols = SymbolTables::builtin();
    assert!(symbols.insert(database_core::TableKind::WeaponType, "sword", 2));
    assert!(symbols.insert(database_core::TableKind::Element, "fire", 3));

    let weapon: Weapon = build(
        AttrInput::keyed([
            ("name", "Flame Blade".into()),
            ("wtype", AttrValue::symbol("sword")),
        ]),
        &symbols,
    )
    .unwrap();
    assert_eq!(weapon.weapon_type, 2);

    let skill: Skill = build(
        AttrInput::keyed([
            ("element", AttrValue::symbol("fire")),
            ("scope", AttrValue::symbol("all_enemies")),
            ("damage", AttrValue::symbol("hp_damage")),
        ]),
        &symbols,
    )
    .unwrap();
    assert_eq!(skill.damage.element_id, 3);
    assert_eq!(skill.scope, 2);
    assert_eq!(skill.damage.damage_type, 1);
    assert_eq!(skill.name, Text::literal("Skill"));
}

#[test]
fn positional_weapon_matches_keyed_weapon() {
    let symbols = SymbolTables::builtin();
    let positional: Weapon = build(
        AttrInput::from_args(vec![
            "Club".into(),
            "Heavy".into(),
            0.into(),
            vec![0, 0, 5, 0, 0, 0, 0, 0].into(),
            12.into(),
        ]),
        &symbols,
    )
    .unwrap();
    let keyed: Weapon = build(
        AttrInput::from_args(vec![AttrValue::map([
            ("name", "Club".into()),
            ("desc", "Heavy".into()),
            ("params", AttrValue::map([("atk", 5.into())])),
            ("icon_index", 12.into()),
        ])]),
        &symbols,
    )
    .unwrap();

    assert_eq!(positional, keyed);
}
