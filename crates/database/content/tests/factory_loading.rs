use std::fs;

use database_content::{CatalogValue, ContentFactory};
use database_core::{RecordKind, RecordSchema, SymbolTables, TableKind};
use tempfile::TempDir;

#[test]
fn missing_files_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let factory = ContentFactory::new(dir.path());

    let config = factory.load_config().unwrap();
    assert!(config.keys_dir.is_none());
    assert!(factory.load_catalog(RecordKind::Weapon).unwrap().is_none());
    assert!(factory.load_catalogs().unwrap().is_empty());
}

#[test]
fn loads_config_and_catalogs_from_data_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("modkit.toml"),
        r#"
compress_keys = true

[symbols]
weapon_type = [["sword", "blade"]]
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("weapons.ron"),
        r#"(entries: [(attributes: { "name": "Blade", "wtype": "sword" })])"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("armors.ron"),
        r#"(entries: [(key: Some("mod:cap"), attributes: { "name": "Cap" })])"#,
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    assert_eq!(config.compress_keys, Some(true));

    let mut symbols = SymbolTables::builtin();
    let added = config.apply_to(&mut symbols);
    assert_eq!(added.len(), 1);
    assert_eq!(symbols.table(TableKind::WeaponType).get("sword"), Some(1));
    assert_eq!(symbols.table(TableKind::WeaponType).get("blade"), Some(1));

    let catalogs = factory.load_catalogs().unwrap();
    let kinds: Vec<_> = catalogs.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(kinds, [RecordKind::Weapon, RecordKind::Armor]);

    let (_, weapons) = &catalogs[0];
    let schema = RecordSchema::for_kind(RecordKind::Weapon);
    assert_eq!(weapons.entries[0].text(&schema, "name"), Some("Blade"));
    assert_eq!(
        weapons.entries[0].attributes.get("wtype"),
        Some(&CatalogValue::Str("sword".into()))
    );
}

#[test]
fn malformed_catalog_reports_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("items.ron"), "(entries: [").unwrap();

    let err = ContentFactory::new(dir.path())
        .load_catalog(RecordKind::Item)
        .unwrap_err();
    assert!(err.to_string().contains("items.ron"));
}
