use database_core::{AttrInput, AttrValue, RecordKind};
use runtime::{Database, FileKeyStore, KeyStore, RuntimeConfig};
use tempfile::TempDir;

fn open(dir: &TempDir, compressed: bool) -> Database {
    let config = RuntimeConfig {
        keys_dir: dir.path().to_path_buf(),
        compress_keys: compressed,
        data_dir: dir.path().to_path_buf(),
    };
    let mut db = Database::builder()
        .config(&config)
        .build()
        .expect("key store directory is writable");
    db.load_collections().expect("no load listeners registered");
    db
}

fn named(name: &str) -> AttrInput {
    AttrInput::keyed([("name", AttrValue::from(name))])
}

#[test]
fn ids_survive_a_restart() {
    for compressed in [false, true] {
        let dir = TempDir::new().unwrap();

        let (sword, shield) = {
            let mut db = open(&dir, compressed);
            let sword = db.create_weapon("mod:sword", named("Sword")).unwrap();
            let shield = db.create_armor("mod:shield", named("Shield")).unwrap();
            (sword, shield)
        };

        // A new load order: another mod adds its weapon first.
        let mut db = open(&dir, compressed);
        let axe = db.create_weapon("other:axe", named("Axe")).unwrap();
        let sword_again = db.create_weapon("mod:sword", named("Sword")).unwrap();

        assert_eq!(sword_again, sword);
        assert_ne!(axe, sword);
        assert_eq!(db.create_armor("mod:shield", named("Shield")).unwrap(), shield);
    }
}

#[test]
fn store_files_are_per_kind() {
    let dir = TempDir::new().unwrap();
    let mut db = open(&dir, true);
    db.create_skill("mod:fire", named("Fire")).unwrap();

    let store = FileKeyStore::for_kind(dir.path(), RecordKind::Skill, true).unwrap();
    assert_eq!(store.load("mod:fire").unwrap(), Some(1));
    assert!(!dir.path().join(RecordKind::Item.key_file_name()).exists());
}
