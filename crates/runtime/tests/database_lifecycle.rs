use std::sync::{Arc, Mutex};

use database_core::{AttrInput, AttrValue, BuildError, RecordKind, TableKind, TextField};
use runtime::{
    Database, DatabaseError, HookArg, HookError, InMemoryKeyStore, Listener, SkipReason,
    SkippedEntry,
};

fn loaded() -> Database {
    let mut db = Database::in_memory();
    db.load_collections().expect("no load listeners registered");
    db
}

fn keyed(entries: Vec<(&str, AttrValue)>) -> AttrInput {
    AttrInput::keyed(entries)
}

/// Full session: load, create with deferred text, hook mutation, finalize.
#[test]
fn mod_session_from_load_to_player_loaded() {
    // ================================================================
    // PHASE 1: Load and register listeners
    // ================================================================
    let mut db = loaded();
    let created = Arc::new(Mutex::new(Vec::new()));

    let seen = Arc::clone(&created);
    db.hooks_mut().add_listener(
        RecordKind::Weapon.created_event(),
        Listener::new("tag-price", runtime::Arity::Exact(1), move |args| {
            if let Some(database_core::AnyRecord::Weapon(weapon)) = args[0].as_record_mut() {
                seen.lock().unwrap().push(weapon.id);
                weapon.price += 100;
            }
            Ok(())
        }),
    );

    // ================================================================
    // PHASE 2: Create records
    // ================================================================
    let blade = db
        .create_weapon(
            "mod:flame_blade",
            keyed(vec![
                ("name", AttrValue::lazy(|| "Flame Blade".to_owned())),
                ("params", AttrValue::map([("atk", AttrValue::Int(20)), ("agi", AttrValue::Int(-5))])),
                ("price", AttrValue::Int(50)),
            ]),
        )
        .expect("weapon attributes are valid");
    let hero = db
        .create_actor(
            "mod:hero",
            keyed(vec![("name", AttrValue::lazy(|| "Ralph".to_owned()))]),
        )
        .expect("actor attributes are valid");

    let weapon = db.find_weapon_by_key("mod:flame_blade").unwrap().unwrap();
    assert_eq!(weapon.params, [0, 0, 20, 0, 0, 0, -5, 0]);
    assert_eq!(weapon.price, 150, "listener changes are kept");
    assert!(weapon.name.is_pending());
    assert_eq!(*created.lock().unwrap(), [blade]);

    // ================================================================
    // PHASE 3: Lose the actor, then finalize
    // ================================================================
    db.load_collection::<database_core::Actor>([]);
    let report = db.player_loaded().expect("no player_loaded listeners fail");

    assert_eq!(report.resolved, 1);
    assert_eq!(
        report.skipped,
        [SkippedEntry {
            kind: RecordKind::Actor,
            field: TextField::Name,
            key: "mod:hero".into(),
            reason: SkipReason::MissingRecord { id: hero },
        }]
    );
    let weapon = db.get::<database_core::Weapon>(blade).unwrap();
    assert_eq!(weapon.name.as_str(), "Flame Blade");
}

#[test]
fn creating_before_load_is_not_ready() {
    let mut db = Database::in_memory();

    let err = db
        .create_item("mod:potion", keyed(vec![("name", "Potion".into())]))
        .unwrap_err();

    assert!(err.is_not_ready());
    assert!(db.key_bindings(RecordKind::Item).unwrap().is_empty());
}

#[test]
fn type_mismatch_leaves_database_unchanged() {
    for kind in RecordKind::ALL {
        let mut db = loaded();
        let input = keyed(vec![("name", AttrValue::Int(42))]);

        let err = match kind {
            RecordKind::Actor => db.create_actor("k", input),
            RecordKind::Class => db.create_class("k", input),
            RecordKind::Skill => db.create_skill("k", input),
            RecordKind::Item => db.create_item("k", input),
            RecordKind::Weapon => db.create_weapon("k", input),
            RecordKind::Armor => db.create_armor("k", input),
        }
        .unwrap_err();

        assert!(
            matches!(err, DatabaseError::Build(BuildError::TypeMismatch { field: "name", .. })),
            "{kind}: {err}"
        );
        assert_eq!(db.collections().max_id(kind), 0);
        assert!(db.key_bindings(kind).unwrap().is_empty());
    }
}

#[test]
fn symbols_and_codes_are_interchangeable() {
    let mut db = loaded();

    let by_name = db
        .create_skill("mod:a", keyed(vec![("scope", AttrValue::symbol("all_enemies"))]))
        .unwrap();
    let by_code = db
        .create_skill("mod:b", keyed(vec![("scope", AttrValue::Int(2))]))
        .unwrap();

    let scope = |id| db.get::<database_core::Skill>(id).unwrap().scope;
    assert_eq!(scope(by_name), scope(by_code));
    assert_eq!(db.symbols().name_of(TableKind::Scope, 2), Some("all_enemies"));
}

#[test]
fn unknown_symbols_name_their_table() {
    let mut db = loaded();

    let err = db
        .create_skill("mod:typo", keyed(vec![("scope", AttrValue::symbol("all_enemys"))]))
        .unwrap_err();

    assert!(matches!(
        err,
        DatabaseError::Build(BuildError::UnknownSymbol { table: TableKind::Scope, .. })
    ));
}

#[test]
fn preloaded_bindings_decide_new_ids() {
    let mut db = Database::builder()
        .key_store(
            RecordKind::Weapon,
            InMemoryKeyStore::with_bindings([("a", 5), ("b", 7)]),
        )
        .build()
        .unwrap();
    db.load_collection((1..=10).map(|id| database_core::Weapon {
        id,
        ..Default::default()
    }));

    assert_eq!(db.create_weapon("c", keyed(vec![])).unwrap(), 8);
    assert_eq!(db.create_weapon("a", keyed(vec![])).unwrap(), 5);
}

#[test]
fn empty_store_continues_after_collection() {
    let mut db = loaded();
    db.load_collection([1, 2, 4].map(|id| database_core::Armor {
        id,
        ..Default::default()
    }));

    assert_eq!(db.create_armor("mod:new", keyed(vec![])).unwrap(), 5);
}

#[test]
fn failing_listener_still_stores_the_record() {
    let mut db = loaded();
    db.hooks_mut().add_listener(
        RecordKind::Item.created_event(),
        Listener::new("strict", runtime::Arity::Exact(2), |_| Ok(())),
    );

    let err = db
        .create_item("mod:potion", keyed(vec![("name", "Potion".into())]))
        .unwrap_err();

    assert!(matches!(err, DatabaseError::Hook(HookError::Arity { got: 1, .. })));
    assert_eq!(db.find_item("potion"), [1]);
}

#[test]
fn recreating_a_key_replaces_its_deferred_text() {
    let mut db = loaded();
    let first = db
        .create_class("mod:sage", keyed(vec![("name", AttrValue::lazy(|| "Old".to_owned()))]))
        .unwrap();
    let second = db
        .create_class("mod:sage", keyed(vec![("name", "Sage".into())]))
        .unwrap();

    assert_eq!(first, second);
    assert!(db.deferred().is_empty());
    let report = db.player_loaded().unwrap();
    assert_eq!(report.resolved, 0);
    assert_eq!(db.find_class_details("sage"), ["ID: 1 Name: Sage"]);
}

#[test]
fn hooks_fire_in_order_and_stop_after_removal() {
    let db_calls = Arc::new(Mutex::new(Vec::new()));
    let mut db = loaded();

    let calls = Arc::clone(&db_calls);
    let a = Listener::new("a", runtime::Arity::Exact(2), move |args| {
        calls.lock().unwrap().push(("a", args[0].as_int(), args[1].as_int()));
        Ok(())
    });
    let calls = Arc::clone(&db_calls);
    let b = Listener::new("b", runtime::Arity::Exact(2), move |args| {
        calls.lock().unwrap().push(("b", args[0].as_int(), args[1].as_int()));
        Ok(())
    });
    db.hooks_mut().add_listener("x", a.clone());
    db.hooks_mut().add_listener("x", b);

    db.trigger_hook("x", &mut [HookArg::Int(1), HookArg::Int(2)]).unwrap();
    assert!(db.hooks_mut().remove_listener("x", &a));
    db.trigger_hook("x", &mut [HookArg::Int(1), HookArg::Int(2)]).unwrap();

    assert_eq!(
        *db_calls.lock().unwrap(),
        [
            ("a", Some(1), Some(2)),
            ("b", Some(1), Some(2)),
            ("b", Some(1), Some(2)),
        ]
    );
}
