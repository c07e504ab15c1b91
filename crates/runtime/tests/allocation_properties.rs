use std::collections::{BTreeSet, HashMap};

use database_core::RecordKind;
use proptest::prelude::*;
use runtime::{IdAllocator, InMemoryKeyStore};

fn allocator() -> IdAllocator {
    IdAllocator::new(RecordKind::Skill, Box::new(InMemoryKeyStore::new()))
}

proptest! {
    #[test]
    fn distinct_keys_get_distinct_ids(
        keys in prop::collection::btree_set("[a-z:_]{1,12}", 1..40),
        collection_max in 0u32..500,
    ) {
        let mut ids = allocator();
        let assigned: BTreeSet<u32> = keys
            .iter()
            .map(|key| ids.allocate(key, collection_max).unwrap())
            .collect();

        prop_assert_eq!(assigned.len(), keys.len());
        prop_assert!(assigned.iter().all(|id| *id > collection_max));
    }

    #[test]
    fn allocation_is_idempotent(
        keys in prop::collection::vec("[a-c]{1,3}", 1..60),
    ) {
        let mut ids = allocator();
        let mut first_seen = HashMap::new();

        for key in &keys {
            let id = ids.allocate(key, 0).unwrap();
            prop_assert_eq!(*first_seen.entry(key.clone()).or_insert(id), id);
        }
        prop_assert_eq!(ids.bindings().unwrap().len(), first_seen.len());
    }
}
