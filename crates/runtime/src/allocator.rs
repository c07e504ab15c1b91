//! Stable ID allocation for unique keys.

use std::collections::BTreeMap;

use database_core::RecordKind;
use tracing::debug;

use crate::keystore::{KeyStore, KeyStoreError, Result};

/// Hands out record IDs for one record kind and persists every new binding.
///
/// A key that is already bound keeps its ID. A new key gets one more than the
/// highest ID in the store or, while the store is empty, one more than the
/// highest occupied slot of the collection.
pub struct IdAllocator {
    kind: RecordKind,
    store: Box<dyn KeyStore>,
}

impl IdAllocator {
    pub fn new(kind: RecordKind, store: Box<dyn KeyStore>) -> Self {
        Self { kind, store }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn store(&self) -> &dyn KeyStore {
        self.store.as_ref()
    }

    /// ID already bound to `key`.
    pub fn lookup(&self, key: &str) -> Result<Option<u32>> {
        self.store.load(key)
    }

    /// Returns the ID for `key`, binding a new one when needed.
    pub fn allocate(&mut self, key: &str, collection_max_id: u32) -> Result<u32> {
        if key.is_empty() {
            return Err(KeyStoreError::InvalidKey);
        }

        if let Some(id) = self.store.load(key)? {
            return Ok(id);
        }

        let last = self.store.max_id()?.unwrap_or(collection_max_id);
        let id = last
            .checked_add(1)
            .ok_or(KeyStoreError::Exhausted { last })?;
        self.store.save(key, id)?;

        debug!(
            target: "runtime::allocator",
            kind = %self.kind,
            key = %key,
            id,
            "bound new key"
        );

        Ok(id)
    }

    /// All bindings of this kind.
    pub fn bindings(&self) -> Result<BTreeMap<String, u32>> {
        self.store.load_all()
    }
}

impl std::fmt::Debug for IdAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdAllocator")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keystore::InMemoryKeyStore;

    fn allocator(bindings: &[(&str, u32)]) -> IdAllocator {
        IdAllocator::new(
            RecordKind::Weapon,
            Box::new(InMemoryKeyStore::with_bindings(bindings.iter().copied())),
        )
    }

    #[test]
    fn store_maximum_wins_over_collection() {
        let mut ids = allocator(&[("a", 5), ("b", 7)]);
        assert_eq!(ids.allocate("c", 10).unwrap(), 8);
    }

    #[test]
    fn empty_store_continues_after_collection() {
        let mut ids = allocator(&[]);
        assert_eq!(ids.allocate("first", 4).unwrap(), 5);
        assert_eq!(ids.allocate("second", 4).unwrap(), 6);

        let mut fresh = allocator(&[]);
        assert_eq!(fresh.allocate("only", 0).unwrap(), 1);
    }

    #[test]
    fn known_keys_keep_their_id() {
        let mut ids = allocator(&[("a", 5)]);
        assert_eq!(ids.allocate("a", 99).unwrap(), 5);
        assert_eq!(ids.lookup("a").unwrap(), Some(5));
        assert_eq!(ids.lookup("z").unwrap(), None);
    }

    #[test]
    fn empty_key_is_rejected() {
        let mut ids = allocator(&[]);
        assert!(matches!(ids.allocate("", 0), Err(KeyStoreError::InvalidKey)));
    }
}
