//! In-memory KeyStore implementation for tests and throwaway sessions.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{KeyStore, KeyStoreError, Result};

#[derive(Debug, Default)]
pub struct InMemoryKeyStore {
    bindings: RwLock<BTreeMap<String, u32>>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with existing bindings.
    pub fn with_bindings<K: Into<String>>(bindings: impl IntoIterator<Item = (K, u32)>) -> Self {
        Self {
            bindings: RwLock::new(bindings.into_iter().map(|(k, id)| (k.into(), id)).collect()),
        }
    }
}

impl KeyStore for InMemoryKeyStore {
    fn load(&self, key: &str) -> Result<Option<u32>> {
        let bindings = self
            .bindings
            .read()
            .map_err(|_| KeyStoreError::LockPoisoned)?;
        Ok(bindings.get(key).copied())
    }

    fn load_all(&self) -> Result<BTreeMap<String, u32>> {
        let bindings = self
            .bindings
            .read()
            .map_err(|_| KeyStoreError::LockPoisoned)?;
        Ok(bindings.clone())
    }

    fn save(&self, key: &str, id: u32) -> Result<()> {
        if key.is_empty() {
            return Err(KeyStoreError::InvalidKey);
        }
        let mut bindings = self
            .bindings
            .write()
            .map_err(|_| KeyStoreError::LockPoisoned)?;
        bindings.insert(key.to_owned(), id);
        Ok(())
    }

    fn max_id(&self) -> Result<Option<u32>> {
        let bindings = self
            .bindings
            .read()
            .map_err(|_| KeyStoreError::LockPoisoned)?;
        Ok(bindings.values().copied().max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_and_loads_bindings() {
        let store = InMemoryKeyStore::with_bindings([("a", 5), ("b", 7)]);
        store.save("c", 8).unwrap();

        assert_eq!(store.load("b").unwrap(), Some(7));
        assert_eq!(store.load("z").unwrap(), None);
        assert_eq!(store.max_id().unwrap(), Some(8));
        assert_eq!(store.len().unwrap(), 3);
        assert!(matches!(store.save("", 1), Err(KeyStoreError::InvalidKey)));
    }
}
