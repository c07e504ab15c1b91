//! Persistent mappings from unique keys to record IDs.
//!
//! Each record kind owns one store. Bindings are only ever added: once a key has
//! an ID it keeps it across restarts, which is what keeps save files pointing at
//! the right records when mods are added or reordered.

mod error;
mod file;
mod memory;

pub use error::{KeyStoreError, Result};
pub use file::FileKeyStore;
pub use memory::InMemoryKeyStore;

use std::collections::BTreeMap;

/// Storage contract for key → ID bindings.
pub trait KeyStore: Send + Sync {
    /// ID bound to `key`, if any.
    fn load(&self, key: &str) -> Result<Option<u32>>;

    /// Every binding in the store.
    fn load_all(&self) -> Result<BTreeMap<String, u32>>;

    /// Binds `key` to `id`, replacing an existing binding.
    fn save(&self, key: &str, id: u32) -> Result<()>;

    /// Highest bound ID, `None` for an empty store.
    fn max_id(&self) -> Result<Option<u32>> {
        Ok(self.load_all()?.into_values().max())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.load_all()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
