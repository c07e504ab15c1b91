//! Builder for [`Database`].

use std::collections::HashMap;
use std::path::PathBuf;

use database_content::ModConfig;
use database_core::{RecordKind, SymbolTables};
use tracing::{debug, warn};

use super::Database;
use crate::allocator::IdAllocator;
use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::hooks::{DispatchPolicy, HookRegistry};
use crate::keystore::{FileKeyStore, InMemoryKeyStore, KeyStore};

#[derive(Clone, Debug)]
enum KeyStorage {
    Memory,
    Files { dir: PathBuf, compressed: bool },
}

/// Builder for [`Database`] with flexible storage and symbol configuration.
pub struct DatabaseBuilder {
    storage: KeyStorage,
    stores: HashMap<RecordKind, Box<dyn KeyStore>>,
    hooks: Option<HookRegistry>,
    policy: Option<DispatchPolicy>,
    symbols: SymbolTables,
}

impl DatabaseBuilder {
    pub(super) fn new() -> Self {
        Self {
            storage: KeyStorage::Memory,
            stores: HashMap::new(),
            hooks: None,
            policy: None,
            symbols: SymbolTables::builtin(),
        }
    }

    /// Use the key store location of `config`.
    pub fn config(mut self, config: &RuntimeConfig) -> Self {
        self.storage = KeyStorage::Files {
            dir: config.keys_dir.clone(),
            compressed: config.compress_keys,
        };
        self
    }

    /// Persist key bindings as one file per record kind under `dir`.
    pub fn keys_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let compressed = matches!(self.storage, KeyStorage::Files { compressed: true, .. });
        self.storage = KeyStorage::Files {
            dir: dir.into(),
            compressed,
        };
        self
    }

    /// Zlib-compress key store files. Ignored for in-memory storage.
    pub fn compress_keys(mut self, compress: bool) -> Self {
        if let KeyStorage::Files { compressed, .. } = &mut self.storage {
            *compressed = compress;
        }
        self
    }

    /// Keep key bindings in memory only (the default).
    pub fn in_memory(mut self) -> Self {
        self.storage = KeyStorage::Memory;
        self
    }

    /// Use `store` for `kind` instead of the configured storage.
    pub fn key_store(mut self, kind: RecordKind, store: impl KeyStore + 'static) -> Self {
        self.stores.insert(kind, Box::new(store));
        self
    }

    /// Start from an existing hook registry.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Replace the symbol tables (built-in tables by default).
    pub fn symbols(mut self, symbols: SymbolTables) -> Self {
        self.symbols = symbols;
        self
    }

    /// Apply a mod config: extra symbols plus key store overrides.
    ///
    /// Configured names that already exist keep their code and are logged.
    pub fn mod_config(mut self, config: &ModConfig) -> Self {
        for entry in config.apply_to(&mut self.symbols) {
            for name in &entry.taken {
                warn!(
                    target: "runtime::symbols",
                    table = %entry.table,
                    symbol = %name,
                    "symbol already exists and will not be added"
                );
            }
            match entry.code {
                Some(code) => debug!(
                    target: "runtime::symbols",
                    table = %entry.table,
                    code,
                    "added symbol entry"
                ),
                None => warn!(
                    target: "runtime::symbols",
                    table = %entry.table,
                    "all symbols already exist; entry not added"
                ),
            }
        }
        if let Some(dir) = &config.keys_dir {
            self = self.keys_dir(dir.clone());
        }
        if let Some(compress) = config.compress_keys {
            self = self.compress_keys(compress);
        }
        self
    }

    /// Opens the key stores and assembles the database.
    pub fn build(mut self) -> Result<Database> {
        let mut allocators = Vec::with_capacity(RecordKind::ALL.len());
        for kind in RecordKind::ALL {
            let store = match self.stores.remove(&kind) {
                Some(store) => store,
                None => open_store(&self.storage, kind)?,
            };
            allocators.push(IdAllocator::new(kind, store));
        }

        let mut hooks = self.hooks.unwrap_or_default();
        if let Some(policy) = self.policy {
            hooks.set_policy(policy);
        }

        Ok(Database::assemble(allocators, hooks, self.symbols))
    }
}

fn open_store(storage: &KeyStorage, kind: RecordKind) -> Result<Box<dyn KeyStore>> {
    Ok(match storage {
        KeyStorage::Memory => Box::new(InMemoryKeyStore::new()),
        KeyStorage::Files { dir, compressed } => {
            Box::new(FileKeyStore::for_kind(dir, kind, *compressed)?)
        }
    })
}

impl Default for DatabaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
