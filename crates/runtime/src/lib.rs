//! Runtime services for building game database records from mods.
//!
//! This crate wires the pure validation layer of `database-core` to the parts
//! that have state: persistent key → ID bindings, the record collections,
//! pending deferred text and named-event hooks. Consumers build one
//! [`Database`] at startup and drive it through `create_*`, the lifecycle
//! calls ([`Database::load_collections`], [`Database::player_loaded`]) and the
//! lookup helpers.
//!
//! Modules are organized by responsibility:
//! - [`database`] hosts the context object and its builder
//! - [`hooks`] provides synchronous named-event dispatch
//! - [`keystore`] persists key bindings (file or memory)
//! - [`allocator`] hands out stable IDs on top of a key store
//! - [`collection`] and [`deferred`] hold records and pending text
//! - [`config`] reads store settings from the environment
pub mod allocator;
pub mod collection;
pub mod config;
pub mod database;
pub mod deferred;
pub mod error;
pub mod hooks;
pub mod keystore;

pub use allocator::IdAllocator;
pub use collection::{Collection, Collections, Stored};
pub use config::RuntimeConfig;
pub use database::{
    Database, DatabaseBuilder, Describe, FinalizeReport, SkipReason, SkippedEntry,
};
pub use deferred::DeferredTables;
pub use error::{DatabaseError, Result};
pub use hooks::{
    Arity, DispatchPolicy, HookArg, HookError, HookRegistry, Listener, ListenerResult,
};
pub use keystore::{FileKeyStore, InMemoryKeyStore, KeyStore, KeyStoreError};
