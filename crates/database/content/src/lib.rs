//! Data-driven record catalogs and mod configuration.
//!
//! This crate describes database content that lives outside of code:
//! - Record catalogs: lists of attribute sets appended in bulk (RON), with
//!   optional feature, effect and learning lists
//! - Mod configuration: game-specific symbols and key store settings (TOML)
//!
//! Catalog entries are converted into [`database_core::AttrInput`] and go
//! through the same validation path as records created from code.

pub mod catalog;
pub mod config;
pub mod lists;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogEntry, CatalogValue, RecordCatalog};
pub use config::{EntryNames, ModConfig, SymbolSection};
pub use lists::{ApplyLists, EntryLists};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory};
