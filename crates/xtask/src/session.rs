//! Builds a database from a data directory the way a game session would.

use std::path::PathBuf;

use anyhow::{Context, Result};
use database_content::ContentFactory;
use database_core::{Actor, Armor, Class, Item, RecordKind, Skill, Weapon};
use runtime::{Database, RuntimeConfig};

/// Where a session reads content and stores key bindings.
pub struct SessionOptions {
    pub data_dir: Option<PathBuf>,
    /// Persist bindings in this directory instead of keeping them in memory.
    pub keys_dir: Option<PathBuf>,
}

/// Records created per kind, in catalog order.
pub type AppendSummary = Vec<(RecordKind, Vec<u32>)>;

pub fn config(data_dir: Option<PathBuf>, keys_dir: Option<PathBuf>) -> RuntimeConfig {
    let mut config = RuntimeConfig::from_env();
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = keys_dir {
        config.keys_dir = dir;
    }
    config
}

/// Loads `modkit.toml` and every catalog, then appends them in kind order.
pub fn open(options: SessionOptions) -> Result<(Database, AppendSummary)> {
    let persist = options.keys_dir.is_some();
    let mut config = config(options.data_dir, None);
    let factory = ContentFactory::new(&config.data_dir);
    let mod_config = factory.load_config()?;
    config.apply(&mod_config);
    if let Some(dir) = options.keys_dir {
        config.keys_dir = dir;
    }

    let builder = Database::builder().mod_config(&mod_config);
    let builder = if persist {
        builder.config(&config)
    } else {
        builder.in_memory()
    };
    let mut db = builder.build().context("Failed to open key stores")?;
    db.load_collections()?;

    let mut summary = Vec::new();
    for (kind, catalog) in factory.load_catalogs()? {
        let ids = match kind {
            RecordKind::Actor => db.append_catalog::<Actor>(&catalog, true, ..),
            RecordKind::Class => db.append_catalog::<Class>(&catalog, true, ..),
            RecordKind::Skill => db.append_catalog::<Skill>(&catalog, true, ..),
            RecordKind::Item => db.append_catalog::<Item>(&catalog, true, ..),
            RecordKind::Weapon => db.append_catalog::<Weapon>(&catalog, true, ..),
            RecordKind::Armor => db.append_catalog::<Armor>(&catalog, true, ..),
        }
        .with_context(|| {
            format!(
                "Failed to build {}",
                factory.catalog_path(kind).display()
            )
        })?;
        summary.push((kind, ids));
    }

    Ok((db, summary))
}
