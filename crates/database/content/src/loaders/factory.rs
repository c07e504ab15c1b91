//! Content factory for loading catalogs and configuration from a data directory.

use std::path::{Path, PathBuf};

use database_core::RecordKind;

use crate::catalog::RecordCatalog;
use crate::config::ModConfig;
use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads all mod content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── modkit.toml
/// ├── actors.ron
/// ├── classes.ron
/// ├── skills.ron
/// ├── items.ron
/// ├── weapons.ron
/// └── armors.ron
/// ```
///
/// Every file is optional.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load `modkit.toml`, falling back to the defaults when it does not exist.
    pub fn load_config(&self) -> LoadResult<ModConfig> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(ModConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the catalog for `kind`, or `None` when its file does not exist.
    pub fn load_catalog(&self, kind: RecordKind) -> LoadResult<Option<RecordCatalog>> {
        let path = self.catalog_path(kind);
        if !path.exists() {
            return Ok(None);
        }
        CatalogLoader::load(&path).map(Some)
    }

    /// Load every catalog that exists, in creation order.
    pub fn load_catalogs(&self) -> LoadResult<Vec<(RecordKind, RecordCatalog)>> {
        let mut catalogs = Vec::new();
        for kind in RecordKind::ALL {
            if let Some(catalog) = self.load_catalog(kind)? {
                catalogs.push((kind, catalog));
            }
        }
        Ok(catalogs)
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("modkit.toml")
    }

    /// Path of the catalog file for `kind`, e.g. `classes.ron`.
    pub fn catalog_path(&self, kind: RecordKind) -> PathBuf {
        let file = match kind {
            RecordKind::Actor => "actors.ron",
            RecordKind::Class => "classes.ron",
            RecordKind::Skill => "skills.ron",
            RecordKind::Item => "items.ron",
            RecordKind::Weapon => "weapons.ron",
            RecordKind::Armor => "armors.ron",
        };
        self.data_dir.join(file)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
