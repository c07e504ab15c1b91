//! Mod configuration loader.

use std::path::Path;

use crate::config::ModConfig;
use crate::loaders::{LoadResult, read_file};

/// Loader for mod configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ModConfig> {
        let content = read_file(path)?;
        let config: ModConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
