//! Runtime configuration for key stores and content locations.

use std::env;
use std::path::PathBuf;

use database_content::ModConfig;

/// Settings that decide where and how key stores persist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory holding one key store file per record kind.
    pub keys_dir: PathBuf,
    /// Zlib-compress key store payloads.
    pub compress_keys: bool,
    /// Directory with `modkit.toml` and record catalogs.
    pub data_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let (keys_dir, data_dir) = directories::ProjectDirs::from("", "", "modkit")
            .map(|dirs| (dirs.data_dir().join("keys"), dirs.config_dir().to_path_buf()))
            .unwrap_or_else(|| (PathBuf::from("./save"), PathBuf::from("./data")));

        Self {
            keys_dir,
            compress_keys: false,
            data_dir,
        }
    }
}

impl RuntimeConfig {
    /// Reads overrides from the environment.
    ///
    /// - `MODKIT_KEYS_DIR`: key store directory
    /// - `MODKIT_COMPRESS_KEYS`: `true`/`false`
    /// - `MODKIT_DATA_DIR`: content directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("MODKIT_KEYS_DIR") {
            config.keys_dir = dir;
        }

        if let Some(compress) = read_env::<bool>("MODKIT_COMPRESS_KEYS") {
            config.compress_keys = compress;
        }

        if let Some(dir) = read_env::<PathBuf>("MODKIT_DATA_DIR") {
            config.data_dir = dir;
        }

        config
    }

    /// Applies the overrides of a mod config file.
    pub fn apply(&mut self, mod_config: &ModConfig) {
        if let Some(dir) = &mod_config.keys_dir {
            self.keys_dir = dir.clone();
        }
        if let Some(compress) = mod_config.compress_keys {
            self.compress_keys = compress;
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_config_overrides_store_settings() {
        let mut config = RuntimeConfig::default();
        let mod_config = ModConfig {
            keys_dir: Some(PathBuf::from("/tmp/keys")),
            compress_keys: Some(true),
            ..ModConfig::default()
        };

        config.apply(&mod_config);

        assert_eq!(config.keys_dir, PathBuf::from("/tmp/keys"));
        assert!(config.compress_keys);
    }
}
