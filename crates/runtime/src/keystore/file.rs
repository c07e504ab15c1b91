//! File-based KeyStore implementation.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use database_core::RecordKind;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use super::{KeyStore, KeyStoreError, Result};

/// Key store persisted as a single file per record kind.
///
/// # File Format
///
/// The whole `key → id` map is serialized with bincode, optionally wrapped in
/// a zlib stream. A missing or empty file reads as an empty map. Writes go to a
/// temporary file that is renamed over the original, so a crash never leaves a
/// half-written store behind.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
    compressed: bool,
}

impl FileKeyStore {
    /// Create a store backed by `path`, creating its parent directory.
    pub fn new(path: impl Into<PathBuf>, compressed: bool) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path, compressed })
    }

    /// Create the store for `kind` inside `dir`, e.g. `dir/weapon_keys.dat`.
    pub fn for_kind(dir: impl AsRef<Path>, kind: RecordKind, compressed: bool) -> Result<Self> {
        Self::new(dir.as_ref().join(kind.key_file_name()), compressed)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    fn read_map(&self) -> Result<BTreeMap<String, u32>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read(&self.path)?;
        if raw.is_empty() {
            return Ok(BTreeMap::new());
        }

        let bytes = if self.compressed {
            let mut decoded = Vec::new();
            ZlibDecoder::new(raw.as_slice())
                .read_to_end(&mut decoded)
                .map_err(|e| KeyStoreError::Compression(e.to_string()))?;
            decoded
        } else {
            raw
        };

        let map = bincode::deserialize(&bytes)
            .map_err(|e| KeyStoreError::Serialization(e.to_string()))?;

        tracing::debug!(
            target: "runtime::keystore",
            path = %self.path.display(),
            "loaded key store"
        );

        Ok(map)
    }

    fn write_map(&self, map: &BTreeMap<String, u32>) -> Result<()> {
        let bytes =
            bincode::serialize(map).map_err(|e| KeyStoreError::Serialization(e.to_string()))?;

        let payload = if self.compressed {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder
                .write_all(&bytes)
                .map_err(|e| KeyStoreError::Compression(e.to_string()))?;
            encoder
                .finish()
                .map_err(|e| KeyStoreError::Compression(e.to_string()))?
        } else {
            bytes
        };

        let temp_path = self.path.with_extension("dat.tmp");
        fs::write(&temp_path, payload)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            target: "runtime::keystore",
            path = %self.path.display(),
            entries = map.len(),
            "saved key store"
        );

        Ok(())
    }
}

impl KeyStore for FileKeyStore {
    fn load(&self, key: &str) -> Result<Option<u32>> {
        Ok(self.read_map()?.get(key).copied())
    }

    fn load_all(&self) -> Result<BTreeMap<String, u32>> {
        self.read_map()
    }

    fn save(&self, key: &str, id: u32) -> Result<()> {
        if key.is_empty() {
            return Err(KeyStoreError::InvalidKey);
        }
        let mut map = self.read_map()?;
        map.insert(key.to_owned(), id);
        self.write_map(&map)
    }
}
