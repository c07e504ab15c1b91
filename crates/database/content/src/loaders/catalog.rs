//! Record catalog loader.

use std::path::Path;

use crate::catalog::RecordCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for record catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a record catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<RecordCatalog> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog {}: {}", path.display(), e))
    }

    /// Parse a record catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<RecordCatalog> {
        let catalog: RecordCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogValue;

    #[test]
    fn parses_entries_with_and_without_keys() {
        let catalog = CatalogLoader::parse(
            r#"(
                entries: [
                    (
                        key: Some("mod:blade"),
                        attributes: {
                            "name": "Blade",
                            "params": { "atk": 12 },
                            "wtype": "sword",
                        },
                    ),
                    (attributes: { "name": "Stick", "price": 5, "equips": [1, 2] }),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries[0].key.as_deref(), Some("mod:blade"));
        assert_eq!(
            catalog.entries[1].attributes.get("price"),
            Some(&CatalogValue::Int(5))
        );
        assert!(matches!(
            catalog.entries[0].attributes.get("params"),
            Some(CatalogValue::Map(_))
        ));
    }
}
