//! Bulk creation from record catalogs.

use std::ops::RangeBounds;

use database_content::{ApplyLists, RecordCatalog};
use tracing::{info, warn};

use super::Database;
use crate::collection::Stored;
use crate::error::Result;

impl Database {
    /// Creates one record of type `R` per catalog entry within `range`, in order.
    ///
    /// Entries without a key get one derived from their text. With
    /// `skip_empty`, entries that have neither a name nor a description are
    /// ignored. Feature, effect and learning lists replace the built ones after
    /// creation; keys matching no field are logged and ignored. The first
    /// failing entry aborts the append; records created before it stay.
    pub fn append_catalog<R: Stored + ApplyLists>(
        &mut self,
        catalog: &RecordCatalog,
        skip_empty: bool,
        range: impl RangeBounds<usize>,
    ) -> Result<Vec<u32>> {
        let kind = R::KIND;
        let entries = catalog.slice(range);
        let mut ids = Vec::with_capacity(entries.len());
        let mut skipped = 0usize;

        for entry in entries {
            let schema = self.schemas.get(kind);
            if skip_empty && entry.is_empty(schema) {
                skipped += 1;
                continue;
            }
            for field in entry.unknown_keys(schema) {
                warn!(
                    target: "runtime::database",
                    kind = %kind,
                    field,
                    "catalog key matches no field; ignored"
                );
            }
            let lists = entry.lists(schema)?;
            let key = entry.unique_key(schema);
            let input = entry.to_input(schema);

            let id = self.create::<R>(&key, input)?;
            if !lists.is_empty() {
                if let Some(record) = R::collection_mut(&mut self.collections).get_mut(id) {
                    record.apply_lists(lists);
                }
            }
            ids.push(id);
        }

        info!(
            target: "runtime::database",
            kind = %kind,
            created = ids.len(),
            skipped,
            "appended catalog"
        );

        Ok(ids)
    }
}
