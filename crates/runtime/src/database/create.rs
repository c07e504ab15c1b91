//! The `create_*` pipeline.

use database_core::{AttrInput, Attributes, BuildError, validate};
use tracing::debug;

use super::Database;
use crate::collection::Stored;
use crate::error::Result;
use crate::hooks::HookArg;

impl Database {
    /// Builds a record of type `R` and stores it under the ID bound to `key`.
    ///
    /// Steps, each aborting the call on failure:
    /// 1. the collection of `R` must be loaded
    /// 2. `attributes` are normalized and validated against the schema
    /// 3. `key` is bound to an ID (existing binding, or the next free one)
    ///
    /// Nothing is stored or allocated when one of these fails. Afterwards the
    /// record's deferred text replaces any earlier registration for `key`, the
    /// record is written at its ID and `on_<kind>_created` fires with the record
    /// as its only argument. Changes listeners make to that record are kept. A
    /// listener failure is returned after the record has been stored.
    pub fn create<R: Stored>(&mut self, key: &str, attributes: AttrInput) -> Result<u32> {
        let kind = R::KIND;
        if !R::collection(&self.collections).is_loaded() {
            return Err(BuildError::NotReady {
                kind,
                collection: kind.collection_name(),
            }
            .into());
        }

        let schema = self.schemas.get(kind);
        let attributes = Attributes::normalize(schema, attributes)?;
        let validated = validate(schema, &attributes, &self.symbols, key)?;

        let collection_max = R::collection(&self.collections).max_id();
        let id = self.allocator_mut(kind).allocate(key, collection_max)?;

        self.deferred.replace_key(kind, key, validated.deferred());

        let record = R::from_validated(id, &validated);
        let mut args = [HookArg::Record(record.clone().into_any())];
        let dispatched = self.hooks.trigger_hook(kind.created_event(), &mut args);

        let [arg] = args;
        let record = match arg {
            HookArg::Record(any) => R::from_any(any).filter(|updated| updated.id() == id),
            _ => None,
        }
        .unwrap_or(record);
        R::collection_mut(&mut self.collections).insert(record);

        debug!(
            target: "runtime::database",
            kind = %kind,
            key = %key,
            id,
            "created record"
        );

        dispatched?;
        Ok(id)
    }
}
