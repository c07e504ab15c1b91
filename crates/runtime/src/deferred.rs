//! Deferred text computations awaiting finalization.

use std::collections::HashMap;

use database_core::{Deferred, RecordKind, TextField};
use indexmap::IndexMap;

/// Pending computations per record kind and text field, keyed by unique key.
///
/// Each table keeps first-registration order. Registering a key again replaces
/// its computation in place.
#[derive(Clone, Debug, Default)]
pub struct DeferredTables {
    tables: HashMap<(RecordKind, TextField), IndexMap<String, Deferred>>,
}

impl DeferredTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        kind: RecordKind,
        field: TextField,
        key: impl Into<String>,
        compute: Deferred,
    ) {
        self.tables
            .entry((kind, field))
            .or_default()
            .insert(key.into(), compute);
    }

    /// Installs the computations of a freshly built record under `key`.
    ///
    /// Fields that get a computation keep the key's position in their table.
    /// Fields without one drop any earlier registration for the key.
    pub fn replace_key(
        &mut self,
        kind: RecordKind,
        key: &str,
        computations: &[(TextField, Deferred)],
    ) {
        for field in kind.deferred_fields() {
            match computations.iter().find(|(f, _)| f == field) {
                Some((_, compute)) => self.register(kind, *field, key, compute.clone()),
                None => {
                    if let Some(table) = self.tables.get_mut(&(kind, *field)) {
                        table.shift_remove(key);
                    }
                }
            }
        }
    }

    /// Entries of one table, in registration order.
    pub fn entries(
        &self,
        kind: RecordKind,
        field: TextField,
    ) -> impl Iterator<Item = (&str, &Deferred)> + '_ {
        self.tables
            .get(&(kind, field))
            .into_iter()
            .flat_map(|table| table.iter().map(|(key, compute)| (key.as_str(), compute)))
    }

    pub fn get(&self, kind: RecordKind, field: TextField, key: &str) -> Option<&Deferred> {
        self.tables.get(&(kind, field))?.get(key)
    }

    /// Total number of registered computations.
    pub fn len(&self) -> usize {
        self.tables.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &'static str) -> Deferred {
        Deferred::new(move || value.to_owned())
    }

    fn resolved(tables: &DeferredTables) -> Vec<(String, String)> {
        tables
            .entries(RecordKind::Item, TextField::Name)
            .map(|(key, compute)| (key.to_owned(), compute.resolve()))
            .collect()
    }

    #[test]
    fn reregistering_keeps_first_position() {
        let mut tables = DeferredTables::new();
        tables.register(RecordKind::Item, TextField::Name, "a", text("A"));
        tables.register(RecordKind::Item, TextField::Name, "b", text("B"));
        tables.register(RecordKind::Item, TextField::Name, "a", text("A2"));

        assert_eq!(
            resolved(&tables),
            [("a".to_owned(), "A2".to_owned()), ("b".to_owned(), "B".to_owned())]
        );
    }

    #[test]
    fn replace_key_keeps_position_and_drops_stale_fields() {
        let mut tables = DeferredTables::new();
        tables.register(RecordKind::Item, TextField::Name, "a", text("A"));
        tables.register(RecordKind::Item, TextField::Description, "a", text("desc"));
        tables.register(RecordKind::Item, TextField::Name, "b", text("B"));

        tables.replace_key(RecordKind::Item, "a", &[(TextField::Name, text("A2"))]);

        assert_eq!(
            resolved(&tables),
            [("a".to_owned(), "A2".to_owned()), ("b".to_owned(), "B".to_owned())]
        );
        assert!(tables.get(RecordKind::Item, TextField::Description, "a").is_none());
    }

    #[test]
    fn replace_key_touches_only_that_kind() {
        let mut tables = DeferredTables::new();
        tables.register(RecordKind::Item, TextField::Name, "k", text("item"));
        tables.register(RecordKind::Item, TextField::Description, "k", text("desc"));
        tables.register(RecordKind::Armor, TextField::Name, "k", text("armor"));

        tables.replace_key(RecordKind::Item, "k", &[]);

        assert_eq!(tables.len(), 1);
        assert!(tables.get(RecordKind::Armor, TextField::Name, "k").is_some());
    }
}
