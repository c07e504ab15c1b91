//! Record lookup by key, ID and name.

use database_core::Record;

use super::Database;
use crate::collection::Stored;
use crate::error::Result;

impl Database {
    pub fn get<R: Stored>(&self, id: u32) -> Option<&R> {
        R::collection(&self.collections).get(id)
    }

    /// The record bound to `key`; `None` when the key is unbound or its slot
    /// is empty.
    pub fn find_by_key<R: Stored>(&self, key: &str) -> Result<Option<&R>> {
        let id = self.allocator(R::KIND).lookup(key)?;
        Ok(id.and_then(|id| self.get::<R>(id)))
    }

    /// IDs of records whose name contains `search`, ignoring case.
    pub fn find_by_name<R: Stored>(&self, search: &str) -> Vec<u32> {
        self.matching::<R>(search).map(Record::id).collect()
    }

    /// Like [`Database::find_by_name`], formatted as `"ID: 3 Name: Potion"`.
    pub fn find_details<R: Stored>(&self, search: &str) -> Vec<String> {
        self.matching::<R>(search)
            .map(|record| format!("ID: {} Name: {}", record.id(), record.name()))
            .collect()
    }

    fn matching<'a, R: Stored>(&'a self, search: &str) -> impl Iterator<Item = &'a R> + 'a {
        let needle = search.to_lowercase();
        R::collection(&self.collections)
            .iter()
            .filter(move |record| record.name().as_str().to_lowercase().contains(&needle))
    }
}
