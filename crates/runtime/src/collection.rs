//! Record collections indexed by ID.
//!
//! A collection mirrors the engine's data arrays: slot 0 is never used and
//! slots may be empty. A collection that was never loaded rejects every write,
//! which is what `create_*` reports as not ready.

use database_core::{Actor, Armor, Class, Item, Record, RecordKind, Skill, Weapon};

#[derive(Clone, Debug)]
pub struct Collection<T> {
    slots: Option<Vec<Option<T>>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { slots: None }
    }
}

impl<T: Record> Collection<T> {
    /// An unloaded collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loaded collection holding `records` at their own IDs.
    pub fn loaded(records: impl IntoIterator<Item = T>) -> Self {
        let mut collection = Self {
            slots: Some(vec![None]),
        };
        for record in records {
            collection.insert(record);
        }
        collection
    }

    pub fn is_loaded(&self) -> bool {
        self.slots.is_some()
    }

    /// Marks the collection as loaded, keeping existing records.
    pub fn ensure_loaded(&mut self) {
        if self.slots.is_none() {
            self.slots = Some(vec![None]);
        }
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.slots.as_ref()?.get(id as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.slots.as_mut()?.get_mut(id as usize)?.as_mut()
    }

    /// Stores `record` at its ID, growing the collection as needed.
    ///
    /// Returns the record previously stored at that ID. Inserting into an
    /// unloaded collection loads it first.
    pub fn insert(&mut self, record: T) -> Option<T> {
        let index = record.id() as usize;
        let slots = self.slots.get_or_insert_with(|| vec![None]);
        if slots.len() <= index {
            slots.resize_with(index + 1, || None);
        }
        slots[index].replace(record)
    }

    /// Highest occupied ID, 0 when empty.
    pub fn max_id(&self) -> u32 {
        self.slots
            .as_ref()
            .and_then(|slots| slots.iter().rposition(Option::is_some))
            .map_or(0, |index| index as u32)
    }

    /// Occupied slots in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().flatten().flatten()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The six record collections of a database.
#[derive(Clone, Debug, Default)]
pub struct Collections {
    pub actors: Collection<Actor>,
    pub classes: Collection<Class>,
    pub skills: Collection<Skill>,
    pub items: Collection<Item>,
    pub weapons: Collection<Weapon>,
    pub armors: Collection<Armor>,
}

impl Collections {
    pub fn is_loaded(&self, kind: RecordKind) -> bool {
        match kind {
            RecordKind::Actor => self.actors.is_loaded(),
            RecordKind::Class => self.classes.is_loaded(),
            RecordKind::Skill => self.skills.is_loaded(),
            RecordKind::Item => self.items.is_loaded(),
            RecordKind::Weapon => self.weapons.is_loaded(),
            RecordKind::Armor => self.armors.is_loaded(),
        }
    }

    pub fn max_id(&self, kind: RecordKind) -> u32 {
        match kind {
            RecordKind::Actor => self.actors.max_id(),
            RecordKind::Class => self.classes.max_id(),
            RecordKind::Skill => self.skills.max_id(),
            RecordKind::Item => self.items.max_id(),
            RecordKind::Weapon => self.weapons.max_id(),
            RecordKind::Armor => self.armors.max_id(),
        }
    }

    /// Marks every collection as loaded.
    pub fn load_all(&mut self) {
        self.actors.ensure_loaded();
        self.classes.ensure_loaded();
        self.skills.ensure_loaded();
        self.items.ensure_loaded();
        self.weapons.ensure_loaded();
        self.armors.ensure_loaded();
    }
}

/// Records the database can store, tied to their collection.
pub trait Stored: Record {
    fn collection(collections: &Collections) -> &Collection<Self>;

    fn collection_mut(collections: &mut Collections) -> &mut Collection<Self>;
}

macro_rules! stored {
    ($record:ty, $field:ident) => {
        impl Stored for $record {
            fn collection(collections: &Collections) -> &Collection<Self> {
                &collections.$field
            }

            fn collection_mut(collections: &mut Collections) -> &mut Collection<Self> {
                &mut collections.$field
            }
        }
    };
}

stored!(Actor, actors);
stored!(Class, classes);
stored!(Skill, skills);
stored!(Item, items);
stored!(Weapon, weapons);
stored!(Armor, armors);

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon(id: u32, name: &str) -> Weapon {
        Weapon {
            id,
            name: name.into(),
            ..Weapon::default()
        }
    }

    #[test]
    fn unloaded_collection_is_empty() {
        let weapons = Collection::<Weapon>::new();
        assert!(!weapons.is_loaded());
        assert_eq!(weapons.max_id(), 0);
        assert!(weapons.get(1).is_none());
    }

    #[test]
    fn max_id_skips_holes() {
        let weapons = Collection::loaded([weapon(1, "Club"), weapon(2, "Axe"), weapon(4, "Bow")]);

        assert_eq!(weapons.max_id(), 4);
        assert_eq!(weapons.len(), 3);
        assert!(weapons.get(3).is_none());
        assert_eq!(weapons.get(4).map(|w| w.name.as_str()), Some("Bow"));
    }

    #[test]
    fn insert_replaces_existing_slot() {
        let mut weapons = Collection::loaded([weapon(2, "Axe")]);
        let previous = weapons.insert(weapon(2, "Great Axe"));

        assert_eq!(previous.map(|w| w.name), Some("Axe".into()));
        assert_eq!(weapons.len(), 1);
    }
}
