//! The database context.
//!
//! [`Database`] owns everything a mod session mutates: the record collections,
//! one [`IdAllocator`] per record kind, the pending deferred text and the hook
//! registry. It is built once at startup through [`DatabaseBuilder`] and passed
//! by reference to whatever needs it.
//!
//! Every record kind gets the same set of typed entry points:
//!
//! | operation | actor example |
//! |---|---|
//! | build and store | [`Database::create_actor`] |
//! | find by unique key | [`Database::find_actor_by_key`] |
//! | search names | [`Database::find_actor`], [`Database::find_actor_details`] |
//! | text dump | [`Database::describe_actor`] |
//! | bulk import | [`Database::append_actors`] |

mod append;
mod builder;
mod create;
mod describe;
mod finalize;
mod lookup;

pub use builder::DatabaseBuilder;
pub use describe::Describe;
pub use finalize::{
    FinalizeReport, LOAD_DATABASE_EVENT, PLAYER_LOADED_EVENT, SkipReason, SkippedEntry,
};

use std::collections::BTreeMap;
use std::ops::RangeBounds;

use database_core::{
    Actor, Armor, AttrInput, Class, Item, RecordKind, SchemaSet, Skill, SymbolTables, Weapon,
};
use database_content::RecordCatalog;

use crate::allocator::IdAllocator;
use crate::collection::{Collection, Collections, Stored};
use crate::deferred::DeferredTables;
use crate::error::Result;
use crate::hooks::{HookArg, HookRegistry};
use crate::keystore::InMemoryKeyStore;

/// Explicit context for record creation, lookup and finalization.
pub struct Database {
    collections: Collections,
    /// Indexed by `RecordKind as usize`.
    allocators: Vec<IdAllocator>,
    deferred: DeferredTables,
    hooks: HookRegistry,
    symbols: SymbolTables,
    schemas: SchemaSet,
}

impl Database {
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// A database whose key bindings live only as long as the process.
    pub fn in_memory() -> Self {
        let allocators = RecordKind::ALL
            .into_iter()
            .map(|kind| IdAllocator::new(kind, Box::new(InMemoryKeyStore::new())))
            .collect();
        Self::assemble(
            allocators,
            HookRegistry::new(),
            SymbolTables::builtin(),
        )
    }

    fn assemble(
        allocators: Vec<IdAllocator>,
        hooks: HookRegistry,
        symbols: SymbolTables,
    ) -> Self {
        Self {
            collections: Collections::default(),
            allocators,
            deferred: DeferredTables::new(),
            hooks,
            symbols,
            schemas: SchemaSet::new(),
        }
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    pub fn collection<R: Stored>(&self) -> &Collection<R> {
        R::collection(&self.collections)
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    pub fn symbols(&self) -> &SymbolTables {
        &self.symbols
    }

    /// Symbol tables, for registering game-specific names.
    pub fn symbols_mut(&mut self) -> &mut SymbolTables {
        &mut self.symbols
    }

    pub fn schemas(&self) -> &SchemaSet {
        &self.schemas
    }

    pub fn deferred(&self) -> &DeferredTables {
        &self.deferred
    }

    pub fn allocator(&self, kind: RecordKind) -> &IdAllocator {
        &self.allocators[kind as usize]
    }

    fn allocator_mut(&mut self, kind: RecordKind) -> &mut IdAllocator {
        &mut self.allocators[kind as usize]
    }

    /// Every key binding of `kind`.
    pub fn key_bindings(&self, kind: RecordKind) -> Result<BTreeMap<String, u32>> {
        Ok(self.allocator(kind).bindings()?)
    }

    /// Fires `event` on the database's hook registry.
    pub fn trigger_hook(&self, event: &str, args: &mut [HookArg]) -> Result<()> {
        Ok(self.hooks.trigger_hook(event, args)?)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("collections", &self.collections)
            .field("allocators", &self.allocators)
            .field("deferred", &self.deferred.len())
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

macro_rules! typed_records {
    ($(
        $record:ident {
            create: $create:ident,
            find_by_key: $find_by_key:ident,
            find: $find:ident,
            find_details: $find_details:ident,
            describe: $describe:ident,
            append: $append:ident $(,)?
        }
    )*) => {
        impl Database {
            $(
                #[doc = concat!("Builds a [`", stringify!($record), "`] from `attributes` and stores it under the ID bound to `key`.")]
                pub fn $create(&mut self, key: &str, attributes: AttrInput) -> Result<u32> {
                    self.create::<$record>(key, attributes)
                }

                #[doc = concat!("The [`", stringify!($record), "`] bound to `key`, if it was created.")]
                pub fn $find_by_key(&self, key: &str) -> Result<Option<&$record>> {
                    self.find_by_key::<$record>(key)
                }

                #[doc = concat!("IDs of every [`", stringify!($record), "`] whose name contains `search`, ignoring case.")]
                pub fn $find(&self, search: &str) -> Vec<u32> {
                    self.find_by_name::<$record>(search)
                }

                pub fn $find_details(&self, search: &str) -> Vec<String> {
                    self.find_details::<$record>(search)
                }

                pub fn $describe(&self, id: u32) -> Option<String> {
                    self.describe::<$record>(id)
                }

                #[doc = concat!("Appends the catalog entries within `range` as [`", stringify!($record), "`]s.")]
                pub fn $append(
                    &mut self,
                    catalog: &RecordCatalog,
                    skip_empty: bool,
                    range: impl RangeBounds<usize>,
                ) -> Result<Vec<u32>> {
                    self.append_catalog::<$record>(catalog, skip_empty, range)
                }
            )*
        }
    };
}

typed_records! {
    Actor {
        create: create_actor,
        find_by_key: find_actor_by_key,
        find: find_actor,
        find_details: find_actor_details,
        describe: describe_actor,
        append: append_actors,
    }
    Class {
        create: create_class,
        find_by_key: find_class_by_key,
        find: find_class,
        find_details: find_class_details,
        describe: describe_class,
        append: append_classes,
    }
    Skill {
        create: create_skill,
        find_by_key: find_skill_by_key,
        find: find_skill,
        find_details: find_skill_details,
        describe: describe_skill,
        append: append_skills,
    }
    Item {
        create: create_item,
        find_by_key: find_item_by_key,
        find: find_item,
        find_details: find_item_details,
        describe: describe_item,
        append: append_items,
    }
    Weapon {
        create: create_weapon,
        find_by_key: find_weapon_by_key,
        find: find_weapon,
        find_details: find_weapon_details,
        describe: describe_weapon,
        append: append_weapons,
    }
    Armor {
        create: create_armor,
        find_by_key: find_armor_by_key,
        find: find_armor,
        find_details: find_armor_details,
        describe: describe_armor,
        append: append_armors,
    }
}
