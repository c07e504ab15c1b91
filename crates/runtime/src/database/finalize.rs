//! Finalization of deferred text and the load lifecycle.

use database_core::{Actor, Armor, Class, Item, RecordKind, Skill, Text, TextField, Weapon};
use serde::Serialize;
use tracing::{info, warn};

use super::Database;
use crate::collection::{Collection, Stored};
use crate::error::Result;
use crate::hooks::HookArg;

/// Event fired once collections are installed.
pub const LOAD_DATABASE_EVENT: &str = "on_load_database";

/// Event fired after the finalization pass.
pub const PLAYER_LOADED_EVENT: &str = "player_loaded";

/// Why a deferred value could not be written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The key has no ID binding.
    UnboundKey,
    /// The bound ID holds no record.
    MissingRecord { id: u32 },
    /// The key store could not be read.
    Store { message: String },
}

/// A deferred value left unresolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub kind: RecordKind,
    pub field: TextField,
    pub key: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Outcome of a finalization pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FinalizeReport {
    /// Number of text fields written.
    pub resolved: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl FinalizeReport {
    fn merge(&mut self, other: FinalizeReport) {
        self.resolved += other.resolved;
        self.skipped.extend(other.skipped);
    }
}

impl Database {
    /// Installs an empty collection for every kind that has none and fires
    /// `on_load_database`.
    pub fn load_collections(&mut self) -> Result<()> {
        self.collections.load_all();
        let mut args: [HookArg; 0] = [];
        self.trigger_hook(LOAD_DATABASE_EVENT, &mut args)
    }

    /// Replaces the collection of `R` with `records`, each at its own ID.
    pub fn load_collection<R: Stored>(&mut self, records: impl IntoIterator<Item = R>) {
        *R::collection_mut(&mut self.collections) = Collection::loaded(records);
    }

    /// Writes the result of every registered deferred computation of `kind`
    /// into its record.
    ///
    /// Fields are processed in the kind's fixed order and keys in registration
    /// order. Entries whose record cannot be found are logged and reported as
    /// skipped. Registrations stay in place, so a later pass evaluates them again.
    pub fn finalize(&mut self, kind: RecordKind) -> FinalizeReport {
        match kind {
            RecordKind::Actor => self.finalize_records::<Actor>(),
            RecordKind::Class => self.finalize_records::<Class>(),
            RecordKind::Skill => self.finalize_records::<Skill>(),
            RecordKind::Item => self.finalize_records::<Item>(),
            RecordKind::Weapon => self.finalize_records::<Weapon>(),
            RecordKind::Armor => self.finalize_records::<Armor>(),
        }
    }

    /// Finalizes every kind, then fires `player_loaded`.
    ///
    /// The report covers all kinds even when a listener fails; the listener
    /// error is returned instead of it in that case.
    pub fn player_loaded(&mut self) -> Result<FinalizeReport> {
        let mut report = FinalizeReport::default();
        for kind in RecordKind::ALL {
            report.merge(self.finalize(kind));
        }

        info!(
            target: "runtime::finalize",
            resolved = report.resolved,
            skipped = report.skipped.len(),
            "finalized deferred values"
        );

        let mut args: [HookArg; 0] = [];
        self.trigger_hook(PLAYER_LOADED_EVENT, &mut args)?;
        Ok(report)
    }

    fn finalize_records<R: Stored>(&mut self) -> FinalizeReport {
        let kind = R::KIND;
        let mut report = FinalizeReport::default();

        for &field in kind.deferred_fields() {
            for (key, compute) in self.deferred.entries(kind, field) {
                let reason = match self.allocators[kind as usize].lookup(key) {
                    Ok(Some(id)) => {
                        let slot = R::collection_mut(&mut self.collections)
                            .get_mut(id)
                            .and_then(|record| record.text_mut(field));
                        match slot {
                            Some(text) => {
                                *text = Text::Literal(compute.resolve());
                                report.resolved += 1;
                                continue;
                            }
                            None => SkipReason::MissingRecord { id },
                        }
                    }
                    Ok(None) => SkipReason::UnboundKey,
                    Err(e) => SkipReason::Store {
                        message: e.to_string(),
                    },
                };

                warn!(
                    target: "runtime::finalize",
                    kind = %kind,
                    field = %field,
                    key = %key,
                    reason = ?reason,
                    "skipped deferred value"
                );
                report.skipped.push(SkippedEntry {
                    kind,
                    field,
                    key: key.to_owned(),
                    reason,
                });
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use database_core::{AttrInput, AttrValue};

    use super::*;

    #[test]
    fn recreated_keys_resolve_in_first_registration_order() {
        let mut db = Database::in_memory();
        db.load_collections().unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        let lazy_name = |key: &'static str| {
            let order = Arc::clone(&order);
            AttrInput::keyed([(
                "name",
                AttrValue::lazy(move || {
                    order.lock().unwrap().push(key);
                    key.to_uppercase()
                }),
            )])
        };

        for key in ["a", "b", "a"] {
            db.create_item(key, lazy_name(key)).unwrap();
        }
        let report = db.finalize(RecordKind::Item);

        assert_eq!(report.resolved, 2);
        assert_eq!(*order.lock().unwrap(), ["a", "b"]);
    }

    #[test]
    fn pending_names_resolve_in_place() {
        let mut db = Database::in_memory();
        db.load_collections().unwrap();
        let id = db
            .create_class(
                "mod:sage",
                AttrInput::keyed([("name", AttrValue::lazy(|| "Sage".to_owned()))]),
            )
            .unwrap();
        assert!(db.collections().classes.get(id).unwrap().name.is_pending());

        let report = db.finalize(RecordKind::Class);

        assert_eq!(report.resolved, 1);
        assert_eq!(db.collections().classes.get(id).unwrap().name.as_str(), "Sage");
    }

    #[test]
    fn missing_records_are_skipped() {
        let mut db = Database::in_memory();
        db.load_collections().unwrap();
        let id = db
            .create_item(
                "mod:gem",
                AttrInput::keyed([("desc", AttrValue::lazy(|| "Shiny".to_owned()))]),
            )
            .unwrap();
        db.load_collection::<Item>([]);

        let report = db.finalize(RecordKind::Item);

        assert_eq!(report.resolved, 0);
        assert_eq!(
            report.skipped,
            [SkippedEntry {
                kind: RecordKind::Item,
                field: TextField::Description,
                key: "mod:gem".into(),
                reason: SkipReason::MissingRecord { id },
            }]
        );
    }
}
