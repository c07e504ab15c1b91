//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_catalog;
mod clean;
mod dump;
mod inspect_keys;

pub use check_catalog::CheckCatalog;
pub use clean::Clean;
pub use dump::Dump;
pub use inspect_keys::InspectKeys;

use database_core::RecordKind;

/// Parses a record kind name (`actor`, `weapon`, ...).
fn parse_kind(value: &str) -> Result<RecordKind, String> {
    value
        .parse()
        .map_err(|_| format!("unknown record kind `{value}`"))
}
