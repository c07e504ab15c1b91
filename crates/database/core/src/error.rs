//! Common error infrastructure for database-core.
//!
//! Every error raised while building records is a [`BuildError`]. The variants
//! mirror the stages of the builder pipeline: the collection precondition, the
//! argument shape check and the per-field validation rules.
//!
//! # Design Principles
//!
//! - **No partial commits**: an error aborts the whole `create_*` call
//! - **Named context**: variants carry the field, symbol or table involved
//! - **Severity Classification**: `NotReady` is the only recoverable condition

use crate::kind::RecordKind;
use crate::symbols::TableKind;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the call may succeed later without changes (e.g. after the
///   database finished loading)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected failures of collaborators (storage, listeners)
/// - **Fatal**: state can no longer be trusted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry once the missing precondition holds.
    Recoverable,

    /// Invalid input, should not retry without changes.
    Validation,

    /// Collaborator failure that requires investigation.
    Internal,

    /// Unrecoverable.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all errors raised by the database crates.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait ModError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable error code for this error variant.
    ///
    /// Codes are `SCREAMING_SNAKE_CASE` and prefixed by the error family.
    fn error_code(&self) -> &'static str;
}

/// Errors raised while validating attributes and building records.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The target collection has not been loaded yet.
    #[error(
        "failed to create {kind}: `{collection}` not loaded; wait on the database to load before creating {kind}s"
    )]
    NotReady {
        kind: RecordKind,
        collection: &'static str,
    },

    /// More positional values than the record schema defines.
    #[error("wrong number of arguments for `create_{kind}`: got {got}, expected {max} or less")]
    ArgumentCount {
        kind: RecordKind,
        got: usize,
        max: usize,
    },

    /// A field received a value of the wrong type.
    #[error("`{field}` must be {expected}, but got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A symbolic reference was not found in its table.
    #[error("unknown symbol `:{symbol}` (not in {table})")]
    UnknownSymbol { symbol: String, table: TableKind },

    /// An array or mapping field has the wrong length or element type.
    #[error("`{field}` must be {expected}, but got {found}")]
    ShapeMismatch {
        field: &'static str,
        expected: String,
        found: String,
    },

    /// A parameter curve formula could not be parsed or evaluated.
    #[error("`{field}` has an invalid curve formula `{formula}`: {reason}")]
    InvalidFormula {
        field: &'static str,
        formula: String,
        reason: String,
    },
}

impl BuildError {
    /// Returns true for the precondition failure callers are expected to defer on.
    pub const fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady { .. })
    }
}

impl ModError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotReady { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotReady { .. } => "BUILD_NOT_READY",
            Self::ArgumentCount { .. } => "BUILD_ARGUMENT_COUNT",
            Self::TypeMismatch { .. } => "BUILD_TYPE_MISMATCH",
            Self::UnknownSymbol { .. } => "BUILD_UNKNOWN_SYMBOL",
            Self::ShapeMismatch { .. } => "BUILD_SHAPE_MISMATCH",
            Self::InvalidFormula { .. } => "BUILD_INVALID_FORMULA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_names_kind_and_collection() {
        let err = BuildError::NotReady {
            kind: RecordKind::Weapon,
            collection: RecordKind::Weapon.collection_name(),
        };
        let message = err.to_string();

        assert!(message.contains("weapon"));
        assert!(message.contains("data_weapons"));
        assert!(err.severity().is_recoverable());
        assert!(err.is_not_ready());
    }

    #[test]
    fn validation_errors_are_not_recoverable() {
        let err = BuildError::UnknownSymbol {
            symbol: "all_enemys".into(),
            table: TableKind::Scope,
        };

        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "BUILD_UNKNOWN_SYMBOL");
        assert_eq!(err.to_string(), "unknown symbol `:all_enemys` (not in SCOPE_SYMBOLS)");
    }
}
