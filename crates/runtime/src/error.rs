//! Unified error type surfaced by the database context.

use database_core::{BuildError, ErrorSeverity, ModError};
use thiserror::Error;

use crate::hooks::HookError;
use crate::keystore::KeyStoreError;

pub type Result<T> = std::result::Result<T, DatabaseError>;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Store(#[from] KeyStoreError),

    #[error(transparent)]
    Hook(#[from] HookError),
}

impl DatabaseError {
    /// True when the target collection was not loaded yet.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::Build(e) if e.is_not_ready())
    }
}

impl ModError for DatabaseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Build(e) => e.severity(),
            Self::Store(e) => e.severity(),
            Self::Hook(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Build(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Hook(e) => e.error_code(),
        }
    }
}
