//! Error types raised by key store implementations.

use database_core::{ErrorSeverity, ModError};
use thiserror::Error;

/// Errors surfaced by key store implementations.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("key store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("compression error: {0}")]
    Compression(String),

    #[error("unique keys must not be empty")]
    InvalidKey,

    #[error("no IDs left above {last}")]
    Exhausted { last: u32 },
}

impl ModError for KeyStoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidKey => ErrorSeverity::Validation,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "STORE_LOCK_POISONED",
            Self::Io(_) => "STORE_IO",
            Self::Serialization(_) => "STORE_SERIALIZATION",
            Self::Compression(_) => "STORE_COMPRESSION",
            Self::InvalidKey => "STORE_INVALID_KEY",
            Self::Exhausted { .. } => "STORE_EXHAUSTED",
        }
    }
}

pub type Result<T> = std::result::Result<T, KeyStoreError>;
