//! Error types raised by repository implementations.

use thiserror::Error;

use super::EntityKey;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("gathering store lock was poisoned")]
    LockPoisoned,

    /// A change set was built from a read that is no longer current.
    #[error("{entity} changed since it was read (expected {expected:?}, found {found:?})")]
    Conflict {
        entity: EntityKey,
        expected: Option<u64>,
        found: Option<u64>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
