//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file exists but is not a path → document map.
    #[error("corrupt store {location}: {reason}")]
    Corrupt { location: String, reason: String },

    /// A stored key is not a valid page path.
    #[error("invalid stored path: {0}")]
    InvalidPath(#[from] storefront_types::Error),

    /// A lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl<T> From<std::sync::PoisonError<T>> for StorageError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StorageError::LockPoisoned
    }
}

impl From<tempfile::PersistError> for StorageError {
    fn from(e: tempfile::PersistError) -> Self {
        StorageError::Io(e.error)
    }
}
