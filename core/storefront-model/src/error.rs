//! Error types for the composition model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while reading or editing model values.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A slot-typed prop did not hold a list of component instances.
    #[error("slot '{field}' is malformed: {reason}")]
    MalformedSlot { field: String, reason: String },

    /// Invalid identifier or path.
    #[error(transparent)]
    Types(#[from] storefront_types::Error),
}
