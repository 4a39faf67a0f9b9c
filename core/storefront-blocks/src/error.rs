//! Error types for the palette and its upstream clients.

use thiserror::Error;

/// Result type for block operations.
pub type BlockResult<T> = Result<T, BlockError>;

/// Errors raised while talking to the CMS or the commerce backend.
#[derive(Debug, Error)]
pub enum BlockError {
    /// Transport failure (connection refused, timeout, TLS).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The upstream body was not the expected JSON shape.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configured base URL is unusable.
    #[error("invalid base url '{0}'")]
    InvalidBaseUrl(String),

    /// Registry construction failed.
    #[error(transparent)]
    Compose(#[from] storefront_compose::ComposeError),
}
