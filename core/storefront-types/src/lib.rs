//! Core type definitions for the storefront.
//!
//! This crate defines the small, domain-agnostic identifiers used throughout
//! the composition engine:
//! - Node identifiers ([`NodeId`]), stable for the life of a component instance
//! - Page paths ([`PagePath`]), the key under which a page document is stored
//!
//! Component schemas, documents and rendering live in the higher crates.

mod ids;
mod path;

pub use ids::NodeId;
pub use path::PagePath;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing core types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid node id: {0:?}")]
    InvalidNodeId(String),

    #[error("invalid page path: {path:?} ({reason})")]
    InvalidPath { path: String, reason: &'static str },
}
