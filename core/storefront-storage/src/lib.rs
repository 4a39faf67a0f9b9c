//! Page document persistence for the storefront.
//!
//! Stores one [`Document`] per [`PagePath`]. Saves replace the whole
//! document for a path (last write wins, no merge); reads never observe a
//! half-written document.
//!
//! # Backends
//!
//! - [`FileStore`]: all pages in one JSON file keyed by path, rewritten via
//!   temp file + rename
//! - [`MemoryStore`]: process-local map, for tests and previews

mod error;
mod file_store;
mod memory_store;

pub use error::{StorageError, StorageResult};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use storefront_model::Document;
use storefront_types::PagePath;
use tracing::warn;

/// A mapping from page path to document.
pub trait DocumentStore: Send + Sync {
    /// Loads the document stored for `path`, `None` if there is none.
    fn load(&self, path: &PagePath) -> StorageResult<Option<Document>>;

    /// Replaces the document stored for `path` in its entirety.
    fn save(&self, path: &PagePath, document: &Document) -> StorageResult<()>;

    /// Removes the document for `path`. Returns whether one existed.
    fn remove(&self, path: &PagePath) -> StorageResult<bool>;

    /// All paths with a stored document.
    fn paths(&self) -> StorageResult<Vec<PagePath>>;

    /// Loads `path`, treating a missing or unreadable document as absent.
    fn load_or_empty(&self, path: &PagePath) -> Document {
        match self.load(path) {
            Ok(Some(doc)) => doc,
            Ok(None) => Document::empty(),
            Err(e) => {
                warn!(path = %path, error = %e, "Unreadable page document, using empty document");
                Document::empty()
            }
        }
    }
}
