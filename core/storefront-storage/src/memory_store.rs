//! In-memory store.

use crate::error::StorageResult;
use crate::DocumentStore;
use std::collections::BTreeMap;
use std::sync::RwLock;
use storefront_model::Document;
use storefront_types::PagePath;

/// Process-local document store.
#[derive(Default)]
pub struct MemoryStore {
    pages: RwLock<BTreeMap<PagePath, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `pages`.
    pub fn with_pages(pages: impl IntoIterator<Item = (PagePath, Document)>) -> Self {
        Self {
            pages: RwLock::new(pages.into_iter().collect()),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, path: &PagePath) -> StorageResult<Option<Document>> {
        Ok(self.pages.read()?.get(path).cloned())
    }

    fn save(&self, path: &PagePath, document: &Document) -> StorageResult<()> {
        self.pages.write()?.insert(path.clone(), document.clone());
        Ok(())
    }

    fn remove(&self, path: &PagePath) -> StorageResult<bool> {
        Ok(self.pages.write()?.remove(path).is_some())
    }

    fn paths(&self) -> StorageResult<Vec<PagePath>> {
        Ok(self.pages.read()?.keys().cloned().collect())
    }
}
