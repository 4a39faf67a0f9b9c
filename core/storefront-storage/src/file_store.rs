//! Single-file JSON store.
//!
//! The file is one JSON object mapping page path to document, pretty-printed
//! with two-space indentation:
//!
//! ```json
//! {
//!   "/": { "root": { "props": { "title": "..." } }, "content": [ ... ] },
//!   "/buy": { ... }
//! }
//! ```
//!
//! Entries are parsed lazily per path, so one malformed page never hides
//! the others. Every save rewrites the file through a temporary sibling and
//! an atomic rename.

use crate::error::{StorageError, StorageResult};
use crate::DocumentStore;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use storefront_model::Document;
use storefront_types::PagePath;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Document store backed by one JSON file.
pub struct FileStore {
    file: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens a store at `file`. The file is created on first save.
    pub fn open(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Reads the raw path → document map. A missing file is an empty map.
    fn read_all(&self) -> StorageResult<Map<String, Value>> {
        let contents = match std::fs::read_to_string(&self.file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(map) => Ok(map),
            _ => Err(StorageError::Corrupt {
                location: self.file.display().to_string(),
                reason: "top level is not an object".to_string(),
            }),
        }
    }

    fn write_all(&self, all: &Map<String, Value>) -> StorageResult<()> {
        let dir = match self.file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, all)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.file)?;
        Ok(())
    }
}

impl DocumentStore for FileStore {
    fn load(&self, path: &PagePath) -> StorageResult<Option<Document>> {
        let mut all = self.read_all()?;
        match all.remove(path.as_str()) {
            Some(raw) => {
                let doc: Document = serde_json::from_value(raw)?;
                debug!(path = %path, nodes = doc.content.len(), "Loaded page document");
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    fn save(&self, path: &PagePath, document: &Document) -> StorageResult<()> {
        let _guard = self.write_lock.lock()?;
        let mut all = self.read_all()?;
        all.insert(path.to_string(), serde_json::to_value(document)?);
        self.write_all(&all)?;
        info!(path = %path, nodes = document.content.len(), "Saved page document");
        Ok(())
    }

    fn remove(&self, path: &PagePath) -> StorageResult<bool> {
        let _guard = self.write_lock.lock()?;
        let mut all = self.read_all()?;
        if all.remove(path.as_str()).is_none() {
            return Ok(false);
        }
        self.write_all(&all)?;
        info!(path = %path, "Removed page document");
        Ok(true)
    }

    fn paths(&self) -> StorageResult<Vec<PagePath>> {
        self.read_all()?
            .keys()
            .map(|k| PagePath::parse(k).map_err(StorageError::from))
            .collect()
    }
}
