use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use storefront_model::Document;
use storefront_storage::{DocumentStore, FileStore, MemoryStore, StorageError};
use storefront_types::PagePath;
use tempfile::TempDir;

fn path(p: &str) -> PagePath {
    PagePath::parse(p).unwrap()
}

fn buy_document() -> Document {
    serde_json::from_value(json!({
        "root": {"props": {"title": "Buy"}},
        "content": [
            {"type": "Heading", "props": {"id": "h1", "text": "Buy"}},
            {"type": "Text", "props": {"id": "t1", "text": "hello"}}
        ]
    }))
    .unwrap()
}

fn file_store(dir: &TempDir) -> FileStore {
    FileStore::open(dir.path().join("puck-data.json"))
}

// ── FileStore ────────────────────────────────────────────────────

#[test]
fn missing_file_loads_nothing() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    assert!(store.load(&path("/no-such-page")).unwrap().is_none());
    assert!(store.paths().unwrap().is_empty());
}

#[test]
fn save_then_load_returns_exact_document() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    let doc = buy_document();

    store.save(&path("/buy"), &doc).unwrap();
    let loaded = store.load(&path("/buy")).unwrap().unwrap();

    assert_eq!(loaded, doc);
    assert_eq!(loaded.content[0].id().as_str(), "h1");
    assert_eq!(loaded.content[1].get_str("/text"), Some("hello"));
}

#[test]
fn save_replaces_whole_document() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    store.save(&path("/buy"), &buy_document()).unwrap();
    store.save(&path("/buy"), &Document::empty()).unwrap();

    let loaded = store.load(&path("/buy")).unwrap().unwrap();
    assert_eq!(loaded, Document::empty());
}

#[test]
fn save_keeps_other_paths() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    store.save(&path("/"), &buy_document()).unwrap();
    store.save(&path("/rent"), &Document::empty()).unwrap();

    let mut paths = store.paths().unwrap();
    paths.sort();
    assert_eq!(paths, vec![path("/"), path("/rent")]);
    assert!(store.load(&path("/")).unwrap().is_some());
}

#[test]
fn file_is_pretty_printed_path_map() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    store.save(&path("/buy"), &buy_document()).unwrap();

    let raw = std::fs::read_to_string(store.file()).unwrap();
    assert!(raw.starts_with("{\n  \"/buy\": {"));
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["/buy"]["content"][0]["props"]["id"], json!("h1"));
}

#[test]
fn no_temp_files_left_behind() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    store.save(&path("/buy"), &buy_document()).unwrap();
    store.save(&path("/sell"), &buy_document()).unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn corrupt_file_fails_load_and_save() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    std::fs::write(store.file(), "{ not json").unwrap();

    assert!(store.load(&path("/buy")).is_err());
    assert!(store.save(&path("/buy"), &buy_document()).is_err());
    assert_eq!(std::fs::read_to_string(store.file()).unwrap(), "{ not json");
}

#[test]
fn non_object_file_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    std::fs::write(store.file(), "[]").unwrap();
    assert!(matches!(
        store.load(&path("/")),
        Err(StorageError::Corrupt { .. })
    ));
}

#[test]
fn malformed_entry_does_not_hide_other_pages() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    std::fs::write(
        store.file(),
        r#"{"/bad": 5, "/good": {"content": [], "root": {}}}"#,
    )
    .unwrap();

    assert!(store.load(&path("/bad")).is_err());
    assert_eq!(store.load(&path("/good")).unwrap(), Some(Document::empty()));
}

#[test]
fn malformed_top_level_node_drops_only_that_node() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    std::fs::write(
        store.file(),
        json!({
            "/buy": {
                "root": {},
                "content": [
                    {"type": "Heading", "props": {"id": "h1", "text": "Buy"}},
                    {"type": "Text", "props": {"id": 7}},
                    {"type": "Text"},
                    {"type": "Text", "props": {"id": "t2", "text": "after"}}
                ]
            }
        })
        .to_string(),
    )
    .unwrap();

    let doc = store.load(&path("/buy")).unwrap().unwrap();
    let ids: Vec<&str> = doc.content.iter().map(|n| n.id().as_str()).collect();
    assert_eq!(ids, ["h1", "t2"]);
}

#[test]
fn non_array_content_loads_as_empty_page() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    std::fs::write(store.file(), r#"{"/buy": {"content": "oops", "root": {}}}"#).unwrap();
    assert_eq!(store.load(&path("/buy")).unwrap(), Some(Document::empty()));
}

#[test]
fn load_or_empty_degrades() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    std::fs::write(store.file(), "garbage").unwrap();
    assert_eq!(store.load_or_empty(&path("/buy")), Document::empty());
}

#[test]
fn remove_page() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    store.save(&path("/buy"), &buy_document()).unwrap();
    assert!(store.remove(&path("/buy")).unwrap());
    assert!(!store.remove(&path("/buy")).unwrap());
    assert!(store.load(&path("/buy")).unwrap().is_none());
}

#[test]
fn creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("data").join("pages.json"));
    store.save(&path("/"), &Document::empty()).unwrap();
    assert!(store.file().exists());
}

#[test]
fn concurrent_saves_last_write_wins_without_tearing() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(file_store(&dir));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let mut doc = buy_document();
                doc.root.props.as_mut().unwrap().insert("title".into(), json!(format!("v{i}")));
                store.save(&path("/buy"), &doc).unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let loaded = store.load(&path("/buy")).unwrap().unwrap();
    let title = loaded.title().unwrap();
    assert!(title.starts_with('v'));
    assert_eq!(loaded.content.len(), 2);
}

// ── MemoryStore ──────────────────────────────────────────────────

#[test]
fn memory_store_roundtrip() {
    let store = MemoryStore::new();
    assert!(store.load(&path("/buy")).unwrap().is_none());
    store.save(&path("/buy"), &buy_document()).unwrap();
    assert_eq!(store.load(&path("/buy")).unwrap(), Some(buy_document()));
    assert_eq!(store.paths().unwrap(), vec![path("/buy")]);
}

#[test]
fn memory_store_with_pages() {
    let store = MemoryStore::with_pages([(path("/"), buy_document())]);
    assert_eq!(store.load_or_empty(&path("/")).title(), Some("Buy"));
    assert_eq!(store.load_or_empty(&path("/nope")), Document::empty());
}
