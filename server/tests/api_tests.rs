use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use storefront_blocks::{palette, Catalog, NoContent, Product, StaticProducts};
use storefront_model::Document;
use storefront_server::{build_router, AppState};
use storefront_storage::{DocumentStore, MemoryStore, StorageError, StorageResult};
use storefront_types::PagePath;

fn test_state(store: Arc<dyn DocumentStore>) -> AppState {
    let products = Arc::new(StaticProducts(vec![Product {
        id: "prod_1".into(),
        title: "Yard Sign".into(),
        handle: "yard-sign".into(),
        thumbnail: String::new(),
        price: "$19.99".into(),
    }]));
    let registry = Arc::new(palette(Catalog::new(products.clone(), products)).unwrap());
    AppState::new(registry, store, Arc::new(NoContent))
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
async fn spawn_test_server(state: AppState) -> String {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

async fn spawn_with_memory() -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let base = spawn_test_server(test_state(store.clone())).await;
    (base, store)
}

fn buy_page() -> Value {
    json!({
        "content": [
            { "type": "Heading", "props": { "id": "h1", "text": "Buy" } },
            { "type": "Text", "props": { "id": "t1", "text": "hello" } }
        ],
        "root": { "props": { "title": "Buy a Home" } }
    })
}

/// Rejects every write.
struct ReadOnlyStore;

impl DocumentStore for ReadOnlyStore {
    fn load(&self, _path: &PagePath) -> StorageResult<Option<Document>> {
        Ok(None)
    }

    fn save(&self, _path: &PagePath, _document: &Document) -> StorageResult<()> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }

    fn remove(&self, _path: &PagePath) -> StorageResult<bool> {
        Ok(false)
    }

    fn paths(&self) -> StorageResult<Vec<PagePath>> {
        Ok(Vec::new())
    }
}

// ── Composition ─────────────────────────────────────────────────

#[tokio::test]
async fn missing_page_is_empty_document() {
    let (base, _) = spawn_with_memory().await;
    let resp = reqwest::get(format!("{}/api/composition?path=/no-such-page", base))
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "root": {}, "content": [] }));
}

#[tokio::test]
async fn invalid_path_degrades_to_empty_document() {
    let (base, _) = spawn_with_memory().await;
    let resp = reqwest::get(format!("{}/api/composition?path=no-slash", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["content"], json!([]));
}

#[tokio::test]
async fn save_then_load_returns_saved_document() {
    let (base, store) = spawn_with_memory().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/composition?path=/buy", base))
        .json(&buy_page())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));

    let loaded: Value = client
        .get(format!("{}/api/composition?path=/buy", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(loaded, buy_page());

    let stored = store.load(&PagePath::parse("/buy").unwrap()).unwrap().unwrap();
    assert_eq!(stored.title(), Some("Buy a Home"));
}

#[tokio::test]
async fn save_without_path_targets_home() {
    let (base, store) = spawn_with_memory().await;
    reqwest::Client::new()
        .post(format!("{}/api/composition", base))
        .json(&buy_page())
        .send()
        .await
        .unwrap();
    assert!(store.load(&PagePath::root()).unwrap().is_some());
}

#[tokio::test]
async fn failed_write_is_500() {
    let base = spawn_test_server(test_state(Arc::new(ReadOnlyStore))).await;
    let resp = reqwest::Client::new()
        .post(format!("{}/api/composition?path=/buy", base))
        .json(&buy_page())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to save data" }));
}

#[tokio::test]
async fn disallowed_nodes_pruned_on_load() {
    let store = Arc::new(MemoryStore::new());
    let doc: Document = serde_json::from_value(json!({
        "content": [{
            "type": "Grid",
            "props": {
                "id": "g1",
                "items": [
                    { "type": "Hero", "props": { "id": "hero-1" } },
                    { "type": "Card", "props": { "id": "c1" } }
                ]
            }
        }]
    }))
    .unwrap();
    store.save(&PagePath::root(), &doc).unwrap();
    let base = spawn_test_server(test_state(store)).await;

    let body: Value = reqwest::get(format!("{}/api/composition?path=/", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = body["content"][0]["props"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["props"]["id"], json!("c1"));
}

#[tokio::test]
async fn publish_prunes_disallowed_nodes_before_storing() {
    let (base, store) = spawn_with_memory().await;
    let resp = reqwest::Client::new()
        .post(format!("{}/api/composition?path=/buy", base))
        .json(&json!({
            "content": [{
                "type": "Grid",
                "props": {
                    "id": "g1",
                    "items": [
                        { "type": "Hero", "props": { "id": "hero-1" } },
                        { "type": "Card", "props": { "id": "c1" } }
                    ]
                }
            }],
            "root": {}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let stored = store.load(&PagePath::parse("/buy").unwrap()).unwrap().unwrap();
    let items = stored.content[0].slot("items").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].component_type, "Card");
}

#[tokio::test]
async fn malformed_body_is_500_json_error() {
    let (base, store) = spawn_with_memory().await;
    let resp = reqwest::Client::new()
        .post(format!("{}/api/composition?path=/buy", base))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to save data" }));
    assert!(store.load(&PagePath::parse("/buy").unwrap()).unwrap().is_none());
}

// ── Editor endpoints ────────────────────────────────────────────

#[tokio::test]
async fn palette_lists_categories_and_components() {
    let (base, _) = spawn_with_memory().await;
    let body: Value = reqwest::get(format!("{}/api/components", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["categories"].as_array().unwrap().len(), 7);
    assert_eq!(body["categories"][0]["title"], json!("Layout"));
    let components = body["components"].as_array().unwrap();
    let grid = components
        .iter()
        .find(|c| c["name"] == json!("ProductGrid"))
        .unwrap();
    assert_eq!(grid["label"], json!("Product Grid"));
    assert_eq!(grid["hasResolver"], json!(true));
    assert_eq!(grid["fields"]["maxProducts"]["type"], json!("number"));
    assert!(body["root"]["fields"]["navLinks"].is_object());
}

#[tokio::test]
async fn page_list_has_labels() {
    let (base, _) = spawn_with_memory().await;
    let body: Value = reqwest::get(format!("{}/api/pages", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let pages = body["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 7);
    assert_eq!(pages[0], json!({ "path": "/", "label": "Home" }));
    assert_eq!(pages[6], json!({ "path": "/blog", "label": "Blog" }));
}

#[tokio::test]
async fn fields_depend_on_parent() {
    let (base, _) = spawn_with_memory().await;
    let client = reqwest::Client::new();
    let in_grid: Value = client
        .post(format!("{}/api/fields", base))
        .json(&json!({ "type": "Heading", "props": {}, "parent": "Grid" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let keys: Vec<&str> = in_grid["layout"]["objectFields"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["spanCol", "spanRow", "padding"]);

    let top: Value = client
        .post(format!("{}/api/fields", base))
        .json(&json!({ "type": "Heading" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let keys: Vec<&str> = top["layout"]["objectFields"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["padding"]);
}

#[tokio::test]
async fn fields_of_unknown_type_is_404() {
    let (base, _) = spawn_with_memory().await;
    let resp = reqwest::Client::new()
        .post(format!("{}/api/fields", base))
        .json(&json!({ "type": "Carousel" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn resolve_fills_products_and_locks_them() {
    let (base, _) = spawn_with_memory().await;
    let body: Value = reqwest::Client::new()
        .post(format!("{}/api/resolve", base))
        .json(&json!({ "type": "ProductGrid", "props": { "id": "pg", "heading": "Shop" } }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["props"]["heading"], json!("Shop"));
    assert_eq!(body["props"]["resolvedProducts"][0]["handle"], json!("yard-sign"));
    assert_eq!(body["readOnly"], json!(["resolvedProducts"]));
}

#[tokio::test]
async fn resolve_without_resolver_echoes_props() {
    let (base, _) = spawn_with_memory().await;
    let body: Value = reqwest::Client::new()
        .post(format!("{}/api/resolve", base))
        .json(&json!({ "type": "Heading", "props": { "text": "Hi" } }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "props": { "text": "Hi" }, "readOnly": [] }));
}

#[tokio::test]
async fn unknown_api_route_returns_404() {
    let (base, _) = spawn_with_memory().await;
    let resp = reqwest::get(format!("{}/api/v1/nonexistent", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
