//! HTTP surface of the storefront.
//!
//! - `/api/composition` loads and publishes page documents
//! - `/api/components`, `/api/pages`, `/api/fields` and `/api/resolve`
//!   let a browser editor drive the composition engine
//! - every other path renders a page: navbar, composed content, footer

mod api;
pub mod config;
mod pages;

pub use config::{page_label, SiteConfig, DEFAULT_CONFIG_FILE};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use storefront_blocks::{
    palette, BlockResult, Catalog, ContentSource, MedusaProducts, StrapiContent, StrapiProducts,
};
use storefront_compose::{Pipeline, Registry};
use storefront_model::Document;
use storefront_storage::{DocumentStore, FileStore, StorageError, StorageResult};
use storefront_types::PagePath;
use tracing::{info, warn};

/// Everything a request handler needs. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub store: Arc<dyn DocumentStore>,
    pub content: Arc<dyn ContentSource>,
    pub globals_path: PagePath,
    pub editable_pages: Arc<Vec<PagePath>>,
}

impl AppState {
    /// State with the default globals page and page list.
    pub fn new(
        registry: Arc<Registry>,
        store: Arc<dyn DocumentStore>,
        content: Arc<dyn ContentSource>,
    ) -> Self {
        let defaults = SiteConfig::default();
        Self {
            pipeline: Arc::new(Pipeline::new(registry)),
            store,
            content,
            globals_path: defaults.globals_path,
            editable_pages: Arc::new(defaults.editable_pages),
        }
    }

    #[must_use]
    pub fn with_pages(mut self, globals_path: PagePath, editable_pages: Vec<PagePath>) -> Self {
        self.globals_path = globals_path;
        self.editable_pages = Arc::new(editable_pages);
        self
    }

    /// Wires the file store, the CMS and both product backends from config.
    pub fn from_config(config: &SiteConfig) -> BlockResult<Self> {
        let timeout = config.request_timeout();
        let catalog = Catalog::new(
            Arc::new(MedusaProducts::new(
                &config.commerce_url,
                &config.publishable_key,
                timeout,
            )?),
            Arc::new(StrapiProducts::new(&config.cms_url, timeout)?),
        );
        let registry = Arc::new(palette(catalog)?);
        let content = Arc::new(StrapiContent::new(&config.cms_url, timeout)?);
        let store = Arc::new(FileStore::open(config.data_file.clone()));

        info!(
            components = registry.len(),
            data_file = %config.data_file.display(),
            cms = %config.cms_url,
            commerce = %config.commerce_url,
            "Storefront state ready"
        );
        Ok(Self::new(registry, store, content)
            .with_pages(config.globals_path.clone(), config.editable_pages.clone()))
    }

    pub fn registry(&self) -> &Registry {
        self.pipeline.registry()
    }

    /// Loads `path` on the blocking pool. Unloadable storage reads as the
    /// empty page.
    pub async fn load_page(&self, path: &PagePath) -> Document {
        let store = Arc::clone(&self.store);
        let owned = path.clone();
        match tokio::task::spawn_blocking(move || store.load_or_empty(&owned)).await {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %path, error = %e, "spawn_blocking panicked loading page");
                Document::empty()
            }
        }
    }

    /// Replaces the stored document for `path` on the blocking pool.
    pub async fn save_page(&self, path: &PagePath, document: Document) -> StorageResult<()> {
        let store = Arc::clone(&self.store);
        let owned = path.clone();
        tokio::task::spawn_blocking(move || store.save(&owned, &document))
            .await
            .map_err(|e| StorageError::Io(std::io::Error::other(e)))?
    }
}

/// Build the HTTP router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/composition",
            get(api::load_composition).post(api::save_composition),
        )
        .route("/api/components", get(api::components))
        .route("/api/pages", get(api::pages))
        .route("/api/fields", post(api::fields))
        .route("/api/resolve", post(api::resolve))
        .route("/", get(pages::home))
        .route("/{*slug}", get(pages::page))
        .with_state(state)
}
