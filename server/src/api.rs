//! JSON endpoints used by the editor.

use crate::config::page_label;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;
use storefront_compose::{Category, ComposeError, RootSchema};
use storefront_model::{merge_props, Document, FieldMap, Props};
use storefront_types::PagePath;
use tracing::{debug, error, info, warn};

/// A failed request, rendered as `{"error": message}`.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ComposeError> for ApiError {
    fn from(e: ComposeError) -> Self {
        let status = match e {
            ComposeError::UnknownComponent(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PathQuery {
    path: Option<String>,
}

impl PathQuery {
    /// The requested page, `/` when absent.
    fn page(&self) -> Result<PagePath, storefront_types::Error> {
        match self.path.as_deref().filter(|p| !p.is_empty()) {
            Some(p) => PagePath::parse(p),
            None => Ok(PagePath::root()),
        }
    }
}

// ── Composition ──────────────────────────────────────────────────

const SAVE_FAILED: &str = "Failed to save data";

/// Always answers with a document; anything unloadable is the empty page.
pub(crate) async fn load_composition(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Json<Document> {
    let path = match query.page() {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "Composition requested for invalid path");
            return Json(Document::empty());
        }
    };

    let mut document = state.load_page(&path).await;
    if let Err(e) = state.pipeline.sanitize(&mut document) {
        warn!(path = %path, error = %e, "Could not sanitize stored document");
    }
    debug!(path = %path, nodes = document.content.len(), "Serving composition");
    Json(document)
}

/// Publishes a document. Nodes in slots that disallow their type are
/// pruned before the write, so storage only ever holds valid trees.
pub(crate) async fn save_composition(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
    body: Result<Json<Document>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let path = query
        .page()
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
    let Json(mut document) = body.map_err(|e| {
        warn!(path = %path, error = %e, "Rejected unreadable document");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILED)
    })?;

    let pruned = state.pipeline.sanitize(&mut document)?;
    if pruned > 0 {
        warn!(path = %path, pruned, "Pruned disallowed nodes before publishing");
    }

    let nodes = document.content.len();
    match state.save_page(&path, document).await {
        Ok(()) => {
            info!(path = %path, nodes, "Page published");
            Ok(Json(json!({ "success": true })))
        }
        Err(e) => {
            error!(path = %path, error = %e, "Failed to publish page");
            Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILED))
        }
    }
}

// ── Palette ──────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComponentInfo<'a> {
    name: &'a str,
    label: &'a str,
    category: Option<&'a str>,
    inline: bool,
    has_resolver: bool,
    fields: &'a FieldMap,
    default_props: &'a Props,
}

#[derive(Serialize)]
struct Palette<'a> {
    categories: Vec<&'a Category>,
    components: Vec<ComponentInfo<'a>>,
    root: &'a RootSchema,
}

pub(crate) async fn components(State(state): State<AppState>) -> Response {
    let registry = state.registry();
    let palette = Palette {
        categories: registry.categories().collect(),
        components: registry
            .components()
            .map(|c| ComponentInfo {
                name: c.name(),
                label: c.label(),
                category: c.category(),
                inline: c.is_inline(),
                has_resolver: c.resolver().is_some(),
                fields: c.fields(),
                default_props: c.defaults(),
            })
            .collect(),
        root: registry.root(),
    };
    Json(palette).into_response()
}

#[derive(Serialize)]
struct PageEntry {
    path: PagePath,
    label: String,
}

pub(crate) async fn pages(State(state): State<AppState>) -> Json<serde_json::Value> {
    let pages: Vec<PageEntry> = state
        .editable_pages
        .iter()
        .map(|path| PageEntry {
            path: path.clone(),
            label: page_label(path),
        })
        .collect();
    Json(json!({ "pages": pages }))
}

// ── Fields and resolution ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct FieldsRequest {
    #[serde(rename = "type")]
    component_type: String,
    #[serde(default)]
    props: Props,
    #[serde(default)]
    parent: Option<String>,
}

/// Effective fields of a node placed under `parent`.
pub(crate) async fn fields(
    State(state): State<AppState>,
    Json(request): Json<FieldsRequest>,
) -> Result<Json<FieldMap>, ApiError> {
    let fields = state.registry().effective_fields(
        &request.component_type,
        &request.props,
        request.parent.as_deref(),
    )?;
    Ok(Json(fields))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResolveRequest {
    #[serde(rename = "type")]
    component_type: String,
    #[serde(default)]
    props: Props,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResolveResponse {
    props: Props,
    #[serde(rename = "readOnly")]
    read_only: BTreeSet<String>,
}

/// Runs the component's data resolver over `props`. Components without a
/// resolver echo their props back.
pub(crate) async fn resolve(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let component = state.registry().require(&request.component_type)?;
    let Some(resolver) = component.resolver() else {
        return Ok(Json(ResolveResponse {
            props: request.props,
            read_only: BTreeSet::new(),
        }));
    };

    let input = merge_props(component.defaults(), &request.props, None);
    match resolver.resolve(&input).await {
        Ok(resolved) => {
            let mut props = request.props;
            props.extend(resolved.props);
            Ok(Json(ResolveResponse {
                props,
                read_only: resolved.read_only,
            }))
        }
        Err(e) => {
            warn!(component = %request.component_type, error = %e, "Data resolution failed");
            Err(ApiError::new(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
