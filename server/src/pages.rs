//! Page assembly: chrome around the composed content of one page.

use crate::config::capitalize;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use storefront_blocks::{category, Chrome, SiteGlobals};
use storefront_compose::{Element, Markup, RenderOptions};
use storefront_model::Document;
use storefront_types::PagePath;
use tracing::{debug, warn};

const SITE_NAME: &str = "Nobel Realty Group";

pub(crate) async fn home(State(state): State<AppState>) -> Response {
    render_page(&state, PagePath::root()).await
}

pub(crate) async fn page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match PagePath::from_slug(&slug) {
        Ok(path) => render_page(&state, path).await,
        Err(e) => {
            debug!(slug = %slug, error = %e, "Rejected page path");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Renders `path`. Pages with content render it; empty editable pages get
/// a placeholder notice, an empty home page the brokerage landing page.
/// Any other path without content does not exist.
async fn render_page(state: &AppState, path: PagePath) -> Response {
    let mut document = state.load_page(&path).await;
    let editable = state.editable_pages.contains(&path);
    if document.is_empty() && !path.is_root() && !editable {
        return StatusCode::NOT_FOUND.into_response();
    }

    let globals = if path == state.globals_path {
        SiteGlobals::from_document(&document)
    } else {
        SiteGlobals::from_document(&state.load_page(&state.globals_path).await)
    };
    let chrome = Chrome::load(state.content.as_ref(), &globals).await;

    let content = if !document.is_empty() {
        if let Err(e) = state.pipeline.sanitize(&mut document) {
            warn!(path = %path, error = %e, "Could not sanitize stored document");
        }
        let rendered = state.pipeline.run(&document, RenderOptions::default()).await;
        if rendered.failures() > 0 {
            warn!(path = %path, failures = rendered.failures(), "Page rendered with placeholders");
        }
        rendered.markup
    } else if path.is_root() {
        let landing = landing_document(state);
        state.pipeline.run(&landing, RenderOptions::default()).await.markup
    } else {
        not_designed(&path)
    };

    let title = document
        .title()
        .or(globals.title.as_deref())
        .filter(|t| !t.is_empty())
        .unwrap_or(SITE_NAME);
    Html(shell(title, &chrome, content)).into_response()
}

/// Every brokerage section with its default copy, in palette order.
fn landing_document(state: &AppState) -> Document {
    let registry = state.registry();
    let content = registry
        .categories()
        .filter(|c| c.key == category::SECTIONS)
        .flat_map(|c| c.components.iter())
        .filter_map(|name| match registry.instantiate(name) {
            Ok(node) => Some(node),
            Err(e) => {
                warn!(component = %name, error = %e, "Skipping landing section");
                None
            }
        })
        .collect();
    Document::new(Default::default(), content)
}

fn not_designed(path: &PagePath) -> Markup {
    let name = capitalize(path.slug().unwrap_or("home"));
    Element::new("div")
        .class("container p-8 mx-auto xl:px-0")
        .child(
            Element::new("div")
                .class("min-h-[60vh] flex flex-col items-center justify-center text-center py-20")
                .child(
                    Element::new("h1")
                        .class("text-3xl md:text-4xl font-nobel-title font-bold text-gray-900 dark:text-white uppercase mb-4")
                        .text(&name),
                )
                .child(
                    Element::new("p")
                        .class("text-gray-500 dark:text-gray-400 font-nobel-content max-w-md")
                        .text("This page hasn't been designed yet. Open the ")
                        .child(
                            Element::new("a")
                                .attr("href", "/puck/edit")
                                .class("text-nobel-blue underline")
                                .text("Puck Editor"),
                        )
                        .text(&format!(" and select the \"{name}\" page to start designing.")),
                ),
        )
        .build()
}

fn shell(title: &str, chrome: &Chrome, content: Markup) -> String {
    let head = Element::new("head")
        .child(Element::void("meta").attr("charset", "utf-8"))
        .child(
            Element::void("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text(title));
    let body = Element::new("body")
        .class("font-nobel-content bg-white dark:bg-gray-900")
        .child(chrome.navbar.render())
        .child(Element::new("main").child(content))
        .child(chrome.footer.render());
    let html = Element::new("html").attr("lang", "en").child(head).child(body).build();
    format!("<!DOCTYPE html>{html}")
}
