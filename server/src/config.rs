//! Server configuration: `storefront.toml` overlaid with CLI flags and
//! environment variables.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storefront_types::PagePath;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";

/// Settings of one server instance. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub bind: SocketAddr,
    /// JSON file holding every page document.
    pub data_file: PathBuf,
    /// Page whose root props carry the navbar and footer overrides.
    pub globals_path: PagePath,
    /// Pages offered by the editor's page selector, in order.
    pub editable_pages: Vec<PagePath>,
    pub cms_url: String,
    pub commerce_url: String,
    pub publishable_key: String,
    pub request_timeout_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            data_file: PathBuf::from("puck-data.json"),
            globals_path: PagePath::root(),
            editable_pages: default_pages(),
            cms_url: "http://localhost:1337".into(),
            commerce_url: "http://localhost:9000".into(),
            publishable_key: String::new(),
            request_timeout_ms: 10_000,
        }
    }
}

fn default_pages() -> Vec<PagePath> {
    let mut pages = vec![PagePath::root()];
    pages.extend(
        ["buy", "rent", "sell", "agents", "contact", "blog"]
            .iter()
            .filter_map(|slug| PagePath::from_slug(slug).ok()),
    );
    pages
}

impl SiteConfig {
    /// Reads `path`. A missing or malformed file yields the defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded config");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Malformed config file, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable config file, using defaults");
                Self::default()
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Editor label of a page: "Home" for the root, the capitalized slug
/// otherwise.
pub fn page_label(path: &PagePath) -> String {
    match path.slug() {
        None => "Home".to_string(),
        Some(slug) => capitalize(slug),
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
