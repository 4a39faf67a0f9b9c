//! Headless CMS access.
//!
//! Leaf sections and the site chrome read their copy from the CMS when it is
//! reachable. Callers always hold a static fallback: a [`ContentSource`]
//! error means "use the fallback", never "fail the page".

use crate::error::BlockResult;
use crate::upstream::Upstream;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Fetches JSON content by API path.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// GETs `path` with `query` and returns the entry payload.
    async fn fetch_json(&self, path: &str, query: &[(&str, String)]) -> BlockResult<Value>;
}

/// Strapi REST client. Responses are unwrapped from their `data` envelope.
#[derive(Debug, Clone)]
pub struct StrapiContent {
    upstream: Upstream,
}

impl StrapiContent {
    pub fn new(base_url: &str, timeout: Duration) -> BlockResult<Self> {
        Ok(Self {
            upstream: Upstream::new(base_url, timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.upstream.base_url()
    }
}

#[async_trait]
impl ContentSource for StrapiContent {
    async fn fetch_json(&self, path: &str, query: &[(&str, String)]) -> BlockResult<Value> {
        let body: Value = self.upstream.get_json(path, query, &[]).await?;
        debug!(path, "Fetched CMS content");
        Ok(match body {
            Value::Object(mut envelope) if envelope.contains_key("data") => {
                envelope.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        })
    }
}

/// A content source that is never reachable. Every caller falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

#[async_trait]
impl ContentSource for NoContent {
    async fn fetch_json(&self, path: &str, _query: &[(&str, String)]) -> BlockResult<Value> {
        Err(crate::error::BlockError::Status {
            url: path.to_string(),
            status: 503,
        })
    }
}
