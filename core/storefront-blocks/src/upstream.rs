//! Shared HTTP plumbing for the CMS and commerce clients.

use crate::error::{BlockError, BlockResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// A JSON API rooted at one base URL.
#[derive(Debug, Clone)]
pub(crate) struct Upstream {
    base_url: String,
    client: Client,
}

impl Upstream {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> BlockResult<Self> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BlockError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `path` and decodes the body. Non-success statuses are errors.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        headers: &[(&'static str, &str)],
    ) -> BlockResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "Upstream request rejected");
            return Err(BlockError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}
