//! Auxiliary page content.
//!
//! Collection pages can carry editorial content managed outside the catalog
//! (banners, copy blocks). It is loaded alongside the collection query and
//! is never required for the page to render.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::catalog::Locale;

/// What to load content for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContentRequest {
    pub handle: String,
    pub locale: Locale,
}

/// Loads auxiliary content for a collection page.
#[async_trait]
pub trait PageContentLoader: Send + Sync {
    /// Return the page content, or `Value::Null` when there is none.
    async fn load(&self, request: &PageContentRequest) -> Result<Value>;
}

/// Loader used when no content service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPageContentLoader;

#[async_trait]
impl PageContentLoader for NoopPageContentLoader {
    async fn load(&self, _request: &PageContentRequest) -> Result<Value> {
        Ok(Value::Null)
    }
}

/// Fetches JSON content from `{base_url}/collections/{handle}?locale=..`.
#[derive(Clone)]
pub struct HttpPageContentLoader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPageContentLoader {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build content HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, request: &PageContentRequest) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.base_url).context("invalid content base URL")?;
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("content base URL cannot have path segments"))?
            .pop_if_empty()
            .push("collections")
            .push(&request.handle);
        url.query_pairs_mut()
            .append_pair("locale", &request.locale.path_prefix());
        Ok(url)
    }
}

#[async_trait]
impl PageContentLoader for HttpPageContentLoader {
    async fn load(&self, request: &PageContentRequest) -> Result<Value> {
        let url = self.url_for(request)?;
        debug!(url = %url, "loading page content");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("page content request failed")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Value::Null);
        }

        response
            .error_for_status()
            .context("page content service returned an error")?
            .json()
            .await
            .context("page content was not valid JSON")
    }
}
