//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::{CurrencyFormatter, LocaleCurrencyFormatter};
use crate::config::Config;
use crate::storefront::{
    CollectionGateway, HttpPageContentLoader, NoopPageContentLoader, PageContentLoader,
    StorefrontClient,
};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,

    /// Catalog backend.
    gateway: Arc<dyn CollectionGateway>,

    /// Auxiliary page content source.
    content: Arc<dyn PageContentLoader>,

    /// Price label formatter.
    currency: Arc<dyn CurrencyFormatter>,
}

impl AppState {
    /// Create application state with HTTP-backed services from config.
    pub fn new(config: &Config) -> Result<Self> {
        let gateway = StorefrontClient::new(
            &config.storefront_api_url,
            &config.storefront_api_version,
            config.storefront_api_token.clone(),
            config.gateway_timeout,
        )
        .context("failed to create storefront client")?;
        info!(endpoint = %gateway.endpoint(), "Storefront client configured");

        let content: Arc<dyn PageContentLoader> = match &config.content_api_url {
            Some(url) => {
                info!(url = %url, "Page content service configured");
                Arc::new(
                    HttpPageContentLoader::new(url, config.gateway_timeout)
                        .context("failed to create page content loader")?,
                )
            }
            None => Arc::new(NoopPageContentLoader),
        };

        Ok(Self::with_services(
            config.clone(),
            Arc::new(gateway),
            content,
            Arc::new(LocaleCurrencyFormatter),
        ))
    }

    /// Create application state from explicit services.
    pub fn with_services(
        config: Config,
        gateway: Arc<dyn CollectionGateway>,
        content: Arc<dyn PageContentLoader>,
        currency: Arc<dyn CurrencyFormatter>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                gateway,
                content,
                currency,
            }),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the collection gateway.
    pub fn gateway(&self) -> &Arc<dyn CollectionGateway> {
        &self.inner.gateway
    }

    /// Get the page content loader.
    pub fn content(&self) -> &Arc<dyn PageContentLoader> {
        &self.inner.content
    }

    /// Get the currency formatter.
    pub fn currency(&self) -> &dyn CurrencyFormatter {
        self.inner.currency.as_ref()
    }
}
