//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::catalog::{DEFAULT_FILTER_PREFIX, DEFAULT_PAGE_SIZE, LocaleResolver};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Storefront API base URL (e.g. https://shop.example.com).
    pub storefront_api_url: String,

    /// Public storefront access token.
    pub storefront_api_token: String,

    /// Storefront API version (default: 2024-10).
    pub storefront_api_version: String,

    /// Timeout for outbound storefront and content requests (default: 10s).
    pub gateway_timeout: Duration,

    /// Timeout for a whole inbound request (default: 30s).
    pub request_timeout: Duration,

    /// Page content service base URL. When None, no content is loaded.
    pub content_api_url: Option<String>,

    /// Key prefix for filter query parameters (default: "filter").
    pub filter_prefix: String,

    /// Products per page (default: 8).
    pub products_per_page: u32,

    /// Supported locales; the first is served without a URL prefix.
    pub locales: LocaleResolver,

    /// Public site URL for canonical links.
    pub site_url: String,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let storefront_api_url = env::var("STOREFRONT_API_URL")
            .context("STOREFRONT_API_URL environment variable is required")?;

        let storefront_api_token = env::var("STOREFRONT_API_TOKEN")
            .context("STOREFRONT_API_TOKEN environment variable is required")?;

        let storefront_api_version =
            env::var("STOREFRONT_API_VERSION").unwrap_or_else(|_| "2024-10".to_string());

        let gateway_timeout = env::var("GATEWAY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map(Duration::from_secs)
            .context("GATEWAY_TIMEOUT_SECS must be a valid u64")?;

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map(Duration::from_secs)
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        let content_api_url = env::var("CONTENT_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let filter_prefix =
            env::var("FILTER_PREFIX").unwrap_or_else(|_| DEFAULT_FILTER_PREFIX.to_string());

        let products_per_page = env::var("PRODUCTS_PER_PAGE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .context("PRODUCTS_PER_PAGE must be a valid u32")?;

        let default_currency = env::var("DEFAULT_CURRENCY").unwrap_or_else(|_| "USD".to_string());

        let locales = LocaleResolver::parse(
            &env::var("SUPPORTED_LOCALES").unwrap_or_else(|_| "en-us".to_string()),
            &default_currency,
        )
        .context("SUPPORTED_LOCALES must be a comma-separated list of language-country tags")?;

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        Ok(Self {
            port,
            storefront_api_url,
            storefront_api_token,
            storefront_api_version,
            gateway_timeout,
            request_timeout,
            content_api_url,
            filter_prefix,
            products_per_page,
            locales,
            site_url,
            cors_allowed_origins,
        })
    }
}
