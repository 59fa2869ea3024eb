#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`TestApp`] builds the REAL kernel router (the same one `main.rs` serves)
//! with a stub collection gateway and content loader in place of the HTTP
//! backends, so requests exercise parsing, reconciliation, and error
//! mapping end to end.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use serde_json::Value;
use tower::ServiceExt;

use shopfront_kernel::catalog::{LocaleCurrencyFormatter, LocaleResolver};
use shopfront_kernel::storefront::{
    CollectionGateway, CollectionQuery, CollectionResponse, GatewayError, PageContentLoader,
    PageContentRequest,
};
use shopfront_kernel::{AppState, Config, routes};

/// What the stub gateway answers with.
#[derive(Debug, Clone)]
pub enum StubReply {
    /// Backend-shaped JSON, decoded into a [`CollectionResponse`].
    Json(Value),
    /// A GraphQL-level failure.
    Error(String),
    /// Never answers.
    Stall,
}

/// Collection gateway that returns a canned reply and records queries.
pub struct StubGateway {
    reply: StubReply,
    queries: Mutex<Vec<CollectionQuery>>,
}

impl StubGateway {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// The most recent query received.
    pub fn last_query(&self) -> Option<CollectionQuery> {
        self.queries.lock().last().cloned()
    }

    /// Number of queries received.
    pub fn query_count(&self) -> usize {
        self.queries.lock().len()
    }
}

#[async_trait]
impl CollectionGateway for StubGateway {
    async fn fetch_collection(
        &self,
        query: &CollectionQuery,
    ) -> Result<CollectionResponse, GatewayError> {
        self.queries.lock().push(query.clone());
        match &self.reply {
            StubReply::Json(json) => {
                Ok(serde_json::from_value(json.clone()).expect("stub reply must decode"))
            }
            StubReply::Error(message) => Err(GatewayError::Graphql(message.clone())),
            StubReply::Stall => {
                std::future::pending::<()>().await;
                Err(GatewayError::MissingData)
            }
        }
    }
}

/// Content loader returning fixed content, or failing.
pub struct StubContent {
    content: Option<Value>,
}

#[async_trait]
impl PageContentLoader for StubContent {
    async fn load(&self, _request: &PageContentRequest) -> anyhow::Result<Value> {
        self.content
            .clone()
            .ok_or_else(|| anyhow::anyhow!("content service unavailable"))
    }
}

/// Configuration used by every test app.
pub fn test_config() -> Config {
    Config {
        port: 0,
        storefront_api_url: "http://storefront.invalid".to_string(),
        storefront_api_token: "test-token".to_string(),
        storefront_api_version: "2024-10".to_string(),
        gateway_timeout: Duration::from_secs(5),
        request_timeout: Duration::from_secs(5),
        content_api_url: None,
        filter_prefix: "filter".to_string(),
        products_per_page: 8,
        locales: LocaleResolver::parse("en-us,fr-ca", "USD").unwrap(),
        site_url: "https://shop.example.com".to_string(),
        cors_allowed_origins: vec!["*".to_string()],
    }
}

/// Test application wrapper using the REAL kernel routes.
pub struct TestApp {
    router: Router,
    pub gateway: Arc<StubGateway>,
    pub state: AppState,
}

impl TestApp {
    /// App whose backend answers every query with `response`.
    pub fn new(response: Value) -> Self {
        Self::build(StubReply::Json(response), Some(Value::Null))
    }

    /// App whose backend fails every query.
    pub fn failing(message: &str) -> Self {
        Self::build(StubReply::Error(message.to_string()), Some(Value::Null))
    }

    /// App with a specific content loader result (`None` = loader fails).
    pub fn with_content(response: Value, content: Option<Value>) -> Self {
        Self::build(StubReply::Json(response), content)
    }

    /// App whose backend never answers, with a short request timeout.
    pub fn stalled(request_timeout: Duration) -> Self {
        let config = Config {
            request_timeout,
            ..test_config()
        };
        Self::build_with_config(config, StubReply::Stall, Some(Value::Null))
    }

    fn build(reply: StubReply, content: Option<Value>) -> Self {
        Self::build_with_config(test_config(), reply, content)
    }

    fn build_with_config(config: Config, reply: StubReply, content: Option<Value>) -> Self {
        let gateway = Arc::new(StubGateway::new(reply));
        let state = AppState::with_services(
            config,
            gateway.clone(),
            Arc::new(StubContent { content }),
            Arc::new(LocaleCurrencyFormatter),
        );
        let router = routes::app(state.clone());

        Self {
            router,
            gateway,
            state,
        }
    }

    /// Send a GET request and return the status plus the JSON body
    /// (`Value::String` when the body is not JSON).
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, body)
    }
}
