//! Collection query gateway.
//!
//! Provides the trait the request handler queries collections through, and
//! the request/response types exchanged with the catalog backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{FilterCriterion, FilterGroup, FilterValueCandidate, Locale};
use crate::catalog::{PaginationVariables, SortSpec};

/// Errors from the catalog backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("storefront request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("storefront returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("storefront query failed: {0}")]
    Graphql(String),

    #[error("storefront response had no data")]
    MissingData,
}

/// A paginated, filtered, sorted collection fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionQuery {
    pub handle: String,
    pub pagination: PaginationVariables,
    pub filters: Vec<FilterCriterion>,
    pub sort: SortSpec,
    pub locale: Locale,
}

/// Backend answer to a [`CollectionQuery`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionResponse {
    /// `None` when no collection has the requested handle.
    pub collection: Option<Collection>,
    /// Sibling collections, flattened from the backend connection.
    #[serde(default)]
    pub collections: Vec<CollectionSummary>,
}

/// Collection data as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub seo: CollectionSeo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<serde_json::Value>,
    pub products: ProductConnection,
}

impl Collection {
    /// Every filter value across all filter groups.
    pub fn filter_values(&self) -> impl Iterator<Item = &FilterValueCandidate> {
        self.products.filters.iter().flat_map(|group| group.values.iter())
    }
}

/// SEO overrides set on the collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSeo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One page of products plus the filter catalog for the collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    /// Product nodes, passed through to the client untouched.
    #[serde(default)]
    pub nodes: Vec<serde_json::Value>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub filters: Vec<FilterGroup>,
}

/// Cursor pagination state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// A sibling collection shown in navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    #[serde(default)]
    pub id: Option<String>,
    pub handle: String,
    pub title: String,
}

/// Executes collection queries against the catalog backend.
///
/// Retries and timeouts belong to implementations.
#[async_trait]
pub trait CollectionGateway: Send + Sync {
    async fn fetch_collection(
        &self,
        query: &CollectionQuery,
    ) -> Result<CollectionResponse, GatewayError>;
}
