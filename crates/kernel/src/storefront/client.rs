//! GraphQL storefront client.
//!
//! Implements [`CollectionGateway`] against a storefront GraphQL endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use super::gateway::{
    Collection, CollectionGateway, CollectionQuery, CollectionResponse, CollectionSummary,
    GatewayError,
};

/// Header carrying the public storefront access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Number of sibling collections fetched alongside the collection.
const SIBLING_COLLECTIONS: u32 = 250;

/// Maximum bytes of an error body kept for logging.
const MAX_ERROR_BODY: usize = 512;

const COLLECTION_QUERY: &str = r#"
query CollectionDetails(
  $handle: String!
  $country: CountryCode
  $language: LanguageCode
  $filters: [ProductFilter!]
  $sortKey: ProductCollectionSortKeys!
  $reverse: Boolean
  $first: Int
  $last: Int
  $startCursor: String
  $endCursor: String
  $siblings: Int!
) @inContext(country: $country, language: $language) {
  collection(handle: $handle) {
    id
    handle
    title
    description
    seo {
      title
      description
    }
    image {
      id
      url
      width
      height
      altText
    }
    products(
      first: $first
      last: $last
      before: $startCursor
      after: $endCursor
      filters: $filters
      sortKey: $sortKey
      reverse: $reverse
    ) {
      filters {
        id
        label
        type
        values {
          id
          label
          count
          input
        }
      }
      nodes {
        id
        title
        handle
        publishedAt
        vendor
        variants(first: 1) {
          nodes {
            id
            availableForSale
            price {
              amount
              currencyCode
            }
            compareAtPrice {
              amount
              currencyCode
            }
          }
        }
      }
      pageInfo {
        hasPreviousPage
        hasNextPage
        startCursor
        endCursor
      }
    }
  }
  collections(first: $siblings) {
    nodes {
      id
      handle
      title
    }
  }
}
"#;

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CollectionData {
    collection: Option<Collection>,
    #[serde(default)]
    collections: Nodes<CollectionSummary>,
}

#[derive(Debug, Deserialize)]
struct Nodes<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<T>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// Storefront GraphQL client.
#[derive(Clone)]
pub struct StorefrontClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl StorefrontClient {
    /// Create a client for `{api_url}/api/{api_version}/graphql.json`.
    pub fn new(
        api_url: &str,
        api_version: &str,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build storefront HTTP client")?;

        Ok(Self {
            client,
            endpoint: graphql_endpoint(api_url, api_version),
            access_token: access_token.into(),
        })
    }

    /// The GraphQL endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn graphql_endpoint(api_url: &str, api_version: &str) -> String {
    format!(
        "{}/api/{}/graphql.json",
        api_url.trim_end_matches('/'),
        api_version
    )
}

/// Build the GraphQL variables for a collection query.
fn query_variables(query: &CollectionQuery) -> Value {
    let mut vars = Map::new();
    vars.insert("handle".to_string(), json!(query.handle));
    vars.insert("country".to_string(), json!(query.locale.country));
    vars.insert("language".to_string(), json!(query.locale.language));
    vars.insert("filters".to_string(), json!(query.filters));
    vars.insert("sortKey".to_string(), json!(query.sort.sort_key));
    vars.insert("reverse".to_string(), json!(query.sort.reverse));
    vars.insert("siblings".to_string(), json!(SIBLING_COLLECTIONS));

    if let Value::Object(pagination) = json!(query.pagination) {
        vars.extend(pagination);
    }

    Value::Object(vars)
}

/// Turn a GraphQL envelope into a gateway result.
fn decode_response(
    response: GraphqlResponse<CollectionData>,
) -> Result<CollectionResponse, GatewayError> {
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(GatewayError::Graphql(messages.join("; ")));
    }

    let data = response.data.ok_or(GatewayError::MissingData)?;

    Ok(CollectionResponse {
        collection: data.collection,
        collections: data.collections.nodes,
    })
}

fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

#[async_trait]
impl CollectionGateway for StorefrontClient {
    async fn fetch_collection(
        &self,
        query: &CollectionQuery,
    ) -> Result<CollectionResponse, GatewayError> {
        let payload = json!({
            "query": COLLECTION_QUERY,
            "variables": query_variables(query),
        });

        debug!(
            handle = %query.handle,
            filters = query.filters.len(),
            sort = ?query.sort.sort_key,
            "querying storefront collection"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, handle = %query.handle, "storefront request failed");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let envelope: GraphqlResponse<CollectionData> = response.json().await?;
        decode_response(envelope)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::catalog::{
        FilterCriterion, Locale, PaginationVariables, PriceRange, SortKey, SortSpec,
    };

    fn query() -> CollectionQuery {
        CollectionQuery {
            handle: "shirts".to_string(),
            pagination: PaginationVariables::Forward {
                first: 8,
                end_cursor: Some("c1".to_string()),
            },
            filters: vec![
                FilterCriterion::Tag("Sale".to_string()),
                FilterCriterion::Price(PriceRange {
                    min: Some(20.0),
                    max: None,
                }),
            ],
            sort: SortSpec {
                sort_key: SortKey::Price,
                reverse: true,
            },
            locale: Locale::parse("fr-ca", "USD").unwrap(),
        }
    }

    #[test]
    fn endpoint_joins_version() {
        assert_eq!(
            graphql_endpoint("https://shop.example.com/", "2024-10"),
            "https://shop.example.com/api/2024-10/graphql.json"
        );
    }

    #[test]
    fn variables_carry_filters_sort_and_context() {
        let vars = query_variables(&query());

        assert_eq!(vars["handle"], "shirts");
        assert_eq!(vars["country"], "CA");
        assert_eq!(vars["language"], "FR");
        assert_eq!(vars["sortKey"], "PRICE");
        assert_eq!(vars["reverse"], true);
        assert_eq!(vars["first"], 8);
        assert_eq!(vars["endCursor"], "c1");
        assert!(vars.get("last").is_none());
        assert_eq!(
            vars["filters"],
            json!([{"tag": "Sale"}, {"price": {"min": 20.0}}])
        );
    }

    #[test]
    fn graphql_errors_become_gateway_errors() {
        let envelope: GraphqlResponse<CollectionData> = serde_json::from_value(json!({
            "data": null,
            "errors": [{"message": "Throttled"}, {"message": "Try again"}]
        }))
        .unwrap();

        match decode_response(envelope) {
            Err(GatewayError::Graphql(message)) => assert_eq!(message, "Throttled; Try again"),
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    #[test]
    fn missing_data_is_an_error() {
        let envelope: GraphqlResponse<CollectionData> =
            serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            decode_response(envelope),
            Err(GatewayError::MissingData)
        ));
    }

    #[test]
    fn sibling_collections_are_flattened() {
        let envelope: GraphqlResponse<CollectionData> = serde_json::from_value(json!({
            "data": {
                "collection": null,
                "collections": {"nodes": [
                    {"id": "1", "handle": "shirts", "title": "Shirts"},
                    {"id": "2", "handle": "hats", "title": "Hats"}
                ]}
            }
        }))
        .unwrap();

        let response = decode_response(envelope).unwrap();
        assert!(response.collection.is_none());
        let handles: Vec<&str> = response
            .collections
            .iter()
            .map(|c| c.handle.as_str())
            .collect();
        assert_eq!(handles, vec!["shirts", "hats"]);
    }

    #[test]
    fn long_error_bodies_are_truncated_on_char_boundary() {
        let body = "é".repeat(MAX_ERROR_BODY);
        let truncated = truncate_body(body);
        assert!(truncated.len() <= MAX_ERROR_BODY);
        assert!(truncated.chars().all(|c| c == 'é'));
    }
}
