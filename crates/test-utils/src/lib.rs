//! Shopfront test utilities.
//!
//! Helpers for integration testing: builders for storefront backend
//! responses (collections, filter groups, sibling collections) and
//! assertion utilities for JSON payloads.

use serde_json::{Value as JsonValue, json};

/// Backend id of the price filter value.
pub const PRICE_FILTER_ID: &str = "filter.v.price";

/// Create a test collection with default values.
pub fn test_collection(handle: &str, title: &str) -> TestCollection {
    TestCollection {
        id: format!("gid://shopify/Collection/{handle}"),
        handle: handle.to_string(),
        title: title.to_string(),
        description: String::new(),
        seo: json!({"title": null, "description": null}),
        products: Vec::new(),
        filters: Vec::new(),
        siblings: Vec::new(),
        has_next_page: false,
        end_cursor: None,
    }
}

/// A collection builder for backend response fixtures.
#[derive(Debug, Clone)]
pub struct TestCollection {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub seo: JsonValue,
    pub products: Vec<JsonValue>,
    pub filters: Vec<TestFilterGroup>,
    pub siblings: Vec<(String, String)>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl TestCollection {
    /// Set the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set SEO overrides.
    pub fn with_seo(mut self, title: &str, description: &str) -> Self {
        self.seo = json!({"title": title, "description": description});
        self
    }

    /// Add a product node.
    pub fn with_product(mut self, handle: &str, title: &str) -> Self {
        self.products.push(json!({
            "id": format!("gid://shopify/Product/{handle}"),
            "handle": handle,
            "title": title,
        }));
        self
    }

    /// Add a filter group.
    pub fn with_filter_group(mut self, group: TestFilterGroup) -> Self {
        self.filters.push(group);
        self
    }

    /// Add a sibling collection.
    pub fn with_sibling(mut self, handle: &str, title: &str) -> Self {
        self.siblings.push((handle.to_string(), title.to_string()));
        self
    }

    /// Mark that another page follows, ending at `cursor`.
    pub fn with_next_page(mut self, cursor: &str) -> Self {
        self.has_next_page = true;
        self.end_cursor = Some(cursor.to_string());
        self
    }

    /// The collection object as the backend returns it.
    pub fn collection_json(&self) -> JsonValue {
        json!({
            "id": self.id,
            "handle": self.handle,
            "title": self.title,
            "description": self.description,
            "seo": self.seo,
            "products": {
                "nodes": self.products,
                "pageInfo": {
                    "hasNextPage": self.has_next_page,
                    "hasPreviousPage": false,
                    "startCursor": null,
                    "endCursor": self.end_cursor,
                },
                "filters": self.filters.iter().map(TestFilterGroup::to_json).collect::<Vec<_>>(),
            },
        })
    }

    /// A full gateway response: the collection plus its siblings.
    pub fn response_json(&self) -> JsonValue {
        json!({
            "collection": self.collection_json(),
            "collections": sibling_json(&self.siblings),
        })
    }
}

/// A gateway response for a handle that matches no collection.
pub fn missing_collection_json() -> JsonValue {
    json!({"collection": null, "collections": []})
}

fn sibling_json(siblings: &[(String, String)]) -> JsonValue {
    siblings
        .iter()
        .map(|(handle, title)| {
            json!({
                "id": format!("gid://shopify/Collection/{handle}"),
                "handle": handle,
                "title": title,
            })
        })
        .collect()
}

/// Create a filter group.
pub fn filter_group(id: &str, label: &str) -> TestFilterGroup {
    TestFilterGroup {
        id: id.to_string(),
        label: label.to_string(),
        kind: "LIST".to_string(),
        values: Vec::new(),
    }
}

/// Create the price filter group, with one value spanning `min..max`.
pub fn price_filter_group(min: f64, max: f64) -> TestFilterGroup {
    TestFilterGroup {
        id: PRICE_FILTER_ID.to_string(),
        label: "Price".to_string(),
        kind: "PRICE_RANGE".to_string(),
        values: Vec::new(),
    }
    .with_value(
        PRICE_FILTER_ID,
        "Price",
        json!({"price": {"min": min, "max": max}}),
    )
}

/// A filter group builder.
#[derive(Debug, Clone)]
pub struct TestFilterGroup {
    pub id: String,
    pub label: String,
    pub kind: String,
    pub values: Vec<JsonValue>,
}

impl TestFilterGroup {
    /// Add a value whose `input` is the serialized `input` JSON.
    pub fn with_value(self, id: &str, label: &str, input: JsonValue) -> Self {
        self.with_raw_value(id, label, &input.to_string())
    }

    /// Add a value with a verbatim `input` string (may be malformed).
    pub fn with_raw_value(mut self, id: &str, label: &str, input: &str) -> Self {
        self.values.push(json!({
            "id": id,
            "label": label,
            "count": 1,
            "input": input,
        }));
        self
    }

    /// The group as the backend returns it.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "id": self.id,
            "label": self.label,
            "type": self.kind,
            "values": self.values,
        })
    }
}

/// Assertion helpers for JSON payloads.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual, expected,
            "JSON mismatch:\nactual: {actual:#}\nexpected: {expected:#}"
        );
    }

    /// Labels of the `appliedFilters` array in a collection page payload.
    pub fn applied_labels(page: &Value) -> Vec<String> {
        page["appliedFilters"]
            .as_array()
            .map(|filters| {
                filters
                    .iter()
                    .filter_map(|f| f["label"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
