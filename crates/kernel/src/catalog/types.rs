//! Catalog filter and sort types.
//!
//! Provides type definitions shared by the parser, the reconciler, and the
//! storefront gateway:
//! - FilterCriterion: one structured product filter, serialized in the
//!   backend's `ProductFilter` shape (`{"tag":"Sale"}`, `{"price":{"min":10}}`)
//! - SortKey / SortSpec: backend sort key plus direction
//! - FilterGroup / FilterValueCandidate: backend-enumerated filter values
//! - AppliedFilter: a criterion paired with its display label

use serde::{Deserialize, Serialize};

/// Backend identifier of the price filter group value.
pub const PRICE_FILTER_ID: &str = "filter.v.price";

/// One structured constraint applied to a product collection query.
///
/// Exactly one variant is populated per instance. Serialization is
/// externally tagged, so each criterion is a single-key JSON object; this is
/// the same shape the backend uses for a candidate's `input` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub enum FilterCriterion {
    /// In-stock products only (or out-of-stock only when false).
    Available(bool),
    /// Variant price range.
    Price(PriceRange),
    /// Variant option, e.g. Color: Red.
    VariantOption { name: String, value: String },
    /// Product metafield value.
    ProductMetafield {
        namespace: String,
        key: String,
        value: String,
    },
    /// Variant metafield value.
    VariantMetafield {
        namespace: String,
        key: String,
        value: String,
    },
    /// Product tag.
    Tag(String),
    /// Product vendor.
    ProductVendor(String),
    /// Product type.
    ProductType(String),
}

impl FilterCriterion {
    /// Short name of the criterion kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterCriterion::Available(_) => "available",
            FilterCriterion::Price(_) => "price",
            FilterCriterion::VariantOption { .. } => "variantOption",
            FilterCriterion::ProductMetafield { .. } => "productMetafield",
            FilterCriterion::VariantMetafield { .. } => "variantMetafield",
            FilterCriterion::Tag(_) => "tag",
            FilterCriterion::ProductVendor(_) => "productVendor",
            FilterCriterion::ProductType(_) => "productType",
        }
    }

    /// The price range, if this is a price criterion.
    pub fn price(&self) -> Option<&PriceRange> {
        match self {
            FilterCriterion::Price(range) => Some(range),
            _ => None,
        }
    }
}

/// Price bounds. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Backend sort keys for products within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    Price,
    BestSelling,
    Created,
    Manual,
    Relevance,
}

/// Sort key plus direction flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub sort_key: SortKey,
    pub reverse: bool,
}

/// A group of filter values reported by the backend (e.g. "Availability").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub id: String,
    pub label: String,
    /// Backend filter type (`LIST`, `PRICE_RANGE`, `BOOLEAN`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub values: Vec<FilterValueCandidate>,
}

/// A backend-enumerated filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterValueCandidate {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Serialized criterion, e.g. `{"tag":"Sale"}`.
    pub input: String,
}

impl FilterValueCandidate {
    /// Whether this candidate is the backend's price filter value.
    pub fn is_price_filter(&self) -> bool {
        self.id == PRICE_FILTER_ID
    }

    /// Decode the serialized criterion carried in `input`.
    pub fn criterion(&self) -> serde_json::Result<FilterCriterion> {
        serde_json::from_str(&self.input)
    }
}

/// A criterion paired with the label shown on its filter chip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFilter {
    pub filter: FilterCriterion,
    pub label: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn criterion_serializes_as_single_key_object() {
        let tag = serde_json::to_value(FilterCriterion::Tag("Sale".to_string())).unwrap();
        assert_eq!(tag, serde_json::json!({"tag": "Sale"}));

        let option = serde_json::to_value(FilterCriterion::VariantOption {
            name: "Color".to_string(),
            value: "Red".to_string(),
        })
        .unwrap();
        assert_eq!(
            option,
            serde_json::json!({"variantOption": {"name": "Color", "value": "Red"}})
        );

        let price = serde_json::to_value(FilterCriterion::Price(PriceRange {
            min: Some(20.0),
            max: None,
        }))
        .unwrap();
        assert_eq!(price, serde_json::json!({"price": {"min": 20.0}}));
    }

    #[test]
    fn candidate_input_decodes_independent_of_field_order() {
        let candidate = FilterValueCandidate {
            id: "filter.p.m.custom.material".to_string(),
            label: "Cotton".to_string(),
            count: Some(3),
            input: r#"{"productMetafield":{"value":"cotton","key":"material","namespace":"custom"}}"#
                .to_string(),
        };

        assert_eq!(
            candidate.criterion().unwrap(),
            FilterCriterion::ProductMetafield {
                namespace: "custom".to_string(),
                key: "material".to_string(),
                value: "cotton".to_string(),
            }
        );
    }

    #[test]
    fn candidate_input_with_two_kinds_is_rejected() {
        let candidate = FilterValueCandidate {
            id: "bogus".to_string(),
            label: "Bogus".to_string(),
            count: None,
            input: r#"{"tag":"Sale","productVendor":"Acme"}"#.to_string(),
        };
        assert!(candidate.criterion().is_err());
    }

    #[test]
    fn sort_spec_uses_backend_names() {
        let spec = SortSpec {
            sort_key: SortKey::BestSelling,
            reverse: false,
        };
        assert_eq!(
            serde_json::to_value(spec).unwrap(),
            serde_json::json!({"sortKey": "BEST_SELLING", "reverse": false})
        );
    }

    #[test]
    fn price_candidate_is_detected_by_id() {
        let candidate = FilterValueCandidate {
            id: PRICE_FILTER_ID.to_string(),
            label: "Price".to_string(),
            count: None,
            input: r#"{"price":{"min":0,"max":100}}"#.to_string(),
        };
        assert!(candidate.is_price_filter());
        assert_eq!(
            candidate.criterion().unwrap().price().copied(),
            Some(PriceRange {
                min: Some(0.0),
                max: Some(100.0)
            })
        );
    }
}
