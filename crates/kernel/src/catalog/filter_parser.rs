//! Query-string filter parsing.
//!
//! Filter parameters are keyed `<prefix>.<type>[.<subkey>[.<subkey>]]`:
//!
//! | key | criterion |
//! |---|---|
//! | `filter.available=true` | `{"available":true}` |
//! | `filter.price.min=10` | `{"price":{"min":10}}` |
//! | `filter.v.Color=Red` | `{"variantOption":{"name":"Color","value":"Red"}}` |
//! | `filter.p_m.custom.material=cotton` | `{"productMetafield":{...}}` |
//! | `filter.v_m.custom.fit=slim` | `{"variantMetafield":{...}}` |
//! | `filter.tag=Sale` | `{"tag":"Sale"}` |
//! | `filter.vendor=Acme` | `{"productVendor":"Acme"}` |
//! | `filter.type=Shirts` | `{"productType":"Shirts"}` |
//!
//! Dispatch is by the fixed type token only; values are never coerced.

use thiserror::Error;
use tracing::trace;

use super::types::{FilterCriterion, PriceRange};

/// Default key prefix for filter parameters.
pub const DEFAULT_FILTER_PREFIX: &str = "filter";

/// A non-fatal problem with one filter parameter. The parameter is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    #[error("price bound `{key}` is not a finite number: {value:?}")]
    InvalidPriceBound { key: String, value: String },

    #[error("unknown price bound `{key}`")]
    UnknownPriceBound { key: String },

    #[error("filter `{key}` is missing required sub-keys")]
    MissingSubKeys { key: String },
}

/// Result of parsing filter parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFilters {
    /// Criteria in query-string order. Price bounds occupy the position of
    /// the first price parameter.
    pub criteria: Vec<FilterCriterion>,
    /// Parameters that were skipped.
    pub warnings: Vec<ParseWarning>,
}

/// Accumulator slot. The single price criterion is assembled separately and
/// placed where its first bound appeared.
enum Slot {
    Criterion(FilterCriterion),
    Price,
}

/// Parse query-string entries into filter criteria.
///
/// Entries whose key does not start with `<prefix>.` are ignored, as are
/// unknown type tokens.
pub fn parse_filters<I, K, V>(entries: I, prefix: &str) -> ParsedFilters
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut slots: Vec<Slot> = Vec::new();
    let mut price: Option<PriceRange> = None;
    let mut warnings = Vec::new();

    for (key, value) in entries {
        let (key, value) = (key.as_ref(), value.as_ref());
        let Some(path) = strip_filter_prefix(key, prefix) else {
            continue;
        };

        let (token, rest) = match path.split_once('.') {
            Some((token, rest)) => (token, Some(rest).filter(|r| !r.is_empty())),
            None => (path, None),
        };

        let criterion = match token {
            "available" => FilterCriterion::Available(value == "true" || value == "1"),
            "price" => {
                match parse_price_bound(key, rest, value) {
                    Ok((bound, amount)) => {
                        let range = price.get_or_insert_with(|| {
                            slots.push(Slot::Price);
                            PriceRange::default()
                        });
                        match bound {
                            PriceBound::Min => range.min = Some(amount),
                            PriceBound::Max => range.max = Some(amount),
                        }
                    }
                    Err(warning) => warnings.push(warning),
                }
                continue;
            }
            "v" => {
                let Some(name) = rest else {
                    warnings.push(missing_sub_keys(key));
                    continue;
                };
                FilterCriterion::VariantOption {
                    name: name.to_string(),
                    value: value.to_string(),
                }
            }
            "p_m" | "v_m" => {
                let Some((namespace, meta_key)) = rest.and_then(split_metafield_path) else {
                    warnings.push(missing_sub_keys(key));
                    continue;
                };
                let (namespace, meta_key, value) =
                    (namespace.to_string(), meta_key.to_string(), value.to_string());
                if token == "p_m" {
                    FilterCriterion::ProductMetafield {
                        namespace,
                        key: meta_key,
                        value,
                    }
                } else {
                    FilterCriterion::VariantMetafield {
                        namespace,
                        key: meta_key,
                        value,
                    }
                }
            }
            "tag" => FilterCriterion::Tag(value.to_string()),
            "vendor" => FilterCriterion::ProductVendor(value.to_string()),
            "type" => FilterCriterion::ProductType(value.to_string()),
            other => {
                trace!(key = %key, token = %other, "ignoring unknown filter type");
                continue;
            }
        };

        slots.push(Slot::Criterion(criterion));
    }

    let criteria = slots
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Criterion(criterion) => Some(criterion),
            Slot::Price => price.take().map(FilterCriterion::Price),
        })
        .collect();

    ParsedFilters { criteria, warnings }
}

/// Return the part of `key` after `<prefix>.`, if non-empty.
fn strip_filter_prefix<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?
        .strip_prefix('.')
        .filter(|path| !path.is_empty())
}

enum PriceBound {
    Min,
    Max,
}

fn parse_price_bound(
    key: &str,
    sub_key: Option<&str>,
    value: &str,
) -> Result<(PriceBound, f64), ParseWarning> {
    let bound = match sub_key {
        Some("min") => PriceBound::Min,
        Some("max") => PriceBound::Max,
        _ => {
            return Err(ParseWarning::UnknownPriceBound {
                key: key.to_string(),
            });
        }
    };

    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok((bound, amount)),
        _ => Err(ParseWarning::InvalidPriceBound {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Split `namespace.key` where the key may itself contain dots.
fn split_metafield_path(path: &str) -> Option<(&str, &str)> {
    let (namespace, key) = path.split_once('.')?;
    if namespace.is_empty() || key.is_empty() {
        return None;
    }
    Some((namespace, key))
}

fn missing_sub_keys(key: &str) -> ParseWarning {
    ParseWarning::MissingSubKeys {
        key: key.to_string(),
    }
}
