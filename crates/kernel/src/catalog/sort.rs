//! Sort token resolution.

use super::types::{SortKey, SortSpec};

/// Query parameter carrying the sort token.
pub const SORT_PARAM: &str = "sort";

/// Map a user-facing sort token to the backend sort key and direction.
///
/// Total: absent or unrecognized tokens sort by relevance.
pub fn resolve_sort(token: Option<&str>) -> SortSpec {
    let (sort_key, reverse) = match token {
        Some("price-high-low") => (SortKey::Price, true),
        Some("price-low-high") => (SortKey::Price, false),
        Some("best-selling") => (SortKey::BestSelling, false),
        Some("newest") => (SortKey::Created, true),
        Some("featured") => (SortKey::Manual, false),
        _ => (SortKey::Relevance, false),
    };

    SortSpec { sort_key, reverse }
}

impl Default for SortSpec {
    fn default() -> Self {
        resolve_sort(None)
    }
}
