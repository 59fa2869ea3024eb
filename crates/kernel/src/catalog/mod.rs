//! Catalog filtering module.
//!
//! This module provides:
//! - Filter parser: query-string parameters to typed filter criteria
//! - Sort resolver: sort tokens to backend sort keys
//! - FilterReconciler: labels applied filters from backend filter values
//! - Pagination, locale, and currency helpers used by collection pages

pub mod currency;
pub mod filter_parser;
pub mod locale;
pub mod pagination;
pub mod reconcile;
pub mod sort;
pub mod types;

pub use currency::{CurrencyFormatter, LocaleCurrencyFormatter};
pub use filter_parser::{DEFAULT_FILTER_PREFIX, ParseWarning, ParsedFilters, parse_filters};
pub use locale::{Locale, LocaleResolver};
pub use pagination::{DEFAULT_PAGE_SIZE, PaginationVariables};
pub use reconcile::{FilterReconciler, PRICE_LABEL, reconcile};
pub use sort::{SORT_PARAM, resolve_sort};
pub use types::{
    AppliedFilter, FilterCriterion, FilterGroup, FilterValueCandidate, PRICE_FILTER_ID,
    PriceRange, SortKey, SortSpec,
};
