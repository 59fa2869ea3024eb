//! Applied-filter reconciliation.
//!
//! Pairs each parsed criterion with the backend filter value it selects so
//! the UI can show a labeled chip. Criteria with no matching value are
//! dropped; malformed backend values never match.

use tracing::{debug, warn};

use super::currency::CurrencyFormatter;
use super::locale::Locale;
use super::types::{AppliedFilter, FilterCriterion, FilterValueCandidate, PriceRange};

/// Label used for a price filter whose range cannot be shown in full.
pub const PRICE_LABEL: &str = "Price";

/// Backend filter values, decoded once per request.
pub struct FilterReconciler<'a> {
    candidates: Vec<(&'a FilterValueCandidate, FilterCriterion)>,
}

impl<'a> FilterReconciler<'a> {
    /// Decode every candidate's `input`. Undecodable candidates are logged
    /// and left out.
    pub fn new(candidates: impl IntoIterator<Item = &'a FilterValueCandidate>) -> Self {
        let candidates = candidates
            .into_iter()
            .filter_map(|candidate| match candidate.criterion() {
                Ok(criterion) => Some((candidate, criterion)),
                Err(e) => {
                    warn!(
                        id = %candidate.id,
                        input = %candidate.input,
                        error = %e,
                        "ignoring filter value with malformed input"
                    );
                    None
                }
            })
            .collect();

        Self { candidates }
    }

    /// Number of decodable candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// First candidate matching `criterion`.
    pub fn find(&self, criterion: &FilterCriterion) -> Option<&'a FilterValueCandidate> {
        self.candidates
            .iter()
            .find(|(_, decoded)| criteria_match(decoded, criterion))
            .map(|(candidate, _)| *candidate)
    }

    /// Label every criterion that has a matching candidate, preserving order.
    pub fn apply(
        &self,
        criteria: &[FilterCriterion],
        locale: &Locale,
        formatter: &dyn CurrencyFormatter,
    ) -> Vec<AppliedFilter> {
        criteria
            .iter()
            .filter_map(|criterion| {
                let Some(candidate) = self.find(criterion) else {
                    debug!(
                        kind = criterion.kind(),
                        filter = ?criterion,
                        "no filter value matches applied filter, dropping"
                    );
                    return None;
                };

                let label = match criterion.price() {
                    Some(range) if candidate.is_price_filter() => {
                        price_label(range, locale, formatter)
                    }
                    _ => candidate.label.clone(),
                };

                Some(AppliedFilter {
                    filter: criterion.clone(),
                    label,
                })
            })
            .collect()
    }
}

/// Match a decoded candidate against a parsed criterion.
///
/// Price is freeform input, so any price candidate matches any price
/// criterion. Every other kind requires structural equality.
pub fn criteria_match(candidate: &FilterCriterion, criterion: &FilterCriterion) -> bool {
    match (candidate, criterion) {
        (FilterCriterion::Price(_), FilterCriterion::Price(_)) => true,
        _ => candidate == criterion,
    }
}

/// Label a price range as `"{min} - {max}"`, or [`PRICE_LABEL`] when the
/// upper bound is open.
pub fn price_label(range: &PriceRange, locale: &Locale, formatter: &dyn CurrencyFormatter) -> String {
    let min = formatter.format(range.min.unwrap_or(0.0), locale);
    let max = range
        .max
        .map(|max| formatter.format(max, locale))
        .unwrap_or_default();

    if min.is_empty() || max.is_empty() {
        PRICE_LABEL.to_string()
    } else {
        format!("{min} - {max}")
    }
}

/// Reconcile criteria against backend candidates in one call.
pub fn reconcile<'a>(
    criteria: &[FilterCriterion],
    candidates: impl IntoIterator<Item = &'a FilterValueCandidate>,
    locale: &Locale,
    formatter: &dyn CurrencyFormatter,
) -> Vec<AppliedFilter> {
    FilterReconciler::new(candidates).apply(criteria, locale, formatter)
}
