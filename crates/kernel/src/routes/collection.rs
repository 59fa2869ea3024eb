//! Collection page routes.
//!
//! `GET /collections/{handle}` and `GET /{locale}/collections/{handle}`
//! return the collection, its applied filters, sibling collections, SEO
//! metadata, and auxiliary page content as JSON.

use axum::{
    Json, Router,
    extract::{OriginalUri, Path, RawQuery, State},
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::pagination::first_value;
use crate::catalog::{
    AppliedFilter, PaginationVariables, ParsedFilters, SORT_PARAM, SortSpec, parse_filters,
    reconcile, resolve_sort,
};
use crate::error::{AppError, AppResult};
use crate::seo::SeoMeta;
use crate::state::AppState;
use crate::storefront::{Collection, CollectionQuery, CollectionSummary, PageContentRequest};

/// Create the collection router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/collections", get(missing_handle))
        .route("/collections/", get(missing_handle))
        .route("/collections/{handle}", get(show_collection))
        .route("/{locale}/collections", get(missing_localized_handle))
        .route("/{locale}/collections/", get(missing_localized_handle))
        .route("/{locale}/collections/{handle}", get(show_localized_collection))
}

// -------------------------------------------------------------------------
// Response types
// -------------------------------------------------------------------------

/// Response payload for a collection page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPage {
    pub collection: Collection,
    pub applied_filters: Vec<AppliedFilter>,
    pub collections: Vec<CollectionSummary>,
    pub seo: SeoMeta,
    pub content: Value,
    pub sort: SortSpec,
}

// -------------------------------------------------------------------------
// Request types
// -------------------------------------------------------------------------

/// Inputs of one collection page request, as extracted from the URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionRequest<'a> {
    /// Locale path prefix, when the URL carried one.
    pub locale_prefix: Option<&'a str>,
    /// Collection handle path parameter.
    pub handle: Option<&'a str>,
    /// Request path, used for the canonical URL.
    pub path: &'a str,
    /// Raw query string.
    pub query: Option<&'a str>,
}

// -------------------------------------------------------------------------
// Handlers
// -------------------------------------------------------------------------

async fn show_collection(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
) -> AppResult<Json<CollectionPage>> {
    let request = CollectionRequest {
        locale_prefix: None,
        handle: Some(handle.as_str()),
        path: uri.path(),
        query: query.as_deref(),
    };
    Ok(Json(load_collection_page(&state, request).await?))
}

async fn show_localized_collection(
    State(state): State<AppState>,
    Path((locale, handle)): Path<(String, String)>,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
) -> AppResult<Json<CollectionPage>> {
    let request = CollectionRequest {
        locale_prefix: Some(locale.as_str()),
        handle: Some(handle.as_str()),
        path: uri.path(),
        query: query.as_deref(),
    };
    Ok(Json(load_collection_page(&state, request).await?))
}

async fn missing_handle(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<CollectionPage>> {
    let request = CollectionRequest {
        path: uri.path(),
        ..Default::default()
    };
    Ok(Json(load_collection_page(&state, request).await?))
}

async fn missing_localized_handle(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<CollectionPage>> {
    let request = CollectionRequest {
        locale_prefix: Some(locale.as_str()),
        path: uri.path(),
        ..Default::default()
    };
    Ok(Json(load_collection_page(&state, request).await?))
}

/// Build a collection page: parse sort and filters, query the backend,
/// and label the filters the backend recognizes.
///
/// Fails with `BadRequest` when the handle is missing (checked before the
/// locale prefix) and `NotFound` when the locale prefix is unsupported or
/// the backend has no such collection.
/// Filter anomalies never fail the request.
pub async fn load_collection_page(
    state: &AppState,
    request: CollectionRequest<'_>,
) -> AppResult<CollectionPage> {
    let handle = request
        .handle
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing collection handle".to_string()))?;

    let config = state.config();
    let locale = match request.locale_prefix {
        Some(prefix) => config
            .locales
            .from_path_prefix(prefix)
            .ok_or(AppError::NotFound)?,
        None => config.locales.default_locale(),
    };

    let entries: Vec<(String, String)> = request
        .query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let pagination = PaginationVariables::from_query(&entries, config.products_per_page);
    let sort = resolve_sort(first_value(&entries, SORT_PARAM));
    let ParsedFilters { criteria, warnings } =
        parse_filters(entries.iter().map(|(k, v)| (k, v)), &config.filter_prefix);

    for warning in &warnings {
        warn!(handle = %handle, warning = %warning, "skipping filter parameter");
    }

    let query = CollectionQuery {
        handle: handle.to_string(),
        pagination,
        filters: criteria,
        sort,
        locale: locale.clone(),
    };
    let content_request = PageContentRequest {
        handle: handle.to_string(),
        locale: locale.clone(),
    };

    // Independent calls; dropping this future (client gone) cancels both.
    let (response, content) = tokio::join!(
        state.gateway().fetch_collection(&query),
        state.content().load(&content_request)
    );

    let response = response?;
    let content = content.unwrap_or_else(|e| {
        warn!(handle = %handle, error = %e, "failed to load page content");
        Value::Null
    });

    let Some(collection) = response.collection else {
        debug!(handle = %handle, "collection not found");
        return Err(AppError::NotFound);
    };

    let applied_filters = reconcile(
        &query.filters,
        collection.filter_values(),
        locale,
        state.currency(),
    );

    if applied_filters.len() < query.filters.len() {
        debug!(
            handle = %handle,
            requested = query.filters.len(),
            applied = applied_filters.len(),
            "some filters had no matching filter value"
        );
    }

    let seo = SeoMeta::for_collection(&collection, &config.site_url, request.path);

    Ok(CollectionPage {
        collection,
        applied_filters,
        collections: response.collections,
        seo,
        content,
        sort,
    })
}
