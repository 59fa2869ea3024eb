//! Storefront backend module.
//!
//! This module provides:
//! - CollectionGateway: trait the request handler fetches collections through
//! - StorefrontClient: GraphQL-over-HTTP gateway implementation
//! - PageContentLoader: auxiliary page content, loaded alongside collections

mod client;
pub mod content;
pub mod gateway;

pub use client::StorefrontClient;
pub use content::{
    HttpPageContentLoader, NoopPageContentLoader, PageContentLoader, PageContentRequest,
};
pub use gateway::{
    Collection, CollectionGateway, CollectionQuery, CollectionResponse, CollectionSeo,
    CollectionSummary, GatewayError, PageInfo, ProductConnection,
};
