//! Shopfront Kernel Library
//!
//! Collection pages for a storefront: query-string filter parsing, sort
//! resolution, the storefront gateway, and applied-filter labeling.
//! The main entry point for running the server is the `shopfront` binary.

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod seo;
pub mod state;
pub mod storefront;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
