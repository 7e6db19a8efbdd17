//! REST client for the dashboard backend
//!
//! - `config`: base URL, timeouts, page sizes (file + environment)
//! - `core`: authenticated requests and error mapping
//! - `listing`: list/search endpoints, `PageSource` for every entity
//! - `mutations`: create, update, deactivate, reactivate

pub mod config;
pub mod core;
pub mod listing;
pub mod mutations;

pub use self::config::{ApiClientConfig, PageSizes};
pub use self::core::ApiClient;
pub use self::mutations::MutationResult;
