//! Fieldbook Core - Shared library for the sales dashboard front ends
//!
//! This crate provides:
//! - REST client for products, clients and visit reports
//! - Login session and role handling
//! - Paged entity lists with debounced search and auto-load
//! - Reference-counted scroll locking for modal overlays
//! - Preference storage

pub mod api;
pub mod auth;
pub mod constants;
pub mod entities;
pub mod error;
pub mod listing;
pub mod overlay;
pub mod paths;
pub mod storage;

// Re-exports for convenience
pub use api::{ApiClient, ApiClientConfig};
pub use auth::{Role, Session, SessionStore, SessionUser};
pub use entities::{Client, Entity, EntityKind, Page, Product, Report};
pub use error::{DashboardError, Result};
pub use listing::{FilterSpec, LoadOutcome, PagedListController, StatusFilter};
pub use overlay::{OverlayStack, ScrollLockManager};
pub use storage::{Database, Preferences};
