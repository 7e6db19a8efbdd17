//! Authentication state for Fieldbook
//!
//! Token issuance happens on the backend; this module only keeps the
//! resulting session and interprets the user's role.

pub mod roles;
pub mod session;

pub use roles::Role;
pub use session::{Session, SessionStore, SessionUser};
