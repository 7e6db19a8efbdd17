//! Persistence layer
//!
//! SQLite-based storage for user preferences and the saved filter of
//! each list.

use std::time::{SystemTime, UNIX_EPOCH};

mod database;
mod preferences;

#[cfg(test)]
mod database_tests;

pub use database::Database;
pub use preferences::Preferences;

/// Get current Unix timestamp in seconds
#[inline]
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
