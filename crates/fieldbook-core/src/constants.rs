//! Application constants and configuration defaults
//!
//! Centralized location for magic numbers and default values

use std::time::Duration;

/// HTTP client configuration
pub mod http {
    use super::*;

    /// Backend base URL used when neither config file nor environment override it
    pub const DEFAULT_API_URL: &str = "http://localhost:5009/api";

    /// Environment variable overriding the backend base URL
    pub const API_URL_ENV: &str = "FIELDBOOK_API_URL";

    /// Connection timeout for HTTP requests
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Whole-request timeout
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub const USER_AGENT: &str = "Fieldbook/0.1";
}

/// Page sizes per list, matching the backend's own defaults
pub mod paging {
    pub const PRODUCTS_PAGE_SIZE: u32 = 20;
    pub const CLIENTS_PAGE_SIZE: u32 = 500;
    pub const REPORTS_PAGE_SIZE: u32 = 15;

    /// Search responses are fetched in one shot and never appended to
    pub const SEARCH_PAGE_SIZE: u32 = 100;
    pub const CLIENTS_SEARCH_PAGE_SIZE: u32 = 500;
}

/// Live search tuning
pub mod search {
    use super::*;

    /// Minimum non-empty term length that issues a request
    pub const MIN_LENGTH: usize = 2;

    /// Quiet period after the last keystroke before a search fires
    pub const DEBOUNCE: Duration = Duration::from_millis(300);
}

/// Auto-load ("scrolled into view") trigger tuning
pub mod autoload {
    /// Distance in pixels beyond the viewport edge that still counts as visible
    pub const ROOT_MARGIN_PX: f32 = 100.0;

    /// Fraction of the sentinel that must be inside the expanded viewport
    pub const THRESHOLD: f32 = 0.1;
}

/// Authentication handling
pub mod auth {
    /// Substrings (lowercase) of a 401 message that mean the session token is dead
    pub const TOKEN_ERROR_MARKERS: &[&str] = &["token", "expired", "invalid"];
}

/// Local file layout
pub mod app {
    /// Config directory name
    pub const CONFIG_DIR_NAME: &str = ".fieldbook";

    pub const SESSION_FILE_NAME: &str = "session.json";
    pub const DATABASE_FILE_NAME: &str = "fieldbook.db";
    pub const CONFIG_FILE_NAME: &str = "config.toml";
    pub const LOG_FILE_NAME: &str = "fieldbook.log";
}
