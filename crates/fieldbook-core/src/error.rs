//! Dashboard error types

use thiserror::Error;

/// Errors surfaced to the UI action that triggered them
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Caught locally before anything is sent to the backend
    #[error("{0}")]
    Validation(String),

    /// Network failure or non-2xx response
    #[error("request failed: {message}")]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    /// 401 carrying session-expired semantics; the stored session has been cleared
    #[error("session expired: {0}")]
    SessionExpired(String),

    /// Response body did not match the endpoint's schema
    #[error("unexpected {entity} payload: {message}")]
    Decode {
        entity: &'static str,
        message: String,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Preference storage error
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl DashboardError {
    pub fn fetch(status: Option<u16>, message: impl Into<String>) -> Self {
        DashboardError::Fetch {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DashboardError::Validation(message.into())
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            DashboardError::Fetch { status, .. } => *status,
            DashboardError::SessionExpired(_) => Some(401),
            _ => None,
        }
    }

    /// True when the caller must route to login instead of showing an error
    pub fn is_auth(&self) -> bool {
        matches!(self, DashboardError::SessionExpired(_))
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Fetch {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_auth_helpers() {
        let err = DashboardError::fetch(Some(500), "Failed to fetch products");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_auth());
        assert_eq!(err.to_string(), "request failed: Failed to fetch products");

        let err = DashboardError::SessionExpired("Token has expired".into());
        assert_eq!(err.status(), Some(401));
        assert!(err.is_auth());

        assert_eq!(DashboardError::validation("Name is required").status(), None);
    }
}
