//! Backend entity schemas
//!
//! One explicit schema per list endpoint. Payloads that do not match are
//! decode errors, never silently defaulted.

pub mod envelope;
pub mod types;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::constants::paging;
use crate::error::{DashboardError, Result};

pub use envelope::{decode_list, Page};
pub use types::{Client, Contact, Product, Report, ReportNote, ReportProduct};

/// The three paginated entity lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Products,
    Clients,
    Reports,
}

impl EntityKind {
    pub fn all() -> &'static [EntityKind] {
        &[EntityKind::Products, EntityKind::Clients, EntityKind::Reports]
    }

    /// Path segment under the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Products => "products",
            EntityKind::Clients => "clients",
            EntityKind::Reports => "visit-reports",
        }
    }

    /// Key holding the item array in list and search responses
    pub fn items_key(&self) -> &'static str {
        match self {
            EntityKind::Products => "products",
            EntityKind::Clients => "clients",
            EntityKind::Reports => "reports",
        }
    }

    pub fn default_page_size(&self) -> u32 {
        match self {
            EntityKind::Products => paging::PRODUCTS_PAGE_SIZE,
            EntityKind::Clients => paging::CLIENTS_PAGE_SIZE,
            EntityKind::Reports => paging::REPORTS_PAGE_SIZE,
        }
    }

    /// `per_page` sent with the single search request
    pub fn search_page_size(&self) -> u32 {
        match self {
            EntityKind::Clients => paging::CLIENTS_SEARCH_PAGE_SIZE,
            EntityKind::Products | EntityKind::Reports => paging::SEARCH_PAGE_SIZE,
        }
    }

    /// Whether records carry an active/inactive status
    pub fn supports_status(&self) -> bool {
        !matches!(self, EntityKind::Products)
    }

    /// Products are deleted outright; clients and reports are deactivated
    pub fn supports_reactivate(&self) -> bool {
        self.supports_status()
    }

    /// Fields that must be non-empty before a create request is sent
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Products => &["name"],
            EntityKind::Clients => &["name"],
            EntityKind::Reports => &["client_id", "visit_date"],
        }
    }

    /// Reject a form body with missing or blank required fields
    pub fn validate_body(&self, body: &Value) -> Result<()> {
        for field in self.required_fields() {
            let present = match body.get(*field) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(_) => true,
            };
            if !present {
                return Err(DashboardError::validation(format!(
                    "{} is required",
                    field
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.items_key())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "products" | "product" => Ok(EntityKind::Products),
            "clients" | "client" => Ok(EntityKind::Clients),
            "reports" | "report" | "visit-reports" => Ok(EntityKind::Reports),
            other => Err(format!("unknown entity '{}'", other)),
        }
    }
}

/// A record type served by one of the list endpoints
pub trait Entity: DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> i64;

    /// None for records without a status
    fn is_active(&self) -> Option<bool> {
        None
    }

    /// Short human-readable label
    fn title(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_parse_and_paths() {
        assert_eq!("Report".parse::<EntityKind>(), Ok(EntityKind::Reports));
        assert_eq!(EntityKind::Reports.path(), "visit-reports");
        assert_eq!(EntityKind::Reports.items_key(), "reports");
        assert!("users".parse::<EntityKind>().is_err());
        assert!(!EntityKind::Products.supports_reactivate());
        assert_eq!(EntityKind::Clients.search_page_size(), 500);
        assert_eq!(EntityKind::Reports.search_page_size(), 100);
    }

    #[test]
    fn test_validate_body() {
        let kind = EntityKind::Clients;
        assert!(kind.validate_body(&json!({"name": "Al Noor"})).is_ok());

        let err = kind.validate_body(&json!({"name": "   "})).unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));

        let err = EntityKind::Reports
            .validate_body(&json!({"client_id": 3}))
            .unwrap_err();
        assert_eq!(err.to_string(), "visit_date is required");
    }
}
