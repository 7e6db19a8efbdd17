//! List filters: status, region and assigned salesman

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::Entity;

/// Which records a status-aware list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    Active,
    Inactive,
    All,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
            StatusFilter::All => "all",
        }
    }

    /// The backend only distinguishes "active only" from "everything"
    pub fn needs_show_all(&self) -> bool {
        !matches!(self, StatusFilter::Active)
    }

    /// Records without a status flag count as active
    pub fn matches(&self, is_active: Option<bool>) -> bool {
        match self {
            StatusFilter::Active => is_active != Some(false),
            StatusFilter::Inactive => is_active == Some(false),
            StatusFilter::All => true,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            "all" => Ok(StatusFilter::All),
            other => Err(format!("unknown status filter '{}'", other)),
        }
    }
}

/// Filter applied to a listing (search reuses the status part)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub status: StatusFilter,
    pub region: Option<String>,
    pub salesman: Option<String>,
}

impl FilterSpec {
    pub fn with_status(status: StatusFilter) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into()).filter(|r: &String| !r.trim().is_empty());
        self
    }

    pub fn salesman(mut self, salesman: impl Into<String>) -> Self {
        self.salesman = Some(salesman.into()).filter(|s: &String| !s.trim().is_empty());
        self
    }

    /// Query parameters for list and search requests
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.status.needs_show_all() {
            pairs.push(("show_all", "true".to_string()));
        }
        if let Some(region) = &self.region {
            pairs.push(("region", region.trim().to_string()));
        }
        if let Some(salesman) = &self.salesman {
            pairs.push(("salesman", salesman.trim().to_string()));
        }
        pairs
    }

    /// Narrow a fetched page by status; `show_all` returns both kinds
    pub fn retain<T: Entity>(&self, items: Vec<T>) -> Vec<T> {
        if !T::KIND.supports_status() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| self.status.matches(item.is_active()))
            .collect()
    }
}
