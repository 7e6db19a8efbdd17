//! API client configuration
//!
//! Defaults come from `constants`; an optional `config.toml` and the
//! `FIELDBOOK_API_URL` environment variable override them in that order.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::constants;
use crate::entities::EntityKind;
use crate::paths;

/// Page size used for the plain listing of each entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageSizes {
    pub products: u32,
    pub clients: u32,
    pub reports: u32,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            products: constants::paging::PRODUCTS_PAGE_SIZE,
            clients: constants::paging::CLIENTS_PAGE_SIZE,
            reports: constants::paging::REPORTS_PAGE_SIZE,
        }
    }
}

/// Configuration for the API client
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClientConfig {
    /// Backend root, e.g. `http://localhost:5009/api`
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub page_sizes: PageSizes,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: constants::http::DEFAULT_API_URL.to_string(),
            connect_timeout: constants::http::CONNECT_TIMEOUT,
            request_timeout: constants::http::REQUEST_TIMEOUT,
            user_agent: constants::http::USER_AGENT.to_string(),
            page_sizes: PageSizes::default(),
        }
    }
}

/// On-disk shape of `config.toml`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    page_sizes: Option<PageSizes>,
}

impl ApiClientConfig {
    /// Load from `~/.fieldbook/config.toml` and the environment
    pub fn load() -> Result<Self> {
        let env_url = std::env::var(constants::http::API_URL_ENV).ok();
        Self::load_from(&paths::config_file(), env_url)
    }

    /// Load from an explicit config file, then apply an environment URL
    pub fn load_from(path: &Path, env_url: Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file: ConfigFile = toml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            config.apply(file);
            debug!("Loaded API config from {}", path.display());
        }

        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            info!("Using API URL from {}", constants::http::API_URL_ENV);
            config.base_url = url;
        }
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Replace the base URL (e.g. from a command line flag)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL for an endpoint path such as `products/list`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn page_size(&self, kind: EntityKind) -> u32 {
        match kind {
            EntityKind::Products => self.page_sizes.products,
            EntityKind::Clients => self.page_sizes.clients,
            EntityKind::Reports => self.page_sizes.reports,
        }
        .max(1)
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(url) = file.api_url {
            self.base_url = url;
        }
        if let Some(secs) = file.connect_timeout_secs {
            self.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(sizes) = file.page_sizes {
            self.page_sizes = sizes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_point_at_local_backend() {
        let config = ApiClientConfig::default();
        assert_eq!(config.url("products/list"), "http://localhost:5009/api/products/list");
        assert_eq!(config.page_size(EntityKind::Clients), 500);
        assert_eq!(config.page_size(EntityKind::Reports), 15);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ApiClientConfig::load_from(&dir.path().join("config.toml"), None).unwrap();
        assert_eq!(config, ApiClientConfig::default());
    }

    #[test]
    fn test_file_then_env_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"https://dash.example.com/api/\"\nrequest_timeout_secs = 5\n\n[page_sizes]\nproducts = 50\n",
        )
        .unwrap();

        let config = ApiClientConfig::load_from(&path, None).unwrap();
        assert_eq!(config.base_url, "https://dash.example.com/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.page_size(EntityKind::Products), 50);
        // Unset keys in the table keep their defaults
        assert_eq!(config.page_size(EntityKind::Clients), 500);

        let config =
            ApiClientConfig::load_from(&path, Some("http://10.0.0.2:5009/api".into())).unwrap();
        assert_eq!(config.url("/clients"), "http://10.0.0.2:5009/api/clients");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [").unwrap();
        assert!(ApiClientConfig::load_from(&path, None).is_err());
    }
}
