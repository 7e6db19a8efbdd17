//! Subcommand implementations

use std::sync::Arc;

use anyhow::Result;
use fieldbook_core::{ApiClient, ApiClientConfig, SessionStore};

pub mod lists;
pub mod records;
pub mod session;

/// Everything a command needs to talk to the backend
pub struct AppContext {
    pub session: SessionStore,
    pub client: Arc<ApiClient>,
}

impl AppContext {
    pub fn new(config: ApiClientConfig, session: SessionStore) -> Self {
        let client = Arc::new(ApiClient::new(config, session.clone()));
        Self { session, client }
    }

    /// Fail early when nobody is logged in
    pub fn require_login(&self) -> Result<()> {
        if !self.session.is_authenticated() {
            anyhow::bail!("Not logged in. Run `fieldbook login` first.");
        }
        Ok(())
    }
}
