//! Core API client
//!
//! Builds authenticated requests against the backend and turns non-2xx
//! responses into `DashboardError`s. A 401 that blames the token clears
//! the stored session before it is reported.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::config::ApiClientConfig;
use crate::auth::SessionStore;
use crate::constants;
use crate::error::{DashboardError, Result};

/// Client for the dashboard REST API
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiClientConfig,
    session: SessionStore,
}

impl ApiClient {
    fn create_http_client(config: &ApiClientConfig) -> Client {
        Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                error!("Failed to build HTTP client: {}. Using default client.", e);
                Client::new()
            })
    }

    pub fn new(config: ApiClientConfig, session: SessionStore) -> Self {
        Self {
            http: Self::create_http_client(&config),
            config,
            session,
        }
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Build a request carrying the session token
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header("content-type", "application/json");

        match self.session.token() {
            Some(token) => {
                request = request.header("authorization", format!("Bearer {}", token));
            }
            None => warn!("No session token, sending {} unauthenticated", path),
        }
        request
    }

    /// Send a request and parse its JSON body
    ///
    /// An empty success body reads as `Value::Null`.
    pub(crate) async fn send_json(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let response = self.handle_error_response(response).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Pass successful responses through, map the rest to errors
    pub(crate) async fn handle_error_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        error!("API error response: {} - {}", status, message);

        if status == StatusCode::UNAUTHORIZED && is_token_error(&message) {
            if let Err(e) = self.session.clear() {
                warn!("Failed to clear expired session: {}", e);
            }
            return Err(DashboardError::SessionExpired(message));
        }
        Err(DashboardError::fetch(Some(status.as_u16()), message))
    }
}

/// Backend `message` field, else the raw body, else the status text
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    if let Some(message) = from_json.filter(|m| !m.trim().is_empty()) {
        return message;
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Whether a 401 message blames the session token
pub(crate) fn is_token_error(message: &str) -> bool {
    let message = message.to_lowercase();
    constants::auth::TOKEN_ERROR_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}
