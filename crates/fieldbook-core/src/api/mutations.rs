//! Create, update, deactivate and reactivate

use reqwest::Method;
use serde_json::Value;
use tracing::info;

use super::core::ApiClient;
use crate::entities::EntityKind;
use crate::error::{DashboardError, Result};

/// Outcome of a successful mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Backend `message`, when it sent one
    pub message: Option<String>,
    /// Full response body
    pub payload: Value,
}

impl MutationResult {
    fn from_payload(payload: Value) -> Self {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { message, payload }
    }

    /// Backend message, or `fallback` when it sent none
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

pub(crate) fn item_path(kind: EntityKind, id: i64) -> String {
    format!("{}/{}", kind.path(), id)
}

pub(crate) fn reactivate_path(kind: EntityKind, id: i64) -> String {
    format!("{}/{}/reactivate", kind.path(), id)
}

impl ApiClient {
    /// `POST /{entity}`; required fields are checked before sending
    pub async fn create(&self, kind: EntityKind, body: &Value) -> Result<MutationResult> {
        kind.validate_body(body)?;
        let request = self.request(Method::POST, kind.path()).json(body);
        let result = MutationResult::from_payload(self.send_json(request).await?);
        info!("Created {}", kind);
        Ok(result)
    }

    /// `PUT /{entity}/{id}`
    pub async fn update(&self, kind: EntityKind, id: i64, body: &Value) -> Result<MutationResult> {
        let request = self.request(Method::PUT, &item_path(kind, id)).json(body);
        let result = MutationResult::from_payload(self.send_json(request).await?);
        info!("Updated {} {}", kind, id);
        Ok(result)
    }

    /// `DELETE /{entity}/{id}`: deletes a product, deactivates a client or report
    pub async fn delete(&self, kind: EntityKind, id: i64) -> Result<MutationResult> {
        let request = self.request(Method::DELETE, &item_path(kind, id));
        let result = MutationResult::from_payload(self.send_json(request).await?);
        info!("Deleted {} {}", kind, id);
        Ok(result)
    }

    /// `PUT /{entity}/{id}/reactivate`
    pub async fn reactivate(&self, kind: EntityKind, id: i64) -> Result<MutationResult> {
        if !kind.supports_reactivate() {
            return Err(DashboardError::validation(format!(
                "{} cannot be reactivated",
                kind
            )));
        }
        let request = self.request(Method::PUT, &reactivate_path(kind, id));
        let result = MutationResult::from_payload(self.send_json(request).await?);
        info!("Reactivated {} {}", kind, id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClientConfig;
    use crate::auth::SessionStore;
    use serde_json::json;

    fn offline_client() -> ApiClient {
        let config = ApiClientConfig::default().with_base_url("http://127.0.0.1:9/api");
        ApiClient::new(config, SessionStore::in_memory(None))
    }

    #[test]
    fn test_paths() {
        assert_eq!(item_path(EntityKind::Clients, 12), "clients/12");
        assert_eq!(
            reactivate_path(EntityKind::Reports, 3),
            "visit-reports/3/reactivate"
        );
    }

    #[test]
    fn test_message_from_payload() {
        let result = MutationResult::from_payload(json!({"message": "Client reactivated"}));
        assert_eq!(result.message_or("done"), "Client reactivated");

        let result = MutationResult::from_payload(Value::Null);
        assert_eq!(result.message_or("done"), "done");
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_request() {
        let client = offline_client();

        let err = client
            .create(EntityKind::Products, &json!({"name": "  "}))
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));

        let err = client
            .reactivate(EntityKind::Products, 4)
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
    }
}
