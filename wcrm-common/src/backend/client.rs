//! HTTP client for the hosted backend

use std::time::Duration;

use serde_json::Value;

use crate::config::BackendConfig;
use crate::{Error, Result};

use super::auth::AuthApi;
use super::query::TableQuery;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("WorkflowCRM/", env!("CARGO_PKG_VERSION"));

/// Client for the hosted backend's table and auth endpoints
///
/// Cheap to clone; the inner `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    /// Endpoint base URL (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public API key sent as the `apikey` header on every request
    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Start a query against a table
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    /// Auth endpoint surface
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Map a non-success response to a typed backend error, extracting the
    /// message field the backend uses when one is present
    pub(crate) async fn error_from_response(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => extract_error_message(&body),
            Err(e) => format!("unreadable error body: {}", e),
        };
        Error::Backend { status, message }
    }
}

/// Pull the human-readable message out of a backend error body.
/// PostgREST uses `message`, GoTrue uses `error_description` or `msg`.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error_description", "msg", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }
    if body.is_empty() {
        "no error detail".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> BackendClient {
        BackendClient::new(&BackendConfig {
            url: "https://backend.example.com/".to_string(),
            anon_key: "anon".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(test_client().base_url(), "https://backend.example.com");
    }

    #[test]
    fn error_message_extraction_prefers_known_keys() {
        assert_eq!(
            extract_error_message(r#"{"message":"duplicate key"}"#),
            "duplicate key"
        );
        assert_eq!(
            extract_error_message(r#"{"error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(extract_error_message("plain text"), "plain text");
        assert_eq!(extract_error_message(""), "no error detail");
    }
}
