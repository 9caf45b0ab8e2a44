//! HTTP backend abstraction for host and catalog requests.
//!
//! The production implementation wraps reqwest. Requests carry a short
//! timeout and are never retried: a rate-limited or unreachable host must be
//! reported to the caller as-is.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{HostError, HostResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can fetch JSON from URLs.
///
/// This is an implementation detail - external code should use the core
/// port traits.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    ///
    /// Non-success statuses are returned as `HostError::ApiRequestFailed`.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HostResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Settings for building a [`ReqwestBackend`].
#[derive(Clone)]
pub struct BackendSettings {
    pub timeout: Duration,
    pub user_agent: String,
    pub token: Option<String>,
}

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    auth_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend.
    pub fn new(settings: &BackendSettings) -> HostResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| HostError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            auth_token: settings.token.clone(),
        })
    }

    /// Build a request with optional authentication.
    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url.as_str());
        if let Some(ref token) = self.auth_token {
            request = request.bearer_auth(token);
        }
        request
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HostResult<T> {
        tracing::debug!(%url, "GET");
        let response = self.build_request(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HostError::ApiRequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let data: T = response.json().await?;
        Ok(data)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    fn settings(token: Option<&str>) -> BackendSettings {
        BackendSettings {
            timeout: Duration::from_secs(3),
            user_agent: "dlcount-test".to_string(),
            token: token.map(str::to_string),
        }
    }

    #[test]
    fn test_reqwest_backend_creation() {
        let backend = ReqwestBackend::new(&settings(None)).unwrap();
        assert!(backend.auth_token.is_none());
    }

    #[test]
    fn test_reqwest_backend_with_token() {
        let backend = ReqwestBackend::new(&settings(Some("ghp_test"))).unwrap();
        assert_eq!(backend.auth_token.as_deref(), Some("ghp_test"));

        let url = Url::parse("https://api.github.com/repos/o/r/releases").unwrap();
        let request = backend.build_request(&url).build().unwrap();
        assert_eq!(
            request.headers().get("Authorization").unwrap(),
            "Bearer ghp_test"
        );
    }

    #[test]
    fn test_anonymous_request_has_no_auth_header() {
        let backend = ReqwestBackend::new(&settings(None)).unwrap();
        let url = Url::parse("https://git.pixelbuilds.org/api/v1/repos/o/r/releases").unwrap();
        let request = backend.build_request(&url).build().unwrap();
        assert!(request.headers().get("Authorization").is_none());
    }

    #[tokio::test]
    async fn test_fake_backend_returns_canned_json() {
        let backend = FakeBackend::new()
            .with_response("raven", CannedResponse::Json(json!([{"assets": []}])));

        let url = Url::parse("https://example.com/repos/o/raven/releases").unwrap();
        let result: serde_json::Value = backend.get_json(&url).await.unwrap();

        assert_eq!(result[0]["assets"], json!([]));
        assert_eq!(backend.requests(), vec![url.to_string()]);
    }

    #[tokio::test]
    async fn test_fake_backend_status_and_unknown_url() {
        let backend = FakeBackend::new().with_response("raven", CannedResponse::Status(403));

        let url = Url::parse("https://example.com/repos/o/raven/releases").unwrap();
        let result: HostResult<serde_json::Value> = backend.get_json(&url).await;
        assert!(matches!(
            result,
            Err(HostError::ApiRequestFailed { status: 403, .. })
        ));

        let url = Url::parse("https://example.com/unknown").unwrap();
        let result: HostResult<serde_json::Value> = backend.get_json(&url).await;
        assert!(matches!(
            result,
            Err(HostError::ApiRequestFailed { status: 404, .. })
        ));
    }
}
