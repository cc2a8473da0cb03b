//! Integration tests for Meshgate.
//!
//! Each test runs a mocked authorization service and a Meshgate router
//! served on an ephemeral port, then talks to it over real HTTP.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use httpmock::MockServer;
use meshgate_auth::{AuthInterceptor, AuthServiceConfig, RemoteTokenClient};
use reqwest::Client;
use serde::Deserialize;
use tokio::task::JoinHandle;

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct WhoAmIResponse {
    pub caller_id: i64,
    pub client_id: i64,
    pub authenticated: bool,
    pub public: bool,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
    pub error: String,
    #[serde(default)]
    pub causes: Vec<String>,
}

// ============================================================================
// Test Stack
// ============================================================================

/// A Meshgate router in front of a mocked authorization service.
pub struct TestStack {
    pub auth: MockServer,
    pub base_url: String,
    server: JoinHandle<()>,
}

impl TestStack {
    /// Starts the stack with the default lookup timeout.
    pub async fn start() -> Result<Self> {
        Self::start_with_timeout(Duration::from_millis(200)).await
    }

    /// Starts the stack with a custom lookup timeout.
    pub async fn start_with_timeout(timeout: Duration) -> Result<Self> {
        let auth = MockServer::start_async().await;

        let config = AuthServiceConfig {
            host: auth.host(),
            port: auth.port(),
            timeout,
        };
        let client = RemoteTokenClient::discover(config)
            .await
            .context("Failed to build token client")?;
        let app = meshgate_api::router(AuthInterceptor::new(Arc::new(client)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            auth,
            base_url,
            server,
        })
    }

    /// Get a configured HTTP client for this stack.
    pub fn client(&self) -> MeshgateClient {
        MeshgateClient::new(&self.base_url)
    }
}

impl Drop for TestStack {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// ============================================================================
// Test Client
// ============================================================================

/// HTTP client for exercising the Meshgate API.
pub struct MeshgateClient {
    client: Client,
    base_url: String,
}

/// Response from `/v1/whoami`: identity on success, error payload otherwise.
pub type WhoAmIResult = std::result::Result<WhoAmIResponse, (u16, ErrorResponse)>;

impl MeshgateClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }

    /// Calls `/v1/whoami` with the given query string and extra headers.
    pub async fn whoami(&self, query: &str, headers: &[(&str, &str)]) -> Result<WhoAmIResult> {
        let mut req = self
            .client
            .get(format!("{}/v1/whoami{}", self.base_url, query));
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();

        if resp.status().is_success() {
            Ok(Ok(resp.json().await?))
        } else {
            Ok(Err((status, resp.json().await?)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const TOKEN_PATH: &str = "/oauth/access_token/abc123";

    #[tokio::test]
    async fn test_valid_token_attaches_identity() {
        let stack = TestStack::start().await.unwrap();
        let mock = stack
            .auth
            .mock_async(|when, then| {
                when.method(GET).path(TOKEN_PATH);
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"id":"abc123","user_id":10,"client_id":5}"#);
            })
            .await;

        let identity = stack
            .client()
            .whoami("?access_token=abc123", &[("X-Caller-Id", "1")])
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert!(identity.authenticated);
        assert_eq!(identity.caller_id, 10);
        assert_eq!(identity.client_id, 5);
    }

    #[tokio::test]
    async fn test_unknown_token_proceeds_unauthenticated() {
        let stack = TestStack::start().await.unwrap();
        stack
            .auth
            .mock_async(|when, then| {
                when.method(GET).path(TOKEN_PATH);
                then.status(404)
                    .body(r#"{"message":"no access token found","status":404,"error":"not_found","causes":null}"#);
            })
            .await;

        let identity = stack
            .client()
            .whoami("?access_token=abc123", &[("X-Caller-Id", "7"), ("X-Client-Id", "7")])
            .await
            .unwrap()
            .unwrap();

        assert!(!identity.authenticated);
        assert_eq!(identity.caller_id, 0);
        assert_eq!(identity.client_id, 0);
    }

    #[tokio::test]
    async fn test_remote_error_is_returned_verbatim() {
        let stack = TestStack::start().await.unwrap();
        stack
            .auth
            .mock_async(|when, then| {
                when.method(GET).path(TOKEN_PATH);
                then.status(400).body(
                    r#"{"message":"Bad Request","status":400,"error":"API params wrong"}"#,
                );
            })
            .await;

        let (status, error) = stack
            .client()
            .whoami("?access_token=abc123", &[])
            .await
            .unwrap()
            .unwrap_err();

        assert_eq!(status, 400);
        assert_eq!(error.status, 400);
        assert_eq!(error.message, "Bad Request");
        assert_eq!(error.error, "API params wrong");
    }

    #[tokio::test]
    async fn test_broken_error_contract_is_internal_error() {
        let stack = TestStack::start().await.unwrap();
        stack
            .auth
            .mock_async(|when, then| {
                when.method(GET).path(TOKEN_PATH);
                then.status(400)
                    .body(r#"{"message":"Bad Request","status":"400","error":"API params wrong"}"#);
            })
            .await;

        let (status, error) = stack
            .client()
            .whoami("?access_token=abc123", &[])
            .await
            .unwrap()
            .unwrap_err();

        assert_eq!(status, 500);
        assert_eq!(error.error, "internal_server_error");
        assert_eq!(error.causes, vec!["contract error".to_string()]);
    }

    #[tokio::test]
    async fn test_broken_token_contract_is_internal_error() {
        let stack = TestStack::start().await.unwrap();
        stack
            .auth
            .mock_async(|when, then| {
                when.method(GET).path(TOKEN_PATH);
                then.status(200)
                    .body(r#"{"id":"abc123","user_id":"10","client_id":"5"}"#);
            })
            .await;

        let (status, error) = stack
            .client()
            .whoami("?access_token=abc123", &[])
            .await
            .unwrap()
            .unwrap_err();

        assert_eq!(status, 500);
        assert_eq!(error.causes, vec!["contract error".to_string()]);
    }

    #[tokio::test]
    async fn test_slow_authorization_service_is_internal_error() {
        let stack = TestStack::start_with_timeout(Duration::from_millis(50))
            .await
            .unwrap();
        stack
            .auth
            .mock_async(|when, then| {
                when.method(GET).path(TOKEN_PATH);
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .body(r#"{"id":"abc123","user_id":10,"client_id":5}"#);
            })
            .await;

        let (status, error) = stack
            .client()
            .whoami("?access_token=abc123", &[])
            .await
            .unwrap()
            .unwrap_err();

        assert_eq!(status, 500);
        assert_eq!(error.causes, vec!["invalid response".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_token_makes_no_lookup() {
        let stack = TestStack::start().await.unwrap();
        let mock = stack
            .auth
            .mock_async(|when, then| {
                when.method(GET);
                then.status(500);
            })
            .await;

        let identity = stack
            .client()
            .whoami("?access_token=%20%20", &[])
            .await
            .unwrap()
            .unwrap();

        assert!(!identity.authenticated);
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_public_request_makes_no_lookup() {
        let stack = TestStack::start().await.unwrap();
        let mock = stack
            .auth
            .mock_async(|when, then| {
                when.method(GET);
                then.status(500);
            })
            .await;

        let identity = stack
            .client()
            .whoami(
                "?access_token=abc123",
                &[("X-Public", "true"), ("X-Caller-Id", "3")],
            )
            .await
            .unwrap()
            .unwrap();

        assert!(identity.public);
        assert_eq!(identity.caller_id, 0);
        assert_eq!(mock.hits_async().await, 0);
    }
}
