//! HTTP token resolver backed by the authorization service.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::{AuthError, AuthServiceConfig, RawResponse, TokenResolver};

/// Calls `GET {base_url}/oauth/access_token/{token_id}`.
pub struct RemoteTokenClient {
    client: Client,
    base_url: Url,
}

impl RemoteTokenClient {
    /// Creates a client for the configured endpoint.
    ///
    /// No DNS lookup happens here; use [`AuthServiceConfig::discover`] first
    /// to pin the host to an address.
    pub fn new(config: &AuthServiceConfig) -> Result<Self, AuthError> {
        let base_url = Url::parse(&config.base_url())
            .map_err(|e| AuthError::Configuration(format!("invalid base url: {e}")))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::Client(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Resolves the configured host once, then builds the client.
    pub async fn discover(config: AuthServiceConfig) -> Result<Self, AuthError> {
        let pinned = config.discover().await?;
        Self::new(&pinned)
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the lookup endpoint for `token_id`, encoded as one path segment.
    pub fn token_url(&self, token_id: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["oauth", "access_token", token_id]);
        Some(url)
    }
}

#[async_trait]
impl TokenResolver for RemoteTokenClient {
    async fn resolve(&self, token_id: &str) -> RawResponse {
        let Some(url) = self.token_url(token_id) else {
            warn!(base_url = %self.base_url, "base url cannot carry a path");
            return RawResponse::NoResponse;
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, timeout = e.is_timeout(), "access token lookup failed");
                return RawResponse::NoResponse;
            },
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => {
                debug!(status, len = body.len(), "access token lookup response");
                RawResponse::Received {
                    status,
                    body: body.to_vec(),
                }
            },
            Err(e) => {
                warn!(status, error = %e, "failed to read access token response body");
                RawResponse::NoResponse
            },
        }
    }

    fn name(&self) -> &'static str {
        "oauth-remote"
    }
}
