//! Token resolver trait.

use async_trait::async_trait;

/// Raw outcome of one lookup against the authorization service.
///
/// Transport failures are data here, not errors: classification happens in
/// [`crate::interpreter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse {
    /// Nothing came back (connection refused, timeout, truncated body).
    NoResponse,
    /// A complete HTTP response.
    Received {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: Vec<u8>,
    },
}

impl RawResponse {
    /// Convenience constructor for a received response.
    pub fn received(status: u16, body: impl Into<Vec<u8>>) -> Self {
        RawResponse::Received {
            status,
            body: body.into(),
        }
    }
}

/// Trait for looking up access tokens by id.
///
/// Implementations perform exactly one round trip per call. They never retry
/// and never cache.
#[async_trait]
pub trait TokenResolver: Send + Sync {
    /// Looks up `token_id`.
    async fn resolve(&self, token_id: &str) -> RawResponse;

    /// Returns the name of this resolver for logging/debugging.
    fn name(&self) -> &'static str;
}
