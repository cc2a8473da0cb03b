//! Identity extractor for handlers behind the authentication middleware.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use meshgate_auth::headers::{caller_id_from, client_id_from};
use serde::Serialize;

/// Caller and client ids read from the trust headers.
///
/// Both are zero for unauthenticated requests. Only meaningful behind
/// [`crate::authenticate`], which is the sole writer of those headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CallerIdentity {
    /// Caller (user) id.
    pub caller_id: i64,
    /// Delegated client id.
    pub client_id: i64,
}

impl CallerIdentity {
    /// Checks if a caller is attached.
    pub fn is_authenticated(&self) -> bool {
        self.caller_id != 0
    }
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            caller_id: caller_id_from(&parts.headers),
            client_id: client_id_from(&parts.headers),
        })
    }
}
