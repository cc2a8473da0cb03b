//! Resolved access token.

use serde::{Deserialize, Serialize};

/// Access token as returned by the authorization service.
///
/// Lives for a single authentication attempt and is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Opaque token identifier.
    pub id: String,
    /// Identity of the caller the token was issued to.
    pub user_id: i64,
    /// Identity of the delegated application.
    pub client_id: i64,
}

impl TokenRecord {
    /// Decodes a token payload.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
