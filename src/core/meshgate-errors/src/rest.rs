//! REST error payload.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Machine-readable codes emitted by the constructors below.
pub mod codes {
    /// Code for 400 responses.
    pub const BAD_REQUEST: &str = "bad_request";
    /// Code for 401 responses.
    pub const UNAUTHORIZED: &str = "unauthorized";
    /// Code for 404 responses.
    pub const NOT_FOUND: &str = "not_found";
    /// Code for 500 responses.
    pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";
}

/// Error payload exchanged between mesh services.
///
/// Peers written against older tooling capitalize the field names, so either
/// spelling is accepted on decode. A body carrying both spellings of the same
/// field is rejected as a duplicate. Output always uses the lowercase form.
///
/// `causes` may be missing or `null`; both decode to an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct RestError {
    /// Human-readable message.
    #[serde(alias = "Message")]
    pub message: String,

    /// HTTP status code the error maps to.
    #[serde(alias = "Status")]
    pub status: u16,

    /// Machine-readable error code (e.g. `not_found`).
    #[serde(alias = "Error")]
    pub error: String,

    /// Underlying causes, most specific first.
    #[serde(
        alias = "Causes",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub causes: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RestError {
    /// Creates an error with an explicit status and code.
    pub fn new(status: u16, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            error: error.into(),
            causes: Vec::new(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message, codes::BAD_REQUEST)
    }

    /// 401 Unauthorized.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, message, codes::UNAUTHORIZED)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message, codes::NOT_FOUND)
    }

    /// 500 Internal Server Error carrying a single cause.
    pub fn internal_server_error(message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::new(500, message, codes::INTERNAL_SERVER_ERROR).with_cause(cause)
    }

    /// Appends a cause.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Decodes a payload received from a peer service.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Returns true when the error reports a missing resource.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Returns true for 5xx statuses.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}
