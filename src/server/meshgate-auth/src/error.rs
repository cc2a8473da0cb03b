//! Authentication error types.

use meshgate_errors::RestError;
use thiserror::Error;

/// Errors raised while setting up the authentication layer.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The authorization service host could not be resolved.
    #[error("cannot resolve authorization service host {host}: {reason}")]
    Discovery {
        /// Host that failed to resolve.
        host: String,
        /// Resolver failure.
        reason: String,
    },

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(String),
}

/// Errors that can occur while resolving a single access token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No response was obtained (connection failure or timeout).
    #[error("no response from authorization service")]
    NoResponse,

    /// A failure status came back with a body that is not a [`RestError`].
    #[error("authorization service error payload does not match the shared error schema")]
    ErrorContract,

    /// A success status came back with a body that is not a token record.
    #[error("authorization service token payload does not match the token schema")]
    TokenContract,

    /// The authorization service reported an error.
    #[error("authorization service rejected the token: {0}")]
    Remote(RestError),
}

/// Cause strings carried by locally generated internal errors.
pub mod causes {
    /// No response was obtained.
    pub const INVALID_RESPONSE: &str = "invalid response";
    /// A payload failed to decode.
    pub const CONTRACT_ERROR: &str = "contract error";
}

impl ResolveError {
    /// Returns true when the authorization service does not know the token.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::Remote(err) if err.is_not_found())
    }

    /// Converts into the error reported to the caller.
    ///
    /// Remote errors pass through unchanged; local failures become internal
    /// server errors.
    pub fn into_rest_error(self) -> RestError {
        match self {
            ResolveError::NoResponse => RestError::internal_server_error(
                "invalid response from authorization service when trying to get access token",
                causes::INVALID_RESPONSE,
            ),
            ResolveError::ErrorContract => RestError::internal_server_error(
                "invalid error interface when trying to get access token",
                causes::CONTRACT_ERROR,
            ),
            ResolveError::TokenContract => RestError::internal_server_error(
                "error when trying to unmarshal access token response",
                causes::CONTRACT_ERROR,
            ),
            ResolveError::Remote(err) => err,
        }
    }
}

impl From<ResolveError> for RestError {
    fn from(e: ResolveError) -> Self {
        e.into_rest_error()
    }
}
