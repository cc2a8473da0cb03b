//! Authentication outcome types.

use meshgate_errors::RestError;

use crate::TokenRecord;

/// Result of one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Request flagged public (or absent); no identity attached.
    Public,
    /// No usable credential presented, or the token is unknown.
    NoToken,
    /// Token resolved; trust headers were written.
    Authenticated(TokenRecord),
    /// Resolution failed; the request must not proceed.
    Rejected(RestError),
}

impl AuthOutcome {
    /// Error the pipeline must return to the caller, if any.
    pub fn error(&self) -> Option<&RestError> {
        match self {
            AuthOutcome::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// Consumes the outcome, keeping only the error.
    pub fn into_error(self) -> Option<RestError> {
        match self {
            AuthOutcome::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// The resolved token, if authenticated.
    pub fn token(&self) -> Option<&TokenRecord> {
        match self {
            AuthOutcome::Authenticated(token) => Some(token),
            _ => None,
        }
    }

    /// `(caller_id, client_id)` when authenticated.
    pub fn identity(&self) -> Option<(i64, i64)> {
        self.token().map(|t| (t.user_id, t.client_id))
    }

    /// Checks if a token was resolved.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated(_))
    }

    /// Checks if the request must be aborted.
    pub fn is_rejected(&self) -> bool {
        matches!(self, AuthOutcome::Rejected(_))
    }
}
