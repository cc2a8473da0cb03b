//! Classification of raw authorization service responses.
//!
//! Rules, applied in order:
//!
//! - no response at all is [`ResolveError::NoResponse`]
//! - a status above 299 must carry a [`RestError`] body, which is returned as
//!   [`ResolveError::Remote`]; anything else is [`ResolveError::ErrorContract`]
//! - any other status must carry a [`TokenRecord`] body; anything else is
//!   [`ResolveError::TokenContract`]

use meshgate_errors::RestError;
use tracing::{debug, error};

use crate::{RawResponse, ResolveError, TokenRecord};

/// Highest status code treated as success.
pub const MAX_SUCCESS_STATUS: u16 = 299;

/// Classifies one raw response.
pub fn interpret(raw: RawResponse) -> Result<TokenRecord, ResolveError> {
    let (status, body) = match raw {
        RawResponse::NoResponse => return Err(ResolveError::NoResponse),
        RawResponse::Received { status, body } => (status, body),
    };

    if status > MAX_SUCCESS_STATUS {
        return match RestError::from_json(&body) {
            Ok(remote) => {
                debug!(status, remote_status = remote.status, code = %remote.error, "authorization service returned an error");
                Err(ResolveError::Remote(remote))
            },
            Err(e) => {
                error!(status, error = %e, "authorization service error payload broke the shared schema");
                Err(ResolveError::ErrorContract)
            },
        };
    }

    TokenRecord::from_json(&body).map_err(|e| {
        error!(status, error = %e, "authorization service token payload broke the token schema");
        ResolveError::TokenContract
    })
}
