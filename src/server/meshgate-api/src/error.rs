//! HTTP rendering of mesh errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use meshgate_errors::RestError;

/// A [`RestError`] returned from a handler or middleware.
///
/// Rendered as the shared JSON payload with its own status. Statuses that are
/// not valid HTTP codes are sent as 500 with the payload untouched.
#[derive(Debug)]
pub struct ApiError(pub RestError);

impl From<RestError> for ApiError {
    fn from(e: RestError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}
