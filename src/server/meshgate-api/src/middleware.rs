//! Authentication middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use meshgate_auth::{AuthInterceptor, AuthOutcome};
use tracing::debug;

use crate::ApiError;

/// Runs the interceptor on every request.
///
/// Rejections short-circuit with the error payload. Every other outcome
/// forwards the rewritten request with the [`AuthOutcome`] stored in its
/// extensions.
///
/// ```ignore
/// Router::new()
///     .route("/v1/items", get(list_items))
///     .route_layer(axum::middleware::from_fn_with_state(interceptor, authenticate));
/// ```
pub async fn authenticate(
    State(interceptor): State<AuthInterceptor>,
    mut req: Request,
    next: Next,
) -> Response {
    let outcome = interceptor.authenticate(Some(&mut req)).await;

    if let AuthOutcome::Rejected(err) = outcome {
        debug!(path = %req.uri().path(), status = err.status, "request aborted by authentication");
        return ApiError(err).into_response();
    }

    req.extensions_mut().insert(outcome);
    next.run(req).await
}
