//! Router.

use axum::routing::get;
use axum::{Extension, Json, Router};
use meshgate_auth::{AuthInterceptor, AuthOutcome};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::{authenticate, CallerIdentity};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct WhoAmIResponse {
    caller_id: i64,
    client_id: i64,
    authenticated: bool,
    public: bool,
}

/// Builds the service router with authentication on every non-system route.
pub fn router(interceptor: AuthInterceptor) -> Router {
    let authenticated = Router::new()
        .route("/v1/whoami", get(whoami))
        .route_layer(axum::middleware::from_fn_with_state(interceptor, authenticate));

    Router::new()
        .route("/v1/sys/health", get(health))
        .merge(authenticated)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn whoami(
    identity: CallerIdentity,
    Extension(outcome): Extension<AuthOutcome>,
) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        caller_id: identity.caller_id,
        client_id: identity.client_id,
        authenticated: outcome.is_authenticated(),
        public: outcome == AuthOutcome::Public,
    })
}
