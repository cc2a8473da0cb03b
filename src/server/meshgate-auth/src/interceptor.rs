//! Per-request authentication.

use std::sync::Arc;

use axum::http::Request;
use tracing::{debug, warn};

use crate::headers::{clear_trust_headers, is_public_headers, token_id, write_trust_headers};
use crate::interpreter::interpret;
use crate::{AuthOutcome, ResolveError, TokenRecord, TokenResolver};

/// Authenticates inbound requests against the authorization service.
///
/// Holds no per-request state; clones share the resolver.
#[derive(Clone)]
pub struct AuthInterceptor {
    resolver: Arc<dyn TokenResolver>,
}

impl AuthInterceptor {
    /// Creates an interceptor resolving tokens through `resolver`.
    pub fn new(resolver: Arc<dyn TokenResolver>) -> Self {
        Self { resolver }
    }

    /// Name of the underlying resolver.
    pub fn resolver_name(&self) -> &'static str {
        self.resolver.name()
    }

    /// Resolves `token_id` and classifies the response.
    pub async fn resolve_token(&self, token_id: &str) -> Result<TokenRecord, ResolveError> {
        interpret(self.resolver.resolve(token_id).await)
    }

    /// Authenticates `request`, rewriting its trust headers in place.
    ///
    /// Inbound trust headers are always discarded first. Only
    /// [`AuthOutcome::Rejected`] means the request must be aborted; an unknown
    /// token is treated the same as no token.
    pub async fn authenticate<B>(&self, request: Option<&mut Request<B>>) -> AuthOutcome {
        let Some(request) = request else {
            return AuthOutcome::Public;
        };

        clear_trust_headers(request.headers_mut());

        if is_public_headers(request.headers()) {
            debug!(path = %request.uri().path(), "public request");
            return AuthOutcome::Public;
        }

        let Some(token_id) = token_id(request.uri()) else {
            return AuthOutcome::NoToken;
        };

        match self.resolve_token(&token_id).await {
            Ok(token) => {
                write_trust_headers(request.headers_mut(), &token);
                debug!(
                    caller_id = token.user_id,
                    client_id = token.client_id,
                    "request authenticated"
                );
                AuthOutcome::Authenticated(token)
            },
            Err(e) if e.is_not_found() => {
                debug!("access token not found, proceeding unauthenticated");
                AuthOutcome::NoToken
            },
            Err(e) => {
                warn!(resolver = self.resolver.name(), error = %e, "request rejected");
                AuthOutcome::Rejected(e.into_rest_error())
            },
        }
    }
}
