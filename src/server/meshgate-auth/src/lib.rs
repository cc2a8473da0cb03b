//! # Meshgate Auth
//!
//! Inbound request authentication for mesh services.
//!
//! A request presenting an `access_token` query parameter is resolved against
//! the authorization service. On success the interceptor writes two trust
//! headers (`X-Caller-Id`, `X-Client-Id`) that downstream handlers may rely on
//! without talking to the authorization service themselves.
//!
//! ## Flow
//!
//! 1. Strip any inbound trust headers
//! 2. Honour the `X-Public` marker
//! 3. Extract the token id
//! 4. Resolve it through a [`TokenResolver`]
//! 5. Classify the raw response ([`interpreter`])
//! 6. Rewrite the trust headers or reject the request

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod headers;
pub mod interceptor;
pub mod interpreter;
pub mod remote;
pub mod resolver;
pub mod token;

pub use config::AuthServiceConfig;
pub use context::AuthOutcome;
pub use error::{AuthError, ResolveError};
pub use headers::{caller_id, clear_trust_headers, client_id, is_public};
pub use interceptor::AuthInterceptor;
pub use remote::RemoteTokenClient;
pub use resolver::{RawResponse, TokenResolver};
pub use token::TokenRecord;

pub use meshgate_errors::RestError;
