//! # Meshgate API
//!
//! axum integration for the authentication interceptor.
//!
//! ## Endpoints
//!
//! - `/v1/sys/health` - Liveness (never authenticated)
//! - `/v1/whoami` - Echoes the identity the interceptor attached

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod identity;
pub mod middleware;
pub mod routes;

pub use error::ApiError;
pub use identity::CallerIdentity;
pub use middleware::authenticate;
pub use routes::router;
