//! # Meshgate Errors
//!
//! The REST error payload shared by every service in the mesh.
//!
//! Business services and the authorization service emit the same JSON shape
//! on failure, so a decode failure against this schema means a peer changed
//! its contract rather than a runtime condition.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod rest;

pub use rest::RestError;
