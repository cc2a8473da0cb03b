//! Authorization service endpoint configuration.
//!
//! Built once at startup and immutable afterwards.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tracing::{debug, info};

use crate::AuthError;

/// Environment variable holding the authorization service host.
pub const ENV_HOST: &str = "AUTH_SERVICE_HOST";
/// Environment variable holding the authorization service port.
pub const ENV_PORT: &str = "AUTH_SERVICE_PORT";

/// Host used when `AUTH_SERVICE_HOST` is unset.
pub const DEFAULT_HOST: &str = "localhost";
/// Port used when `AUTH_SERVICE_PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;
/// Timeout applied to every token lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

/// Where the authorization service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthServiceConfig {
    /// Host name or IP address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AuthServiceConfig {
    /// Reads host and port from the process environment.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads host and port through `lookup`, falling back to the defaults.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = read(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match read(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AuthError::Configuration(format!("{ENV_PORT} is not a valid port: {raw:?}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            ..Self::default()
        })
    }

    /// Replaces the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL of the authorization service (`http://host:port`).
    pub fn base_url(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("http://[{}]:{}", ip, self.port),
            _ => format!("http://{}:{}", self.host, self.port),
        }
    }

    /// Resolves the host once and pins the configuration to its address.
    ///
    /// The first IPv4 address wins; IPv6 is used only when no IPv4 address
    /// exists.
    pub async fn discover(self) -> Result<Self, AuthError> {
        let discovery_error = |reason: String| AuthError::Discovery {
            host: self.host.clone(),
            reason,
        };

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| discovery_error(e.to_string()))?
            .collect();
        debug!(host = %self.host, addrs = ?addrs, "authorization service host lookup");

        let addr = addrs
            .iter()
            .find(|a| a.is_ipv4())
            .or_else(|| addrs.first())
            .ok_or_else(|| discovery_error("no addresses returned".into()))?;

        let pinned = Self {
            host: addr.ip().to_string(),
            ..self
        };
        info!(base_url = %pinned.base_url(), "authorization service endpoint resolved");
        Ok(pinned)
    }
}
