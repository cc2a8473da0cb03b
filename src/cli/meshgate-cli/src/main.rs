//! Meshgate CLI - Command line interface.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use meshgate_auth::{AuthInterceptor, AuthServiceConfig, RemoteTokenClient, RestError};
use reqwest::Client;
use serde::Deserialize;

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "meshgate")]
#[command(about = "Nubster Meshgate CLI - Inspect access tokens and mesh identity")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an access token against the authorization service
    Token {
        /// Access token id
        token_id: String,
        /// Authorization service host
        #[arg(long, default_value = "localhost", env = "AUTH_SERVICE_HOST")]
        auth_host: String,
        /// Authorization service port
        #[arg(long, default_value = "8080", env = "AUTH_SERVICE_PORT")]
        auth_port: u16,
        /// Lookup timeout in milliseconds
        #[arg(long, default_value = "200")]
        timeout_ms: u64,
    },
    /// Ask a Meshgate server which identity a token maps to
    Whoami {
        /// Access token id
        #[arg(long, env = "MESHGATE_TOKEN")]
        token: Option<String>,
        /// Meshgate server address
        #[arg(long, default_value = "http://localhost:8081", env = "MESHGATE_ADDR")]
        addr: String,
    },
    /// Check server status
    Status {
        /// Meshgate server address
        #[arg(long, default_value = "http://localhost:8081", env = "MESHGATE_ADDR")]
        addr: String,
    },
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct WhoAmIResponse {
    caller_id: i64,
    client_id: i64,
    authenticated: bool,
    public: bool,
}

// ============================================================================
// HTTP Client
// ============================================================================

struct MeshgateClient {
    client: Client,
    base_url: String,
}

impl MeshgateClient {
    fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_health(&self) -> Result<HealthResponse> {
        let resp = self
            .client
            .get(self.url("/v1/sys/health"))
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            bail!("Server error: {}", resp.status());
        }

        resp.json().await.context("Failed to parse response")
    }

    async fn whoami(&self, token: Option<&str>) -> Result<WhoAmIResponse> {
        let mut req = self.client.get(self.url("/v1/whoami"));

        if let Some(token) = token {
            req = req.query(&[("access_token", token)]);
        }

        let resp = req.send().await.context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error: RestError = resp.json().await.unwrap_or_else(|_| {
                RestError::new(status.as_u16(), "Unknown error", "unknown")
            });
            bail!("Whoami failed ({}): {}", error.status, error.message);
        }

        resp.json().await.context("Failed to parse response")
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_token(token_id: &str, config: AuthServiceConfig) -> Result<()> {
    let client = RemoteTokenClient::new(&config)?;
    let interceptor = AuthInterceptor::new(Arc::new(client));

    match interceptor.resolve_token(token_id.trim()).await {
        Ok(token) => {
            println!("{}", serde_json::to_string_pretty(&token)?);
            Ok(())
        },
        Err(e) if e.is_not_found() => {
            println!("Token not found: requests carrying it proceed unauthenticated");
            Ok(())
        },
        Err(e) => {
            let err = e.into_rest_error();
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
            bail!("Token rejected: {}", err.message)
        },
    }
}

async fn cmd_whoami(addr: &str, token: Option<&str>) -> Result<()> {
    let identity = MeshgateClient::new(addr)?.whoami(token).await?;

    if identity.public {
        println!("Public request (no identity attached)");
    } else if identity.authenticated {
        println!("Caller ID: {}", identity.caller_id);
        println!("Client ID: {}", identity.client_id);
    } else {
        println!("Unauthenticated");
    }

    Ok(())
}

async fn cmd_status(addr: &str) -> Result<()> {
    let health = MeshgateClient::new(addr)?.get_health().await?;

    println!("Status:  {}", health.status);
    println!("Version: {}", health.version);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Token {
            token_id,
            auth_host,
            auth_port,
            timeout_ms,
        } => {
            let config = AuthServiceConfig {
                host: auth_host,
                port: auth_port,
                timeout: Duration::from_millis(timeout_ms),
            };
            cmd_token(&token_id, config).await
        },
        Commands::Whoami { token, addr } => cmd_whoami(&addr, token.as_deref()).await,
        Commands::Status { addr } => cmd_status(&addr).await,
    }
}
