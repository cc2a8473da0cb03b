//! Meshgate Server - Main entry point.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use meshgate_auth::{AuthInterceptor, AuthServiceConfig, RemoteTokenClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "meshgate-server")]
#[command(about = "Nubster Meshgate - access token authentication for mesh services")]
#[command(version)]
struct Cli {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0:8081", env = "MESHGATE_BIND_ADDRESS")]
    bind: String,

    /// Timeout for each access token lookup, in milliseconds
    #[arg(long, default_value = "200", env = "AUTH_SERVICE_TIMEOUT_MS")]
    auth_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting Meshgate server...");
    tracing::info!("Bind address: {}", cli.bind);

    // Authorization service endpoint is resolved once for the process lifetime.
    let config = AuthServiceConfig::from_env()?
        .with_timeout(Duration::from_millis(cli.auth_timeout_ms));
    let client = RemoteTokenClient::discover(config)
        .await
        .context("Failed to locate authorization service")?;
    tracing::info!("Authorization service: {}", client.base_url());

    let app = meshgate_api::router(AuthInterceptor::new(Arc::new(client)));

    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;

    tracing::info!("Meshgate server started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutting down..."),
                Err(e) => tracing::error!("Failed to listen for shutdown signal: {e}"),
            }
        })
        .await?;

    Ok(())
}
