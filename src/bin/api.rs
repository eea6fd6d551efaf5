//! Scoreboard Proxy API Server
//!
//! Run with: cargo run --bin scoreboard-api
//!
//! # Configuration
//!
//! Read from `--config`, or the first of `$CONFIG_DIR/scoreboard/config.toml`,
//! `/etc/scoreboard/config.toml` and `./config.toml`. Environment variables
//! override the file:
//! - `SCOREBOARD_GATEWAY_URL`: Remote records endpoint; startup fails if it points at this server
//! - `SCOREBOARD_GATEWAY_TIMEOUT_SECS`: Request timeout, 0 for none (default: 30)
//! - `SCOREBOARD_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SCOREBOARD_API_PORT`: Port to listen on (default: 8082)
//! - `SCOREBOARD_EXPORT_STYLE`: `verbatim` or `rfc4180`
//! - `SCOREBOARD_LOG_LEVEL` / `SCOREBOARD_LOG_FORMAT`, or `RUST_LOG`

use anyhow::Context;
use clap::Parser;
use scoreboard::api::{serve, AppState};
use scoreboard::config::Config;
use scoreboard::gateway::{Gateway, HttpGateway};
use scoreboard::logging::init_tracing;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "scoreboard-api")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Local proxy in front of the student records endpoint")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging, "tower_http=debug");

    tracing::info!("Starting Scoreboard API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Gateway: {}", config.gateway.url);

    if let Err(e) = config.check_proxy_gateway() {
        anyhow::bail!(e);
    }

    let gateway = Arc::new(
        HttpGateway::new(config.gateway.clone()).context("building gateway client")?,
    );

    // Check gateway availability
    match gateway.fetch_all().await {
        Ok(decoded) => tracing::info!(
            records = decoded.records.len(),
            rejected = decoded.rejected.len(),
            "Gateway connection verified"
        ),
        Err(e) => tracing::warn!("Gateway not available: {} (requests will fail until it is)", e),
    }

    let state = AppState::new(gateway, config.api.clone()).with_export_style(config.export.style);

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state).await?;

    tracing::info!("Scoreboard API server stopped");
    Ok(())
}
