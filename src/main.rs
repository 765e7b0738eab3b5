//! Realty gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ metrics ─▶ route guard ─────────┐
//!                                                   │ protected, no token     │ continue
//!                                                   ▼                         ▼
//!                                             307 → /real-estate        axum router
//!                                                                             │
//!                                      ┌──────────────────────────────────────┤
//!                                      ▼                                      ▼
//!                           enrichment pipeline                     rule-table validation
//!                           (geocode stage ─▶ provider)             (preferences, wishlist)
//!                                      │                                      │
//!                                      ▼                                      ▼
//!                           terminal handler / error reporter ◀───────────────┘
//!                                      │
//!     Client Response ◀── security headers ◀───────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use realty_gateway::config::load_or_default;
use realty_gateway::http::HttpServer;
use realty_gateway::lifecycle::{signals, Shutdown};
use realty_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "realty-gateway")]
#[command(about = "Request pipeline and route guard for the real-estate listing service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("realty-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        protected_paths = config.guard.protected_paths.len(),
        "Configuration loaded"
    );

    if config.geocoding.api_key.is_empty() {
        tracing::warn!("No geocoding API key configured; geocoding requests will be rejected upstream");
    }

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
