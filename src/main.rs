//! Booking Platform Access Gateway
//!
//! Classifies every request before it reaches the booking application and
//! either forwards it or redirects the browser.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────────────┐
//!                          │                   ACCESS GATEWAY                      │
//!                          │                                                       │
//!     Client Request       │  ┌─────────┐   ┌───────────┐   ┌──────────────────┐  │
//!     ─────────────────────┼─▶│  http   │──▶│ routing   │──▶│    security      │  │
//!                          │  │ server  │   │ exclusion │   │ credentials +    │  │
//!                          │  └─────────┘   └─────┬─────┘   │ access_control   │  │
//!                          │                      │ excluded └────────┬─────────┘  │
//!                          │                      │          allow    │  redirect  │
//!                          │                      ▼                   ▼            │
//!     Client Response      │                ┌──────────────┐   ┌────────────┐      │
//!     ◀────────────────────┼────────────────│   forward    │   │ 307 login/ │──────┼──▶ Client
//!                          │                │   upstream   │   │    home    │      │
//!                          │                └──────┬───────┘   └────────────┘      │
//!                          │  ┌──────────────────────────────────────────────┐    │
//!                          │  │ config · observability · lifecycle           │    │
//!                          │  └──────────────────────────────────────────────┘    │
//!                          └─────────────────────────┼─────────────────────────────┘
//!                                                    ▼
//!                                           Booking application
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use booking_gateway::config::{load_config, GatewayConfig};
use booking_gateway::observability::{logging, metrics};
use booking_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "booking-gateway")]
#[command(about = "Access control gateway for the booking platform", long_about = None)]
struct Args {
    /// Path to a TOML configuration file; defaults are used when omitted.
    #[arg(short, long, env = "BOOKING_GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!("booking-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        public_paths = config.access.public_paths.len(),
        owner_paths = config.access.owner_paths.len(),
        admin_paths = config.access.admin_paths.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
