//! Ride-hailing backend service.
//!
//! A minimal ride-hailing API built with Tokio and Axum: user accounts,
//! login, driver availability, and schemaless ride CRUD over a pluggable
//! document store.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌───────────────────────────────────────────────┐
//!                   │                RIDEHAIL BACKEND               │
//!                   │                                               │
//!   Client Request  │  ┌────────┐    ┌────────┐    ┌────────────┐  │
//!   ────────────────┼─▶│  http  │───▶│  api   │───▶│   store    │  │
//!                   │  │ server │    │handlers│    │ (memory)   │  │
//!   Client Response │  └────────┘    └────────┘    └────────────┘  │
//!   ◀───────────────┼───────┘                                      │
//!                   │  ┌─────────────────────────────────────────┐ │
//!                   │  │          Cross-Cutting Concerns         │ │
//!                   │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                   │  │  │ config │ │observability│ │lifecycle│ │ │
//!                   │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                   │  └─────────────────────────────────────────┘ │
//!                   └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use ridehail::config::{load_config, AppConfig};
use ridehail::http::HttpServer;
use ridehail::lifecycle::Shutdown;
use ridehail::observability::{logging, metrics};
use ridehail::store::{seed, MemoryStore, Store};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "ridehail", about = "Minimal ride-hailing backend", version)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ridehail starting");
    tracing::info!(
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        seed_enabled = config.seed.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());

    if config.seed.enabled {
        seed::seed_sample_data(store.as_ref()).await?;
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
