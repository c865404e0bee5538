//! Community Signup Gateway
//!
//! An HTTP gateway guarding a community-signup API: form submissions are
//! rate limited, validated and sanitized, then forwarded to the member
//! directory.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                 SIGNUP GATEWAY                    │
//!                    │                                                   │
//!   Form submission  │  ┌─────────┐   ┌────────────┐   ┌─────────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ rate limit │──▶│ validation  │  │
//!                    │  │ server  │   │  (window)  │   │  pipeline   │  │
//!                    │  └─────────┘   └────────────┘   └──────┬──────┘  │
//!                    │                                        │         │
//!   Response         │  ┌─────────┐                    ┌──────▼──────┐  │
//!   ◀────────────────┼──│response │◀───────────────────│  directory  │──┼──▶ Member
//!                    │  │envelope │                    │  forwarder  │  │    directory
//!                    │  └─────────┘                    └─────────────┘  │
//!                    │                                                   │
//!                    │  ┌─────────────────────────────────────────────┐ │
//!                    │  │            Cross-Cutting Concerns            │ │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌────────────┐  │ │
//!                    │  │  │ config │ │observability│ │ lifecycle  │  │ │
//!                    │  │  └────────┘ └─────────────┘ └────────────┘  │ │
//!                    │  └─────────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signup_gateway::config::load_config;
use signup_gateway::http::HttpServer;
use signup_gateway::observability::logger::Logger;
use signup_gateway::observability::metrics;

#[derive(Debug, Parser)]
#[command(name = "signup-gateway", about = "Community signup gateway")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signup_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("signup-gateway v0.1.0 starting");

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit_enabled = config.rate_limit.enabled,
        directory_enabled = config.directory.enabled,
        production = config.observability.production,
        "Configuration loaded"
    );

    // Metrics exporter on its own listener
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

    let logger = Arc::new(Logger::from_config(&config.observability));

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    // Create and run HTTP server
    let server = HttpServer::new(config, logger)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
