//! Waitlist gateway (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                 WAITLIST GATEWAY                 │
//!                       │                                                  │
//!   Browser form        │  ┌─────────┐   ┌────────────┐   ┌────────────┐   │
//!   ────────────────────┼─▶│  CORS   │──▶│ rate limit │──▶│ validation │   │
//!   POST {email,company}│  │preflight│   │  (ledger)  │   │            │   │
//!                       │  └─────────┘   └────────────┘   └─────┬──────┘   │
//!                       │                                       │          │
//!                       │                                       ▼          │
//!   JSON response       │                               ┌────────────┐     │
//!   ◀───────────────────┼───────────────────────────────│  notifier  │─────┼──▶ Email API
//!                       │                               └────────────┘     │
//!                       └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use waitlist_gateway::config::{load_config, GatewayConfig};
use waitlist_gateway::lifecycle::{signals::shutdown_signal, Shutdown};
use waitlist_gateway::observability::init_logging;
use waitlist_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "waitlist-gateway")]
#[command(about = "Waitlist signup gateway", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long, env = "WAITLIST_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);

    tracing::info!("waitlist-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        allowed_origin = %config.cors.allowed_origin,
        email_enabled = config.email.enabled,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
