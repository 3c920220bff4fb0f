//! route-guard server binary.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ axum::serve
//!                      │
//!                      ▼
//!              request ID → trace span → timeout
//!                      │
//!                      ▼
//!              compiled RouteTable ──── no match ──▶ 404
//!                      │
//!                      ▼
//!              group middleware (ApiKeyAuth) ── short-circuit ──▶ 401
//!                      │
//!                      ▼
//!              handler ──▶ UserController ──▶ UserStore
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_guard::config::{load_config, validate_config, ConfigError, ServiceConfig};
use route_guard::observability::init_logging;
use route_guard::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "route-guard")]
#[command(about = "Demonstration HTTP service with API key protected route groups", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(args: &Args) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "route-guard starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_key_header = %config.auth.api_key_header,
        request_timeout_secs = config.timeouts.request_secs,
        config_file = ?args.config,
        "Configuration loaded"
    );

    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let stopped = shutdown.subscribe();
    shutdown.trigger_on_signal();

    server.run(listener, stopped).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
