mod config;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use clap::Parser;
use fallback::{Method, MethodNotAllowedResponder, NotFoundResponder};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Serves a single `/hello` route; everything else is answered by the
/// fallback responders.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "FALLBACK_SERVER_CONFIG")]
    config: Option<PathBuf>,
    /// Address to listen on, overriding the configuration file
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

async fn hello() -> &'static str {
    "Hello, world!"
}

fn app() -> Router {
    Router::new()
        .route(
            "/hello",
            get(hello)
                .fallback_service(MethodNotAllowedResponder.service([Method::GET, Method::HEAD])),
        )
        .fallback_service(NotFoundResponder)
}

fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!(error))
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for the shutdown signal");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }

    init_tracing(&config.log_filter)?;

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("could not bind to {}", config.bind_address))?;
    info!(address = %config.bind_address, "listening");

    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
