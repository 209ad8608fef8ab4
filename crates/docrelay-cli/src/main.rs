#![forbid(unsafe_code)]

//! Binary entrypoint: `serve` runs the coordinator's HTTP API, `worker` runs
//! a worker control loop against a running coordinator.

mod config;
mod server;
mod worker;

use std::process;

use anyhow::Context;
use docrelay_server::state::{AppConfig, AppState};

use crate::config::{Cli, Commands, log_server_config};

/// Tracing target for server startup events.
pub const TRACING_TARGET_SERVER_STARTUP: &str = "docrelay_cli::server::startup";
/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "docrelay_cli::server::shutdown";
/// Tracing target for configuration logging.
pub const TRACING_TARGET_CONFIG: &str = "docrelay_cli::config";
/// Tracing target for worker process events.
pub const TRACING_TARGET_WORKER: &str = "docrelay_cli::worker";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    log_startup_info();

    match cli.command {
        Commands::Serve { server, store } => run_serve(server, store).await,
        Commands::Worker { worker } => self::worker::run(worker).await,
    }
}

async fn run_serve(
    server_config: config::ServerConfig,
    store_config: config::StoreConfig,
) -> anyhow::Result<()> {
    log_server_config(&server_config);
    server_config
        .validate()
        .context("invalid server configuration")?;

    let (redis, mongo) = store_config.into_configs();
    let state = AppState::from_config(&AppConfig { redis, mongo })
        .await
        .context("failed to connect to Redis/MongoDB")?;
    let router = docrelay_server::routes(state);

    server::serve(router, server_config).await?;
    Ok(())
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting docrelay"
    );

    tracing::debug!(
        target: TRACING_TARGET_SERVER_STARTUP,
        pid = process::id(),
        arch = std::env::consts::ARCH,
        os = std::env::consts::OS,
        "build information"
    );
}
