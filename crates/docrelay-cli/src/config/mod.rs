//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! └── command: Commands
//!     ├── Serve { server, store }   # HTTP coordinator
//!     └── Worker { worker }         # worker control loop
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod server;
mod store;
mod worker;

use clap::{Parser, Subcommand};
pub use server::{ServerConfig, log_server_config};
use serde::{Deserialize, Serialize};
pub use store::StoreConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
pub use worker::WorkerCliConfig;

/// Document-processing coordinator and worker command-line interface.
#[derive(Debug, Clone, Parser)]
#[command(name = "docrelay")]
#[command(about = "Distributed document-processing pipeline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum Commands {
    /// Runs the coordinator's HTTP API.
    Serve {
        #[clap(flatten)]
        server: ServerConfig,
        #[clap(flatten)]
        store: StoreConfig,
    },
    /// Runs a worker process against a coordinator.
    Worker {
        #[clap(flatten)]
        worker: WorkerCliConfig,
    },
}

impl Cli {
    /// Loads environment variables from a `.env` file (if present) and parses
    /// CLI arguments. Preferred over [`Cli::parse`] directly: `.env` must be
    /// loaded before clap parses arguments so `env = "..."` fallbacks see it.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
