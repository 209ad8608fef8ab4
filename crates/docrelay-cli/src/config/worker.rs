//! Worker process configuration with CLI argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use docrelay_worker::WorkerConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// CLI flags for the `worker` subcommand, per the documented worker flag contract.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct WorkerCliConfig {
    /// Base URL of the coordinator's HTTP API.
    #[arg(long, env = "COORDINATOR_URL")]
    pub coordinator: String,

    /// Display name this worker registers under; must be unique among active workers.
    #[arg(long, env = "WORKER_NAME")]
    pub name: String,

    /// URL of the extraction endpoint this worker calls for every document.
    #[arg(long, env = "EXTRACTION_API_URL")]
    pub api_url: String,

    /// Model identifier passed through to the extraction endpoint.
    #[arg(long, env = "EXTRACTION_MODEL")]
    pub model: String,

    /// Bearer token for the extraction endpoint, if any.
    #[arg(long, env = "OPENAI_API_KEY", default_value = "")]
    pub api_key: String,

    /// Resumes an already-registered worker instead of registering a new one.
    #[arg(long, env = "WORKER_ID")]
    pub worker_id: Option<Uuid>,

    /// Seconds between heartbeats sent to the coordinator while idle.
    #[arg(long, env = "WORKER_HEARTBEAT_INTERVAL", default_value_t = 10)]
    pub heartbeat_interval_secs: u64,

    /// Local fallback directory consulted for `<name>.json` schemas the
    /// coordinator doesn't have registered.
    #[arg(long, env = "WORKER_SCHEMA_DIR", default_value = "./schemas")]
    pub schema_dir: PathBuf,
}

impl From<WorkerCliConfig> for WorkerConfig {
    fn from(cli: WorkerCliConfig) -> Self {
        let mut config = Self::new(cli.coordinator, cli.name, cli.api_url, cli.model)
            .with_api_key(cli.api_key);
        config.heartbeat_interval = Duration::from_secs(cli.heartbeat_interval_secs);
        config.schema_fallback_dir = cli.schema_dir;
        if let Some(worker_id) = cli.worker_id {
            config = config.with_worker_id(worker_id);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WorkerCliConfig {
        WorkerCliConfig {
            coordinator: "http://localhost:3000".to_string(),
            name: "w1".to_string(),
            api_url: "https://vision.example/extract".to_string(),
            model: "gpt-4o".to_string(),
            api_key: "sk-test".to_string(),
            worker_id: None,
            heartbeat_interval_secs: 15,
            schema_dir: PathBuf::from("./schemas"),
        }
    }

    #[test]
    fn converts_into_worker_config() {
        let config: WorkerConfig = sample().into();
        assert_eq!(config.coordinator, "http://localhost:3000");
        assert_eq!(config.heartbeat_interval, Duration::from_secs(15));
        assert!(config.worker_id.is_none());
    }

    #[test]
    fn preserves_worker_id_for_resume_mode() {
        let id = Uuid::now_v7();
        let mut cli = sample();
        cli.worker_id = Some(id);
        let config: WorkerConfig = cli.into();
        assert_eq!(config.worker_id, Some(id));
    }
}
