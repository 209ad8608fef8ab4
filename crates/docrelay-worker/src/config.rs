//! Worker runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use uuid::Uuid;

/// Configuration for a single worker process (§4.6, §6 worker CLI flags).
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base URL of the coordinator.
    pub coordinator: String,
    /// Human label for this worker; must be unique among active workers.
    pub name: String,
    /// Base URL of the extraction endpoint this worker calls.
    pub api_url: String,
    /// Model identifier passed to the extractor.
    pub model: String,
    /// Opaque credential for the extraction endpoint; may be empty.
    pub api_key: String,
    /// Pre-assigned worker id for "resume existing worker" mode; skips
    /// registration and adopts this id directly (the coordinator must
    /// already hold the record in `STOPPED`/`ERROR` state).
    pub worker_id: Option<Uuid>,
    /// How often to send a heartbeat while otherwise idle.
    pub heartbeat_interval: Duration,
    /// Filesystem fallback directory consulted when the coordinator's
    /// schema lookup returns `NOT_FOUND` (§4.3).
    pub schema_fallback_dir: PathBuf,
}

impl WorkerConfig {
    /// Creates a new configuration with the required fields and the
    /// documented defaults (10s heartbeat interval, `./schemas` fallback).
    pub fn new(
        coordinator: impl Into<String>,
        name: impl Into<String>,
        api_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            coordinator: coordinator.into(),
            name: name.into(),
            api_url: api_url.into(),
            model: model.into(),
            api_key: String::new(),
            worker_id: None,
            heartbeat_interval: Duration::from_secs(10),
            schema_fallback_dir: PathBuf::from("./schemas"),
        }
    }

    /// Sets the api key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Enables resume mode with a pre-assigned worker id.
    #[must_use]
    pub fn with_worker_id(mut self, worker_id: Uuid) -> Self {
        self.worker_id = Some(worker_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fresh_registration() {
        let config = WorkerConfig::new("http://localhost:8080", "w1", "https://x", "m");
        assert!(config.worker_id.is_none());
        assert_eq!(config.heartbeat_interval, Duration::from_secs(10));
    }

    #[test]
    fn with_worker_id_enables_resume_mode() {
        let id = Uuid::now_v7();
        let config = WorkerConfig::new("http://localhost:8080", "w1", "https://x", "m")
            .with_worker_id(id);
        assert_eq!(config.worker_id, Some(id));
    }
}
