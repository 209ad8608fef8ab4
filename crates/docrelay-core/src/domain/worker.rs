//! Worker records and the worker lifecycle state machine.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::error::{Error, Result};

/// The lifecycle state of a registered worker.
///
/// Transitions are driven exclusively by the coordinator in response to API
/// calls (`claim`, `complete`, `stop`, `start`, `force_remove`) and the
/// worker's self-reported status on heartbeat. See [`WorkerStatus::transition_on_heartbeat`]
/// and the `start`/`stop` helpers for the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerStatus {
    /// Registered, not currently processing, eligible to claim.
    Idle,
    /// Actively processing `current_document`.
    Processing,
    /// Administratively stopped; will not be dispatched work until started again.
    Stopped,
    /// Entered after a reported failure; must be explicitly started again.
    Error,
    /// Marked for deletion; the worker is expected to self-terminate on its
    /// next heartbeat and the coordinator will not dispatch further work.
    Removing,
}

impl WorkerStatus {
    /// Whether a worker in this state may be handed a document via `claim`.
    #[must_use]
    pub fn is_claimable(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether `start()` is legal from this state.
    #[must_use]
    pub fn can_start(self) -> bool {
        matches!(self, Self::Stopped | Self::Error)
    }
}

/// A registered worker and its current status.
///
/// Created by `register`, mutated only by the coordinator in response to API
/// calls, destroyed by `force_remove`. Workers themselves hold no
/// authoritative copy of this record; they cache only their id and last
/// heartbeat time in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Server-assigned unique identifier.
    pub id: Uuid,
    /// Human label, unique across active workers at registration time.
    pub name: String,
    /// Base URL of the extraction endpoint this worker calls.
    pub api_url: String,
    /// Model identifier passed to the extractor.
    pub model: String,
    /// Opaque credential for the extraction endpoint; may be empty.
    pub api_key: String,
    /// Current lifecycle state.
    pub status: WorkerStatus,
    /// When this worker first registered.
    pub registered_at: Timestamp,
    /// Last time this worker's heartbeat updated this record.
    pub last_heartbeat: Timestamp,
    /// The document currently assigned to this worker, if any.
    pub current_document: Option<Uuid>,
    /// Monotonic count of documents completed (success or error) by this worker.
    pub processed_documents: u64,
    /// Monotonic count of error outcomes reported by this worker.
    pub errors: u64,
    /// Optional OS process id of the worker, reported at registration for operator visibility.
    pub process_id: Option<u32>,
}

impl Worker {
    /// Creates a newly-registered worker record in the `IDLE` state.
    pub fn new(
        name: impl Into<String>,
        api_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        process_id: Option<u32>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            api_url: api_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            status: WorkerStatus::Idle,
            registered_at: now,
            last_heartbeat: now,
            current_document: None,
            processed_documents: 0,
            errors: 0,
            process_id,
        }
    }

    /// Returns whether this worker's `api_url` points at the OpenAI host and
    /// no `api_key` was supplied — surfaced by `register` as a response warning.
    #[must_use]
    pub fn needs_api_key_warning(&self) -> bool {
        self.api_url.contains("openai.com") && self.api_key.is_empty()
    }

    /// Applies `stop()`: unconditionally sets status to `STOPPED`, including from `ERROR`.
    pub fn stop(&mut self) {
        self.status = WorkerStatus::Stopped;
    }

    /// Applies `start()`: legal only from `STOPPED` or `ERROR`.
    pub fn start(&mut self) -> Result<()> {
        if !self.status.can_start() {
            return Err(Error::state(format!(
                "cannot start worker from state {}",
                self.status
            )));
        }
        self.status = WorkerStatus::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_worker_is_idle() {
        let worker = Worker::new("w1", "https://api.example.com", "gpt-4o-mini", "", None);
        assert_eq!(worker.status, WorkerStatus::Idle);
        assert_eq!(worker.processed_documents, 0);
    }

    #[test]
    fn openai_host_without_key_needs_warning() {
        let worker = Worker::new(
            "w1",
            "https://api.openai.com/v1/chat/completions",
            "gpt-4o-mini",
            "",
            None,
        );
        assert!(worker.needs_api_key_warning());
    }

    #[test]
    fn non_openai_host_never_warns() {
        let worker = Worker::new("w1", "https://llm.internal/v1", "local-model", "", None);
        assert!(!worker.needs_api_key_warning());
    }

    #[test]
    fn stop_transitions_error_to_stopped() {
        let mut worker = Worker::new("w1", "https://x", "m", "", None);
        worker.status = WorkerStatus::Error;
        worker.stop();
        assert_eq!(worker.status, WorkerStatus::Stopped);
    }

    #[test]
    fn start_fails_from_processing() {
        let mut worker = Worker::new("w1", "https://x", "m", "", None);
        worker.status = WorkerStatus::Processing;
        let err = worker.start().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::State);
    }

    #[test]
    fn start_succeeds_from_stopped() {
        let mut worker = Worker::new("w1", "https://x", "m", "", None);
        worker.status = WorkerStatus::Stopped;
        worker.start().unwrap();
        assert_eq!(worker.status, WorkerStatus::Idle);
    }

    #[test]
    fn status_round_trips_through_serde() {
        let json = serde_json::to_string(&WorkerStatus::Processing).unwrap();
        assert_eq!(json, "\"PROCESSING\"");
        let decoded: WorkerStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, WorkerStatus::Processing);
    }
}
