//! Registered workers, their configuration, status, and heartbeat state.

use docrelay_core::domain::{Worker, WorkerStatus};
use jiff::{SignedDuration, Timestamp};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::RedisClient;
use crate::error::{Error, Result};

const ACTIVE_WORKERS_KEY: &str = "active_workers";

/// How long a worker may go without a heartbeat before it is reported stale.
const STALE_TIMEOUT: SignedDuration = SignedDuration::from_secs(30);

fn worker_key(id: Uuid) -> String {
    format!("worker:{id}")
}

/// A worker record plus the read-time-derived liveness it carries.
///
/// `is_stale` is never persisted: it is computed from `last_heartbeat` at the
/// moment the record is read, so it reflects the current instant rather than
/// whatever was true when the record was last written.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerView {
    #[serde(flatten)]
    pub worker: Worker,
    pub is_stale: bool,
}

impl WorkerView {
    fn from_worker(worker: Worker) -> Self {
        let is_stale = Timestamp::now().duration_since(worker.last_heartbeat) > STALE_TIMEOUT;
        Self { worker, is_stale }
    }
}

/// The command a worker must obey, returned from [`WorkerRegistry::heartbeat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatCommand {
    /// Continue as normal; the reported status was accepted.
    Ok,
    /// Set local state to `STOPPED` and stop claiming new work.
    Stop,
    /// Exit the process; the worker has been force-removed or is being removed.
    Shutdown,
}

/// Self-reported status included in a heartbeat call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportedStatus {
    Idle,
    Processing,
    Stopped,
    Error,
}

impl From<ReportedStatus> for WorkerStatus {
    fn from(value: ReportedStatus) -> Self {
        match value {
            ReportedStatus::Idle => WorkerStatus::Idle,
            ReportedStatus::Processing => WorkerStatus::Processing,
            ReportedStatus::Stopped => WorkerStatus::Stopped,
            ReportedStatus::Error => WorkerStatus::Error,
        }
    }
}

/// Registered workers, keyed by id, with a parallel set of active ids.
///
/// The coordinator is the sole mutator of these records; workers hold no
/// authoritative copy and only cache their id and last heartbeat time.
#[derive(Debug, Clone)]
pub struct WorkerRegistry {
    client: RedisClient,
}

impl WorkerRegistry {
    /// Creates a new worker registry over the given Redis client.
    #[must_use]
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Registers a new worker in state `IDLE`.
    ///
    /// Fails with [`Error::DuplicateWorkerName`] if `name` is in use by any
    /// active worker.
    pub async fn register(
        &self,
        name: &str,
        api_url: &str,
        model: &str,
        api_key: &str,
        process_id: Option<u32>,
    ) -> Result<Worker> {
        if name.is_empty() || api_url.is_empty() || model.is_empty() {
            return Err(Error::Domain(docrelay_core::Error::validation(
                "worker name, api_url, and model must not be empty",
            )));
        }
        if self.find_by_name(name).await?.is_some() {
            return Err(Error::DuplicateWorkerName(name.to_string()));
        }

        let worker = Worker::new(name, api_url, model, api_key, process_id);
        self.persist(&worker).await?;

        let mut conn = self.client.connection();
        let _: () = conn.sadd(ACTIVE_WORKERS_KEY, worker.id.to_string()).await?;
        Ok(worker)
    }

    /// Updates `last_heartbeat` unconditionally and, subject to the state
    /// rules below, the worker's `status`/`current_document`. Returns the
    /// control command the worker must obey.
    ///
    /// Rules, evaluated on the pre-update state:
    /// - `REMOVING` → `Shutdown`; status fields are left untouched.
    /// - `STOPPED` and reported status ≠ `ERROR` → `Stop`; only `last_heartbeat` is updated.
    /// - otherwise → the reported status and `current_document` are accepted.
    pub async fn heartbeat(
        &self,
        worker_id: Uuid,
        status: ReportedStatus,
        current_document: Option<Uuid>,
    ) -> Result<HeartbeatCommand> {
        let mut worker = self.get(worker_id).await?;
        let pre_state = worker.status;
        worker.last_heartbeat = Timestamp::now();

        let command = if pre_state == WorkerStatus::Removing {
            HeartbeatCommand::Shutdown
        } else if pre_state == WorkerStatus::Stopped && status != ReportedStatus::Error {
            HeartbeatCommand::Stop
        } else {
            worker.status = status.into();
            worker.current_document = current_document;
            HeartbeatCommand::Ok
        };

        self.persist(&worker).await?;
        Ok(command)
    }

    /// Updates only `last_heartbeat`, leaving `status`/`current_document`
    /// untouched. Used to refresh liveness unconditionally — even ahead of a
    /// rejection — without routing through the full heartbeat state machine,
    /// which would otherwise overwrite status on every poll.
    pub async fn touch_heartbeat(&self, worker_id: Uuid) -> Result<Worker> {
        let mut worker = self.get(worker_id).await?;
        worker.last_heartbeat = Timestamp::now();
        self.persist(&worker).await?;
        Ok(worker)
    }

    /// Sets status to `STOPPED`, including from `ERROR`.
    pub async fn stop(&self, worker_id: Uuid) -> Result<Worker> {
        let mut worker = self.get(worker_id).await?;
        worker.stop();
        self.persist(&worker).await?;
        Ok(worker)
    }

    /// Legal only from `STOPPED` or `ERROR`; transitions to `IDLE`.
    pub async fn start(&self, worker_id: Uuid) -> Result<Worker> {
        let mut worker = self.get(worker_id).await?;
        worker.start()?;
        self.persist(&worker).await?;
        Ok(worker)
    }

    /// Deletes the worker record and removes it from the active set.
    ///
    /// Any subsequent heartbeat for this id is rejected with [`Error::UnknownWorker`].
    pub async fn force_remove(&self, worker_id: Uuid) -> Result<()> {
        let mut conn = self.client.connection();
        let _: () = conn.del(worker_key(worker_id)).await?;
        let _: () = conn.srem(ACTIVE_WORKERS_KEY, worker_id.to_string()).await?;
        Ok(())
    }

    /// Marks a worker `REMOVING` so its next heartbeat returns `Shutdown`.
    pub async fn mark_removing(&self, worker_id: Uuid) -> Result<Worker> {
        let mut worker = self.get(worker_id).await?;
        worker.status = WorkerStatus::Removing;
        self.persist(&worker).await?;
        Ok(worker)
    }

    /// Assigns `document_id` to `worker_id` and transitions it to `PROCESSING`.
    pub async fn assign_document(&self, worker_id: Uuid, document_id: Uuid) -> Result<()> {
        let mut worker = self.get(worker_id).await?;
        worker.status = WorkerStatus::Processing;
        worker.current_document = Some(document_id);
        self.persist(&worker).await
    }

    /// Records a completed document: sets the worker `IDLE`, clears
    /// `current_document`, and bumps `processed_documents` (and `errors` on
    /// failure outcomes).
    pub async fn record_completion(&self, worker_id: Uuid, is_error: bool) -> Result<()> {
        let mut worker = self.get(worker_id).await?;
        worker.status = WorkerStatus::Idle;
        worker.current_document = None;
        worker.processed_documents += 1;
        if is_error {
            worker.errors += 1;
        }
        self.persist(&worker).await
    }

    /// Fetches a worker record by id.
    pub async fn get(&self, worker_id: Uuid) -> Result<Worker> {
        let mut conn = self.client.connection();
        let raw: Option<String> = conn.get(worker_key(worker_id)).await?;
        let raw = raw.ok_or(Error::UnknownWorker(worker_id))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Fetches a worker record by id along with its derived liveness.
    pub async fn get_view(&self, worker_id: Uuid) -> Result<WorkerView> {
        Ok(WorkerView::from_worker(self.get(worker_id).await?))
    }

    /// Lists all active worker records.
    pub async fn list(&self) -> Result<Vec<Worker>> {
        let mut conn = self.client.connection();
        let ids: Vec<String> = conn.smembers(ACTIVE_WORKERS_KEY).await?;
        let mut workers = Vec::with_capacity(ids.len());
        for id in ids {
            let Ok(uuid) = id.parse::<Uuid>() else {
                continue;
            };
            if let Ok(worker) = self.get(uuid).await {
                workers.push(worker);
            }
        }
        Ok(workers)
    }

    /// Lists all active worker records along with their derived liveness.
    pub async fn list_view(&self) -> Result<Vec<WorkerView>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(WorkerView::from_worker)
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Worker>> {
        Ok(self.list().await?.into_iter().find(|w| w.name == name))
    }

    async fn persist(&self, worker: &Worker) -> Result<()> {
        let payload = serde_json::to_string(worker)?;
        let mut conn = self.client.connection();
        let _: () = conn.set(worker_key(worker.id), payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_status_maps_to_worker_status() {
        assert_eq!(WorkerStatus::from(ReportedStatus::Error), WorkerStatus::Error);
        assert_eq!(WorkerStatus::from(ReportedStatus::Idle), WorkerStatus::Idle);
    }

    #[test]
    fn worker_view_flags_stale_heartbeat() {
        let mut worker = Worker::new("w1", "https://x", "m", "", None);
        worker.last_heartbeat = Timestamp::now() - SignedDuration::from_secs(60);
        assert!(WorkerView::from_worker(worker).is_stale);
    }

    #[test]
    fn worker_view_accepts_fresh_heartbeat() {
        let worker = Worker::new("w1", "https://x", "m", "", None);
        assert!(!WorkerView::from_worker(worker).is_stale);
    }
}
