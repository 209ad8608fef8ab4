//! Durable FIFO queue of pending documents plus an in-flight processing set.

use docrelay_core::domain::Job;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::client::RedisClient;
use crate::error::Result;

const PENDING_KEY: &str = "document_queue";
const PROCESSING_KEY: &str = "processing_documents";

/// Two-region durable queue: a FIFO `pending` list and an unordered
/// `processing` list of jobs currently assigned to workers.
///
/// `claim` is the only operation with a non-trivial concurrency requirement:
/// it must atomically move one job from `pending` to `processing` so that
/// two concurrent callers never observe the same job. This is implemented
/// with Redis `BRPOPLPUSH`, which performs exactly that move server-side.
#[derive(Debug, Clone)]
pub struct QueueStore {
    client: RedisClient,
}

impl QueueStore {
    /// Creates a new queue store over the given Redis client.
    #[must_use]
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Appends a job to the tail of `pending`. Never blocks.
    pub async fn enqueue(&self, job: &Job) -> Result<()> {
        let payload = serde_json::to_string(job)?;
        let mut conn = self.client.connection();
        let _: () = conn.lpush(PENDING_KEY, payload).await?;
        Ok(())
    }

    /// Atomically moves one job from the tail of `pending` to `processing`,
    /// waiting up to `timeout_secs` seconds for one to become available.
    ///
    /// Returns `None` if the queue was empty for the whole timeout window —
    /// this is the expected "nothing to do yet" outcome, not a failure.
    pub async fn claim(&self, timeout_secs: u64) -> Result<Option<Job>> {
        let mut conn = self.client.connection();
        let payload: Option<String> = conn
            .brpoplpush(PENDING_KEY, PROCESSING_KEY, timeout_secs)
            .await?;
        match payload {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Removes the job with the given id from `processing`.
    ///
    /// Idempotent: a second call for an already-absent id is a no-op. This
    /// requires a linear scan because `processing` is addressed by job id,
    /// not by list position.
    pub async fn complete(&self, job_id: Uuid) -> Result<()> {
        let mut conn = self.client.connection();
        let entries: Vec<String> = conn.lrange(PROCESSING_KEY, 0, -1).await?;
        for entry in entries {
            let Ok(job) = serde_json::from_str::<Job>(&entry) else {
                continue;
            };
            if job.id == job_id {
                let _: () = conn.lrem(PROCESSING_KEY, 1, entry).await?;
                break;
            }
        }
        Ok(())
    }

    /// Number of jobs currently in `pending`.
    pub async fn pending_count(&self) -> Result<u64> {
        let mut conn = self.client.connection();
        Ok(conn.llen(PENDING_KEY).await?)
    }

    /// Number of jobs currently in `processing`.
    pub async fn processing_count(&self) -> Result<u64> {
        let mut conn = self.client.connection();
        Ok(conn.llen(PROCESSING_KEY).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `claim` on an empty queue is only exercised against a live Redis
    /// instance in integration tests; this module sticks to pure logic that
    /// doesn't require a server, matching the rest of the crate's unit tests.
    #[test]
    fn job_serializes_for_list_storage() {
        let job = Job::new("a.pdf", Some("invoice".to_string()));
        let payload = serde_json::to_string(&job).unwrap();
        let decoded: Job = serde_json::from_str(&payload).unwrap();
        assert_eq!(job.id, decoded.id);
    }
}
