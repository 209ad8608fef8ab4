//! Document job records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of work: a file path plus an optional schema name.
///
/// A job is assigned a unique id at enqueue time and lives in exactly one of
/// the queue store's two regions (*pending* or *processing*) until it is
/// completed, at which point it is removed entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Server-assigned unique identifier.
    pub id: Uuid,
    /// Opaque locator consumed by the extractor (a file path in practice).
    pub path: String,
    /// Name of the schema the extractor should validate its output against.
    pub schema_name: Option<String>,
    /// Wall-clock time the job was enqueued.
    pub enqueued_at: Timestamp,
}

impl Job {
    /// Creates a new job with a freshly generated id, stamped with the current time.
    pub fn new(path: impl Into<String>, schema_name: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            path: path.into(),
            schema_name,
            enqueued_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_has_unique_id() {
        let a = Job::new("a.pdf", None);
        let b = Job::new("b.pdf", None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn new_job_carries_schema_name() {
        let job = Job::new("invoice.pdf", Some("invoice_v1".to_string()));
        assert_eq!(job.schema_name.as_deref(), Some("invoice_v1"));
    }

    #[test]
    fn serde_round_trip_preserves_fields() {
        let job = Job::new("report.pdf", Some("report".to_string()));
        let json = serde_json::to_string(&job).unwrap();
        let decoded: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(job, decoded);
    }
}
