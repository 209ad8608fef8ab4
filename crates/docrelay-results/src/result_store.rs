//! Append-only store of processing outcomes.

use mongodb::Collection;
use serde::{Deserialize, Serialize};

use crate::client::MongoClient;
use crate::error::Result;

const RESULTS_COLLECTION: &str = "results";
const ERRORS_COLLECTION: &str = "errors";

/// A single processed-document outcome.
///
/// Carries an opaque `result` payload produced by the extractor; this crate
/// never interprets its contents, only persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub worker_id: String,
    pub file_path: String,
    pub schema_name: Option<String>,
    pub result: serde_json::Value,
    pub processed_at: bson::DateTime,
}

impl ResultRecord {
    /// Creates a new record stamped with the current time.
    #[must_use]
    pub fn new(
        worker_id: impl Into<String>,
        file_path: impl Into<String>,
        schema_name: Option<String>,
        result: serde_json::Value,
    ) -> Self {
        Self {
            worker_id: worker_id.into(),
            file_path: file_path.into(),
            schema_name,
            result,
            processed_at: bson::DateTime::now(),
        }
    }
}

/// Append-only result store backed by two MongoDB collections, `results` and
/// `errors`, keyed by processing outcome. No update or delete operation is
/// exposed: a retried completion for the same document simply appends
/// another record, matching the at-least-once delivery contract upstream.
#[derive(Debug, Clone)]
pub struct ResultStore {
    client: MongoClient,
}

impl ResultStore {
    /// Creates a new result store over the given MongoDB client.
    #[must_use]
    pub fn new(client: MongoClient) -> Self {
        Self { client }
    }

    fn results(&self) -> Collection<ResultRecord> {
        self.client.database().collection(RESULTS_COLLECTION)
    }

    fn errors(&self) -> Collection<ResultRecord> {
        self.client.database().collection(ERRORS_COLLECTION)
    }

    /// Appends a successful-extraction record to the `results` collection.
    pub async fn record_success(&self, record: ResultRecord) -> Result<()> {
        self.results().insert_one(record).await?;
        Ok(())
    }

    /// Appends a failed-extraction record to the `errors` collection.
    pub async fn record_error(&self, record: ResultRecord) -> Result<()> {
        self.errors().insert_one(record).await?;
        Ok(())
    }

    /// Appends `record` to the `results` or `errors` collection depending on `is_error`.
    pub async fn record(&self, is_error: bool, record: ResultRecord) -> Result<()> {
        if is_error {
            self.record_error(record).await
        } else {
            self.record_success(record).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_carries_opaque_payload() {
        let payload = serde_json::json!({ "invoice_total": 42.5 });
        let record = ResultRecord::new("worker-1", "invoice.pdf", Some("invoice".into()), payload.clone());
        assert_eq!(record.worker_id, "worker-1");
        assert_eq!(record.result, payload);
    }

    #[test]
    fn record_serializes_without_schema_name() {
        let record = ResultRecord::new("worker-2", "scan.pdf", None, serde_json::json!({}));
        let bson = bson::to_document(&record).unwrap();
        assert_eq!(bson.get_str("file_path").unwrap(), "scan.pdf");
        assert!(bson.get("schema_name").unwrap().as_null().is_some());
    }
}
