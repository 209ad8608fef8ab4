//! HTTP client for the coordinator's worker-facing API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Result, WorkerError};

const TRACING_TARGET: &str = "docrelay_worker::client";

/// A document claimed from the coordinator's pending queue.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimedDocument {
    pub id: Uuid,
    pub path: String,
    pub schema_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ClaimResponse {
    Ok { document: ClaimedDocument },
    Empty,
}

/// Status a worker self-reports at heartbeat time.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportedStatus {
    Idle,
    Processing,
    Stopped,
    Error,
}

#[derive(Debug, Deserialize)]
struct HeartbeatResponse {
    command: Option<String>,
}

/// Command a worker must obey in response to a heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatCommand {
    Continue,
    Stop,
    Shutdown,
}

impl From<Option<String>> for HeartbeatCommand {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("stop") => Self::Stop,
            Some("shutdown") => Self::Shutdown,
            _ => Self::Continue,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    worker_id: Uuid,
    #[serde(default)]
    warning: Option<String>,
}

/// Outcome of registering with the coordinator.
#[derive(Debug, Clone)]
pub struct Registration {
    pub worker_id: Uuid,
    pub warning: Option<String>,
}

/// Thin wrapper over [`reqwest::Client`] speaking the coordinator's HTTP API.
///
/// Mirrors the coordinator's handler surface 1:1: one method per endpoint,
/// with the `{"error": ...}` legacy-convention body surfaced as
/// [`WorkerError::Rejected`] rather than a transport error.
#[derive(Debug, Clone)]
pub struct CoordinatorClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoordinatorClient {
    /// Builds a client targeting the given coordinator base URL (no trailing slash required).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| WorkerError::extraction_with_source("malformed coordinator response", e))?;
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(WorkerError::Rejected(message.to_string()));
        }
        serde_json::from_value(value)
            .map_err(|e| WorkerError::extraction_with_source("malformed coordinator response", e))
    }

    /// Registers a new worker and returns its assigned id.
    #[tracing::instrument(skip(self, api_key), target = TRACING_TARGET)]
    pub async fn register(
        &self,
        name: &str,
        api_url: &str,
        model: &str,
        api_key: &str,
        process_id: Option<u32>,
    ) -> Result<Registration> {
        let response = self
            .http
            .post(self.url("/api/register-worker"))
            .json(&serde_json::json!({
                "worker_name": name,
                "api_url": api_url,
                "model": model,
                "api_key": api_key,
                "process_id": process_id,
            }))
            .send()
            .await?;
        let body: RegisterResponse = Self::decode(response).await.map_err(|e| match e {
            WorkerError::Rejected(message) => WorkerError::Registration(message),
            other => other,
        })?;
        Ok(Registration {
            worker_id: body.worker_id,
            warning: body.warning,
        })
    }

    /// Sends a heartbeat, returning the command the coordinator wants obeyed.
    pub async fn heartbeat(
        &self,
        worker_id: Uuid,
        status: ReportedStatus,
        document_id: Option<Uuid>,
    ) -> Result<HeartbeatCommand> {
        let response = self
            .http
            .post(self.url("/api/worker-heartbeat"))
            .json(&serde_json::json!({
                "worker_id": worker_id,
                "status": status,
                "document_id": document_id,
            }))
            .send()
            .await?;
        let body: HeartbeatResponse = Self::decode(response).await?;
        Ok(body.command.into())
    }

    /// Claims the next pending document, if any.
    pub async fn claim(&self, worker_id: Uuid) -> Result<Option<ClaimedDocument>> {
        let response = self
            .http
            .get(self.url(&format!("/api/next-document/{worker_id}")))
            .send()
            .await?;
        match Self::decode::<ClaimResponse>(response).await? {
            ClaimResponse::Ok { document } => Ok(Some(document)),
            ClaimResponse::Empty => Ok(None),
        }
    }

    /// Reports a completed (or failed) document back to the coordinator.
    #[allow(clippy::too_many_arguments)]
    pub async fn complete(
        &self,
        worker_id: Uuid,
        document_id: Uuid,
        file_path: &str,
        schema_name: Option<&str>,
        is_error: bool,
        result: Value,
    ) -> Result<()> {
        let response = self
            .http
            .post(self.url(&format!(
                "/api/document-processed?worker_id={worker_id}&document_id={document_id}"
            )))
            .json(&serde_json::json!({
                "is_error": is_error,
                "file_path": file_path,
                "schema_name": schema_name,
                "result": result,
            }))
            .send()
            .await?;
        let _: Value = Self::decode(response).await?;
        Ok(())
    }

    /// Fetches a named schema's content, or `None` if the coordinator reports `NOT_FOUND`.
    pub async fn get_schema(&self, name: &str) -> Result<Option<Value>> {
        let response = self
            .http
            .get(self.url(&format!("/api/schemas/{name}")))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let value: Value = Self::decode(response).await?;
        Ok(value.get("content").cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heartbeat_command_maps_from_wire_strings() {
        assert_eq!(HeartbeatCommand::from(None), HeartbeatCommand::Continue);
        assert_eq!(
            HeartbeatCommand::from(Some("stop".to_string())),
            HeartbeatCommand::Stop
        );
        assert_eq!(
            HeartbeatCommand::from(Some("shutdown".to_string())),
            HeartbeatCommand::Shutdown
        );
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = CoordinatorClient::new("http://localhost:8080/");
        assert_eq!(client.url("/api/system-status"), "http://localhost:8080/api/system-status");
    }
}
