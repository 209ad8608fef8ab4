//! The worker control loop: register once, then repeatedly heartbeat, claim,
//! extract, and report completion until interrupted.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::client::{ClaimedDocument, CoordinatorClient, HeartbeatCommand};
use crate::config::WorkerConfig;
use crate::error::{Result, WorkerError};
use crate::extractor::{ExtractionContext, Extractor, ExtractorOutcome};

const TRACING_TARGET: &str = "docrelay_worker::runtime";
/// How long to idle between unsuccessful claim attempts before retrying.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Why the control loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// A cancellation token was triggered (e.g. SIGTERM/SIGINT handler).
    Interrupted,
    /// The coordinator instructed the worker to shut down entirely.
    CoordinatorShutdown,
}

/// Drives the register/heartbeat/claim/extract/complete loop for one worker process.
pub struct WorkerRuntime {
    client: CoordinatorClient,
    extractor: Arc<dyn Extractor>,
    config: WorkerConfig,
}

impl WorkerRuntime {
    /// Creates a new runtime bound to the given coordinator and extraction backend.
    pub fn new(config: WorkerConfig, extractor: Arc<dyn Extractor>) -> Self {
        let client = CoordinatorClient::new(&config.coordinator);
        Self {
            client,
            extractor,
            config,
        }
    }

    /// Registers (or adopts, in resume mode) this worker's id with the coordinator.
    ///
    /// Registration failure is fatal per the documented `FATAL` error kind: a
    /// worker that cannot establish an identity has nothing useful to do.
    #[tracing::instrument(skip(self), target = TRACING_TARGET, fields(name = %self.config.name))]
    pub async fn register(&self) -> Result<Uuid> {
        if let Some(worker_id) = self.config.worker_id {
            tracing::info!(target: TRACING_TARGET, %worker_id, "Resuming existing worker");
            return Ok(worker_id);
        }

        let registration = self
            .client
            .register(
                &self.config.name,
                &self.config.api_url,
                &self.config.model,
                &self.config.api_key,
                std::process::id().into(),
            )
            .await?;

        if let Some(warning) = &registration.warning {
            tracing::warn!(target: TRACING_TARGET, %warning, "Coordinator flagged registration");
        }
        tracing::info!(target: TRACING_TARGET, worker_id = %registration.worker_id, "Registered");
        Ok(registration.worker_id)
    }

    /// Runs the claim/extract/complete loop until the coordinator or `cancel` stops it.
    ///
    /// On interrupt, makes a best-effort final heartbeat reporting `STOPPED`
    /// before returning (§4.6 step 3); failure to deliver it does not change
    /// the exit reason, since the process is already on its way out.
    pub async fn run(&self, worker_id: Uuid, cancel: CancellationToken) -> Result<ExitReason> {
        let reason = self.run_until_stopped(worker_id, &cancel).await?;

        if reason == ExitReason::Interrupted
            && let Err(error) = self.client.heartbeat(worker_id, crate::client::ReportedStatus::Stopped, None).await
        {
            tracing::warn!(target: TRACING_TARGET, %error, "Final heartbeat on interrupt failed");
        }

        Ok(reason)
    }

    async fn run_until_stopped(
        &self,
        worker_id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<ExitReason> {
        let mut last_heartbeat = Instant::now() - self.config.heartbeat_interval;
        // Set by a `Stop` command: stops claiming but keeps heartbeating until
        // the coordinator sends `Shutdown` (or this worker is cancelled).
        let mut stopped = false;

        loop {
            if cancel.is_cancelled() {
                return Ok(ExitReason::Interrupted);
            }

            if last_heartbeat.elapsed() >= self.config.heartbeat_interval {
                let status = if stopped {
                    crate::client::ReportedStatus::Stopped
                } else {
                    crate::client::ReportedStatus::Idle
                };
                match self.client.heartbeat(worker_id, status, None).await? {
                    HeartbeatCommand::Continue => {}
                    HeartbeatCommand::Stop => stopped = true,
                    HeartbeatCommand::Shutdown => return Ok(ExitReason::CoordinatorShutdown),
                }
                last_heartbeat = Instant::now();
            }

            if stopped {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Ok(ExitReason::Interrupted),
                    () = tokio::time::sleep(POLL_INTERVAL) => {}
                }
                continue;
            }

            let claimed = tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(ExitReason::Interrupted),
                result = self.client.claim(worker_id) => result?,
            };

            let Some(document) = claimed else {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Ok(ExitReason::Interrupted),
                    () = tokio::time::sleep(POLL_INTERVAL) => {}
                }
                continue;
            };

            self.process(worker_id, document).await?;
        }
    }

    #[tracing::instrument(skip(self, document), target = TRACING_TARGET, fields(document_id = %document.id))]
    async fn process(&self, worker_id: Uuid, document: ClaimedDocument) -> Result<()> {
        let schema = match &document.schema_name {
            Some(name) => match self.resolve_schema(name).await? {
                Some(schema) => Some(schema),
                None => {
                    let message = format!("schema '{name}' not found");
                    tracing::warn!(target: TRACING_TARGET, %message, "Schema lookup failed");
                    return self
                        .client
                        .complete(
                            worker_id,
                            document.id,
                            &document.path,
                            document.schema_name.as_deref(),
                            true,
                            serde_json::json!({ "message": message }),
                        )
                        .await;
                }
            },
            None => None,
        };

        let ctx = ExtractionContext {
            path: document.path.clone(),
            schema,
            api_url: self.config.api_url.clone(),
            model: self.config.model.clone(),
            api_key: self.config.api_key.clone(),
        };

        let (is_error, result) = match self.extractor.extract(&ctx).await {
            ExtractorOutcome::Success(value) => {
                let is_error = classify_error(&value);
                (is_error, value)
            }
            ExtractorOutcome::Failure(message) => {
                tracing::warn!(target: TRACING_TARGET, %message, "Extraction failed");
                (true, serde_json::json!({ "message": message }))
            }
        };

        self.client
            .complete(
                worker_id,
                document.id,
                &document.path,
                document.schema_name.as_deref(),
                is_error,
                result,
            )
            .await
    }

    /// Resolves a schema by name, first against the coordinator, then against
    /// the local fallback directory (§4.3: `./schemas/<name>.json`).
    async fn resolve_schema(&self, name: &str) -> Result<Option<serde_json::Value>> {
        if let Some(content) = self.client.get_schema(name).await? {
            return Ok(Some(content));
        }

        let path = self.config.schema_fallback_dir.join(format!("{name}.json"));
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(|e| {
                    WorkerError::extraction_with_source(
                        format!("malformed fallback schema '{name}'"),
                        e,
                    )
                })?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WorkerError::extraction_with_source(
                format!("failed to read fallback schema '{name}'"),
                e,
            )),
        }
    }
}

/// Classifies an extraction result per §4.6 step f: an error iff the payload
/// is a non-object, or an object carrying a truthy `error`/`Error` field or
/// an explicit `success: false`.
fn classify_error(result: &serde_json::Value) -> bool {
    let Some(object) = result.as_object() else {
        return true;
    };
    let truthy = |key: &str| object.get(key).is_some_and(is_truthy);
    if truthy("error") || truthy("Error") {
        return true;
    }
    matches!(object.get("success"), Some(serde_json::Value::Bool(false)))
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::StubExtractor;
    use serde_json::json;

    fn test_config() -> WorkerConfig {
        WorkerConfig::new("http://127.0.0.1:0", "test-worker", "https://x", "m")
    }

    #[tokio::test]
    async fn resume_mode_skips_registration() {
        let worker_id = Uuid::now_v7();
        let config = test_config().with_worker_id(worker_id);
        let extractor = Arc::new(StubExtractor::new(ExtractorOutcome::Success(json!({}))));
        let runtime = WorkerRuntime::new(config, extractor);
        assert_eq!(runtime.register().await.unwrap(), worker_id);
    }

    #[tokio::test]
    async fn cancellation_exits_interrupted_even_if_final_heartbeat_fails() {
        let config = test_config();
        let extractor = Arc::new(StubExtractor::new(ExtractorOutcome::Success(json!({}))));
        let runtime = WorkerRuntime::new(config, extractor);
        let cancel = CancellationToken::new();
        cancel.cancel();

        // The final-heartbeat attempt targets an unroutable address and is
        // expected to fail; that failure must not change the exit reason.
        let reason = runtime.run(Uuid::now_v7(), cancel).await.unwrap();
        assert_eq!(reason, ExitReason::Interrupted);
    }

    #[test]
    fn classify_error_accepts_clean_object_payload() {
        assert!(!classify_error(&json!({"total": 42})));
    }

    #[test]
    fn classify_error_rejects_non_object_payload() {
        assert!(classify_error(&json!([1, 2, 3])));
        assert!(classify_error(&json!("oops")));
    }

    #[test]
    fn classify_error_rejects_truthy_error_field() {
        assert!(classify_error(&json!({"error": "bad input"})));
        assert!(classify_error(&json!({"Error": true})));
        assert!(!classify_error(&json!({"error": ""})));
        assert!(!classify_error(&json!({"error": null})));
    }

    #[test]
    fn classify_error_rejects_explicit_success_false() {
        assert!(classify_error(&json!({"success": false})));
        assert!(!classify_error(&json!({"success": true})));
    }
}
