//! The extraction seam: everything the control loop knows about calling out
//! to a vision/LLM endpoint, expressed as a trait so the loop itself is
//! testable without a live model behind it.

use async_trait::async_trait;
use serde_json::Value;

/// Everything the extractor needs to process a single document.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    /// Opaque locator for the document (a file path in practice).
    pub path: String,
    /// JSON schema the output should conform to, if one was attached to the job.
    pub schema: Option<Value>,
    /// Endpoint the extractor should call.
    pub api_url: String,
    /// Model identifier to request.
    pub model: String,
    /// Credential for the endpoint; may be empty.
    pub api_key: String,
}

/// Result of an extraction attempt.
///
/// A failed extraction is a normal outcome, not a [`crate::error::WorkerError`]:
/// it gets reported to the coordinator as `is_error = true` with the failure
/// message as the result payload, rather than aborting the control loop.
#[derive(Debug, Clone)]
pub enum ExtractorOutcome {
    /// Extraction succeeded; `value` is recorded verbatim in the result store.
    Success(Value),
    /// Extraction failed; `message` is recorded as the error result.
    Failure(String),
}

/// A pluggable extraction backend.
///
/// Production code uses [`HttpExtractor`]; tests use an in-process stub that
/// returns canned [`ExtractorOutcome`]s without touching the network.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Attempts to extract structured content from the document described by `ctx`.
    async fn extract(&self, ctx: &ExtractionContext) -> ExtractorOutcome;
}

/// Calls a vision/LLM HTTP endpoint to perform extraction.
///
/// The endpoint is an out-of-scope pure-function collaborator: this type
/// only shapes the request and classifies the response, it does not
/// interpret the document itself.
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    http: reqwest::Client,
}

impl HttpExtractor {
    /// Creates a new extractor using a fresh `reqwest` client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for HttpExtractor {
    #[tracing::instrument(skip(self, ctx), target = "docrelay_worker::extractor", fields(path = %ctx.path))]
    async fn extract(&self, ctx: &ExtractionContext) -> ExtractorOutcome {
        let mut request = self.http.post(&ctx.api_url).json(&serde_json::json!({
            "model": ctx.model,
            "path": ctx.path,
            "schema": ctx.schema,
        }));
        if !ctx.api_key.is_empty() {
            request = request.bearer_auth(&ctx.api_key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return ExtractorOutcome::Failure(err.to_string()),
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return ExtractorOutcome::Failure(format!("extractor returned {status}: {body}"));
        }

        match response.json::<Value>().await {
            Ok(value) => ExtractorOutcome::Success(value),
            Err(err) => ExtractorOutcome::Failure(format!("malformed extractor response: {err}")),
        }
    }
}

/// An in-memory extractor that returns a fixed outcome, for control-loop tests.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct StubExtractor {
    outcome: ExtractorOutcome,
}

#[cfg(test)]
impl StubExtractor {
    #[must_use]
    pub fn new(outcome: ExtractorOutcome) -> Self {
        Self { outcome }
    }
}

#[cfg(test)]
#[async_trait]
impl Extractor for StubExtractor {
    async fn extract(&self, _ctx: &ExtractionContext) -> ExtractorOutcome {
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> ExtractionContext {
        ExtractionContext {
            path: "invoice.pdf".to_string(),
            schema: None,
            api_url: "https://example.test/extract".to_string(),
            model: "gpt-4o".to_string(),
            api_key: String::new(),
        }
    }

    #[tokio::test]
    async fn stub_extractor_returns_its_fixed_outcome() {
        let stub = StubExtractor::new(ExtractorOutcome::Success(json!({"total": 42})));
        match stub.extract(&ctx()).await {
            ExtractorOutcome::Success(value) => assert_eq!(value["total"], 42),
            ExtractorOutcome::Failure(_) => panic!("expected success"),
        }
    }
}
