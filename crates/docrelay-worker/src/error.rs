//! Worker error types.

use std::borrow::Cow;

/// Result type alias for worker operations.
pub type Result<T, E = WorkerError> = std::result::Result<T, E>;

/// Worker error type.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// A coordinator HTTP call failed (network error or non-2xx response).
    #[error("coordinator request failed: {0}")]
    Coordinator(#[from] reqwest::Error),

    /// The coordinator replied with a structured `{"error": ...}` body.
    #[error("coordinator rejected the request: {0}")]
    Rejected(String),

    /// Extraction failed for reasons internal to this process (not the
    /// extractor's own `error` field, which is a normal outcome — see
    /// [`crate::extractor::ExtractorOutcome`]).
    #[error("extraction failed: {message}")]
    Extraction {
        message: Cow<'static, str>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Registration failed on process startup; this is fatal per §4.6.
    #[error("registration failed: {0}")]
    Registration(String),
}

impl WorkerError {
    /// Creates an extraction error with a message.
    pub fn extraction(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Extraction {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an extraction error with a message and source.
    pub fn extraction_with_source(
        message: impl Into<Cow<'static, str>>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Extraction {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
