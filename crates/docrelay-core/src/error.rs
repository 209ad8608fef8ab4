//! Domain error types and utilities.
//!
//! This module provides the error vocabulary shared by every docrelay crate:
//!
//! - Strongly-typed error kinds for each failure category the coordinator and
//!   worker can produce
//! - Builder pattern for ergonomic error construction
//! - Type-safe error source tracking with boxed trait objects
//! - Integration with `thiserror` for automatic `Display` and `Error` trait implementations

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Type alias for boxed errors that are Send + Sync.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for domain operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kind enumeration for categorizing domain errors.
///
/// Each kind is produced at a single place in the pipeline and surfaced
/// uniformly by whichever transport (HTTP response, heartbeat command,
/// process exit code) carries it to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed request, unknown document path format, non-object schema content.
    Validation,
    /// Unknown worker id, unknown schema name, folder not present.
    NotFound,
    /// Duplicate worker name, duplicate schema name.
    Conflict,
    /// Illegal state transition (e.g. `start` from `PROCESSING`).
    State,
    /// Extractor/vision-model call failed. Always recorded as an error
    /// outcome in the result store, never propagated to the HTTP caller of
    /// the worker endpoints.
    Upstream,
    /// Store timeout or network hiccup; callers should retry.
    Transient,
    /// Irrecoverable worker condition on startup (registration failure).
    Fatal,
}

impl ErrorKind {
    /// Returns the error kind as a string for categorization.
    ///
    /// Useful for metrics, logging, or error categorization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::State => "state",
            Self::Upstream => "upstream",
            Self::Transient => "transient",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain error with structured information.
///
/// This is the single error type threaded through the queue store, result
/// store, worker registry, schema registry, and worker runtime. Each crate
/// that faces an external transport (HTTP, process exit code) converts this
/// into its own representation at the boundary rather than leaking it.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// Creates a new [`Error`].
    #[inline]
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source error to this error, enabling error chain tracking.
    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creates a new validation error.
    #[inline]
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Creates a new not-found error.
    #[inline]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NotFound, format!("{resource} '{id}' not found"))
    }

    /// Creates a new conflict error.
    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Creates a new illegal-state-transition error.
    #[inline]
    pub fn state(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::State, message)
    }

    /// Creates a new upstream (extractor) error.
    #[inline]
    pub fn upstream(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Upstream, message)
    }

    /// Creates a new transient error.
    #[inline]
    pub fn transient(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transient, message)
    }

    /// Creates a new fatal error.
    #[inline]
    pub fn fatal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Fatal, message)
    }

    /// Returns whether this error should be retried by a polling caller.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(self.kind, ErrorKind::Transient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = Error::validation("name must not be empty");
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.message(), "name must not be empty");
    }

    #[test]
    fn test_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::transient("store round-trip failed").with_source(source);

        assert!(StdError::source(&error).is_some());
        assert_eq!(error.kind(), ErrorKind::Transient);
    }

    #[test]
    fn test_not_found_formats_resource_and_id() {
        let error = Error::not_found("worker", "abc-123");
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert!(error.message().contains("worker"));
        assert!(error.message().contains("abc-123"));
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::Validation.as_str(), "validation");
        assert_eq!(ErrorKind::NotFound.as_str(), "not_found");
        assert_eq!(ErrorKind::Conflict.as_str(), "conflict");
        assert_eq!(ErrorKind::State.as_str(), "state");
        assert_eq!(ErrorKind::Upstream.as_str(), "upstream");
        assert_eq!(ErrorKind::Transient.as_str(), "transient");
        assert_eq!(ErrorKind::Fatal.as_str(), "fatal");
    }

    #[test]
    fn test_is_retriable() {
        assert!(Error::transient("timeout").is_retriable());
        assert!(!Error::validation("bad input").is_retriable());
    }
}
