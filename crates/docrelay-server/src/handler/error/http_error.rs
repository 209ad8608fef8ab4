//! HTTP error handling with builder pattern for dynamic error responses.
//!
//! Mirrors the coordinator's legacy status-code convention (§6): most
//! business-logic rejections reply `200` with an `error` field so existing
//! clients never have to branch on status code; only unknown resources use
//! `404`, and unhandled/transient conditions use `5xx`.

use std::borrow::Cow;
use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use docrelay_core::Error as DomainError;
use docrelay_core::ErrorKind as DomainErrorKind;

/// The error type returned by every coordinator HTTP handler.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            resource: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Sets a custom user-facing message for the error.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Sets the resource that caused the error.
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message, falling back to a generic description of the kind.
    #[inline]
    pub fn message(&self) -> Cow<'_, str> {
        self.message
            .as_deref()
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Borrowed(self.kind.default_message()))
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<DomainError> for Error<'static> {
    fn from(err: DomainError) -> Self {
        let kind = ErrorKind::from(err.kind());
        Error::new(kind).with_message(err.message().to_string())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("message", &self.message())
            .field("resource", &self.resource)
            .finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message())?;
        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {resource}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

/// JSON body shared by every error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<Cow<'a, str>>,
}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();
        let body = ErrorBody {
            error: self.message(),
            resource: self.resource,
        };
        (status, Json(body)).into_response()
    }
}

/// A specialized [`Result`] type for coordinator HTTP handlers.
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// HTTP-facing mirror of [`DomainErrorKind`], carrying the status-code
/// convention from §6 rather than the domain's neutral classification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed request — replied `200` with an `error` field (legacy convention).
    Validation,
    /// Unknown resource (worker id, schema name, folder path) — replied `404`.
    NotFound,
    /// Duplicate name — replied `200` with an `error` field.
    Conflict,
    /// Illegal state transition — replied `200` with an `error` field.
    State,
    /// Upstream (extractor) failure surfaced through an HTTP endpoint by mistake.
    Upstream,
    /// Store timeout or unhandled exception — replied `500`.
    #[default]
    Internal,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Returns the HTTP status code for this error kind, per §6's convention.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Validation | Self::Conflict | Self::State | Self::Upstream => StatusCode::OK,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            Self::Validation => "invalid request",
            Self::NotFound => "resource not found",
            Self::Conflict => "resource already exists",
            Self::State => "illegal state transition",
            Self::Upstream => "upstream extraction failed",
            Self::Internal => "internal server error",
        }
    }
}

impl From<DomainErrorKind> for ErrorKind {
    fn from(kind: DomainErrorKind) -> Self {
        match kind {
            DomainErrorKind::Validation => Self::Validation,
            DomainErrorKind::NotFound => Self::NotFound,
            DomainErrorKind::Conflict => Self::Conflict,
            DomainErrorKind::State => Self::State,
            DomainErrorKind::Upstream => Self::Upstream,
            DomainErrorKind::Transient | DomainErrorKind::Fatal => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_message())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.into_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rejections_reply_200() {
        for kind in [ErrorKind::Validation, ErrorKind::Conflict, ErrorKind::State] {
            assert_eq!(kind.status_code(), StatusCode::OK);
        }
    }

    #[test]
    fn not_found_replies_404() {
        assert_eq!(ErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_replies_500() {
        assert_eq!(ErrorKind::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn domain_not_found_maps_through() {
        let domain = DomainError::not_found("worker", "abc");
        let http: Error<'static> = domain.into();
        assert_eq!(http.kind(), ErrorKind::NotFound);
        assert!(http.message().contains("worker"));
    }

    #[test]
    fn domain_transient_maps_to_internal() {
        let domain = DomainError::transient("redis down");
        let http: Error<'static> = domain.into();
        assert_eq!(http.kind(), ErrorKind::Internal);
    }
}
