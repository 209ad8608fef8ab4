//! Error types for MongoDB-backed result-store operations.

use docrelay_core::Error as DomainError;

/// Result type for all result-store operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for MongoDB operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection to MongoDB failed or a command round-trip errored.
    #[error("MongoDB error: {0}")]
    Connection(#[from] mongodb::error::Error),

    /// A stored record failed to (de)serialize to/from BSON.
    #[error("BSON serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),
}

impl From<Error> for DomainError {
    fn from(err: Error) -> Self {
        match err {
            Error::Connection(e) => DomainError::transient(e.to_string()).with_source(e),
            Error::Serialization(e) => DomainError::validation(e.to_string()).with_source(e),
        }
    }
}
