//! Error types for Redis-backed store operations.

use docrelay_core::Error as DomainError;

/// Result type for all queue-store operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for Redis operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection to Redis failed or a command round-trip errored.
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    /// A stored record failed to (de)serialize as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Worker with the requested id does not exist in the active set.
    #[error("Unknown worker '{0}'")]
    UnknownWorker(uuid::Uuid),

    /// Schema with the requested name does not exist.
    #[error("Schema '{0}' not found")]
    SchemaNotFound(String),

    /// A worker registration used a name already in the active set.
    #[error("Worker name '{0}' already registered")]
    DuplicateWorkerName(String),

    /// A schema registration used a name already present.
    #[error("Schema '{0}' already exists")]
    DuplicateSchemaName(String),

    /// A domain-level rule (e.g. an illegal state transition) was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<Error> for DomainError {
    fn from(err: Error) -> Self {
        match err {
            Error::Connection(e) => DomainError::transient(e.to_string()).with_source(e),
            Error::Serialization(e) => DomainError::validation(e.to_string()).with_source(e),
            Error::UnknownWorker(id) => DomainError::not_found("worker", id),
            Error::SchemaNotFound(name) => DomainError::not_found("schema", name),
            Error::DuplicateWorkerName(name) => {
                DomainError::conflict(format!("worker name '{name}' already registered"))
            }
            Error::DuplicateSchemaName(name) => {
                DomainError::conflict(format!("schema '{name}' already exists"))
            }
            Error::Domain(e) => e,
        }
    }
}
