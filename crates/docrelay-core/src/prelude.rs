//! Commonly used items from docrelay-core.
//!
//! This prelude re-exports the domain model and error types to simplify
//! imports in consuming crates.

pub use crate::domain::{Job, Schema, Worker, WorkerStatus};
pub use crate::error::{Error, ErrorKind, Result};
