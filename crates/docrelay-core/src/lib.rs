#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Domain types and error handling shared by every docrelay crate.
//!
//! This crate has no knowledge of HTTP, Redis, or MongoDB — it describes the
//! document-processing domain (jobs, workers, schemas) and the error
//! vocabulary ([`ErrorKind`]) that every other crate translates into its own
//! transport-specific representation.

pub mod domain;
pub mod error;

#[doc(hidden)]
pub mod prelude;

/// Tracing target used for domain-level log events emitted from this crate.
pub const TRACING_TARGET: &str = "docrelay_core";

pub use error::{BoxedError, Error, ErrorKind, Result};
