#![forbid(unsafe_code)]

//! MongoDB-backed, append-only store of processing outcomes.
//!
//! This crate holds no cross-store transactions with the queue or registry;
//! see the coordinator's concurrency model for why that's an accepted
//! tradeoff.

pub mod client;
pub mod error;
mod result_store;

#[doc(hidden)]
pub mod prelude;

/// Tracing target for result-store log events.
pub const TRACING_TARGET: &str = "docrelay_results";

pub use client::{MongoClient, MongoConfig};
pub use error::{Error, Result};
pub use result_store::{ResultRecord, ResultStore};
