#![forbid(unsafe_code)]

//! Redis-backed queue store, worker registry, schema registry, and global
//! processing counters.
//!
//! Every store in this crate is a thin, atomic-operation-per-call wrapper
//! over Redis; no cross-store transactions are taken (see the coordinator's
//! concurrency model for why that's an accepted tradeoff).

pub mod client;
mod counters;
pub mod error;
mod queue_store;
mod schema_registry;
mod worker_registry;

#[doc(hidden)]
pub mod prelude;

/// Tracing target for queue-store log events.
pub const TRACING_TARGET: &str = "docrelay_queue";

pub use client::{RedisClient, RedisConfig};
pub use counters::Counters;
pub use error::{Error, Result};
pub use queue_store::QueueStore;
pub use schema_registry::SchemaRegistry;
pub use worker_registry::{HeartbeatCommand, ReportedStatus, WorkerRegistry, WorkerView};
