#![forbid(unsafe_code)]

//! Worker control loop: register with a coordinator, then repeatedly claim,
//! extract, and report documents until told to stop.
//!
//! The extraction endpoint itself is treated as an out-of-scope collaborator
//! via the [`extractor::Extractor`] trait; this crate only shapes requests,
//! classifies responses, and drives the claim/report cycle.

pub mod client;
pub mod config;
pub mod error;
pub mod extractor;
pub mod runtime;

#[doc(hidden)]
pub mod prelude;

/// Tracing target for worker log events.
pub const TRACING_TARGET: &str = "docrelay_worker";

pub use client::{ClaimedDocument, CoordinatorClient, HeartbeatCommand, Registration, ReportedStatus};
pub use config::WorkerConfig;
pub use error::{Result, WorkerError};
pub use extractor::{ExtractionContext, Extractor, ExtractorOutcome, HttpExtractor};
pub use runtime::{ExitReason, WorkerRuntime};
