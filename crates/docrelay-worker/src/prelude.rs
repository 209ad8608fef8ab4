//! Commonly used items from docrelay-worker.

pub use crate::client::{ClaimedDocument, CoordinatorClient, HeartbeatCommand, Registration, ReportedStatus};
pub use crate::config::WorkerConfig;
pub use crate::error::{Result, WorkerError};
pub use crate::extractor::{ExtractionContext, Extractor, ExtractorOutcome, HttpExtractor};
pub use crate::runtime::{ExitReason, WorkerRuntime};
