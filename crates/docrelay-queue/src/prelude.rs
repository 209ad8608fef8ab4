//! Commonly used items from docrelay-queue.

pub use crate::client::{RedisClient, RedisConfig};
pub use crate::counters::Counters;
pub use crate::error::{Error, Result};
pub use crate::queue_store::QueueStore;
pub use crate::schema_registry::SchemaRegistry;
pub use crate::worker_registry::{HeartbeatCommand, ReportedStatus, WorkerRegistry, WorkerView};
