//! Domain model: document jobs, worker records, and named schemas.

mod job;
mod schema;
mod worker;

pub use job::Job;
pub use schema::Schema;
pub use worker::{Worker, WorkerStatus};
