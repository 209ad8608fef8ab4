//! Commonly used items from docrelay-results.

pub use crate::client::{MongoClient, MongoConfig};
pub use crate::error::{Error, Result};
pub use crate::result_store::{ResultRecord, ResultStore};
