//! Commonly used items from docrelay-server.

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::routes;
pub use crate::state::{AppConfig, AppState};
