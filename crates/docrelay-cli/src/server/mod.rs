//! HTTP server configuration and startup.

mod error;
mod http_server;
mod lifecycle;
mod shutdown;

use axum::Router;
pub use error::{ServerError, ServerResult};
pub use http_server::serve_http;
pub(crate) use shutdown::shutdown_signal;

use crate::config::ServerConfig;

/// Starts the coordinator's HTTP server.
///
/// # Errors
///
/// Returns an error if the server configuration is invalid, the address
/// cannot be bound, or the server encounters a fatal runtime error.
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    serve_http(app, config).await
}
