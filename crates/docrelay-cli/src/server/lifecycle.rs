//! Server lifecycle management: startup validation, structured logging, and
//! error-context logging around the actual serve future.

use std::future::Future;
use std::io;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::server::{ServerError, ServerResult};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Validates configuration, logs startup/shutdown, and runs `serve_fn`.
///
/// # Errors
///
/// Returns an error if configuration is invalid or `serve_fn` itself fails.
pub async fn serve_with_shutdown<F>(
    server_config: &ServerConfig,
    serve_fn: impl FnOnce() -> F,
) -> ServerResult<()>
where
    F: Future<Output = io::Result<()>>,
{
    let start_time = Instant::now();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_config.server_addr(),
        version = env!("CARGO_PKG_VERSION"),
        "Starting server"
    );

    if let Err(validation_error) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = validation_error.to_string(),
            "Server configuration validation failed"
        );
        return Err(ServerError::invalid_config(&validation_error));
    }

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Server is bound to all interfaces (0.0.0.0). Ensure proper firewall configuration."
        );
    }

    tracing::debug!(
        target: TRACING_TARGET_SERVER_STARTUP,
        request_timeout = server_config.request_timeout,
        shutdown_timeout = server_config.shutdown_timeout,
        "Server configuration active"
    );

    let result = serve_fn().await.map_err(|err| {
        let uptime = start_time.elapsed();
        let server_error = ServerError::Runtime(err);

        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %server_error,
            error_code = server_error.error_code(),
            uptime_seconds = uptime.as_secs(),
            recoverable = server_error.is_recoverable(),
            "Server encountered fatal error"
        );

        if let Some(suggestion) = server_error.suggestion() {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                suggestion = suggestion,
                "Recovery suggestion"
            );
        }

        server_error
    });

    let uptime = start_time.elapsed();

    match &result {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                uptime_seconds = uptime.as_secs(),
                "Server shutdown completed successfully"
            );
        }
        Err(err) => {
            for (key, value) in err.context() {
                tracing::debug!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    context_key = key,
                    context_value = value,
                    "Error context"
                );
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[tokio::test]
    async fn serve_with_shutdown_success() {
        let config = ServerConfig::default();
        let result = serve_with_shutdown(&config, || async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn serve_with_shutdown_handles_error() {
        let config = ServerConfig::default();
        let result =
            serve_with_shutdown(&config, || async { Err(io::Error::other("test error")) }).await;

        assert!(result.is_err());
        assert!(matches!(result, Err(ServerError::Runtime(_))));
    }

    #[tokio::test]
    async fn serve_with_shutdown_validates_config() {
        let config = ServerConfig {
            port: 80,
            ..Default::default()
        };

        let result = serve_with_shutdown(&config, || async { Ok(()) }).await;

        assert!(matches!(result, Err(ServerError::InvalidConfig(_))));
    }
}
