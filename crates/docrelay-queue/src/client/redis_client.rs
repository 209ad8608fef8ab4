//! Redis client wrapper with connection management.
//!
//! `RedisClient` wraps a [`redis::aio::ConnectionManager`], which multiplexes
//! commands over a single connection and transparently reconnects on
//! transient network failures. The wrapper is cheaply [`Clone`]able; clones
//! share the same underlying connection.

use std::sync::Arc;

use redis::aio::ConnectionManager;

use super::redis_config::RedisConfig;
use crate::error::Result;

const TRACING_TARGET: &str = "docrelay_queue::client";

/// Redis client wrapper used by the queue store, worker registry, and schema registry.
#[derive(Debug, Clone)]
pub struct RedisClient {
    inner: Arc<RedisClientInner>,
}

#[derive(Debug)]
struct RedisClientInner {
    manager: ConnectionManager,
    config: RedisConfig,
}

impl RedisClient {
    /// Connects to Redis using the given configuration.
    #[tracing::instrument(skip(config), target = TRACING_TARGET, fields(url = %config.url_masked()))]
    pub async fn connect(config: RedisConfig) -> Result<Self> {
        tracing::info!(target: TRACING_TARGET, "Connecting to Redis");

        let client = redis::Client::open(config.url.as_str())?;
        let manager = tokio::time::timeout(config.connect_timeout, client.get_connection_manager())
            .await
            .map_err(|_| {
                redis::RedisError::from((
                    redis::ErrorKind::IoError,
                    "connection attempt timed out",
                ))
            })??;

        tracing::info!(target: TRACING_TARGET, "Connected to Redis");
        Ok(Self {
            inner: Arc::new(RedisClientInner { manager, config }),
        })
    }

    /// Returns a cloned, ready-to-use async connection manager handle.
    ///
    /// `ConnectionManager` is itself cheap to clone (it holds an `Arc`
    /// internally), so repeated calls to this method do not open new sockets.
    pub(crate) fn connection(&self) -> ConnectionManager {
        self.inner.manager.clone()
    }

    /// Returns the configuration this client was constructed with.
    #[must_use]
    pub fn config(&self) -> &RedisConfig {
        &self.inner.config
    }

    /// Pings the server to verify connectivity.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
