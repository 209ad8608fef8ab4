//! MongoDB client wrapper and connection management.
//!
//! `MongoClient` wraps a [`mongodb::Client`], which already pools and
//! multiplexes connections internally, so the wrapper exists only to keep the
//! database handle and configuration together and cheaply [`Clone`]able —
//! clones share the same underlying driver connection pool.

use std::sync::Arc;

use mongodb::Client;
use mongodb::options::ClientOptions;

use super::mongo_config::MongoConfig;
use crate::error::Result;

const TRACING_TARGET: &str = "docrelay_results::client";

/// MongoDB client wrapper used by the result store.
#[derive(Debug, Clone)]
pub struct MongoClient {
    inner: Arc<MongoClientInner>,
}

#[derive(Debug)]
struct MongoClientInner {
    client: Client,
    config: MongoConfig,
}

impl MongoClient {
    /// Connects to MongoDB using the given configuration.
    #[tracing::instrument(skip(config), target = TRACING_TARGET, fields(uri = %config.uri_masked()))]
    pub async fn connect(config: MongoConfig) -> Result<Self> {
        tracing::info!(target: TRACING_TARGET, "Connecting to MongoDB");

        let options = ClientOptions::parse(&config.uri).await?;
        let client = Client::with_options(options)?;

        client
            .database(&config.database)
            .run_command(bson::doc! { "ping": 1 })
            .await?;

        tracing::info!(target: TRACING_TARGET, "Connected to MongoDB");
        Ok(Self {
            inner: Arc::new(MongoClientInner { client, config }),
        })
    }

    /// Returns the database this client is configured to use.
    pub(crate) fn database(&self) -> mongodb::Database {
        self.inner.client.database(&self.inner.config.database)
    }

    /// Returns the configuration this client was constructed with.
    #[must_use]
    pub fn config(&self) -> &MongoConfig {
        &self.inner.config
    }

    /// Pings the server to verify connectivity.
    pub async fn ping(&self) -> Result<()> {
        self.database().run_command(bson::doc! { "ping": 1 }).await?;
        Ok(())
    }
}
