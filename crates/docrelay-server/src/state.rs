//! Application state and dependency injection.

use docrelay_queue::{Counters, QueueStore, RedisClient, RedisConfig, SchemaRegistry, WorkerRegistry};
use docrelay_results::{MongoClient, MongoConfig, ResultStore};

/// Configuration required to bring up the coordinator's [`AppState`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub redis: RedisConfig,
    pub mongo: MongoConfig,
}

/// Application state shared across every handler via [`axum::extract::State`].
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct AppState {
    queue: QueueStore,
    workers: WorkerRegistry,
    schemas: SchemaRegistry,
    counters: Counters,
    results: ResultStore,
}

impl AppState {
    /// Connects to Redis and MongoDB and assembles the coordinator's state.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let redis = RedisClient::connect(config.redis.clone()).await?;
        let mongo = MongoClient::connect(config.mongo.clone()).await?;

        Ok(Self {
            queue: QueueStore::new(redis.clone()),
            workers: WorkerRegistry::new(redis.clone()),
            schemas: SchemaRegistry::new(redis.clone()),
            counters: Counters::new(redis),
            results: ResultStore::new(mongo),
        })
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+ $(,)?) => {$(
        impl axum::extract::FromRef<AppState> for $t {
            fn from_ref(state: &AppState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(
    queue: QueueStore,
    workers: WorkerRegistry,
    schemas: SchemaRegistry,
    counters: Counters,
    results: ResultStore,
);
