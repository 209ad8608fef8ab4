//! Store configuration with CLI argument parsing.
//!
//! `docrelay-queue`'s [`RedisConfig`] and `docrelay-results`'s [`MongoConfig`]
//! aren't themselves `clap::Args` (they're plain library types shared with
//! non-CLI consumers), so this module owns the CLI-facing flags and converts
//! them at startup.

use clap::Args;
use docrelay_queue::RedisConfig;
use docrelay_results::MongoConfig;
use serde::{Deserialize, Serialize};

/// CLI store configuration: Redis (queue/registry/schemas) and MongoDB (results).
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct StoreConfig {
    /// Redis connection URL backing the queue, worker registry, and schema registry.
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// MongoDB connection URI backing the result store.
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://127.0.0.1:27017")]
    pub mongo_uri: String,

    /// MongoDB database name.
    #[arg(long, env = "MONGO_DATABASE", default_value = "docrelay")]
    pub mongo_database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            mongo_uri: "mongodb://127.0.0.1:27017".to_string(),
            mongo_database: "docrelay".to_string(),
        }
    }
}

impl StoreConfig {
    /// Splits this CLI configuration into the library config types.
    #[must_use]
    pub fn into_configs(self) -> (RedisConfig, MongoConfig) {
        (
            RedisConfig::new(self.redis_url),
            MongoConfig::new(self.mongo_uri, self.mongo_database),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_library_configs() {
        let store = StoreConfig {
            redis_url: "redis://example:6379".to_string(),
            mongo_uri: "mongodb://example:27017".to_string(),
            mongo_database: "custom".to_string(),
        };

        let (redis, mongo) = store.into_configs();
        assert_eq!(redis.url, "redis://example:6379");
        assert_eq!(mongo.uri, "mongodb://example:27017");
        assert_eq!(mongo.database, "custom");
    }
}
