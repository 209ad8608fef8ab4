//! Global, monotonic processing counters.

use redis::AsyncCommands;

use crate::client::RedisClient;
use crate::error::Result;

const PROCESSED_COUNTER_KEY: &str = "processed_total";
const ERRORS_COUNTER_KEY: &str = "errors_total";

/// `processed_total` and `errors_total`, both monotonic and incremented once
/// per successful `complete` call (the at-least-once contract: a retried
/// `complete` for the same document increments the counters again).
#[derive(Debug, Clone)]
pub struct Counters {
    client: RedisClient,
}

impl Counters {
    /// Creates a new counters handle over the given Redis client.
    #[must_use]
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Increments `processed_total` by one and, if `is_error`, `errors_total` as well.
    pub async fn record_completion(&self, is_error: bool) -> Result<()> {
        let mut conn = self.client.connection();
        let _: i64 = conn.incr(PROCESSED_COUNTER_KEY, 1).await?;
        if is_error {
            let _: i64 = conn.incr(ERRORS_COUNTER_KEY, 1).await?;
        }
        Ok(())
    }

    /// Current value of `processed_total`.
    pub async fn processed_total(&self) -> Result<u64> {
        let mut conn = self.client.connection();
        let value: Option<u64> = conn.get(PROCESSED_COUNTER_KEY).await?;
        Ok(value.unwrap_or(0))
    }

    /// Current value of `errors_total`.
    pub async fn errors_total(&self) -> Result<u64> {
        let mut conn = self.client.connection();
        let value: Option<u64> = conn.get(ERRORS_COUNTER_KEY).await?;
        Ok(value.unwrap_or(0))
    }
}
