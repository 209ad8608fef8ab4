//! CRUD for named, versioned-by-name JSON schemas.

use docrelay_core::domain::Schema;
use redis::AsyncCommands;
use serde_json::Value;

use crate::client::RedisClient;
use crate::error::{Error, Result};

const SCHEMAS_SET_KEY: &str = "available_schemas";

fn schema_key(name: &str) -> String {
    format!("schema:{name}")
}

/// Named, versioned-by-name JSON schemas consumed by the extractor at job time.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    client: RedisClient,
}

impl SchemaRegistry {
    /// Creates a new schema registry over the given Redis client.
    #[must_use]
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Stores a new schema. Rejects if `name` is already present or `content`
    /// is not a JSON object.
    pub async fn put(&self, name: &str, content: Value) -> Result<Schema> {
        if self.exists(name).await? {
            return Err(Error::DuplicateSchemaName(name.to_string()));
        }
        let schema = Schema::new(name, content)?;
        let payload = serde_json::to_string(&schema)?;

        let mut conn = self.client.connection();
        let _: () = conn.set(schema_key(name), payload).await?;
        let _: () = conn.sadd(SCHEMAS_SET_KEY, name).await?;
        Ok(schema)
    }

    /// Fetches a schema by name.
    pub async fn get(&self, name: &str) -> Result<Schema> {
        let mut conn = self.client.connection();
        let raw: Option<String> = conn.get(schema_key(name)).await?;
        let raw = raw.ok_or_else(|| Error::SchemaNotFound(name.to_string()))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Deletes a schema by name.
    pub async fn delete(&self, name: &str) -> Result<()> {
        if !self.exists(name).await? {
            return Err(Error::SchemaNotFound(name.to_string()));
        }
        let mut conn = self.client.connection();
        let _: () = conn.del(schema_key(name)).await?;
        let _: () = conn.srem(SCHEMAS_SET_KEY, name).await?;
        Ok(())
    }

    /// Lists all registered schema names.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut conn = self.client.connection();
        Ok(conn.smembers(SCHEMAS_SET_KEY).await?)
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let mut conn = self.client.connection();
        Ok(conn.sismember(SCHEMAS_SET_KEY, name).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_key_is_namespaced() {
        assert_eq!(schema_key("invoice_v1"), "schema:invoice_v1");
    }
}
