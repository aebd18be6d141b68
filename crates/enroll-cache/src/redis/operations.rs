//! Redis lease store implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use enroll_core::error::{AppError, ErrorKind};
use enroll_core::result::AppResult;
use enroll_core::traits::lease_store::LeaseStore;

use super::client::RedisClient;

/// Lua script deleting a key only while it still holds the caller's token.
///
/// KEYS[1] = lease key
/// ARGV[1] = expected token
///
/// Returns the number of deleted keys (0 or 1).
const COMPARE_AND_DELETE_SCRIPT: &str = r#"
    if redis.call('GET', KEYS[1]) == ARGV[1] then
        return redis.call('DEL', KEYS[1])
    end
    return 0
"#;

/// Redis-backed lease store for multi-node deployments.
#[derive(Clone)]
pub struct RedisLeaseStore {
    client: RedisClient,
    release_script: redis::Script,
}

impl RedisLeaseStore {
    /// Create a new Redis lease store.
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            release_script: redis::Script::new(COMPARE_AND_DELETE_SCRIPT),
        }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl LeaseStore for RedisLeaseStore {
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();

        // SET key value PX ttl NX
        let result: Option<String> = redis::cmd("SET")
            .arg(&full_key)
            .arg(value)
            .arg("PX")
            .arg(ttl.as_millis().max(1) as u64)
            .arg("NX")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        Ok(result.is_some())
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();

        let deleted: i64 = self
            .release_script
            .key(&full_key)
            .arg(expected)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        Ok(deleted > 0)
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: bool = conn.exists(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
