//! Redis-backed key-value store.
//!
//! Only compiled with the `redis` feature.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::RedisError;
use tracing::info;

use crate::error::{LedgerError, Result};
use crate::store::{check_ttl, KeyValueStore};

/// [`KeyValueStore`] talking to a Redis server.
///
/// Counters and lists map onto `INCR`, `RPUSH` and `LRANGE`, which Redis
/// executes atomically. `flush_all` issues `FLUSHDB`, clearing only the
/// selected database.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Opens a managed connection to the server at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| LedgerError::Store(format!("Failed to create Redis client: {}", e)))?;
        let manager = client.get_connection_manager().await.map_err(|e| {
            LedgerError::Store(format!("Failed to create connection manager: {}", e))
        })?;
        info!("Connected to Redis at {}", url);
        Ok(Self { manager })
    }
}

fn store_error(e: RedisError) -> LedgerError {
    if e.code() == Some("WRONGTYPE") {
        LedgerError::WrongType(e.to_string())
    } else {
        LedgerError::Store(e.to_string())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.manager.clone();
        redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(store_error)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut conn = self.manager.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async::<()>(&mut conn)
            .await
            .map_err(store_error)
    }

    async fn set_with_ttl(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<()> {
        check_ttl(ttl_secs)?;
        let mut conn = self.manager.clone();
        redis::cmd("SETEX")
            .arg(key)
            .arg(ttl_secs)
            .arg(value)
            .query_async::<()>(&mut conn)
            .await
            .map_err(store_error)
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let mut conn = self.manager.clone();
        redis::cmd("INCR")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(store_error)
    }

    async fn append_to_list(&self, key: &str, value: &str) -> Result<usize> {
        let mut conn = self.manager.clone();
        redis::cmd("RPUSH")
            .arg(key)
            .arg(value)
            .query_async(&mut conn)
            .await
            .map_err(store_error)
    }

    async fn read_list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<String>> {
        let mut conn = self.manager.clone();
        redis::cmd("LRANGE")
            .arg(key)
            .arg(start)
            .arg(end)
            .query_async(&mut conn)
            .await
            .map_err(store_error)
    }

    async fn flush_all(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
            .map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = RedisStore::connect("not a redis url").await;
        assert!(matches!(result, Err(LedgerError::Store(_))));
    }
}
