//! In-process key-value store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::store::{check_ttl, KeyValueStore, Keyspace};

// == Memory Store ==
/// [`KeyValueStore`] backed by a [`Keyspace`] behind an async lock.
///
/// Every command takes the write lock, so increments and appends are
/// serialized the same way a single-threaded server would serialize them.
/// Clones share the same keyspace.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    keyspace: Arc<RwLock<Keyspace>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sweeps expired entries, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.keyspace.write().await.cleanup_expired()
    }

    /// Number of entries currently held.
    pub async fn len(&self) -> usize {
        self.keyspace.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keyspace.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: reading an expired entry removes it
        self.keyspace.write().await.get(key)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.keyspace.write().await.set(key.to_string(), value, None);
        Ok(())
    }

    async fn set_with_ttl(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<()> {
        check_ttl(ttl_secs)?;
        self.keyspace
            .write()
            .await
            .set(key.to_string(), value, Some(ttl_secs));
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        self.keyspace.write().await.increment(key)
    }

    async fn append_to_list(&self, key: &str, value: &str) -> Result<usize> {
        self.keyspace.write().await.append(key, value.to_string())
    }

    async fn read_list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<String>> {
        self.keyspace.write().await.range(key, start, end)
    }

    async fn flush_all(&self) -> Result<()> {
        self.keyspace.write().await.flush();
        Ok(())
    }
}
