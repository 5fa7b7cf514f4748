//! Store Module
//!
//! The key-value store contract the cache and its instrumentation are built
//! on, plus an in-process implementation and an optional Redis client.

mod entry;
mod keyspace;
mod memory;
#[cfg(feature = "redis")]
mod redis_store;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{LedgerError, Result};

pub use entry::{current_timestamp_ms, EntryValue, StoreEntry};
pub use keyspace::Keyspace;
pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisStore;

// == Key Value Store ==
/// Operations required from a key-value service.
///
/// `increment` and `append_to_list` must be atomic with respect to other
/// callers; counters and call histories rely on nothing else for
/// correctness. Any failure to reach the service surfaces as
/// [`LedgerError::Store`](crate::error::LedgerError::Store).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the payload stored at `key`, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes `value` at `key` without expiry.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Writes `value` at `key`; the store evicts it after `ttl_secs`.
    ///
    /// A zero TTL is rejected with `InvalidRequest` and nothing is written.
    async fn set_with_ttl(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<()>;

    /// Atomically adds one to the counter at `key` and returns the new value.
    async fn increment(&self, key: &str) -> Result<i64>;

    /// Atomically appends `value` to the list at `key`, returning the new length.
    async fn append_to_list(&self, key: &str, value: &str) -> Result<usize>;

    /// Reads list items from `start` to `end` inclusive; negative indices count from the tail.
    async fn read_list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<String>>;

    /// Removes every key.
    async fn flush_all(&self) -> Result<()>;
}

/// Store handle shared between the cache, its wrappers and the web cache.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Rejects a zero lifetime, which Redis refuses and which would otherwise
/// write an entry that is already expired.
pub(crate) fn check_ttl(ttl_secs: u64) -> Result<()> {
    if ttl_secs == 0 {
        return Err(LedgerError::InvalidRequest(
            "TTL must be at least one second".to_string(),
        ));
    }
    Ok(())
}
