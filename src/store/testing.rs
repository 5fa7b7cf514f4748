//! Store double for failure-path tests.

use async_trait::async_trait;

use crate::error::{LedgerError, Result};
use crate::store::{KeyValueStore, MemoryStore};

/// Store commands a [`FailingStore`] can be told to refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Get,
    Set,
    SetWithTtl,
    Increment,
    Append,
    ReadRange,
}

const ALL_COMMANDS: [Command; 6] = [
    Command::Get,
    Command::Set,
    Command::SetWithTtl,
    Command::Increment,
    Command::Append,
    Command::ReadRange,
];

/// [`MemoryStore`] that answers chosen commands with `LedgerError::Store`.
///
/// `flush_all` always succeeds so a [`Cache`](crate::cache::Cache) can be
/// built on top. Successful commands land in the wrapped store, which the
/// test can keep a clone of and inspect afterwards.
pub struct FailingStore {
    memory: MemoryStore,
    rules: Vec<(Command, Option<String>)>,
}

impl FailingStore {
    pub fn wrap(memory: MemoryStore) -> Self {
        Self {
            memory,
            rules: Vec::new(),
        }
    }

    /// Refuses every command except `flush_all`.
    pub fn down() -> Self {
        ALL_COMMANDS
            .into_iter()
            .fold(Self::wrap(MemoryStore::new()), Self::fail)
    }

    /// Refuses `command` for every key.
    pub fn fail(mut self, command: Command) -> Self {
        self.rules.push((command, None));
        self
    }

    /// Refuses `command` for `key` only.
    pub fn fail_key(mut self, command: Command, key: &str) -> Self {
        self.rules.push((command, Some(key.to_string())));
        self
    }

    fn check(&self, command: Command, key: &str) -> Result<()> {
        let refused = self.rules.iter().any(|(c, k)| {
            *c == command && k.as_deref().map_or(true, |k| k == key)
        });
        if refused {
            return Err(LedgerError::Store("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check(Command::Get, key)?;
        self.memory.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.check(Command::Set, key)?;
        self.memory.set(key, value).await
    }

    async fn set_with_ttl(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<()> {
        self.check(Command::SetWithTtl, key)?;
        self.memory.set_with_ttl(key, value, ttl_secs).await
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        self.check(Command::Increment, key)?;
        self.memory.increment(key).await
    }

    async fn append_to_list(&self, key: &str, value: &str) -> Result<usize> {
        self.check(Command::Append, key)?;
        self.memory.append_to_list(key, value).await
    }

    async fn read_list_range(&self, key: &str, start: i64, end: i64) -> Result<Vec<String>> {
        self.check(Command::ReadRange, key)?;
        self.memory.read_list_range(key, start, end).await
    }

    async fn flush_all(&self) -> Result<()> {
        self.memory.flush_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_key_rule_only_refuses_that_key() {
        let memory = MemoryStore::new();
        let store = FailingStore::wrap(memory.clone()).fail_key(Command::Append, "a");

        assert!(matches!(
            store.append_to_list("a", "x").await,
            Err(LedgerError::Store(_))
        ));
        assert_eq!(store.append_to_list("b", "x").await.unwrap(), 1);
        assert_eq!(memory.read_list_range("b", 0, -1).await.unwrap(), vec!["x"]);
    }

    #[tokio::test]
    async fn test_down_store_still_flushes() {
        let store = FailingStore::down();

        assert!(store.flush_all().await.is_ok());
        assert!(matches!(store.get("k").await, Err(LedgerError::Store(_))));
    }
}
