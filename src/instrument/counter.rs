//! Invocation counting.

use async_trait::async_trait;
use tracing::debug;

use crate::cache::decode_integer;
use crate::error::{LedgerError, Result};
use crate::instrument::Operation;
use crate::store::{KeyValueStore, SharedStore};

/// Key of the call counter for operation `name`.
pub fn counter_key(name: &str) -> String {
    format!("count:{}", name)
}

/// Reads the number of calls recorded for `name`; zero when never called.
pub async fn call_count(store: &dyn KeyValueStore, name: &str) -> Result<i64> {
    let key = counter_key(name);
    match store.get(&key).await? {
        None => Ok(0),
        Some(bytes) => decode_integer(bytes).map_err(|e| LedgerError::decode(&key, e)),
    }
}

// == Count Calls ==
/// Increments `count:<name>` before every call of the wrapped operation.
///
/// The counter tracks calls started, not calls completed: it is bumped even
/// when the inner call then fails.
pub struct CountCalls<O> {
    inner: O,
    store: SharedStore,
}

impl<O: Operation> CountCalls<O> {
    pub fn new(inner: O, store: SharedStore) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl<O: Operation> Operation for CountCalls<O> {
    type Input = O::Input;
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, input: O::Input) -> Result<O::Output> {
        let count = self.store.increment(&counter_key(self.name())).await?;
        debug!("{} call #{}", self.name(), count);
        self.inner.call(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::OperationExt;
    use crate::store::testing::{Command, FailingStore};
    use crate::store::MemoryStore;
    use std::sync::Arc;

    /// Doubles its input; fails on negative numbers.
    struct Double;

    #[async_trait]
    impl Operation for Double {
        type Input = i64;
        type Output = i64;

        fn name(&self) -> &str {
            "Math.double"
        }

        async fn call(&self, input: i64) -> Result<i64> {
            if input < 0 {
                return Err(LedgerError::InvalidRequest("negative".into()));
            }
            Ok(input * 2)
        }
    }

    #[test]
    fn test_counter_key() {
        assert_eq!(counter_key("Cache.store"), "count:Cache.store");
    }

    #[tokio::test]
    async fn test_counts_every_call_and_preserves_result() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let op = Double.counted(store.clone());

        for n in 0..5 {
            assert_eq!(op.call(n).await.unwrap(), n * 2);
        }

        assert_eq!(call_count(store.as_ref(), "Math.double").await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_failed_call_is_still_counted() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let op = Double.counted(store.clone());

        assert!(op.call(-1).await.is_err());

        assert_eq!(call_count(store.as_ref(), "Math.double").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_call_count_of_unknown_operation_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(call_count(&store, "Nobody.home").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_increment_skips_inner_call() {
        let memory = MemoryStore::new();
        let store: SharedStore =
            Arc::new(FailingStore::wrap(memory.clone()).fail(Command::Increment));
        let op = Double.recorded(store.clone()).counted(store);

        assert!(matches!(op.call(2).await, Err(LedgerError::Store(_))));

        // The inner recorder never ran, so no input was appended
        let inputs = memory.read_list_range("Math.double:inputs", 0, -1).await.unwrap();
        assert!(inputs.is_empty());
    }
}
