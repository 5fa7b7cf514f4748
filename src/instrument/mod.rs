//! Instrumentation Module
//!
//! Wrappers that observe calls to an [`Operation`] without changing its
//! inputs, outputs or side effects. Bookkeeping is written to the same
//! key-value store the operation uses:
//!
//! - `count:<name>` - number of calls started ([`CountCalls`])
//! - `<name>:inputs` / `<name>:outputs` - parallel call history ([`RecordHistory`])
//!
//! Wrappers report the wrapped operation's name, so they stack in either
//! order and still share one set of keys.

mod counter;
mod history;

use std::fmt::Display;

use async_trait::async_trait;

use crate::cache::{Cache, Key, StoredValue};
use crate::error::Result;
use crate::store::SharedStore;

pub use counter::{call_count, counter_key, CountCalls};
pub use history::{inputs_key, outputs_key, RecordHistory};

// == Operation ==
/// A named asynchronous call that instrumentation can wrap.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Argument type; its `Display` form is what history records.
    type Input: Display + Send + 'static;
    /// Result type; its `Display` form is what history records.
    type Output: Display + Send + 'static;

    /// Fully qualified name used to derive bookkeeping keys.
    fn name(&self) -> &str;

    async fn call(&self, input: Self::Input) -> Result<Self::Output>;
}

// == Operation Ext ==
/// Builder-style composition of the instrumentation wrappers.
pub trait OperationExt: Operation + Sized {
    /// Counts every call in `store`.
    fn counted(self, store: SharedStore) -> CountCalls<Self> {
        CountCalls::new(self, store)
    }

    /// Records every call's input and output in `store`.
    fn recorded(self, store: SharedStore) -> RecordHistory<Self> {
        RecordHistory::new(self, store)
    }
}

impl<O: Operation> OperationExt for O {}

// == Store Operation ==
/// [`Cache::store`] exposed as an [`Operation`] named `Cache.store`.
#[derive(Clone)]
pub struct StoreOperation {
    cache: Cache,
}

impl StoreOperation {
    pub const NAME: &'static str = "Cache.store";

    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl Operation for StoreOperation {
    type Input = StoredValue;
    type Output = Key;

    fn name(&self) -> &str {
        Self::NAME
    }

    async fn call(&self, input: StoredValue) -> Result<Key> {
        self.cache.store(input).await
    }
}

/// The cache's store operation with call history outermost and counting inside.
pub type InstrumentedStore = RecordHistory<CountCalls<StoreOperation>>;

impl Cache {
    /// Wraps [`Cache::store`] with call counting and history recording.
    pub fn instrumented_store(&self) -> InstrumentedStore {
        let store = self.store_handle().clone();
        StoreOperation::new(self.clone())
            .counted(store.clone())
            .recorded(store)
    }
}
