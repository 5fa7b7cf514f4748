//! Typed Cache Module
//!
//! Stores payloads under generated keys and reads them back with optional
//! decoding.

use std::fmt::Display;

use tracing::debug;

use crate::cache::value::{decode_float, decode_integer, decode_text, Key, StoredValue};
use crate::error::{LedgerError, Result};
use crate::store::SharedStore;

// == Cache ==
/// Cache over a [`KeyValueStore`](crate::store::KeyValueStore).
///
/// Decode failures are reported two ways. [`Cache::get_with`] returns them
/// as [`LedgerError::Decode`]; the typed getters (`get_text`,
/// `get_integer`, `get_float`) turn them into `Ok(None)`. Store failures
/// always propagate.
#[derive(Clone)]
pub struct Cache {
    store: SharedStore,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache over `store`, flushing everything already in it.
    pub async fn new(store: SharedStore) -> Result<Self> {
        store.flush_all().await?;
        debug!("Cache initialized on a flushed store");
        Ok(Self { store })
    }

    /// The underlying store handle.
    pub fn store_handle(&self) -> &SharedStore {
        &self.store
    }

    // == Store ==
    /// Writes `value` under a freshly generated key and returns the key.
    pub async fn store(&self, value: impl Into<StoredValue>) -> Result<Key> {
        let value = value.into();
        let key = Key::generate();
        self.store.set(key.as_str(), value.to_bytes()).await?;
        debug!("Stored {} value under {}", value.kind(), key);
        Ok(key)
    }

    // == Get ==
    /// Reads the raw bytes at `key`; `None` when nothing is stored.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Reads `key` and converts it with `decoder`.
    ///
    /// A decoder failure is returned as [`LedgerError::Decode`].
    pub async fn get_with<T, E, F>(&self, key: &str, decoder: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> std::result::Result<T, E>,
        E: Display,
    {
        match self.get(key).await? {
            None => Ok(None),
            Some(bytes) => decoder(bytes)
                .map(Some)
                .map_err(|e| LedgerError::decode(key, e)),
        }
    }

    /// Reads `key` as UTF-8 text.
    pub async fn get_text(&self, key: &str) -> Result<Option<String>> {
        lenient(self.get_with(key, decode_text).await)
    }

    /// Reads `key` as a base-10 integer.
    pub async fn get_integer(&self, key: &str) -> Result<Option<i64>> {
        lenient(self.get_with(key, decode_integer).await)
    }

    /// Reads `key` as a floating point number.
    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        lenient(self.get_with(key, decode_float).await)
    }
}

/// Maps a decode failure to "no value", keeping every other error.
fn lenient<T>(result: Result<Option<T>>) -> Result<Option<T>> {
    match result {
        Err(LedgerError::Decode { key, reason }) => {
            debug!("Treating undecodable value at {} as absent: {}", key, reason);
            Ok(None)
        }
        other => other,
    }
}
