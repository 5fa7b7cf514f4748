//! Cache Ledger - an instrumented key-value cache
//!
//! Stores typed payloads under generated keys, counts and records calls to
//! cache operations, replays recorded history, and caches fetched web pages
//! with a fixed time-to-live.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod models;
pub mod replay;
pub mod store;
pub mod tasks;
pub mod web;

pub use api::AppState;
pub use cache::{Cache, Key, StoredValue};
pub use config::Config;
pub use error::{LedgerError, Result};
pub use instrument::{Operation, OperationExt};
pub use replay::{replay, Transcript};
pub use store::{KeyValueStore, MemoryStore, SharedStore};
pub use tasks::spawn_cleanup_task;
pub use web::WebCache;
