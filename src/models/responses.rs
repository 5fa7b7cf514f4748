//! Response DTOs for the cache ledger API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::Key;
use crate::replay::{CallRecord, Transcript};

/// Response body for POST /store
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// Key generated for the stored value
    pub key: Key,
}

/// Response body for GET /get/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    /// Decoded value (string, number, or byte array)
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for GET /replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplayResponse {
    pub name: String,
    pub summary: String,
    pub calls: usize,
    pub records: Vec<CallRecord>,
    pub lines: Vec<String>,
}

impl From<Transcript> for ReplayResponse {
    fn from(transcript: Transcript) -> Self {
        Self {
            summary: transcript.summary(),
            lines: transcript.lines(),
            name: transcript.name,
            calls: transcript.calls,
            records: transcript.records,
        }
    }
}

/// Response body for GET /count/:name
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub name: String,
    pub count: i64,
}

/// Response body for GET /page
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    pub url: String,
    pub content: String,
    /// Counted requests for this URL so far
    pub access_count: i64,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
