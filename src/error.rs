//! Error types for the cache ledger
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Ledger Error Enum ==
/// Unified error type for the store, cache, instrumentation and web layers.
///
/// Absence of a key is never an error; lookups return `Ok(None)` instead.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The key-value store could not be reached or rejected the command
    #[error("Store unavailable: {0}")]
    Store(String),

    /// A list command hit a scalar key or the other way around
    #[error("Wrong kind of value stored at key: {0}")]
    WrongType(String),

    /// Stored bytes could not be converted by the requested decoder
    #[error("Cannot decode value at '{key}': {reason}")]
    Decode { key: String, reason: String },

    /// Upstream page fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Nothing to return for an HTTP lookup
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Builds a decode error for `key`.
    pub fn decode(key: &str, reason: impl ToString) -> Self {
        LedgerError::Decode {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = match &self {
            LedgerError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            LedgerError::WrongType(_) => StatusCode::CONFLICT,
            LedgerError::Decode { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::Fetch(_) => StatusCode::BAD_GATEWAY,
            LedgerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache ledger.
pub type Result<T> = std::result::Result<T, LedgerError>;
