//! API Module
//!
//! HTTP handlers and routing for the cache ledger REST API.
//!
//! # Endpoints
//! - `POST /store` - Store a value under a generated key
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /replay` - Replay the store operation's call history
//! - `GET /count/:name` - Read an operation's call counter
//! - `GET /page?url=` - Fetch a page through the page cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
