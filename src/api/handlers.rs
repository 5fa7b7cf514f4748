//! API Handlers
//!
//! HTTP request handlers for each cache ledger endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{LedgerError, Result};
use crate::instrument::{call_count, InstrumentedStore, Operation};
use crate::models::{
    CountResponse, Decoding, GetQuery, GetResponse, HealthResponse, PageQuery, PageResponse,
    ReplayResponse, StoreRequest, StoreResponse,
};
use crate::replay::replay_operation;
use crate::store::SharedStore;
use crate::web::{FetcherConfig, HttpFetcher, PageFetcher, WebCache};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache over the shared store
    pub cache: Cache,
    /// The cache's store operation, counted and recorded
    pub store_op: Arc<InstrumentedStore>,
    /// Page cache over the same store
    pub web: WebCache,
}

impl AppState {
    /// Creates a new AppState around an initialized cache and page cache.
    pub fn new(cache: Cache, web: WebCache) -> Self {
        Self {
            store_op: Arc::new(cache.instrumented_store()),
            cache,
            web,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Flushes `store`, then wires the page cache to an HTTP fetcher.
    pub async fn from_config(store: SharedStore, config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(FetcherConfig {
            timeout: std::time::Duration::from_secs(config.fetch_timeout),
            ..FetcherConfig::default()
        })?);
        let cache = Cache::new(store.clone()).await?;
        let web = WebCache::new(store, fetcher, config.page_cache_ttl, config.count_policy)?;
        Ok(Self::new(cache, web))
    }

    fn store(&self) -> &SharedStore {
        self.cache.store_handle()
    }
}

/// Handler for POST /store
///
/// Stores a value through the instrumented store operation.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    let value = req
        .into_stored_value()
        .map_err(LedgerError::InvalidRequest)?;

    let key = state.store_op.call(value).await?;

    Ok(Json(StoreResponse { key }))
}

/// Handler for GET /get/:key
///
/// Reads a stored value, decoded according to the `as` query parameter.
/// Absent and undecodable values are both reported as not found.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<GetQuery>,
) -> Result<Json<GetResponse>> {
    let cache = &state.cache;
    let value: Option<Value> = match query.decoding {
        Decoding::Text => cache.get_text(&key).await?.map(Value::from),
        Decoding::Integer => cache.get_integer(&key).await?.map(Value::from),
        Decoding::Float => cache.get_float(&key).await?.map(Value::from),
        Decoding::Raw => cache.get(&key).await?.map(Value::from),
    };

    value
        .map(|value| Json(GetResponse::new(key.clone(), value)))
        .ok_or(LedgerError::NotFound(key))
}

/// Handler for GET /replay
///
/// Returns the call history of the store operation.
pub async fn replay_handler(State(state): State<AppState>) -> Result<Json<ReplayResponse>> {
    let transcript = replay_operation(state.store().as_ref(), state.store_op.as_ref()).await?;
    Ok(Json(transcript.into()))
}

/// Handler for GET /count/:name
///
/// Returns the call counter of an operation, zero if it was never called.
pub async fn count_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CountResponse>> {
    let count = call_count(state.store().as_ref(), &name).await?;
    Ok(Json(CountResponse { name, count }))
}

/// Handler for GET /page?url=...
///
/// Returns page content through the page cache.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(LedgerError::InvalidRequest(error_msg));
    }

    let content = state.web.fetch(&query.url).await?;
    let access_count = state.web.access_count(&query.url).await?;

    Ok(Json(PageResponse {
        url: query.url,
        content,
        access_count,
    }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
