//! Page Cache Module
//!
//! Caches fetched pages in the key-value store for a fixed time-to-live
//! and counts requests per URL.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::cache::decode_text;
use crate::error::{LedgerError, Result};
use crate::instrument::{call_count, counter_key};
use crate::store::{check_ttl, SharedStore};
use crate::web::PageFetcher;

/// Default lifetime of a cached page in seconds.
pub const DEFAULT_PAGE_TTL: u64 = 10;

// == Count Policy ==
/// When `count:<url>` is incremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    /// Every request, before the cache is consulted.
    #[default]
    EveryRequest,
    /// Only requests that reach the upstream fetcher.
    MissesOnly,
}

impl FromStr for CountPolicy {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every" | "every_request" => Ok(CountPolicy::EveryRequest),
            "misses" | "misses_only" => Ok(CountPolicy::MissesOnly),
            other => Err(LedgerError::InvalidRequest(format!(
                "unknown count policy '{}'",
                other
            ))),
        }
    }
}

/// Key holding the cached content of `url`.
pub fn page_key(url: &str) -> String {
    format!("cached:{}", url)
}

// == Web Cache ==
/// Fetches pages through a [`PageFetcher`], caching each body for `ttl_secs`.
///
/// Expiry is left to the store: an entry that outlived its TTL simply reads
/// as absent and the next request fetches again.
#[derive(Clone)]
pub struct WebCache {
    store: SharedStore,
    fetcher: Arc<dyn PageFetcher>,
    ttl_secs: u64,
    policy: CountPolicy,
}

impl WebCache {
    /// Fails with `InvalidRequest` when `ttl_secs` is zero, before any page
    /// is fetched.
    pub fn new(
        store: SharedStore,
        fetcher: Arc<dyn PageFetcher>,
        ttl_secs: u64,
        policy: CountPolicy,
    ) -> Result<Self> {
        check_ttl(ttl_secs)?;
        Ok(Self {
            store,
            fetcher,
            ttl_secs,
            policy,
        })
    }

    /// Returns the content of `url`, from the cache when still fresh.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let count_key = counter_key(url);
        if self.policy == CountPolicy::EveryRequest {
            self.store.increment(&count_key).await?;
        }

        let key = page_key(url);
        if let Some(bytes) = self.store.get(&key).await? {
            debug!("Page cache hit for {}", url);
            return decode_text(bytes).map_err(|e| LedgerError::decode(&key, e));
        }

        debug!("Page cache miss for {}", url);
        let content = self.fetcher.fetch(url).await?;
        self.store
            .set_with_ttl(&key, content.clone().into_bytes(), self.ttl_secs)
            .await?;
        if self.policy == CountPolicy::MissesOnly {
            self.store.increment(&count_key).await?;
        }
        Ok(content)
    }

    /// Number of counted requests for `url`.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        call_count(self.store.as_ref(), url).await
    }
}
