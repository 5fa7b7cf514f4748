//! Upstream page fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{LedgerError, Result};

/// Source of page content for [`WebCache`](crate::web::WebCache).
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Retrieves the body of `url` as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Configuration for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// User agent string (default: "cache-ledger/0.1")
    pub user_agent: String,
    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: "cache-ledger/0.1".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

/// [`PageFetcher`] performing HTTP GET requests with reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| LedgerError::Fetch(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LedgerError::Fetch(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Fetch(format!("{} returned {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| LedgerError::Fetch(format!("{}: {}", url, e)))
    }
}
