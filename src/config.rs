//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::web::CountPolicy;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Time-to-live for cached pages in seconds
    pub page_cache_ttl: u64,
    /// Upstream fetch timeout in seconds
    pub fetch_timeout: u64,
    /// When the per-URL access counter is incremented
    pub count_policy: CountPolicy,
    /// Redis connection URL; the in-process store is used when unset
    pub redis_url: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    /// - `PAGE_CACHE_TTL` - Cached page lifetime in seconds (default: 10)
    /// - `FETCH_TIMEOUT` - Upstream fetch timeout in seconds (default: 20)
    /// - `COUNT_POLICY` - `every` or `misses` (default: every)
    /// - `REDIS_URL` - Redis server to use instead of the in-process store
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            page_cache_ttl: parse_var("PAGE_CACHE_TTL").unwrap_or(defaults.page_cache_ttl),
            fetch_timeout: parse_var("FETCH_TIMEOUT").unwrap_or(defaults.fetch_timeout),
            count_policy: parse_var("COUNT_POLICY").unwrap_or(defaults.count_policy),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval: 1,
            page_cache_ttl: 10,
            fetch_timeout: 20,
            count_policy: CountPolicy::EveryRequest,
            redis_url: None,
        }
    }
}
