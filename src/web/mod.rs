//! Web Module
//!
//! Page fetching with a TTL-bound cache and per-URL request counting.

mod fetcher;
mod page_cache;

pub use fetcher::{FetcherConfig, HttpFetcher, PageFetcher};
pub use page_cache::{page_key, CountPolicy, WebCache, DEFAULT_PAGE_TTL};
