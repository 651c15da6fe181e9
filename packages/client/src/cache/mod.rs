//! HTTP conditional-response caching
//!
//! - `freshness`: storage eligibility, expiration and validator extraction
//! - `response_cache`: the bounded concurrent store with LRU eviction and an
//!   expiry sweep
//! - `conditional`: `If-None-Match` / `If-Modified-Since` augmentation
//! - `synthesizer`: responses rebuilt from stored entries
//! - `backend`: the active and null store strategies
//! - `global`: the lazily created process-wide store

pub mod backend;
pub mod cache_config;
pub mod cache_entry;
pub mod cache_key;
pub mod cache_stats;
pub mod conditional;
pub mod freshness;
pub mod global;
pub mod http_date;
pub mod response_cache;
pub mod synthesizer;

pub use backend::{CacheBackend, NoCache};
pub use cache_config::CacheConfig;
pub use cache_entry::{CacheEntry, Validators};
pub use cache_key::CacheKey;
pub use cache_stats::{CacheStats, CacheStatsSnapshot};
pub use freshness::{CacheControl, Freshness, UncacheableReason, can_be_cached};
pub use global::{configure, shared_cache};
pub use http_date::{HttpDateParseError, httpdate};
pub use response_cache::ResponseCache;
