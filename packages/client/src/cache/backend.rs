//! Pluggable cache backends
//!
//! The client talks to its store through [`CacheBackend`], chosen at
//! construction time: an active [`ResponseCache`] or the [`NoCache`] null
//! backend that never retains anything.

use std::sync::Arc;

use super::cache_entry::CacheEntry;
use super::cache_key::CacheKey;
use super::response_cache::ResponseCache;

pub trait CacheBackend: Send + Sync {
    /// Snapshot of the entry under `key`, stale or not
    fn lookup(&self, key: &CacheKey) -> Option<CacheEntry>;

    /// Store `entry` under its key, replacing any previous entry.
    /// Returns whether the entry was retained.
    fn store(&self, entry: CacheEntry) -> bool;

    /// Delete the entry under `key`. Returns whether one existed.
    fn remove(&self, key: &CacheKey) -> bool;

    /// Note that an entry was refreshed by a 304
    fn record_validation(&self) {}
}

impl CacheBackend for ResponseCache {
    #[inline]
    fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        ResponseCache::lookup(self, key)
    }

    #[inline]
    fn store(&self, entry: CacheEntry) -> bool {
        self.put(entry)
    }

    #[inline]
    fn remove(&self, key: &CacheKey) -> bool {
        ResponseCache::remove(self, key)
    }

    fn record_validation(&self) {
        self.stats().record_validation();
    }
}

impl<T: CacheBackend + ?Sized> CacheBackend for Arc<T> {
    #[inline]
    fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        (**self).lookup(key)
    }

    #[inline]
    fn store(&self, entry: CacheEntry) -> bool {
        (**self).store(entry)
    }

    #[inline]
    fn remove(&self, key: &CacheKey) -> bool {
        (**self).remove(key)
    }

    #[inline]
    fn record_validation(&self) {
        (**self).record_validation();
    }
}

/// Backend that stores nothing; every request goes to the network unmodified
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl CacheBackend for NoCache {
    #[inline]
    fn lookup(&self, _key: &CacheKey) -> Option<CacheEntry> {
        None
    }

    #[inline]
    fn store(&self, _entry: CacheEntry) -> bool {
        false
    }

    #[inline]
    fn remove(&self, _key: &CacheKey) -> bool {
        false
    }
}
