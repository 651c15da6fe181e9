//! Lookup, put and remove

use std::sync::atomic::Ordering;

use super::super::{cache_entry::CacheEntry, cache_key::CacheKey};
use super::core::{ResponseCache, Slot};

impl ResponseCache {
    /// Snapshot of the entry stored under `key`, stale or not.
    ///
    /// Counts as an access for LRU and sliding expiration.
    pub fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        let Some(slot) = self.entries.get(key) else {
            self.stats.record_miss();
            tracing::trace!(
                target: "revalid::cache::response_cache",
                cache_key = %key,
                "Cache miss"
            );
            return None;
        };

        let now = self.now();
        slot.touch(self.next_tick(), crate::clock::unix_millis(now));
        let entry = slot.entry.clone();
        drop(slot);

        let fresh = entry.is_fresh(now);
        if fresh {
            self.stats.record_hit();
        } else {
            self.stats.record_stale_hit();
        }
        tracing::trace!(
            target: "revalid::cache::response_cache",
            cache_key = %key,
            fresh,
            "Cache hit"
        );
        Some(entry)
    }

    /// Like [`lookup`](Self::lookup) without touching access time or stats
    pub fn peek(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.get(key).map(|slot| slot.entry.clone())
    }

    /// Store `entry` under its own key, replacing any previous entry
    /// atomically. Returns whether the entry was retained.
    ///
    /// An entry larger than the memory ceiling is refused and any previous
    /// entry for the key is dropped, since it no longer reflects the origin.
    pub fn put(&self, entry: CacheEntry) -> bool {
        if !self.config.is_enabled() {
            return false;
        }

        let key = entry.key().clone();
        let size = entry.size_hint();

        if size > self.config.max_memory_bytes {
            tracing::debug!(
                target: "revalid::cache::response_cache",
                cache_key = %key,
                entry_size = size,
                max_memory = self.config.max_memory_bytes,
                "Entry exceeds memory ceiling, not caching"
            );
            self.remove(&key);
            return false;
        }

        // Account before publishing so a concurrent remove never underflows
        self.memory_usage.fetch_add(size, Ordering::Relaxed);
        let slot = Slot::new(entry, size, self.next_tick(), self.now_ms());
        if let Some(previous) = self.entries.insert(key.clone(), slot) {
            self.memory_usage.fetch_sub(previous.size, Ordering::Relaxed);
        }
        self.stats.record_store();

        tracing::debug!(
            target: "revalid::cache::response_cache",
            cache_key = %key,
            entry_size = size,
            "Stored response"
        );

        let evicted = self.enforce_limits(Some(&key));
        if evicted > 0 {
            tracing::debug!(
                target: "revalid::cache::response_cache",
                evicted_count = evicted,
                current_entries = self.len(),
                current_memory = self.memory_usage(),
                max_entries = self.config.max_entries,
                max_memory = self.config.max_memory_bytes,
                "Cache evicted entries to stay within limits"
            );
        }

        true
    }

    /// Delete the entry under `key`. Returns whether one existed.
    pub fn remove(&self, key: &CacheKey) -> bool {
        match self.entries.remove(key) {
            Some((_, slot)) => {
                self.memory_usage.fetch_sub(slot.size, Ordering::Relaxed);
                tracing::debug!(
                    target: "revalid::cache::response_cache",
                    cache_key = %key,
                    "Removed cached response"
                );
                true
            }
            None => false,
        }
    }
}
