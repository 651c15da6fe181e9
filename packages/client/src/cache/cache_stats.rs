//! Cache statistics and metrics tracking

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Statistics for HTTP response caching
#[derive(Debug)]
pub struct CacheStats {
    /// Lookups that found a fresh entry, servable without the origin
    pub hits: AtomicU64,
    /// Lookups that found an entry needing revalidation
    pub stale_hits: AtomicU64,
    /// Lookups that found nothing
    pub misses: AtomicU64,
    /// Entries written (inserts and replacements)
    pub stores: AtomicU64,
    /// Entries evicted to honour the configured bounds
    pub evictions: AtomicU64,
    /// Entries refreshed after a 304 from the origin
    pub validations: AtomicU64,
    /// Entries removed by the sweep
    pub swept: AtomicU64,
    /// Cache creation time
    pub created_at: Instant,
}

/// Point-in-time copy of [`CacheStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub stale_hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub evictions: u64,
    pub validations: u64,
    pub swept: u64,
}

impl CacheStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            stale_hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stores: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            validations: AtomicU64::new(0),
            swept: AtomicU64::new(0),
            created_at: Instant::now(),
        }
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_hit(&self) {
        self.stale_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store(&self) {
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation(&self) {
        self.validations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_swept(&self, count: u64) {
        self.swept.fetch_add(count, Ordering::Relaxed);
    }

    /// Fraction of lookups answered by a fresh entry.
    ///
    /// Stale hits count against the ratio since they still cost a round trip.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let total = hits
            .saturating_add(self.stale_hits.load(Ordering::Relaxed))
            .saturating_add(self.misses.load(Ordering::Relaxed));
        if total == 0 {
            0.0
        } else if hits > (1u64 << 53) || total > (1u64 << 53) {
            // Beyond f64's exact integer range, divide in fixed point first
            let scaled = (u128::from(hits) * 1_000_000_000) / u128::from(total);
            (scaled as f64) / 1_000_000_000.0
        } else {
            (hits as f64) / (total as f64)
        }
    }

    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            stale_hits: self.stale_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            validations: self.validations.load(Ordering::Relaxed),
            swept: self.swept.load(Ordering::Relaxed),
        }
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

impl Default for CacheStats {
    fn default() -> Self {
        Self::new()
    }
}
