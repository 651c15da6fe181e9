//! Core `ResponseCache` structure and initialization

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;

use super::super::{
    cache_config::CacheConfig, cache_entry::CacheEntry, cache_key::CacheKey,
    cache_stats::CacheStats,
};
use crate::clock::{Clock, system_clock};

/// A stored entry plus the bookkeeping the store needs for eviction
#[derive(Debug)]
pub(super) struct Slot {
    pub(super) entry: CacheEntry,
    /// Accounted size, fixed at insertion
    pub(super) size: u64,
    /// Logical access counter value, orders entries for LRU eviction
    pub(super) last_access_tick: AtomicU64,
    /// Wall-clock time of the last access, for sliding expiration
    pub(super) last_access_ms: AtomicU64,
}

impl Slot {
    pub(super) fn new(entry: CacheEntry, size: u64, tick: u64, now_ms: u64) -> Self {
        Self {
            entry,
            size,
            last_access_tick: AtomicU64::new(tick),
            last_access_ms: AtomicU64::new(now_ms),
        }
    }

    pub(super) fn touch(&self, tick: u64, now_ms: u64) {
        self.last_access_tick.store(tick, Ordering::Relaxed);
        self.last_access_ms.store(now_ms, Ordering::Relaxed);
    }
}

/// Concurrent, bounded HTTP response store
#[derive(Debug)]
pub struct ResponseCache {
    /// Main cache storage (key -> slot)
    pub(super) entries: DashMap<CacheKey, Slot>,
    pub(super) config: CacheConfig,
    /// Sum of the sizes of all stored slots
    pub(super) memory_usage: AtomicU64,
    /// Monotonic access counter
    pub(super) access_tick: AtomicU64,
    pub(super) stats: CacheStats,
    /// Sweep running flag
    pub(super) sweep_running: AtomicBool,
    pub(super) clock: Arc<dyn Clock>,
}

impl ResponseCache {
    /// Create new response cache with configuration
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, system_clock())
    }

    /// Create a cache that reads time from `clock`
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            memory_usage: AtomicU64::new(0),
            access_tick: AtomicU64::new(0),
            stats: CacheStats::new(),
            sweep_running: AtomicBool::new(false),
            clock,
        }
    }

    /// Create a shared cache, validating the configuration and spawning the
    /// background sweeper when `auto_sweep` is set and a tokio runtime is
    /// running.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when [`CacheConfig::validate`] fails.
    pub fn shared(config: CacheConfig) -> crate::Result<Arc<Self>> {
        config.validate()?;
        let auto_sweep = config.auto_sweep;
        let cache = Arc::new(Self::new(config));
        if auto_sweep {
            cache.spawn_sweeper();
        }
        Ok(cache)
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accounted memory of all stored entries in bytes
    pub fn memory_usage(&self) -> u64 {
        self.memory_usage.load(Ordering::Relaxed)
    }

    /// Entry count, memory in bytes and memory as a percentage of the ceiling
    #[allow(clippy::cast_precision_loss)]
    pub fn size_info(&self) -> (usize, u64, f64) {
        let entries = self.len();
        let memory = self.memory_usage();
        let memory_pct = if self.config.max_memory_bytes == 0 {
            0.0
        } else {
            (memory as f64 / self.config.max_memory_bytes as f64) * 100.0
        };

        (entries, memory, memory_pct)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.entries.retain(|_, slot| {
            self.memory_usage.fetch_sub(slot.size, Ordering::Relaxed);
            false
        });
    }

    #[inline]
    pub(super) fn next_tick(&self) -> u64 {
        self.access_tick.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub(super) fn now(&self) -> std::time::SystemTime {
        self.clock.now()
    }

    #[inline]
    pub(super) fn now_ms(&self) -> u64 {
        crate::clock::unix_millis(self.now())
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
