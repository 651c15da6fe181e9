//! LRU eviction, the expiry sweep and the background sweeper

use std::sync::atomic::Ordering;
use std::sync::{Arc, Weak};
use std::time::Duration;

use super::super::cache_key::CacheKey;
use super::core::{ResponseCache, Slot};
use crate::clock::unix_millis;

impl ResponseCache {
    fn within_limits(&self) -> bool {
        self.memory_usage.load(Ordering::Relaxed) <= self.config.max_memory_bytes
            && self.entries.len() <= self.config.max_entries
    }

    /// Evict least recently used entries until both the memory ceiling and
    /// the entry-count ceiling hold. `protect` is never evicted.
    ///
    /// Returns the number of entries evicted.
    pub(super) fn enforce_limits(&self, protect: Option<&CacheKey>) -> usize {
        if self.within_limits() {
            return 0;
        }

        // Collect first: removing while iterating would deadlock on the shard
        let mut candidates: Vec<(CacheKey, u64)> = self
            .entries
            .iter()
            .filter(|slot| Some(slot.key()) != protect)
            .map(|slot| {
                (
                    slot.key().clone(),
                    slot.last_access_tick.load(Ordering::Relaxed),
                )
            })
            .collect();

        // Oldest access first
        candidates.sort_unstable_by_key(|(_, tick)| *tick);

        let mut evicted = 0;
        for (key, tick) in candidates {
            if self.within_limits() {
                break;
            }
            // Skip entries touched or replaced since they were collected
            let removed = self.entries.remove_if(&key, |_, slot| {
                slot.last_access_tick.load(Ordering::Relaxed) == tick
            });
            if let Some((_, slot)) = removed {
                self.memory_usage.fetch_sub(slot.size, Ordering::Relaxed);
                self.stats.record_eviction();
                evicted += 1;
            }
        }

        evicted
    }

    fn is_sweepable(&self, slot: &Slot, now_ms: u64) -> bool {
        let idle = self.config.sliding_expiration.is_some_and(|window| {
            let window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
            now_ms.saturating_sub(slot.last_access_ms.load(Ordering::Relaxed)) > window_ms
        });
        // Stale with nothing to revalidate with: unusable
        let dead = !slot.entry.can_validate()
            && slot
                .entry
                .expires_at()
                .is_none_or(|expires| unix_millis(expires) <= now_ms);

        idle || dead
    }

    /// Remove entries idle beyond the sliding-expiration window and stale
    /// entries that carry no validator.
    ///
    /// Stale entries with validators are kept: they still serve the
    /// revalidation path. Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        if self
            .sweep_running
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return 0; // Sweep already running
        }

        let now_ms = self.now_ms();
        let expired: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|slot| self.is_sweepable(slot.value(), now_ms))
            .map(|slot| slot.key().clone())
            .collect();

        let mut swept = 0;
        for key in expired {
            if let Some((_, slot)) = self
                .entries
                .remove_if(&key, |_, slot| self.is_sweepable(slot, now_ms))
            {
                self.memory_usage.fetch_sub(slot.size, Ordering::Relaxed);
                swept += 1;
            }
        }

        self.sweep_running.store(false, Ordering::Release);

        if swept > 0 {
            self.stats.record_swept(swept as u64);
            tracing::debug!(
                target: "revalid::cache::response_cache",
                swept_count = swept,
                remaining = self.len(),
                "Swept expired cache entries"
            );
        }
        swept
    }

    /// Run [`sweep`](Self::sweep) every `sweep_interval` on the current tokio
    /// runtime. The task holds only a weak reference and ends once the cache
    /// is dropped.
    ///
    /// Returns `None` when called outside a tokio runtime.
    pub fn spawn_sweeper(self: &Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                tracing::debug!(
                    target: "revalid::cache::response_cache",
                    "No tokio runtime, background sweep disabled"
                );
                return None;
            }
        };

        let period = self.config.sweep_interval;
        if period.is_zero() || period == Duration::MAX {
            return None;
        }

        let cache: Weak<Self> = Arc::downgrade(self);
        Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(cache) = cache.upgrade() else {
                    tracing::trace!(
                        target: "revalid::cache::response_cache",
                        "Cache dropped, stopping sweeper"
                    );
                    break;
                };
                cache.sweep();
            }
        }))
    }
}
