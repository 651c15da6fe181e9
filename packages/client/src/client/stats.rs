//! Client statistics

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// How the caching client resolved the requests it executed
#[derive(Debug)]
pub struct ClientStats {
    /// Total number of requests executed
    pub requests_total: AtomicU64,
    /// Served from a fresh entry without dispatch
    pub direct_serves: AtomicU64,
    /// Origin answered 304 and the stored body was served
    pub revalidations: AtomicU64,
    /// Network responses written to the cache
    pub stores: AtomicU64,
    /// Responses returned untouched (non-GET, uncacheable, errors)
    pub pass_throughs: AtomicU64,
    /// Transport failures propagated to the caller
    pub transport_errors: AtomicU64,
    /// Client creation time
    pub created_at: Instant,
}

impl Default for ClientStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            direct_serves: AtomicU64::new(0),
            revalidations: AtomicU64::new(0),
            stores: AtomicU64::new(0),
            pass_throughs: AtomicU64::new(0),
            transport_errors: AtomicU64::new(0),
            created_at: Instant::now(),
        }
    }

    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_direct_serve(&self) {
        self.direct_serves.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_revalidation(&self) {
        self.revalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store(&self) {
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pass_through(&self) {
        self.pass_throughs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transport_error(&self) {
        self.transport_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Share of requests answered with a cached body
    pub fn cache_ratio(&self) -> f64 {
        let total = self.requests_total.load(Ordering::Relaxed);
        if total == 0 {
            0.0
        } else {
            let cached = self.direct_serves.load(Ordering::Relaxed)
                + self.revalidations.load(Ordering::Relaxed);
            // Precision loss acceptable for ratio statistics
            #[allow(clippy::cast_precision_loss)]
            {
                cached as f64 / total as f64
            }
        }
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    pub fn snapshot(&self) -> ClientStatsSnapshot {
        ClientStatsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            direct_serves: self.direct_serves.load(Ordering::Relaxed),
            revalidations: self.revalidations.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            pass_throughs: self.pass_throughs.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            cache_ratio: self.cache_ratio(),
            age: self.age(),
        }
    }
}

/// Snapshot of client statistics at a point in time
#[derive(Debug, Clone)]
pub struct ClientStatsSnapshot {
    pub requests_total: u64,
    pub direct_serves: u64,
    pub revalidations: u64,
    pub stores: u64,
    pub pass_throughs: u64,
    pub transport_errors: u64,
    pub cache_ratio: f64,
    pub age: Duration,
}
