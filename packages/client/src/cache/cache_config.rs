//! Cache configuration and preset policies
//!
//! `CacheConfig` bounds the store (entry count and memory ceiling) and
//! controls the background sweep.

use std::time::Duration;

/// Cache configuration and limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries in cache
    pub max_entries: usize,
    /// Maximum accounted memory in bytes
    pub max_memory_bytes: u64,
    /// Interval between background sweeps
    pub sweep_interval: Duration,
    /// Entries not accessed within this window are removed by the sweep
    pub sliding_expiration: Option<Duration>,
    /// Spawn the background sweeper when a tokio runtime is available
    pub auto_sweep: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            max_memory_bytes: 100 * 1024 * 1024,      // 100MB
            sweep_interval: Duration::from_secs(300), // 5 minutes
            sliding_expiration: None,
            auto_sweep: true,
        }
    }
}

impl CacheConfig {
    /// Large store, frequent sweeps
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            max_entries: 5000,
            max_memory_bytes: 500 * 1024 * 1024, // 500MB
            sweep_interval: Duration::from_secs(60),
            sliding_expiration: None,
            auto_sweep: true,
        }
    }

    /// Small store, idle entries dropped after ten minutes
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            max_entries: 200,
            max_memory_bytes: 20 * 1024 * 1024, // 20MB
            sweep_interval: Duration::from_secs(120),
            sliding_expiration: Some(Duration::from_secs(600)),
            auto_sweep: true,
        }
    }

    /// Create no-cache configuration (nothing is ever retained)
    #[must_use]
    pub fn no_cache() -> Self {
        Self {
            max_entries: 0,
            max_memory_bytes: 0,
            sweep_interval: Duration::MAX,
            sliding_expiration: None,
            auto_sweep: false,
        }
    }

    #[must_use]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    #[must_use]
    pub fn with_max_memory_bytes(mut self, max_memory_bytes: u64) -> Self {
        self.max_memory_bytes = max_memory_bytes;
        self
    }

    #[must_use]
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    #[must_use]
    pub fn with_sliding_expiration(mut self, window: Duration) -> Self {
        self.sliding_expiration = Some(window);
        self
    }

    #[must_use]
    pub fn with_auto_sweep(mut self, auto_sweep: bool) -> Self {
        self.auto_sweep = auto_sweep;
        self
    }

    /// Whether anything can ever be retained under this configuration
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.max_entries > 0 && self.max_memory_bytes > 0
    }

    /// Reject inconsistent settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when auto-sweep is enabled with a zero
    /// interval, when entries are allowed but the memory ceiling is zero, or
    /// when the sliding window is zero.
    pub fn validate(&self) -> crate::Result<()> {
        if self.auto_sweep && self.sweep_interval.is_zero() {
            return Err(crate::error::configuration(
                "sweep_interval must be non-zero when auto_sweep is enabled",
            ));
        }
        if self.max_entries > 0 && self.max_memory_bytes == 0 {
            return Err(crate::error::configuration(
                "max_memory_bytes is zero while max_entries allows entries",
            ));
        }
        if self.sliding_expiration.is_some_and(|window| window.is_zero()) {
            return Err(crate::error::configuration(
                "sliding_expiration window must be non-zero",
            ));
        }
        Ok(())
    }
}
