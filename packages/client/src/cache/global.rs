//! Process-wide shared cache
//!
//! The shared store is built lazily on first use, exactly once even under
//! concurrent first access. Its configuration may be supplied once through
//! [`configure`] before that and is fixed for the rest of the process.
//! Clients that want an isolated store construct a [`ResponseCache`]
//! themselves instead.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tokio::task::JoinHandle;

use super::cache_config::CacheConfig;
use super::response_cache::ResponseCache;

enum ConfigState {
    Unset,
    Configured(CacheConfig),
    /// Consumed by the initialisation of the shared store
    Fixed,
}

static CONFIG: Mutex<ConfigState> = Mutex::new(ConfigState::Unset);
static SHARED_CACHE: OnceLock<Arc<ResponseCache>> = OnceLock::new();
static SWEEPER: Mutex<Option<JoinHandle<()>>> = Mutex::new(None);

/// Set the configuration of the shared cache.
///
/// May be called any number of times before the shared cache is first used;
/// the last call wins.
///
/// # Errors
///
/// Returns a configuration error if the shared cache already exists or if
/// `config` fails validation.
pub fn configure(config: CacheConfig) -> crate::Result<()> {
    config.validate()?;

    let mut state = CONFIG.lock().unwrap_or_else(PoisonError::into_inner);
    if matches!(*state, ConfigState::Fixed) {
        return Err(crate::error::configuration(
            "shared cache is already initialised, its configuration is fixed",
        ));
    }

    tracing::debug!(
        target: "revalid::cache::global",
        max_entries = config.max_entries,
        max_memory_bytes = config.max_memory_bytes,
        sweep_interval_secs = config.sweep_interval.as_secs(),
        "Shared cache configured"
    );
    *state = ConfigState::Configured(config);
    Ok(())
}

/// The shared cache, created on first call.
///
/// With `auto_sweep` enabled, every call made inside a tokio runtime makes
/// sure a background sweeper is running. A sweeper whose runtime has shut
/// down is replaced on the calling runtime.
pub fn shared_cache() -> Arc<ResponseCache> {
    let cache = SHARED_CACHE
        .get_or_init(|| {
            let config = {
                let mut state = CONFIG.lock().unwrap_or_else(PoisonError::into_inner);
                match std::mem::replace(&mut *state, ConfigState::Fixed) {
                    ConfigState::Configured(config) => config,
                    ConfigState::Unset | ConfigState::Fixed => CacheConfig::default(),
                }
            };

            tracing::debug!(
                target: "revalid::cache::global",
                max_entries = config.max_entries,
                max_memory_bytes = config.max_memory_bytes,
                "Initialising shared cache"
            );

            Arc::new(ResponseCache::new(config))
        })
        .clone();

    if cache.config().auto_sweep {
        ensure_sweeper(&cache);
    }
    cache
}

fn ensure_sweeper(cache: &Arc<ResponseCache>) {
    let mut sweeper = SWEEPER.lock().unwrap_or_else(PoisonError::into_inner);
    let restarting = match sweeper.as_ref() {
        Some(handle) if !handle.is_finished() => return,
        Some(_) => true,
        None => false,
    };

    if let Some(handle) = cache.spawn_sweeper() {
        if restarting {
            tracing::debug!(
                target: "revalid::cache::global",
                "Previous sweeper runtime ended, restarted shared cache sweeper"
            );
        }
        *sweeper = Some(handle);
    }
}

/// Whether the shared cache currently has a live background sweeper
pub fn is_sweeping() -> bool {
    SWEEPER
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|handle| !handle.is_finished())
}

/// Whether the shared cache has been created
pub fn is_initialized() -> bool {
    SHARED_CACHE.get().is_some()
}
