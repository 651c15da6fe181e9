//! Caching client and its request state machine
//!
//! Every request moves through the same states:
//!
//! ```text
//! Init ──▶ DirectServe                       (fresh entry, no dispatch)
//!   │
//!   └────▶ Dispatch ──▶ NotModified ──▶ RevalidatedServe
//!                  ├──▶ Cacheable   ──▶ Store
//!                  └──▶ Other       ──▶ PassThrough
//! ```
//!
//! Only GET consults or populates the cache. The store is never locked
//! across a dispatch: two concurrent requests for one key may both reach the
//! origin, and the later write wins.

use std::sync::Arc;
use std::time::SystemTime;

use http::StatusCode;
use serde::de::DeserializeOwned;

use super::configuration::ClientConfig;
use super::stats::ClientStats;
use crate::cache::freshness::{self, Freshness, UncacheableReason};
use crate::cache::{CacheBackend, CacheEntry, CacheKey, NoCache, conditional, global, synthesizer};
use crate::clock::{Clock, system_clock};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// HTTP client that answers repeated GETs from a response cache
pub struct CachingClient<T> {
    transport: T,
    cache: Arc<dyn CacheBackend>,
    config: ClientConfig,
    clock: Arc<dyn Clock>,
    stats: Arc<ClientStats>,
}

impl<T: Clone> Clone for CachingClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            cache: Arc::clone(&self.cache),
            config: self.config.clone(),
            clock: Arc::clone(&self.clock),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for CachingClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingClient")
            .field("transport", &self.transport)
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> CachingClient<T> {
    /// Client over `transport` using `cache` as its store
    pub fn new(transport: T, cache: Arc<dyn CacheBackend>) -> Self {
        Self::with_config(transport, cache, ClientConfig::default())
    }

    pub fn with_config(transport: T, cache: Arc<dyn CacheBackend>, config: ClientConfig) -> Self {
        Self {
            transport,
            cache,
            config,
            clock: system_clock(),
            stats: Arc::new(ClientStats::new()),
        }
    }

    /// Client backed by the process-wide shared cache
    pub fn shared(transport: T, config: ClientConfig) -> Self {
        Self::with_config(transport, global::shared_cache(), config)
    }

    /// Client that never caches
    pub fn uncached(transport: T, config: ClientConfig) -> Self {
        Self::with_config(transport, Arc::new(NoCache), config)
    }

    /// Read freshness time from `clock` instead of the system clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn stats(&self) -> Arc<ClientStats> {
        Arc::clone(&self.stats)
    }

    pub fn cache(&self) -> &Arc<dyn CacheBackend> {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute a request, serving or revalidating from the cache when the
    /// method is GET.
    ///
    /// # Errors
    ///
    /// Returns a builder error when a GET has no base address or path, and
    /// propagates transport failures unchanged. A stale entry is never
    /// served in place of a failed dispatch.
    pub async fn execute(&self, request: HttpRequest) -> crate::Result<HttpResponse> {
        self.stats.record_request();
        let request = request.with_default_base(self.config.base_url.as_ref());

        if !request.is_cacheable_method() {
            tracing::trace!(
                target: "revalid::client",
                method = %request.method(),
                "Method bypasses cache"
            );
            let response = self.dispatch(request).await?;
            self.stats.record_pass_through();
            return Ok(response);
        }

        // Init
        let key = CacheKey::from_request(&request)?;
        let entry = self.cache.lookup(&key);

        // DirectServe
        if let Some(entry) = &entry
            && entry.is_fresh(self.clock.now())
        {
            tracing::debug!(
                target: "revalid::client",
                cache_key = %key,
                "Serving fresh entry without dispatch"
            );
            self.stats.record_direct_serve();
            return Ok(synthesizer::direct(entry));
        }

        // Dispatch
        let mut request = request;
        let sent_validators = conditional::augment(&mut request, entry.as_ref());
        let response = self.dispatch(request).await?;
        let now = self.clock.now();

        match (response.status(), entry) {
            (StatusCode::NOT_MODIFIED, Some(entry)) => {
                Ok(self.serve_revalidated(&key, &entry, &response, now, sent_validators))
            }
            (status, _) if freshness::can_be_cached(status) => {
                self.store(&key, &response, now);
                Ok(response)
            }
            (status, _) => {
                tracing::trace!(
                    target: "revalid::client",
                    cache_key = %key,
                    status = %status,
                    "Passing response through"
                );
                self.stats.record_pass_through();
                Ok(response)
            }
        }
    }

    /// Execute and decode the JSON body, whether it came from the network or
    /// the cache.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus a decode error when
    /// the body is not valid JSON for `D`.
    pub async fn execute_json<D: DeserializeOwned>(&self, request: HttpRequest) -> crate::Result<D> {
        self.execute(request).await?.json()
    }

    /// The direct-serve response for `request` if a fresh entry exists.
    /// Never dispatches.
    ///
    /// # Errors
    ///
    /// Returns a builder error when a GET has no base address or path.
    pub fn peek(&self, request: &HttpRequest) -> crate::Result<Option<HttpResponse>> {
        if !request.is_cacheable_method() {
            return Ok(None);
        }
        let request = request.clone().with_default_base(self.config.base_url.as_ref());
        let key = CacheKey::from_request(&request)?;
        let now = self.clock.now();

        Ok(self
            .cache
            .lookup(&key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| synthesizer::direct(&entry)))
    }

    async fn dispatch(&self, request: HttpRequest) -> crate::Result<HttpResponse> {
        self.transport.send(request).await.inspect_err(|e| {
            self.stats.record_transport_error();
            tracing::debug!(
                target: "revalid::client",
                error = %e,
                "Transport failed"
            );
        })
    }

    /// NotModified: fill the body from the entry and replace the entry with
    /// one carrying the expiration the 304 announced.
    fn serve_revalidated(
        &self,
        key: &CacheKey,
        entry: &CacheEntry,
        response: &HttpResponse,
        now: SystemTime,
        sent_validators: bool,
    ) -> HttpResponse {
        if !sent_validators {
            tracing::debug!(
                target: "revalid::client",
                cache_key = %key,
                "Origin sent 304 to an unconditional request"
            );
        }

        let refreshed = match freshness::evaluate(response.headers(), now) {
            Freshness::Uncacheable(UncacheableReason::Private | UncacheableReason::NoStore) => None,
            other => entry.refreshed(other.expires_at()),
        };
        match refreshed {
            Some(refreshed) => {
                tracing::debug!(
                    target: "revalid::client",
                    cache_key = %key,
                    expires_at = ?refreshed.expires_at(),
                    "Revalidated entry"
                );
                self.cache.store(refreshed);
                self.cache.record_validation();
            }
            None => {
                self.cache.remove(key);
            }
        }

        self.stats.record_revalidation();
        synthesizer::revalidated(response, entry)
    }

    /// Cacheable status: store what the freshness policy allows, and drop a
    /// previous entry the origin no longer lets us keep.
    fn store(&self, key: &CacheKey, response: &HttpResponse, now: SystemTime) {
        match freshness::entry_for_response(key.clone(), response, now) {
            Some(entry) => {
                if self.cache.store(entry) {
                    self.stats.record_store();
                } else {
                    self.stats.record_pass_through();
                }
            }
            None => {
                self.cache.remove(key);
                self.stats.record_pass_through();
            }
        }
    }
}
