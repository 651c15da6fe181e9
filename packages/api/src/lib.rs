//! # Revalid
//!
//! Fluent HTTP client with transparent conditional-response caching.
//!
//! ```no_run
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Show {
//!     id: u64,
//!     name: String,
//! }
//!
//! # async fn run() -> revalid::Result<()> {
//! let api = revalid::Revalid::memory("http://api.example.test/v1/")?;
//!
//! // Fetched from the origin and stored
//! let shows: Vec<Show> = api.get("shows").query("page", "1").json().await?;
//!
//! // Served from memory while fresh, revalidated with a 304 afterwards
//! let again = api.get("shows").query("page", "1").send().await?;
//! assert!(again.is_from_cache() || again.status().is_success());
//! # let _ = shows;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use http::Method;
use url::Url;

pub mod builder;

pub use builder::{BodyNotSet, BodySet, ContentType, RequestBuilder, header};
pub use revalid_client::{
    CACHE_ORIGIN, CacheBackend, CacheConfig, CacheServe, CachingClient, ClientConfig, Error,
    HttpRequest, HttpResponse, HyperTransport, Kind, NoCache, ResponseCache, ResponseOrigin,
    Result, Transport,
};

/// Entry point: a caching client bound to a base address
#[derive(Debug)]
pub struct Revalid<T = HyperTransport> {
    client: CachingClient<T>,
}

impl<T: Clone> Clone for Revalid<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

fn parse_base(base_url: &str) -> Result<Url> {
    Url::parse(base_url).map_err(revalid_client::error::builder)
}

impl Revalid<HyperTransport> {
    /// Client backed by the process-wide shared in-memory cache
    ///
    /// # Errors
    ///
    /// Returns a builder error when `base_url` is not an absolute URL.
    pub fn memory(base_url: &str) -> Result<Self> {
        let config = ClientConfig::with_base(parse_base(base_url)?);
        let transport = HyperTransport::from_config(&config);
        Ok(Self::from_client(CachingClient::shared(transport, config)))
    }

    /// Client that never caches
    ///
    /// # Errors
    ///
    /// Returns a builder error when `base_url` is not an absolute URL.
    pub fn uncached(base_url: &str) -> Result<Self> {
        let config = ClientConfig::with_base(parse_base(base_url)?);
        let transport = HyperTransport::from_config(&config);
        Ok(Self::from_client(CachingClient::uncached(transport, config)))
    }

    /// Client backed by an explicitly constructed store
    ///
    /// # Errors
    ///
    /// Returns a builder error when `base_url` is not an absolute URL.
    pub fn with_cache(base_url: &str, cache: Arc<dyn CacheBackend>) -> Result<Self> {
        let config = ClientConfig::with_base(parse_base(base_url)?);
        let transport = HyperTransport::from_config(&config);
        Ok(Self::from_client(CachingClient::with_config(
            transport, cache, config,
        )))
    }
}

impl<T: Transport> Revalid<T> {
    /// Wrap an already configured client
    pub fn from_client(client: CachingClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CachingClient<T> {
        &self.client
    }

    /// Start a request with an arbitrary method
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder<'_, T> {
        RequestBuilder::new(&self.client, HttpRequest::new(method, path))
    }

    pub fn get(&self, path: &str) -> RequestBuilder<'_, T> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder<'_, T> {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder<'_, T> {
        self.request(Method::PUT, path)
    }

    pub fn patch(&self, path: &str) -> RequestBuilder<'_, T> {
        self.request(Method::PATCH, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder<'_, T> {
        self.request(Method::DELETE, path)
    }
}
