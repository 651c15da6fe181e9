//! # Revalid client
//!
//! An HTTP conditional-response cache. A [`CachingClient`] sits between the
//! application and a [`Transport`]; repeated GETs are served straight from
//! memory while their freshness window lasts and are revalidated with
//! `If-None-Match` / `If-Modified-Since` once it has passed, so an unchanged
//! resource costs a 304 instead of a full transfer.
//!
//! ## Usage
//!
//! ```no_run
//! use revalid_client::prelude::*;
//!
//! # async fn run() -> revalid_client::Result<()> {
//! let cache = ResponseCache::shared(CacheConfig::default())?;
//! let base = url::Url::parse("http://api.example.test/").expect("valid url");
//! let client = CachingClient::with_config(
//!     HyperTransport::new(),
//!     cache,
//!     ClientConfig::with_base(base),
//! );
//!
//! let first = client.execute(HttpRequest::get("shows").query("page", "1")).await?;
//! let again = client.execute(HttpRequest::get("shows").query("page", "1")).await?;
//! assert_eq!(first.body(), again.body());
//! # Ok(())
//! # }
//! ```
//!
//! Responses report where their body came from through
//! [`HttpResponse::origin`]; cache-served responses also carry the reserved
//! effective address [`CACHE_ORIGIN`].

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod cache;
pub mod client;
pub mod clock;
pub mod error;
pub mod http;
pub mod prelude;
pub mod transport;

pub use crate::cache::{
    CacheBackend, CacheConfig, CacheEntry, CacheKey, CacheStats, CacheStatsSnapshot, NoCache,
    ResponseCache, Validators,
};
pub use crate::client::{CachingClient, ClientConfig, ClientStats, ClientStatsSnapshot};
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::error::{Error, Kind, Result};
pub use crate::http::{CACHE_ORIGIN, CacheServe, HttpRequest, HttpResponse, ResponseOrigin};
pub use crate::transport::{HyperTransport, Transport};
