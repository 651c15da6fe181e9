//! Revalid prelude
//!
//! The types most callers need: requests and responses, the caching client,
//! cache construction and the error type.

pub use crate::cache::{CacheBackend, CacheConfig, CacheKey, NoCache, ResponseCache};
pub use crate::client::{CachingClient, ClientConfig};
pub use crate::error::{Error, Result};
pub use crate::http::{CacheServe, HttpRequest, HttpResponse, ResponseOrigin};
pub use crate::transport::{HyperTransport, Transport};

// HTTP standard types from http crate
pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
