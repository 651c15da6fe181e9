//! Cache key generation for HTTP responses
//!
//! A key is the normalized absolute URL of a request: scheme, host, port,
//! path and query parameters sorted by name. Semantically identical requests
//! whose parameters were added in a different order share one key.

use std::fmt;

use crate::http::{HttpRequest, normalize_url};

/// Cache key for HTTP responses based on the normalized request URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    url: String,
}

impl CacheKey {
    /// Derive the key for a request.
    ///
    /// # Errors
    ///
    /// Returns a builder error when the request has no base address or no
    /// path; a request that cannot be addressed is never cached under a
    /// degenerate key.
    pub fn from_request(request: &HttpRequest) -> crate::Result<Self> {
        let url = request.url()?;
        Ok(Self::from_url(&url))
    }

    /// Derive the key for an absolute URL.
    pub fn from_url(url: &url::Url) -> Self {
        Self {
            url: normalize_url(url),
        }
    }

    /// Normalized URL backing this key
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
