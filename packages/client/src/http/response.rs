//! HTTP response model shared by network and cache-synthesized responses
//!
//! Downstream code reads status, headers and body the same way whether the
//! bytes came over the wire or out of the cache. Provenance is carried by the
//! explicit [`ResponseOrigin`] tag; the sentinel effective address
//! ([`CACHE_ORIGIN`]) is kept for callers that only look at the URL.

use std::sync::LazyLock;

use bytes::Bytes;
use http::header::{CONTENT_ENCODING, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::headers::{charset, header_str, media_type};

/// Reserved, never dereferenced address reported for cache-served responses.
pub const CACHE_ORIGIN: &str = "cache-memory://memory/";

static CACHE_ORIGIN_URL: LazyLock<Url> = LazyLock::new(|| {
    // Constant literal; parsing cannot fail for a well-formed absolute URL
    Url::parse(CACHE_ORIGIN).unwrap_or_else(|e| panic!("invalid cache origin {CACHE_ORIGIN}: {e}"))
});

/// The sentinel effective address as a parsed URL.
#[inline]
pub fn cache_origin_url() -> Url {
    CACHE_ORIGIN_URL.clone()
}

/// How a cache-originated response was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheServe {
    /// Served from a fresh entry, the request never left the process
    Direct,
    /// The origin answered 304 and the body was filled from the entry
    Revalidated,
}

/// Where a response's body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOrigin {
    Network,
    Cache(CacheServe),
}

/// Fully buffered HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    content_type: Option<String>,
    content_encoding: Option<String>,
    effective_url: Url,
    origin: ResponseOrigin,
}

impl HttpResponse {
    /// Build a response as received from the transport.
    pub fn from_network(status: StatusCode, headers: HeaderMap, body: Bytes, effective_url: Url) -> Self {
        let content_type = header_str(&headers, &CONTENT_TYPE).map(str::to_owned);
        let content_encoding = header_str(&headers, &CONTENT_ENCODING).map(str::to_owned);

        Self {
            status,
            headers,
            body,
            content_type,
            content_encoding,
            effective_url,
            origin: ResponseOrigin::Network,
        }
    }

    pub(crate) fn from_cache(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        content_type: Option<String>,
        content_encoding: Option<String>,
        serve: CacheServe,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            content_type,
            content_encoding,
            effective_url: cache_origin_url(),
            origin: ResponseOrigin::Cache(serve),
        }
    }

    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as text, looked up case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Cheap copy of the body; `Bytes` shares the underlying buffer.
    #[inline]
    pub fn bytes(&self) -> Bytes {
        self.body.clone()
    }

    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Media type without parameters, e.g. `application/json`.
    pub fn media_type(&self) -> Option<&str> {
        self.content_type.as_deref().map(media_type)
    }

    #[inline]
    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    /// Character set declared by `Content-Type`, `utf-8` when absent.
    pub fn charset(&self) -> &str {
        self.content_type
            .as_deref()
            .and_then(charset)
            .unwrap_or("utf-8")
    }

    #[inline]
    pub fn effective_url(&self) -> &Url {
        &self.effective_url
    }

    #[inline]
    pub fn origin(&self) -> ResponseOrigin {
        self.origin
    }

    #[inline]
    pub fn is_from_cache(&self) -> bool {
        matches!(self.origin, ResponseOrigin::Cache(_))
    }

    #[inline]
    pub fn is_not_modified(&self) -> bool {
        self.status == StatusCode::NOT_MODIFIED
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> crate::Result<T> {
        serde_json::from_slice(&self.body).map_err(crate::error::decode)
    }
}
