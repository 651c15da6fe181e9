//! HTTP request model handed to the cache and the transport
//!
//! A request is addressed relative to a base URL, the way REST clients are
//! usually configured: the client owns the base address, each request names a
//! resource path plus ordered query parameters.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

use super::url::resolve_url;

/// Outgoing HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    base_url: Option<Url>,
    path: Option<String>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
}

impl Default for HttpRequest {
    /// A GET request with neither base address nor path.
    fn default() -> Self {
        Self {
            method: Method::GET,
            base_url: None,
            path: None,
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}

impl HttpRequest {
    /// Create a request for `path`, resolved later against a base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: Some(path.into()),
            ..Self::default()
        }
    }

    #[inline]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[inline]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[inline]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[inline]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Set the base address this request resolves against.
    #[must_use]
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set a header, replacing earlier values of the same name.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    pub fn base(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    #[inline]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    #[inline]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    #[inline]
    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    /// Only GET participates in caching.
    #[inline]
    pub fn is_cacheable_method(&self) -> bool {
        self.method == Method::GET
    }

    /// Fill in the base address unless the request carries its own.
    pub(crate) fn with_default_base(mut self, base_url: Option<&Url>) -> Self {
        if self.base_url.is_none() {
            self.base_url = base_url.cloned();
        }
        self
    }

    /// Absolute URL: base + path + query parameters in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a builder error if the base address or the path is missing, or
    /// if the path cannot be resolved against the base.
    pub fn url(&self) -> crate::Result<Url> {
        let base = self
            .base_url
            .as_ref()
            .ok_or_else(|| crate::error::builder("request has no base address"))?;
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| crate::error::builder("request path is not set"))?;

        resolve_url(base, path, &self.query)
    }
}
