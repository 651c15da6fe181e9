//! Core `RequestBuilder` structures and base functionality

use std::fmt;

use http::{HeaderValue, header::CONTENT_TYPE};
use revalid_client::{CachingClient, Error, HttpRequest};

/// Content type enumeration for elegant API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// application/json content type
    ApplicationJson,
    /// application/x-www-form-urlencoded content type
    ApplicationFormUrlEncoded,
    /// application/octet-stream content type
    ApplicationOctetStream,
    /// text/plain content type
    TextPlain,
    /// text/html content type
    TextHtml,
}

impl ContentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::ApplicationJson => "application/json",
            ContentType::ApplicationFormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::ApplicationOctetStream => "application/octet-stream",
            ContentType::TextPlain => "text/plain",
            ContentType::TextHtml => "text/html",
        }
    }
}

impl From<&str> for ContentType {
    fn from(s: &str) -> Self {
        match s {
            "application/x-www-form-urlencoded" => ContentType::ApplicationFormUrlEncoded,
            "application/octet-stream" => ContentType::ApplicationOctetStream,
            "text/plain" => ContentType::TextPlain,
            "text/html" => ContentType::TextHtml,
            _ => ContentType::ApplicationJson, // Default fallback (includes application/json and unknown types)
        }
    }
}

/// State marker indicating no body has been set
#[derive(Debug, Clone, Copy)]
pub struct BodyNotSet;

/// State marker indicating a body has been set
#[derive(Debug, Clone, Copy)]
pub struct BodySet;

/// Builder for one request against a [`CachingClient`]
///
/// Type parameter `S` tracks the body state:
/// - `BodyNotSet`: Default state, body methods available
/// - `BodySet`: Body has been set, only execution methods available
///
/// Setter failures (an invalid header value, a body that does not serialize)
/// are kept and reported by the terminal method.
pub struct RequestBuilder<'a, T, S = BodyNotSet> {
    pub(crate) client: &'a CachingClient<T>,
    pub(crate) request: HttpRequest,
    pub(crate) error: Option<Error>,
    pub(crate) debug_enabled: bool,
    pub(crate) state: S,
}

impl<'a, T> RequestBuilder<'a, T, BodyNotSet> {
    pub(crate) fn new(client: &'a CachingClient<T>, request: HttpRequest) -> Self {
        Self {
            client,
            request,
            error: None,
            debug_enabled: false,
            state: BodyNotSet,
        }
    }
}

impl<'a, T, S> RequestBuilder<'a, T, S> {
    /// Append a query parameter. Order does not affect caching: parameters
    /// are sorted when the cache key is derived.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.query(name, value);
        self
    }

    /// Log the request and its outcome at debug level
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Set the Content-Type header
    #[must_use]
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.request = self
            .request
            .header(CONTENT_TYPE, HeaderValue::from_static(content_type.as_str()));
        self
    }

    /// The request as built so far
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub(crate) fn fail(mut self, error: Error) -> Self {
        // Keep the first failure, later ones are usually consequences
        if self.error.is_none() {
            self.error = Some(error);
        }
        self
    }

    pub(crate) fn with_state<N>(self, state: N) -> RequestBuilder<'a, T, N> {
        RequestBuilder {
            client: self.client,
            request: self.request,
            error: self.error,
            debug_enabled: self.debug_enabled,
            state,
        }
    }
}

impl<T, S: fmt::Debug> fmt::Debug for RequestBuilder<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("request", &self.request)
            .field("error", &self.error)
            .field("debug_enabled", &self.debug_enabled)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
