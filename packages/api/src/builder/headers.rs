//! Header management

use http::header::{ACCEPT, CACHE_CONTROL, USER_AGENT};
use http::{HeaderName, HeaderValue};

use crate::builder::core::{ContentType, RequestBuilder};

/// Header constants for common HTTP headers
pub mod header {
    pub use http::header::*;

    /// Custom X-API-Key header for API authentication
    pub const X_API_KEY: &str = "x-api-key";
}

impl<T, S> RequestBuilder<'_, T, S> {
    /// Add a typed header, replacing an earlier value of the same name
    #[must_use]
    pub fn header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.request = self.request.header(key, value);
        self
    }

    /// Add a header from strings. An invalid name or value fails the request
    /// when it is sent.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn run() -> revalid::Result<()> {
    /// let api = revalid::Revalid::memory("http://api.example.test/")?;
    /// let response = api
    ///     .get("shows")
    ///     .header_str("x-trace-id", "abc123")
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn header_str(self, key: &str, value: &str) -> Self {
        let name = match HeaderName::from_bytes(key.as_bytes()) {
            Ok(name) => name,
            Err(e) => return self.fail(revalid_client::error::builder(e)),
        };
        match HeaderValue::from_str(value) {
            Ok(value) => self.header(name, value),
            Err(e) => self.fail(revalid_client::error::builder(e)),
        }
    }

    /// Add several string headers
    #[must_use]
    pub fn headers<'h>(self, headers: impl IntoIterator<Item = (&'h str, &'h str)>) -> Self {
        headers
            .into_iter()
            .fold(self, |builder, (key, value)| builder.header_str(key, value))
    }

    /// Set the Accept header
    #[must_use]
    pub fn accept(self, content_type: ContentType) -> Self {
        self.header(ACCEPT, HeaderValue::from_static(content_type.as_str()))
    }

    /// Override the client's User-Agent for this request
    #[must_use]
    pub fn user_agent(self, user_agent: &str) -> Self {
        self.header_str(USER_AGENT.as_str(), user_agent)
    }

    /// Send a request Cache-Control directive to the origin
    #[must_use]
    pub fn cache_control(self, value: &str) -> Self {
        self.header_str(CACHE_CONTROL.as_str(), value)
    }
}
