//! Authentication headers

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::AUTHORIZATION;

use crate::builder::core::RequestBuilder;
use crate::builder::headers::header;

impl<T, S> RequestBuilder<'_, T, S> {
    /// Set the `X-API-Key` header
    #[must_use]
    pub fn api_key(self, key: &str) -> Self {
        self.header_str(header::X_API_KEY, key)
    }

    /// Set a Basic `Authorization` header from user and password
    #[must_use]
    pub fn basic_auth(self, user: &str, password: &str) -> Self {
        let credentials = STANDARD.encode(format!("{user}:{password}"));
        self.header_str(AUTHORIZATION.as_str(), &format!("Basic {credentials}"))
    }

    /// Set a Bearer `Authorization` header
    #[must_use]
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header_str(AUTHORIZATION.as_str(), &format!("Bearer {token}"))
    }
}
