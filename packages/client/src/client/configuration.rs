//! Client configuration
//!
//! `ClientConfig` carries the default base address requests are resolved
//! against and the connection settings of the bundled transport.

use std::time::Duration;

use url::Url;

/// Default `User-Agent` sent by [`HyperTransport`](crate::transport::HyperTransport)
pub const DEFAULT_USER_AGENT: &str = concat!("revalid/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address for requests that do not carry their own
    pub base_url: Option<Url>,
    /// User agent added when a request does not set one
    pub user_agent: Option<String>,
    /// Limit for a whole request, body included
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    /// How long idle pooled connections are kept
    pub pool_idle_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            pool_idle_timeout: Some(Duration::from_secs(90)),
        }
    }
}

impl ClientConfig {
    /// Default configuration resolving requests against `base_url`
    #[must_use]
    pub fn with_base(base_url: Url) -> Self {
        Self::default().with_base_url(base_url)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the user agent string
    ///
    /// # Examples
    /// ```
    /// use revalid_client::ClientConfig;
    ///
    /// let config = ClientConfig::default().with_user_agent("MyApp/1.0.0");
    /// assert_eq!(config.user_agent.as_deref(), Some("MyApp/1.0.0"));
    /// ```
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn without_user_agent(mut self) -> Self {
        self.user_agent = None;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }
}
