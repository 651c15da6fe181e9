//! Terminal methods that execute the built request

use revalid_client::{CachingClient, HttpResponse, Transport};
use serde::de::DeserializeOwned;

use crate::builder::core::RequestBuilder;

impl<T: Transport, S> RequestBuilder<'_, T, S> {
    /// Execute the request through the caching client
    ///
    /// # Errors
    ///
    /// Returns the first setter failure, a builder error for an unaddressable
    /// request, or the transport's error.
    pub async fn send(self) -> revalid_client::Result<HttpResponse> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let debug_enabled = self.debug_enabled;
        if debug_enabled {
            tracing::debug!(
                target: "revalid::builder",
                method = %self.request.method(),
                path = ?self.request.path(),
                "Sending request"
            );
        }

        let client: &CachingClient<T> = self.client;
        let response = client.execute(self.request).await?;

        if debug_enabled {
            tracing::debug!(
                target: "revalid::builder",
                status = %response.status(),
                origin = ?response.origin(),
                "Request completed"
            );
        }
        Ok(response)
    }

    /// Execute and decode the JSON body into `D`
    ///
    /// # Errors
    ///
    /// Everything [`send`](Self::send) returns, plus a decode error.
    pub async fn json<D: DeserializeOwned>(self) -> revalid_client::Result<D> {
        self.send().await?.json()
    }

    /// Execute and return the body as text
    ///
    /// # Errors
    ///
    /// Everything [`send`](Self::send) returns.
    pub async fn text(self) -> revalid_client::Result<String> {
        Ok(self.send().await?.text())
    }

    /// The cached response for this request if it can be served without
    /// contacting the origin
    ///
    /// # Errors
    ///
    /// Returns the first setter failure or a builder error for an
    /// unaddressable request.
    pub fn peek(&self) -> revalid_client::Result<Option<HttpResponse>> {
        if let Some(error) = &self.error {
            return Err(revalid_client::error::builder(error.to_string()));
        }
        self.client.peek(&self.request)
    }
}
