//! Request body handling
//!
//! `body` serializes according to the Content-Type already set: form bodies
//! for `application/x-www-form-urlencoded`, JSON otherwise.

use bytes::Bytes;
use http::HeaderValue;
use http::header::CONTENT_TYPE;
use serde::Serialize;

use crate::builder::core::{BodyNotSet, BodySet, ContentType, RequestBuilder};

impl<'a, T> RequestBuilder<'a, T, BodyNotSet> {
    /// Serialize `body` as the request payload
    ///
    /// # Examples
    /// ```no_run
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Show {
    ///     name: String,
    /// }
    ///
    /// # async fn run() -> revalid::Result<()> {
    /// let api = revalid::Revalid::memory("http://api.example.test/")?;
    /// let created = api
    ///     .post("shows")
    ///     .body(&Show { name: "Dark".into() })
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn body<B: Serialize>(self, body: &B) -> RequestBuilder<'a, T, BodySet> {
        let content_type = self
            .request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(ContentType::ApplicationJson, ContentType::from);

        let encoded = match content_type {
            ContentType::ApplicationFormUrlEncoded => serde_urlencoded::to_string(body)
                .map(String::into_bytes)
                .map_err(revalid_client::error::builder),
            _ => serde_json::to_vec(body).map_err(revalid_client::error::builder),
        };

        let builder = match encoded {
            Ok(bytes) => {
                if self.debug_enabled {
                    tracing::debug!(
                        target: "revalid::builder",
                        body_len = bytes.len(),
                        content_type = content_type.as_str(),
                        "Set request body"
                    );
                }
                let mut builder = self;
                builder.request = builder.request.body(Bytes::from(bytes));
                if !builder.request.headers().contains_key(CONTENT_TYPE) {
                    builder = builder.content_type(content_type);
                }
                builder
            }
            Err(e) => self.fail(e),
        };
        builder.with_state(BodySet)
    }

    /// Use `bytes` as the payload verbatim
    #[must_use]
    pub fn body_bytes(mut self, bytes: impl Into<Bytes>) -> RequestBuilder<'a, T, BodySet> {
        self.request = self.request.body(bytes.into());
        self.with_state(BodySet)
    }

    /// Plain-text payload
    #[must_use]
    pub fn body_text(self, text: impl Into<String>) -> RequestBuilder<'a, T, BodySet> {
        let builder = self.content_type(ContentType::TextPlain);
        let text: String = text.into();
        builder.body_bytes(Bytes::from(text))
    }
}

impl<T> RequestBuilder<'_, T, BodySet> {
    /// The Content-Type the body was encoded with
    pub fn body_content_type(&self) -> Option<&HeaderValue> {
        self.request.headers().get(CONTENT_TYPE)
    }
}
