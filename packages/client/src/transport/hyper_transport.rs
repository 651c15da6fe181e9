//! HTTP/1.1 transport on hyper's pooled client

use std::time::Duration;

use bytes::Bytes;
use http::header::USER_AGENT;
use http::{HeaderValue, Uri};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;

use super::Transport;
use crate::client::ClientConfig;
use crate::error;
use crate::http::{HttpRequest, HttpResponse};

/// Plain-HTTP transport with connection pooling.
///
/// Redirects are returned to the caller as is. TLS is left to custom
/// [`Transport`] implementations.
#[derive(Clone, Debug)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    user_agent: Option<HeaderValue>,
    timeout: Option<Duration>,
}

impl HyperTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&ClientConfig::default())
    }

    /// Build a transport with the user agent and timeouts from `config`.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);
        connector.set_connect_timeout(config.connect_timeout);

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .build(connector);

        let user_agent = config.user_agent.as_deref().and_then(|agent| {
            HeaderValue::from_str(agent)
                .inspect_err(|e| {
                    tracing::warn!(
                        target: "revalid::transport",
                        error = %e,
                        "Ignoring invalid user agent"
                    );
                })
                .ok()
        });

        Self {
            client,
            user_agent,
            timeout: config.timeout,
        }
    }

    async fn dispatch(&self, request: HttpRequest) -> crate::Result<HttpResponse> {
        let url = request.url()?;
        let uri: Uri = url.as_str().parse().map_err(error::builder)?;

        let mut builder = http::Request::builder()
            .method(request.method().clone())
            .uri(uri);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(request.headers().clone());
            if let Some(agent) = &self.user_agent {
                headers.entry(USER_AGENT).or_insert_with(|| agent.clone());
            }
        }
        let outgoing = builder
            .body(Full::new(request.body_bytes().clone()))
            .map_err(error::builder)?;

        tracing::debug!(
            target: "revalid::transport",
            method = %request.method(),
            url = %url,
            "Dispatching request"
        );

        let pending = self.client.request(outgoing);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| error::request("request timed out", url.clone()))?,
            None => pending.await,
        };
        let response = result.map_err(|e| {
            if e.is_connect() {
                error::connect(e, url.clone())
            } else {
                error::request(e, url.clone())
            }
        })?;

        let (parts, body) = response.into_parts();
        let body = body.collect().await.map_err(error::body)?.to_bytes();

        tracing::debug!(
            target: "revalid::transport",
            status = %parts.status,
            url = %url,
            body_len = body.len(),
            "Received response"
        );

        Ok(HttpResponse::from_network(parts.status, parts.headers, body, url))
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = crate::Result<HttpResponse>> + Send {
        self.dispatch(request)
    }
}
