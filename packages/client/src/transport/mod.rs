//! Transport boundary
//!
//! The cache never opens sockets. It hands requests to a [`Transport`] and
//! interprets what comes back. Failures from the transport are passed to the
//! caller unchanged.

use std::future::Future;

use crate::http::{HttpRequest, HttpResponse};

pub mod hyper_transport;

pub use hyper_transport::HyperTransport;

/// Sends one request and returns the fully buffered response.
///
/// Implementations must not follow redirects on the cache's behalf and must
/// report the address the response was obtained from as its effective URL.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> impl Future<Output = crate::Result<HttpResponse>> + Send;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: HttpRequest) -> impl Future<Output = crate::Result<HttpResponse>> + Send {
        (**self).send(request)
    }
}
