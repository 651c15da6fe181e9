//! Responses built from cache entries
//!
//! Synthesized responses have the same shape as network responses. They are
//! tagged [`ResponseOrigin::Cache`](crate::http::ResponseOrigin) and report
//! the [`CACHE_ORIGIN`](crate::http::CACHE_ORIGIN) effective address.

use http::header::{CONTENT_ENCODING, CONTENT_TYPE, ETAG, LAST_MODIFIED};
use http::{HeaderMap, HeaderValue, StatusCode};

use super::cache_entry::CacheEntry;
use super::http_date::httpdate;
use crate::http::{CacheServe, HttpResponse};

fn entry_headers(entry: &CacheEntry) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let text_headers = [
        (CONTENT_TYPE, entry.content_type().map(str::to_owned)),
        (CONTENT_ENCODING, entry.content_encoding().map(str::to_owned)),
        (LAST_MODIFIED, entry.last_modified().map(httpdate::fmt_http_date)),
    ];
    for (name, value) in text_headers {
        if let Some(value) = value.and_then(|v| HeaderValue::from_str(&v).ok()) {
            headers.insert(name, value);
        }
    }
    if let Some(etag) = entry
        .etag()
        .and_then(|etag| HeaderValue::from_maybe_shared(etag.clone()).ok())
    {
        headers.insert(ETAG, etag);
    }

    headers
}

/// Serve a fresh entry without touching the network.
///
/// The status is `304 Not Modified`, the cache-hit indicator, while the body
/// and content metadata are the stored ones.
pub fn direct(entry: &CacheEntry) -> HttpResponse {
    HttpResponse::from_cache(
        StatusCode::NOT_MODIFIED,
        entry_headers(entry),
        entry.body(),
        entry.content_type().map(str::to_owned),
        entry.content_encoding().map(str::to_owned),
        CacheServe::Direct,
    )
}

/// Complete a network 304 with the stored body.
///
/// The network status and headers are kept; whatever payload the transport
/// produced is discarded in favour of the entry's body and content metadata.
pub fn revalidated(network: &HttpResponse, entry: &CacheEntry) -> HttpResponse {
    let mut headers = network.headers().clone();
    for (name, value) in &entry_headers(entry) {
        if !headers.contains_key(name) {
            headers.insert(name.clone(), value.clone());
        }
    }

    HttpResponse::from_cache(
        network.status(),
        headers,
        entry.body(),
        entry.content_type().map(str::to_owned),
        entry.content_encoding().map(str::to_owned),
        CacheServe::Revalidated,
    )
}
