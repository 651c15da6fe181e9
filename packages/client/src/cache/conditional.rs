//! Conditional request augmentation
//!
//! Attaches `If-None-Match` and `If-Modified-Since` built from a stored
//! entry's validators so the origin can answer 304 instead of resending the
//! body.

use http::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use http::{HeaderMap, HeaderValue};

use super::cache_entry::CacheEntry;
use super::http_date::httpdate;
use crate::http::HttpRequest;

/// Revalidation headers for an entry, empty when it carries no validators.
pub fn conditional_headers(entry: &CacheEntry) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(2);

    if let Some(etag) = entry.etag() {
        match HeaderValue::from_maybe_shared(etag.clone()) {
            Ok(value) => {
                headers.insert(IF_NONE_MATCH, value);
            }
            Err(e) => {
                tracing::warn!(
                    target: "revalid::cache::conditional",
                    cache_key = %entry.key(),
                    error = %e,
                    "Stored ETag is not a valid header value, skipping If-None-Match"
                );
            }
        }
    }

    if let Some(last_modified) = entry.last_modified() {
        let date = httpdate::fmt_http_date(last_modified);
        match HeaderValue::from_str(&date) {
            Ok(value) => {
                headers.insert(IF_MODIFIED_SINCE, value);
            }
            Err(e) => {
                tracing::warn!(
                    target: "revalid::cache::conditional",
                    cache_key = %entry.key(),
                    error = %e,
                    "Formatted Last-Modified is not a valid header value"
                );
            }
        }
    }

    headers
}

/// Add revalidation headers for `entry` to a GET request.
///
/// Other methods and requests without an entry are left untouched. Returns
/// whether any header was added.
pub fn augment(request: &mut HttpRequest, entry: Option<&CacheEntry>) -> bool {
    if !request.is_cacheable_method() {
        return false;
    }
    let Some(entry) = entry else {
        return false;
    };

    let conditional = conditional_headers(entry);
    if conditional.is_empty() {
        return false;
    }

    tracing::trace!(
        target: "revalid::cache::conditional",
        cache_key = %entry.key(),
        if_none_match = conditional.contains_key(IF_NONE_MATCH),
        if_modified_since = conditional.contains_key(IF_MODIFIED_SINCE),
        "Adding conditional headers"
    );

    let headers = request.headers_mut();
    for (name, value) in &conditional {
        headers.insert(name.clone(), value.clone());
    }
    true
}
