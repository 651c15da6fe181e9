//! Header helpers shared by the cache and the transport
//!
//! Lookups go through `http::HeaderMap`, which is case-insensitive on names,
//! so `ETag`, `etag` and `ETAG` all resolve to the same entry.

use http::{HeaderMap, HeaderName};

/// Get a header value as text, ignoring values that are not visible ASCII.
#[inline]
pub fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Get every value of a possibly repeated header joined with `", "`.
///
/// `Cache-Control` may legally be split over several header lines.
pub fn joined_header(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// Media type of a `Content-Type` value without its parameters.
pub fn media_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map_or(content_type, str::trim)
}

/// `charset` parameter of a `Content-Type` value, if any.
pub fn charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}
