//! Freshness policy: storage eligibility, expiration and validator extraction
//!
//! Expiration is derived by one precedence rule, so an entry never carries two
//! competing sources:
//!
//! 1. `Cache-Control: private` (or `no-store`) forbids storage outright.
//! 2. `Cache-Control: max-age=<seconds>` gives `now + seconds`.
//! 3. A parseable `Expires` date is used as is.
//! 4. Otherwise a validator (`ETag` / `Last-Modified`) allows storage with no
//!    expiration, meaning every reuse must be revalidated.
//! 5. With none of the above the response is not cacheable.
//!
//! `Cache-Control: no-cache` skips steps 2 and 3.

use std::time::{Duration, SystemTime};

use bytes::Bytes;
use http::header::{CACHE_CONTROL, ETAG, EXPIRES, LAST_MODIFIED};
use http::{HeaderMap, StatusCode};

use super::cache_entry::{CacheEntry, Validators};
use super::cache_key::CacheKey;
use super::http_date::httpdate;
use crate::http::{HttpResponse, header_str, joined_header};

/// Upper bound for delta-seconds; larger values are clamped to it.
const MAX_DELTA_SECONDS: u64 = 2_147_483_648;

/// Outcome of evaluating a response's freshness headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// May be served without contacting the origin until this instant
    Until(SystemTime),
    /// May be stored but must be revalidated before every reuse
    Revalidate,
    /// Must not be stored
    Uncacheable(UncacheableReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UncacheableReason {
    Status,
    Private,
    NoStore,
    NoFreshnessInformation,
}

impl Freshness {
    #[inline]
    pub fn is_cacheable(self) -> bool {
        !matches!(self, Freshness::Uncacheable(_))
    }

    /// Absolute expiration to store, if any
    #[inline]
    pub fn expires_at(self) -> Option<SystemTime> {
        match self {
            Freshness::Until(at) => Some(at),
            Freshness::Revalidate | Freshness::Uncacheable(_) => None,
        }
    }
}

/// The `Cache-Control` directives this cache interprets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheControl {
    pub private: bool,
    pub no_store: bool,
    pub no_cache: bool,
    /// `None` when absent or malformed
    pub max_age: Option<u64>,
}

impl CacheControl {
    /// Parse a (possibly joined) `Cache-Control` value. Unknown directives
    /// are ignored, names compare case-insensitively.
    pub fn parse(value: &str) -> Self {
        let mut control = CacheControl::default();

        for directive in value.split(',') {
            let directive = directive.trim();
            let (name, argument) = match directive.split_once('=') {
                Some((name, argument)) => (name.trim(), Some(argument.trim().trim_matches('"'))),
                None => (directive, None),
            };

            if name.eq_ignore_ascii_case("private") {
                control.private = true;
            } else if name.eq_ignore_ascii_case("no-store") {
                control.no_store = true;
            } else if name.eq_ignore_ascii_case("no-cache") {
                control.no_cache = true;
            } else if name.eq_ignore_ascii_case("max-age") && control.max_age.is_none() {
                control.max_age = argument.and_then(parse_delta_seconds);
            }
        }

        control
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        joined_header(headers, &CACHE_CONTROL).map(|value| Self::parse(&value))
    }
}

/// Delta-seconds per RFC 9111 §1.2.2: digits only, saturating at the bound.
fn parse_delta_seconds(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(value.parse::<u64>().map_or(MAX_DELTA_SECONDS, |seconds| {
        seconds.min(MAX_DELTA_SECONDS)
    }))
}

/// Only complete, authoritative (or equivalently trusted) bodies are stored:
/// 200 OK, 201 Created and 203 Non-Authoritative Information.
#[inline]
pub fn can_be_cached(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK | StatusCode::CREATED | StatusCode::NON_AUTHORITATIVE_INFORMATION
    )
}

/// Copy validators from response headers.
///
/// The `ETag` is kept byte for byte. `Last-Modified` is parsed into an
/// instant; an unparseable date is treated as absent.
pub fn extract_validators(headers: &HeaderMap) -> Validators {
    let etag = headers
        .get(ETAG)
        .map(|value| Bytes::copy_from_slice(value.as_bytes()));

    let last_modified = header_str(headers, &LAST_MODIFIED).and_then(|value| {
        httpdate::parse_http_date(value)
            .inspect_err(|e| {
                tracing::trace!(
                    target: "revalid::cache::freshness",
                    error = %e,
                    "Ignoring malformed Last-Modified header"
                );
            })
            .ok()
    });

    Validators {
        etag,
        last_modified,
    }
}

/// Evaluate the freshness headers of a response received at `now`.
pub fn evaluate(headers: &HeaderMap, now: SystemTime) -> Freshness {
    let control = CacheControl::from_headers(headers).unwrap_or_default();

    if control.private {
        return Freshness::Uncacheable(UncacheableReason::Private);
    }
    if control.no_store {
        return Freshness::Uncacheable(UncacheableReason::NoStore);
    }

    if !control.no_cache {
        if let Some(seconds) = control.max_age {
            let expires = now
                .checked_add(Duration::from_secs(seconds))
                .unwrap_or(now + Duration::from_secs(MAX_DELTA_SECONDS));
            return Freshness::Until(expires);
        }

        if let Some(expires) =
            header_str(headers, &EXPIRES).and_then(|value| httpdate::parse_http_date(value).ok())
        {
            return Freshness::Until(expires);
        }
    }

    if extract_validators(headers).is_empty() {
        Freshness::Uncacheable(UncacheableReason::NoFreshnessInformation)
    } else {
        Freshness::Revalidate
    }
}

/// Evaluate status and headers together.
pub fn evaluate_response(response: &HttpResponse, now: SystemTime) -> Freshness {
    if can_be_cached(response.status()) {
        evaluate(response.headers(), now)
    } else {
        Freshness::Uncacheable(UncacheableReason::Status)
    }
}

/// Build the entry to store for a network response, if it is cacheable.
pub fn entry_for_response(key: CacheKey, response: &HttpResponse, now: SystemTime) -> Option<CacheEntry> {
    let freshness = evaluate_response(response, now);
    if !freshness.is_cacheable() {
        tracing::debug!(
            target: "revalid::cache::freshness",
            cache_key = %key,
            status = %response.status(),
            ?freshness,
            "Response not cacheable"
        );
        return None;
    }

    CacheEntry::new(
        key,
        response.bytes(),
        extract_validators(response.headers()),
        freshness.expires_at(),
    )
    .map(|entry| {
        entry.with_content(
            response.content_type().map(str::to_owned),
            response.content_encoding().map(str::to_owned),
        )
    })
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    fn now() -> SystemTime {
        // Sun, 06 Nov 1994 08:49:37 GMT
        SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777)
    }

    #[test]
    fn eligible_statuses() {
        assert!(can_be_cached(StatusCode::OK));
        assert!(can_be_cached(StatusCode::CREATED));
        assert!(can_be_cached(StatusCode::NON_AUTHORITATIVE_INFORMATION));
        for status in [
            StatusCode::ACCEPTED,
            StatusCode::PARTIAL_CONTENT,
            StatusCode::MOVED_PERMANENTLY,
            StatusCode::NOT_MODIFIED,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert!(!can_be_cached(status), "{status}");
        }
    }

    #[test]
    fn private_overrides_everything() {
        let h = headers(&[
            ("cache-control", "private, max-age=60"),
            ("expires", "Sun, 06 Nov 1994 09:49:37 GMT"),
            ("etag", "\"v1\""),
            ("last-modified", "Sat, 05 Nov 1994 08:49:37 GMT"),
        ]);
        assert_eq!(
            evaluate(&h, now()),
            Freshness::Uncacheable(UncacheableReason::Private)
        );
    }

    #[test]
    fn private_in_any_position_and_case() {
        let h = headers(&[("Cache-Control", "max-age=60, PRIVATE")]);
        assert_eq!(
            evaluate(&h, now()),
            Freshness::Uncacheable(UncacheableReason::Private)
        );
    }

    #[test]
    fn max_age_takes_precedence_over_expires() {
        let h = headers(&[
            ("cache-control", "public, max-age=60"),
            ("expires", "Sun, 06 Nov 1994 10:49:37 GMT"),
        ]);
        assert_eq!(
            evaluate(&h, now()),
            Freshness::Until(now() + Duration::from_secs(60))
        );
    }

    #[test]
    fn malformed_max_age_falls_through_to_expires() {
        let h = headers(&[
            ("cache-control", "max-age=soon"),
            ("expires", "Sun, 06 Nov 1994 10:49:37 GMT"),
        ]);
        assert_eq!(
            evaluate(&h, now()),
            Freshness::Until(now() + Duration::from_secs(2 * 3600))
        );
    }

    #[test]
    fn malformed_expires_falls_through_to_validators() {
        let h = headers(&[("expires", "0"), ("etag", "W/\"weak\"")]);
        assert_eq!(evaluate(&h, now()), Freshness::Revalidate);

        let h = headers(&[("expires", "0")]);
        assert_eq!(
            evaluate(&h, now()),
            Freshness::Uncacheable(UncacheableReason::NoFreshnessInformation)
        );
    }

    #[test]
    fn validators_only_means_always_revalidate() {
        let h = headers(&[("last-modified", "Sat, 05 Nov 1994 08:49:37 GMT")]);
        assert_eq!(evaluate(&h, now()), Freshness::Revalidate);
        assert_eq!(Freshness::Revalidate.expires_at(), None);
    }

    #[test]
    fn nothing_means_not_cacheable() {
        assert_eq!(
            evaluate(&HeaderMap::new(), now()),
            Freshness::Uncacheable(UncacheableReason::NoFreshnessInformation)
        );
        let h = headers(&[("cache-control", "public")]);
        assert!(!evaluate(&h, now()).is_cacheable());
    }

    #[test]
    fn no_cache_forces_revalidation() {
        let h = headers(&[("cache-control", "no-cache, max-age=600"), ("etag", "\"v1\"")]);
        assert_eq!(evaluate(&h, now()), Freshness::Revalidate);
    }

    #[test]
    fn no_store_is_never_stored() {
        let h = headers(&[("cache-control", "no-store"), ("etag", "\"v1\"")]);
        assert_eq!(
            evaluate(&h, now()),
            Freshness::Uncacheable(UncacheableReason::NoStore)
        );
    }

    #[test]
    fn max_age_zero_expires_immediately() {
        let h = headers(&[("cache-control", "max-age=0")]);
        let expires = evaluate(&h, now()).expires_at().expect("has expiration");
        assert!(expires <= now());
    }

    #[test]
    fn huge_max_age_is_clamped() {
        let control = CacheControl::parse("max-age=99999999999999999");
        assert_eq!(control.max_age, Some(MAX_DELTA_SECONDS));
    }

    #[test]
    fn max_age_beyond_u64_is_clamped_not_malformed() {
        let h = headers(&[
            ("cache-control", "max-age=99999999999999999999"),
            ("etag", "\"v1\""),
        ]);
        assert_eq!(
            evaluate(&h, now()),
            Freshness::Until(now() + Duration::from_secs(MAX_DELTA_SECONDS))
        );
    }

    #[test]
    fn signed_max_age_is_malformed() {
        assert_eq!(CacheControl::parse("max-age=+60").max_age, None);
        assert_eq!(CacheControl::parse("max-age=-1").max_age, None);
    }

    #[test]
    fn validators_are_copied_verbatim() {
        let h = headers(&[
            ("etag", "W/\"abc\""),
            ("last-modified", "Sun, 06 Nov 1994 08:49:37 GMT"),
        ]);
        let validators = extract_validators(&h);
        assert_eq!(validators.etag.as_deref(), Some(&b"W/\"abc\""[..]));
        assert_eq!(validators.last_modified, Some(now()));
    }

    #[test]
    fn malformed_last_modified_is_absent() {
        let h = headers(&[("last-modified", "yesterday")]);
        assert!(extract_validators(&h).is_empty());
    }
}
