//! Immutable cache entry with validators and freshness metadata
//!
//! An entry is never mutated once stored. Revalidation produces a new entry
//! (same body and validators, new expiration) that replaces the old one
//! wholesale.

use std::time::SystemTime;

use bytes::Bytes;

use super::cache_key::CacheKey;

/// Validators an origin returned for a representation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validators {
    /// `ETag` exactly as received, quotes and weak prefix included
    pub etag: Option<Bytes>,
    /// `Last-Modified` as an absolute instant
    pub last_modified: Option<SystemTime>,
}

impl Validators {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.etag.is_none() && self.last_modified.is_none()
    }
}

/// Cached response entry with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    key: CacheKey,
    validators: Validators,
    /// After this instant the entry must be revalidated; `None` means
    /// it must always be revalidated
    expires_at: Option<SystemTime>,
    body: Bytes,
    content_type: Option<String>,
    content_encoding: Option<String>,
}

impl CacheEntry {
    /// Create an entry, or `None` when nothing would permit reuse:
    /// no validator to revalidate with and no expiration to serve until.
    pub fn new(
        key: CacheKey,
        body: Bytes,
        validators: Validators,
        expires_at: Option<SystemTime>,
    ) -> Option<Self> {
        if validators.is_empty() && expires_at.is_none() {
            return None;
        }

        Some(Self {
            key,
            validators,
            expires_at,
            body,
            content_type: None,
            content_encoding: None,
        })
    }

    /// Attach the content metadata needed to rebuild a response.
    #[must_use]
    pub fn with_content(mut self, content_type: Option<String>, content_encoding: Option<String>) -> Self {
        self.content_type = content_type;
        self.content_encoding = content_encoding;
        self
    }

    /// Copy of this entry with a new expiration, body and validators kept.
    ///
    /// Returns `None` if the copy would have neither validators nor expiration.
    pub fn refreshed(&self, expires_at: Option<SystemTime>) -> Option<Self> {
        Self::new(
            self.key.clone(),
            self.body.clone(),
            self.validators.clone(),
            expires_at,
        )
        .map(|entry| entry.with_content(self.content_type.clone(), self.content_encoding.clone()))
    }

    #[inline]
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    #[inline]
    pub fn validators(&self) -> &Validators {
        &self.validators
    }

    #[inline]
    pub fn etag(&self) -> Option<&Bytes> {
        self.validators.etag.as_ref()
    }

    #[inline]
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.validators.last_modified
    }

    #[inline]
    pub fn expires_at(&self) -> Option<SystemTime> {
        self.expires_at
    }

    /// Read-only view of the cached payload. `Bytes` is immutable and
    /// reference counted, so holders cannot alter what the store keeps.
    #[inline]
    pub fn body(&self) -> Bytes {
        self.body.clone()
    }

    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    #[inline]
    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    /// Check if entry can be validated with conditional request
    #[inline]
    pub fn can_validate(&self) -> bool {
        !self.validators.is_empty()
    }

    /// Within its absolute freshness window at `now`.
    ///
    /// An entry without `expires_at` is never fresh: it is only reusable
    /// through revalidation.
    pub fn is_fresh(&self, now: SystemTime) -> bool {
        self.expires_at.is_some_and(|expires| now < expires)
    }

    /// Byte cost of validators, body and metadata for the memory budget.
    pub fn size_hint(&self) -> u64 {
        const INSTANT_SIZE: usize = std::mem::size_of::<u64>();

        let size = self.key.as_str().len()
            + self.body.len()
            + self.validators.etag.as_ref().map_or(0, Bytes::len)
            + self.validators.last_modified.map_or(0, |_| INSTANT_SIZE)
            + self.expires_at.map_or(0, |_| INSTANT_SIZE)
            + self.content_type.as_ref().map_or(0, String::len)
            + self.content_encoding.as_ref().map_or(0, String::len);

        u64::try_from(size).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn key() -> CacheKey {
        CacheKey::from_url(&url::Url::parse("http://api.test/res").expect("valid"))
    }

    fn etag(value: &'static str) -> Validators {
        Validators {
            etag: Some(Bytes::from_static(value.as_bytes())),
            last_modified: None,
        }
    }

    #[test]
    fn rejects_entries_without_validators_or_expiration() {
        assert!(CacheEntry::new(key(), Bytes::from_static(b"x"), Validators::default(), None).is_none());
        assert!(CacheEntry::new(key(), Bytes::new(), etag("\"v1\""), None).is_some());
        assert!(
            CacheEntry::new(key(), Bytes::new(), Validators::default(), Some(SystemTime::now())).is_some()
        );
    }

    #[test]
    fn freshness_window() {
        let now = SystemTime::now();
        let fresh = CacheEntry::new(key(), Bytes::new(), Validators::default(), Some(now + Duration::from_secs(60)))
            .expect("valid entry");
        assert!(fresh.is_fresh(now));
        assert!(!fresh.is_fresh(now + Duration::from_secs(60)));

        let revalidate_only = CacheEntry::new(key(), Bytes::new(), etag("\"v1\""), None).expect("valid entry");
        assert!(!revalidate_only.is_fresh(now));
    }

    #[test]
    fn refreshed_keeps_body_and_validators() {
        let now = SystemTime::now();
        let original = CacheEntry::new(key(), Bytes::from_static(b"payload"), etag("\"v1\""), Some(now))
            .expect("valid entry")
            .with_content(Some("text/plain".into()), Some("gzip".into()));

        let later = now + Duration::from_secs(60);
        let refreshed = original.refreshed(Some(later)).expect("still valid");

        assert_eq!(refreshed.body(), original.body());
        assert_eq!(refreshed.etag(), original.etag());
        assert_eq!(refreshed.content_type(), Some("text/plain"));
        assert_eq!(refreshed.content_encoding(), Some("gzip"));
        assert_eq!(refreshed.expires_at(), Some(later));
    }

    #[test]
    fn size_hint_counts_payload_and_metadata() {
        let entry = CacheEntry::new(key(), Bytes::from_static(b"12345"), etag("\"ab\""), None)
            .expect("valid entry")
            .with_content(Some("text/plain".into()), None);
        let expected = "http://api.test/res".len() + 5 + 4 + "text/plain".len();
        assert_eq!(entry.size_hint(), expected as u64);
    }
}
