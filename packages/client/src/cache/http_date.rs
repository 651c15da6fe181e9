//! HTTP date parsing and formatting utilities
//!
//! Parses the date grammars seen in `Expires` and `Last-Modified` headers in
//! the wild and formats timestamps as IMF-fixdate for conditional requests.

use std::time::{Duration, SystemTime};

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// HTTP date parsing error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpDateParseError {
    /// Date format was not recognized by any of the supported parsers
    #[error("Unrecognized HTTP date format: {0}")]
    UnrecognizedFormat(String),
    /// Date was parsed but represents a time before Unix epoch
    #[error("Invalid timestamp in HTTP date: {0}")]
    InvalidTimestamp(String),
}

/// HTTP date parsing utilities
pub mod httpdate {
    use super::*;

    /// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
    const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
    /// RFC 850, e.g. `Sunday, 06-Nov-94 08:49:37 GMT`
    const RFC_850: &str = "%A, %d-%b-%y %H:%M:%S GMT";
    /// ANSI C asctime(), e.g. `Sun Nov  6 08:49:37 1994`
    const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

    /// Parse HTTP date string into `SystemTime`.
    ///
    /// Accepted, in order: IMF-fixdate, RFC 850, asctime, RFC 2822 and
    /// RFC 3339. The three RFC 7231 forms carry no offset and are read as UTC.
    ///
    /// # Errors
    ///
    /// Returns `HttpDateParseError` when no format matches or the instant
    /// precedes the Unix epoch.
    pub fn parse_http_date(date_str: &str) -> Result<SystemTime, HttpDateParseError> {
        let date_str = date_str.trim();

        let parsed = [IMF_FIXDATE, RFC_850, ASCTIME]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(date_str, format).ok())
            .map(|naive| naive.and_utc())
            .or_else(|| {
                DateTime::parse_from_rfc2822(date_str)
                    .or_else(|_| DateTime::parse_from_rfc3339(date_str))
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            })
            .ok_or_else(|| HttpDateParseError::UnrecognizedFormat(date_str.to_string()))?;

        let timestamp = u64::try_from(parsed.timestamp())
            .map_err(|_| HttpDateParseError::InvalidTimestamp(date_str.to_string()))?;

        Ok(SystemTime::UNIX_EPOCH + Duration::from_secs(timestamp))
    }

    /// Format `SystemTime` as HTTP date string in RFC 7231 IMF-fixdate format
    pub fn fmt_http_date(time: SystemTime) -> String {
        let duration = time
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default();

        let seconds = i64::try_from(duration.as_secs()).unwrap_or(i64::MAX);
        let dt = DateTime::<Utc>::from_timestamp(seconds, 0).unwrap_or_default();

        dt.format(IMF_FIXDATE).to_string()
    }
}
