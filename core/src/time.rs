//! Time related utils.

use chrono::Utc;

/// DateTime is the time type used across the crates.
pub type DateTime = chrono::DateTime<Utc>;

/// Take the current time, in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a time into the RFC1123 form HTTP headers use.
///
/// ```text
/// Fri, 21 Nov 1997 09:55:06 GMT
/// ```
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
