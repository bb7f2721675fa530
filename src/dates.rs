//! Timestamp parsing and display.
//!
//! Entries carry filesystem timestamps, and authors may override the published
//! date with a `date` metadata entry. Authors write dates by hand, so
//! [`parse_date`] accepts a handful of common layouts instead of one strict
//! format. Anything it cannot read is reported as `None` and the caller falls
//! back to the filesystem timestamp.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::time::SystemTime;

/// Local wall-clock time, as read from the filesystem or from metadata.
pub type Timestamp = NaiveDateTime;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse a human-written date.
///
/// Tries RFC 3339 first (converted to local time), then date-time layouts,
/// then date-only layouts (midnight). Surrounding whitespace is ignored.
///
/// ```text
/// "2024-01-02"                 → 2024-01-02 00:00
/// "2024-01-02 14:30"           → 2024-01-02 14:30
/// "January 2, 2024"            → 2024-01-02 00:00
/// "2024-01-02T14:30:00+00:00"  → converted to local time
/// "next tuesday"               → None
/// ```
pub fn parse_date(input: &str) -> Option<Timestamp> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Format a timestamp for display, e.g. `Jan 2, 2024, 2:30 PM`.
pub fn readable(ts: &Timestamp) -> String {
    ts.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Convert a filesystem time into a local [`Timestamp`].
pub fn from_system_time(time: SystemTime) -> Timestamp {
    DateTime::<Local>::from(time).naive_local()
}

/// The current local time.
pub fn now() -> Timestamp {
    Local::now().naive_local()
}
