//! Free-form date/time parsing.
//!
//! WiGLE exports write `FirstSeen` as `YYYY-MM-DD HH:MM:SS`, but hand edited
//! files and the CLI date bounds show up in several other shapes. Every value
//! is reduced to epoch seconds; values without an offset are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// A date with no time part, e.g. `2023-01-01` or `2023/01/01`.
#[allow(clippy::expect_used)]
static BARE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}\D\d{2}\D\d{2}$").expect("bare date pattern is valid"));

/// Seconds in one day.
pub const SECONDS_PER_DAY: i64 = 86_400;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// Parses a date/time string into epoch seconds.
///
/// Returns `None` when no known shape matches.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(epoch) = value.strip_prefix('@') {
        return epoch.trim().parse::<i64>().ok();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.timestamp());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp());
        }
    }

    None
}

/// Parses a row timestamp, degrading to epoch 0 when it cannot be read.
pub fn parse_row_timestamp(raw: &str) -> i64 {
    match parse_timestamp(raw) {
        Some(ts) => ts,
        None => {
            tracing::warn!(value = raw, "Unparseable timestamp, using epoch 0");
            0
        }
    }
}

/// Returns true when `raw` is a bare `YYYY-MM-DD` style date.
pub fn is_bare_date(raw: &str) -> bool {
    BARE_DATE.is_match(raw.trim())
}
