//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Datetime layouts accepted for a post's `date`, without offset
const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

/// Parse an ISO-8601 date or datetime
///
/// Accepts a bare date (midnight), a local datetime with `T` or space
/// separator down to hour precision, the compact `YYYYMMDD[THHMM[SS]]`
/// forms, or an RFC 3339 timestamp which is normalised to UTC.
///
/// # Examples
/// ```ignore
/// parse_iso_date("2024-01-02") // -> 2024-01-02T00:00:00
/// ```
pub fn parse_iso_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.naive_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(s, format) {
            return Some(date);
        }
    }

    for (date_format, sep) in [("%Y-%m-%d", 'T'), ("%Y-%m-%d", ' '), ("%Y%m%d", 'T')] {
        if let Some(date) = parse_hour_only(s, date_format, sep) {
            return Some(date);
        }
    }

    ["%Y-%m-%d", "%Y%m%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse `<date><sep>HH`; chrono will not build a time from an hour alone
fn parse_hour_only(s: &str, date_format: &str, sep: char) -> Option<NaiveDateTime> {
    let (date, hour) = s.rsplit_once(sep)?;
    if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    NaiveDate::parse_from_str(date, date_format)
        .ok()?
        .and_hms_opt(hour, 0, 0)
}

/// Format date in full format (like "January 02, 2024")
pub fn full_date(date: &NaiveDateTime) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Format a date for a `<time datetime>` attribute
pub fn date_xml(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S").to_string()
}
