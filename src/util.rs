use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::DateTimeError;

/// Formats an instant as the `YYYY-MM-DD` calendar day it falls on in `tz`.
///
/// The day is taken after shifting into `tz`, so `2024-04-09T23:30:00Z` is
/// `2024-04-10` for a UTC+5 reader.
pub fn to_date_string<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String {
    date.with_timezone(tz).date_naive().format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` day as its first instant in `tz`.
///
/// Inverse of [`to_date_string`] for the same `tz`.
pub fn from_date_string<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Utc>, DateTimeError> {
    let day = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| DateTimeError::parse_error(input, e.to_string()))?;

    tz.from_local_datetime(&day.and_time(NaiveTime::MIN))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| DateTimeError::parse_error(input, "day has no midnight in timezone"))
}

/// Reads the leading integer of `input` the way a browser's `parseInt` does,
/// ignoring whatever follows the digits: `"3abc"` is 3, `"abc"` is `None`.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value = rest[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Parses an RFC 3339 timestamp into UTC, keeping the offending input in the error.
pub fn parse_published_at(input: &str) -> Result<DateTime<Utc>, DateTimeError> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DateTimeError::parse_error(input, e.to_string()))
}
