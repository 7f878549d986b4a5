use chrono::{DateTime, Local, TimeZone, Utc};

/// Default display format, year/month/day hour:minute
pub const DEFAULT_DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Microseconds between 1601-01-01 (Chromium/Windows epoch) and 1970-01-01
const WEBKIT_EPOCH_OFFSET_MICROS: i64 = 11_644_473_600_000_000;

/// Format a millisecond Unix timestamp in the local time zone
pub fn format_timestamp(millis: i64, format: &str) -> String {
    format_timestamp_in(millis, &Local, format)
}

/// Format a millisecond Unix timestamp in the given time zone.
///
/// Out-of-range timestamps render as an empty string.
pub fn format_timestamp_in<Tz: TimeZone>(millis: i64, tz: &Tz, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(tz).format(format).to_string(),
        None => String::new(),
    }
}

/// Convert a Chromium `date_added` (microseconds since 1601) to Unix milliseconds
pub fn webkit_micros_to_millis(micros: i64) -> i64 {
    if micros <= 0 {
        return 0;
    }
    (micros - WEBKIT_EPOCH_OFFSET_MICROS) / 1000
}
