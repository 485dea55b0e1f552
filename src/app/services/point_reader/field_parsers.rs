//! Field parsing utilities for point rows
//!
//! This module provides helper functions for decoding individual field
//! values, with lenient fallback across a table of common formats when no
//! explicit format string is configured.

use super::timezone::instant_from_naive;
use crate::constants::{
    DATE_ONLY_FORMATS, DATE_TIME_FORMATS_NAIVE, DATE_TIME_FORMATS_WITH_OFFSET, TIME_ONLY_FORMATS,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// Parse a combined date-time field into an instant.
///
/// Text carrying its own UTC offset wins over the row zone; zone-less text
/// is resolved against `zone`. Returns `None` on any parse failure.
pub fn parse_instant(text: &str, format: Option<&str>, zone: Tz) -> Option<DateTime<Utc>> {
    if let Some(format) = format {
        if let Ok(instant) = DateTime::parse_from_str(text, format) {
            return Some(instant.with_timezone(&Utc));
        }

        return NaiveDateTime::parse_from_str(text, format)
            .ok()
            .and_then(|naive| instant_from_naive(naive, zone));
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    for offset_format in DATE_TIME_FORMATS_WITH_OFFSET {
        if let Ok(instant) = DateTime::parse_from_str(text, offset_format) {
            return Some(instant.with_timezone(&Utc));
        }
    }

    for naive_format in DATE_TIME_FORMATS_NAIVE {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, naive_format) {
            return instant_from_naive(naive, zone);
        }
    }

    None
}

/// Parse a date-only field
pub fn parse_date_only(text: &str, format: Option<&str>) -> Option<NaiveDate> {
    if let Some(format) = format {
        return NaiveDate::parse_from_str(text, format).ok();
    }

    DATE_ONLY_FORMATS
        .iter()
        .find_map(|date_format| NaiveDate::parse_from_str(text, date_format).ok())
}

/// Parse a time-of-day field
pub fn parse_time_only(text: &str, format: Option<&str>) -> Option<NaiveTime> {
    if let Some(format) = format {
        return NaiveTime::parse_from_str(text, format).ok();
    }

    TIME_ONLY_FORMATS
        .iter()
        .find_map(|time_format| NaiveTime::parse_from_str(text, time_format).ok())
}

/// Parse a numeric value field, leniently
pub fn parse_value(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Parse an integer grade field, leniently
pub fn parse_grade(text: &str) -> Option<i32> {
    text.parse::<i32>().ok()
}
