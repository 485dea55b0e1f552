//! Application constants for pointload
//!
//! This module contains default values and fallback format tables used
//! throughout the ingestion pipeline.

// =============================================================================
// Delimited-Text Defaults
// =============================================================================

/// Default field delimiter for delimited-text sources
pub const DEFAULT_DELIMITER: &str = ",";

// =============================================================================
// Timezone Defaults
// =============================================================================

/// Default timezone applied when no timezone column resolves for a row
pub const DEFAULT_TIMEZONE: &str = "UTC";

// =============================================================================
// Timestamp Format Tables
// =============================================================================

/// Combined date-time formats carrying a UTC offset, tried in order when no
/// explicit format string is configured
pub const DATE_TIME_FORMATS_WITH_OFFSET: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Combined date-time formats without an offset, resolved against the
/// row's timezone
pub const DATE_TIME_FORMATS_NAIVE: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only formats tried in order when no explicit format string is
/// configured
pub const DATE_ONLY_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Time-of-day formats tried in order when no explicit format string is
/// configured
pub const TIME_ONLY_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];
