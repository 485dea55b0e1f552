//! Timezone resolution for decoded rows
//!
//! Row timezone text passes through the alias table before a named-zone
//! parse; failures leave the zone unset so instant construction falls back
//! to the configured default zone.

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;

/// Resolve timezone column text into a named zone.
///
/// The alias table is consulted first; absent entries fall through to a
/// direct parse of the text as a timezone identifier.
pub fn resolve_zone(text: &str, aliases: &HashMap<String, String>) -> Option<Tz> {
    let name = aliases.get(text).map(String::as_str).unwrap_or(text);
    name.parse::<Tz>().ok()
}

/// Convert a zone-less local date-time into an instant, leniently.
///
/// Ambiguous local times (autumn fold) take the earlier mapping; local
/// times inside a spring-forward gap are shifted ahead one hour.
pub fn instant_from_naive(naive: NaiveDateTime, zone: Tz) -> Option<DateTime<Utc>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => zone
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|instant| instant.with_timezone(&Utc)),
    }
}
