//! Tests for leaf field parsers, timezone resolution, and qualifiers

use super::super::field_parsers::{
    parse_date_only, parse_grade, parse_instant, parse_time_only, parse_value,
};
use super::super::qualifiers::parse_qualifiers;
use super::super::timezone::{instant_from_naive, resolve_zone};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;

#[test]
fn test_parse_instant_rfc3339() {
    let instant = parse_instant("2020-06-01T12:30:00Z", None, Tz::UTC).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2020, 6, 1, 12, 30, 0).unwrap());

    let offset = parse_instant("2020-06-01T12:30:00+02:00", None, Tz::UTC).unwrap();
    assert_eq!(offset, Utc.with_ymd_and_hms(2020, 6, 1, 10, 30, 0).unwrap());
}

#[test]
fn test_parse_instant_naive_resolved_against_zone() {
    let zone: Tz = "America/New_York".parse().unwrap();

    // January 15th is EST, UTC-5
    let instant = parse_instant("2020-01-15 00:00:00", None, zone).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2020, 1, 15, 5, 0, 0).unwrap());
}

#[test]
fn test_parse_instant_with_explicit_format() {
    let instant = parse_instant("15.01.2020 06:00", Some("%d.%m.%Y %H:%M"), Tz::UTC).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2020, 1, 15, 6, 0, 0).unwrap());

    // The explicit format is authoritative; fallback formats do not apply
    assert!(parse_instant("2020-01-15T06:00:00Z", Some("%d.%m.%Y %H:%M"), Tz::UTC).is_none());
}

#[test]
fn test_parse_instant_rejects_garbage() {
    assert!(parse_instant("not a timestamp", None, Tz::UTC).is_none());
}

#[test]
fn test_parse_date_only_formats() {
    let expected = NaiveDate::from_ymd_opt(2020, 3, 14).unwrap();

    assert_eq!(parse_date_only("2020-03-14", None), Some(expected));
    assert_eq!(parse_date_only("2020/03/14", None), Some(expected));
    assert_eq!(parse_date_only("03/14/2020", None), Some(expected));
    assert_eq!(
        parse_date_only("14.03.2020", Some("%d.%m.%Y")),
        Some(expected)
    );

    assert_eq!(parse_date_only("Gap", None), None);
}

#[test]
fn test_parse_time_only_formats() {
    assert_eq!(
        parse_time_only("06:30:15", None),
        NaiveTime::from_hms_opt(6, 30, 15)
    );
    assert_eq!(
        parse_time_only("06:30", None),
        NaiveTime::from_hms_opt(6, 30, 0)
    );
    assert_eq!(
        parse_time_only("6:30 PM", None),
        NaiveTime::from_hms_opt(18, 30, 0)
    );

    assert_eq!(parse_time_only("nope", None), None);
}

#[test]
fn test_lenient_numeric_parsers() {
    assert_eq!(parse_value("1.5"), Some(1.5));
    assert_eq!(parse_value("-9999"), Some(-9999.0));
    assert_eq!(parse_value("abc"), None);

    assert_eq!(parse_grade(" 12"), None); // grades arrive pre-trimmed
    assert_eq!(parse_grade("12"), Some(12));
    assert_eq!(parse_grade("3.5"), None);
}

#[test]
fn test_resolve_zone_with_aliases() {
    let mut aliases = HashMap::new();
    aliases.insert("EST".to_string(), "America/New_York".to_string());

    let expected: Tz = "America/New_York".parse().unwrap();

    assert_eq!(resolve_zone("EST", &aliases), Some(expected));
    assert_eq!(resolve_zone("America/New_York", &aliases), Some(expected));
    assert_eq!(resolve_zone("Not/A_Zone", &aliases), None);
}

#[test]
fn test_instant_from_naive_handles_dst_edges() {
    let zone: Tz = "America/New_York".parse().unwrap();

    // Ambiguous autumn fold takes the earlier mapping (EDT, UTC-4)
    let folded = NaiveDate::from_ymd_opt(2020, 11, 1)
        .unwrap()
        .and_hms_opt(1, 30, 0)
        .unwrap();
    assert_eq!(
        instant_from_naive(folded, zone),
        Some(Utc.with_ymd_and_hms(2020, 11, 1, 5, 30, 0).unwrap())
    );

    // Spring-forward gap is shifted ahead one hour
    let gapped = NaiveDate::from_ymd_opt(2020, 3, 8)
        .unwrap()
        .and_hms_opt(2, 30, 0)
        .unwrap();
    assert_eq!(
        instant_from_naive(gapped, zone),
        Some(Utc.with_ymd_and_hms(2020, 3, 8, 7, 30, 0).unwrap())
    );
}

#[test]
fn test_parse_qualifiers() {
    assert_eq!(parse_qualifiers("a,b"), vec!["a", "b"]);
    assert_eq!(parse_qualifiers("a; b ,c"), vec!["a", "b", "c"]);
    assert_eq!(parse_qualifiers("solo"), vec!["solo"]);
    assert!(parse_qualifiers(",;,").is_empty());
}
