//! End-to-end integration tests for the point ingestion pipeline
//!
//! Exercises the full path from source dispatch through per-row decoding to
//! batch normalization, against real files on disk.

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use pointload::app::services::point_reader::{FieldMap, FieldSpec, PointReader};
use pointload::{Error, ImportConfig, PointType};

fn write_source(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("failed to write test source");
    path.to_string_lossy().into_owned()
}

fn labeled_fields() -> FieldMap {
    FieldMap {
        date_time: Some(FieldSpec::Name("Timestamp".to_string())),
        value: Some(FieldSpec::Name("Value".to_string())),
        ..FieldMap::default()
    }
}

#[test]
fn test_full_pipeline_with_dedup() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "series.csv",
        "Timestamp,Value\n\
         2020-01-01T00:00:00Z,1.0\n\
         2020-01-01T00:00:00Z,2.0\n\
         2020-01-01T01:00:00Z,3.0\n",
    );

    let config = ImportConfig::default()
        .with_sources(vec![source])
        .with_fields(labeled_fields())
        .with_remove_duplicate_points();

    let result = PointReader::new(&config).unwrap().load_points().unwrap();

    assert_eq!(result.points.len(), 2);
    assert_eq!(result.points[0].value, Some(1.0));
    assert_eq!(result.points[1].value, Some(3.0));
    assert_eq!(result.stats.total_rows, 3);
    assert_eq!(result.stats.points_decoded, 3);
    assert_eq!(result.stats.duplicates_removed, 1);
}

#[test]
fn test_missing_file_is_fatal() {
    let config = ImportConfig::default()
        .with_sources(vec!["/nonexistent/series.csv".to_string()])
        .with_fields(labeled_fields());

    let error = PointReader::new(&config).unwrap().load_points().unwrap_err();

    assert!(error.is_user_facing());
    match error {
        Error::FileNotFound { path } => assert_eq!(path, "/nonexistent/series.csv"),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_invalid_configuration_is_rejected_up_front() {
    let config = ImportConfig::default().with_sources(vec!["series.csv".to_string()]);

    match PointReader::new(&config) {
        Err(Error::Configuration { .. }) => {}
        other => panic!("expected Configuration error, got {:?}", other.err()),
    }
}

#[test]
fn test_sources_are_concatenated_in_list_order() {
    let dir = TempDir::new().unwrap();
    let late = write_source(
        &dir,
        "late.csv",
        "Timestamp,Value\n2020-06-01T00:00:00Z,10.0\n",
    );
    let early = write_source(
        &dir,
        "early.csv",
        "Timestamp,Value\n2020-01-01T00:00:00Z,1.0\n",
    );

    let config = ImportConfig::default()
        .with_sources(vec![late, early])
        .with_fields(labeled_fields());

    let result = PointReader::new(&config).unwrap().load_points().unwrap();

    // Source-list order wins over timestamp order across batches
    assert_eq!(result.points.len(), 2);
    assert_eq!(result.points[0].value, Some(10.0));
    assert_eq!(result.points[1].value, Some(1.0));
}

#[test]
fn test_realignment_end_to_end() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "series.csv",
        "Timestamp,Value\n\
         2020-01-01T05:00:00Z,1.0\n\
         2020-01-01T07:00:00Z,2.0\n",
    );

    let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let config = ImportConfig::default()
        .with_sources(vec![source])
        .with_fields(labeled_fields())
        .with_realign(start);

    let result = PointReader::new(&config).unwrap().load_points().unwrap();

    assert_eq!(result.points[0].time, Some(start));
    assert_eq!(
        result.points[1].time,
        Some(Utc.with_ymd_and_hms(2020, 1, 1, 2, 0, 0).unwrap())
    );
}

#[test]
fn test_gap_markers_disable_normalization() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "series.csv",
        "Timestamp,Value\n\
         2020-01-01T02:00:00Z,2.0\n\
         Gap,\n\
         2020-01-01T01:00:00Z,1.0\n\
         2020-01-01T01:00:00Z,1.5\n",
    );

    let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let config = ImportConfig::default()
        .with_sources(vec![source])
        .with_fields(labeled_fields())
        .with_remove_duplicate_points()
        .with_realign(start);

    let result = PointReader::new(&config).unwrap().load_points().unwrap();

    // The batch is left exactly as decoded
    assert_eq!(result.points.len(), 4);
    assert_eq!(result.points[0].value, Some(2.0));
    assert_eq!(result.points[1].point_type, Some(PointType::Gap));
    assert_eq!(result.points[2].value, Some(1.0));
    assert_eq!(result.points[3].value, Some(1.5));
    assert_eq!(result.stats.duplicates_removed, 0);
}

#[test]
fn test_inline_notes_are_returned_with_points() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "series.csv",
        "Timestamp,Value,Notes\n\
         2020-01-01T00:00:00Z,1.0,calibrated\n\
         2020-01-01T01:00:00Z,2.0,\n",
    );

    let mut fields = labeled_fields();
    fields.notes = Some(FieldSpec::Name("Notes".to_string()));

    let config = ImportConfig::default()
        .with_sources(vec![source.clone()])
        .with_fields(fields.clone());

    let result = PointReader::new(&config).unwrap().load_points().unwrap();

    assert_eq!(result.points.len(), 2);
    assert_eq!(result.notes.len(), 1);
    assert_eq!(result.notes[0].text, "calibrated");

    // An external notes file turns inline collection off
    let mut config = ImportConfig::default()
        .with_sources(vec![source])
        .with_fields(fields);
    config.notes_file = Some("external-notes.csv".into());

    let result = PointReader::new(&config).unwrap().load_points().unwrap();
    assert!(result.notes.is_empty());
}

#[test]
fn test_ignore_invalid_rows_accounting() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "series.csv",
        "Timestamp,Value\n\
         2020-01-01T00:00:00Z,1.0\n\
         bad row,2.0\n\
         2020-01-01T02:00:00Z,3.0\n",
    );

    let config = ImportConfig::default()
        .with_sources(vec![source])
        .with_fields(labeled_fields())
        .with_ignore_invalid_rows();

    let result = PointReader::new(&config).unwrap().load_points().unwrap();

    assert_eq!(result.points.len(), 2);
    assert_eq!(result.stats.rows_rejected, 1);
    assert_eq!(result.stats.errors.len(), 1);
}

#[test]
fn test_mislabeled_workbook_falls_back_to_delimited_text() {
    let dir = TempDir::new().unwrap();
    // An .xlsx extension, but the content is delimited text
    let source = write_source(
        &dir,
        "export.xlsx",
        "Timestamp,Value\n2020-01-01T00:00:00Z,4.5\n",
    );

    let config = ImportConfig::default()
        .with_sources(vec![source])
        .with_fields(labeled_fields());

    let result = PointReader::new(&config).unwrap().load_points().unwrap();

    assert_eq!(result.points.len(), 1);
    assert_eq!(result.points[0].value, Some(4.5));
}

#[test]
fn test_empty_source_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let empty = write_source(&dir, "empty.csv", "");
    let full = write_source(
        &dir,
        "full.csv",
        "Timestamp,Value\n2020-01-01T00:00:00Z,1.0\n",
    );

    let config = ImportConfig::default()
        .with_sources(vec![empty, full])
        .with_fields(labeled_fields());

    let result = PointReader::new(&config).unwrap().load_points().unwrap();

    assert_eq!(result.points.len(), 1);
}

#[test]
fn test_header_anchoring_end_to_end() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "export.csv",
        "Station 42 export\n\
         generated nightly\n\
         Date,Value,Notes\n\
         2020-01-01T00:00:00Z,1.0,\n\
         2020-01-01T01:00:00Z,2.0,\n",
    );

    let mut config = ImportConfig::default()
        .with_sources(vec![source])
        .with_header_starts_with(vec!["Date".to_string(), "Value".to_string()]);
    config.fields = FieldMap {
        date_time: Some(FieldSpec::Name("Date".to_string())),
        value: Some(FieldSpec::Name("Value".to_string())),
        ..FieldMap::default()
    };

    let result = PointReader::new(&config).unwrap().load_points().unwrap();

    assert_eq!(result.points.len(), 2);
    assert_eq!(result.stats.total_rows, 2);
    assert_eq!(result.points[0].value, Some(1.0));
}
