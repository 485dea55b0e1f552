//! Tests for the spreadsheet workbook adapter

use std::io::Write;

use super::super::excel::{WorkbookProbe, cell_strings, probe_workbook, select_sheet_name};
use crate::Error;
use calamine::Data;

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_select_sheet_by_number() {
    let sheets = names(&["Overview", "Data", "Charts"]);

    assert_eq!(
        select_sheet_name(&sheets, Some(2), None).unwrap(),
        "Data"
    );

    let error = select_sheet_name(&sheets, Some(7), None).unwrap_err();
    match error {
        Error::SheetNotFound { sheet } => assert_eq!(sheet, "number 7"),
        other => panic!("expected SheetNotFound, got {:?}", other),
    }
}

#[test]
fn test_select_sheet_by_name_case_insensitive() {
    let sheets = names(&["Overview", "Data"]);

    assert_eq!(
        select_sheet_name(&sheets, None, Some("data")).unwrap(),
        "Data"
    );

    let error = select_sheet_name(&sheets, None, Some("Missing")).unwrap_err();
    match error {
        Error::SheetNotFound { sheet } => assert_eq!(sheet, "'Missing'"),
        other => panic!("expected SheetNotFound, got {:?}", other),
    }
}

#[test]
fn test_select_defaults_to_first_sheet() {
    let sheets = names(&["Only"]);
    assert_eq!(select_sheet_name(&sheets, None, None).unwrap(), "Only");

    assert!(select_sheet_name(&[], None, None).is_err());
}

#[test]
fn test_probe_rejects_plain_text_files() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "2020-01-01T00:00:00Z,1.0").unwrap();

    match probe_workbook(file.path()) {
        WorkbookProbe::NotASpreadsheet => {}
        WorkbookProbe::Workbook(_) => panic!("a CSV file probed as a workbook"),
    }
}

#[test]
fn test_probe_rejects_mislabeled_workbooks() {
    // Correct extension, but the content is not a workbook
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    writeln!(file, "2020-01-01T00:00:00Z,1.0").unwrap();

    match probe_workbook(file.path()) {
        WorkbookProbe::NotASpreadsheet => {}
        WorkbookProbe::Workbook(_) => panic!("plain text probed as a workbook"),
    }
}

#[test]
fn test_cell_strings_conversion() {
    let cells = vec![
        Data::String(" Date ".to_string()),
        Data::Float(-9999.0),
        Data::Int(3),
        Data::Bool(true),
        Data::Empty,
    ];

    assert_eq!(
        cell_strings(&cells),
        vec!["Date", "-9999", "3", "true", ""]
    );
}
