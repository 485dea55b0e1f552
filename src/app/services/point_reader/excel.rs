//! Spreadsheet workbook source adapter
//!
//! Selects exactly one worksheet (by 1-based number, case-insensitive name,
//! or first-by-default), locates the header in a pre-pass over the raw cell
//! rows, then decodes the remaining rows through the typed-cell variant of
//! the row decoder.
//!
//! A structurally invalid workbook is not an error here: probing reports a
//! typed `NotASpreadsheet` result and the caller falls back to the
//! delimited-text adapter.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use tracing::{debug, warn};

use super::header::is_header_row_matched;
use super::notes::NotesCollector;
use super::row_decoder::{RowDecoder, RowOutcome, cell_to_string};
use super::stats::LoadStats;
use crate::app::models::Point;
use crate::config::ImportConfig;
use crate::{Error, Result};
use chrono_tz::Tz;

/// Outcome of probing a local file as a spreadsheet workbook
pub enum WorkbookProbe {
    /// The file opened as a workbook
    Workbook(Box<Sheets<BufReader<File>>>),

    /// The file is not a spreadsheet; fall back to delimited text
    NotASpreadsheet,
}

/// Probe a local file as a spreadsheet workbook
pub fn probe_workbook(path: &Path) -> WorkbookProbe {
    match open_workbook_auto(path) {
        Ok(workbook) => WorkbookProbe::Workbook(Box::new(workbook)),
        Err(error) => {
            debug!("'{}' is not a spreadsheet: {}", path.display(), error);
            WorkbookProbe::NotASpreadsheet
        }
    }
}

/// Select the worksheet to extract.
///
/// An explicit 1-based sheet number wins over a sheet name; with neither
/// configured the first sheet is used. Fails naming the request when
/// selection yields nothing.
pub fn select_sheet_name(
    sheet_names: &[String],
    sheet_number: Option<usize>,
    sheet_name: Option<&str>,
) -> Result<String> {
    if let Some(number) = sheet_number {
        return sheet_names
            .get(number - 1)
            .cloned()
            .ok_or_else(|| Error::sheet_not_found(format!("number {}", number)));
    }

    if let Some(name) = sheet_name {
        return sheet_names
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| Error::sheet_not_found(format!("'{}'", name)));
    }

    sheet_names
        .first()
        .cloned()
        .ok_or_else(|| Error::sheet_not_found("number 1".to_string()))
}

/// Decode one workbook into points
pub fn load_points(
    config: &ImportConfig,
    source_name: &str,
    workbook: &mut Sheets<BufReader<File>>,
    default_zone: Tz,
    notes: &mut NotesCollector,
    stats: &mut LoadStats,
) -> Result<Vec<Point>> {
    let sheet_names = workbook.sheet_names();
    let sheet = select_sheet_name(&sheet_names, config.sheet_number, config.sheet_name.as_deref())?;

    let range = workbook.worksheet_range(&sheet).map_err(|error| {
        Error::workbook(source_name, format!("worksheet '{}': {}", sheet, error))
    })?;

    let mut rows = range.rows();
    let mut row_number: u64 = 0;

    // Pre-pass: consume the skip budget before header handling begins
    for _ in 0..config.skip_rows {
        if rows.next().is_none() {
            return Ok(Vec::new());
        }
        row_number += 1;
    }

    let decoder = if config.has_header_row {
        let anchoring = &config.header_starts_with;
        let mut header_cells: Option<&[Data]> = None;

        if anchoring.is_empty() {
            if let Some(row) = rows.next() {
                row_number += 1;
                header_cells = Some(row);
            }
        } else {
            while let Some(row) = rows.next() {
                row_number += 1;
                if is_header_row_matched(&cell_strings(row), anchoring) {
                    header_cells = Some(row);
                    break;
                }
            }
        }

        let Some(header) = header_cells else {
            warn!("No header row found in '{}'", source_name);
            return Ok(Vec::new());
        };

        let header_fields = cell_strings(header);
        RowDecoder::new(config, config.fields.resolve(&header_fields)?, default_zone)
    } else {
        RowDecoder::new(config, config.fields.resolve_unlabeled()?, default_zone)
    };

    let mut points = Vec::new();

    for row in rows {
        row_number += 1;

        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        match decoder.decode_cell_row(row, notes) {
            RowOutcome::Point(point) => {
                stats.total_rows += 1;
                stats.points_decoded += 1;
                points.push(point);
            }
            RowOutcome::Comment => {}
            RowOutcome::Rejected => {
                stats.total_rows += 1;

                let fields = cell_strings(row).join(", ");

                if !config.ignore_invalid_rows {
                    return Err(Error::row_parse(source_name, row_number, fields));
                }

                stats.rows_rejected += 1;
                stats
                    .errors
                    .push(format!("{} ({}): {}", source_name, row_number, fields));
                debug!("Skipped undecodable row {} of '{}'", row_number, source_name);
            }
        }
    }

    Ok(points)
}

/// String conversion of a cell row, for header matching and error reporting
pub(crate) fn cell_strings(cells: &[Data]) -> Vec<String> {
    cells.iter().map(cell_to_string).collect()
}
