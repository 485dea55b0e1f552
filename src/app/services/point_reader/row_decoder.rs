//! Per-row decoding into candidate points
//!
//! This module converts one row's field values into a candidate [`Point`]
//! or rejects it. Two variants share the same fixed decode order: string
//! fields from delimited text, and already-typed cells from a workbook.
//!
//! Decoding never panics on recoverable bad data. Rejection is signalled
//! through [`RowOutcome`] and the adapters apply the ignore-invalid-rows
//! policy.

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use csv::StringRecord;

use super::field_map::ResolvedFieldMap;
use super::field_parsers::{
    parse_date_only, parse_grade, parse_instant, parse_time_only, parse_value,
};
use super::notes::NotesCollector;
use super::qualifiers::parse_qualifiers;
use super::timezone::{instant_from_naive, resolve_zone};
use crate::app::models::{Point, PointType};
use crate::config::ImportConfig;

/// Result of decoding one row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Row decoded into a candidate point
    Point(Point),

    /// Comment row, silently skipped (not a rejection)
    Comment,

    /// Row carried neither a recognized point type nor a timestamp
    Rejected,
}

/// Decodes rows of one source into candidate points
///
/// Holds the resolved column indices and the default zone for the source;
/// the decoder itself is stateless across rows, so notes flow through an
/// explicit collector.
#[derive(Debug)]
pub struct RowDecoder<'a> {
    config: &'a ImportConfig,
    fields: ResolvedFieldMap,
    default_zone: Tz,
}

impl<'a> RowDecoder<'a> {
    /// Create a decoder for one source's resolved field map
    pub fn new(config: &'a ImportConfig, fields: ResolvedFieldMap, default_zone: Tz) -> Self {
        Self {
            config,
            fields,
            default_zone,
        }
    }

    /// Decode one delimited-text row
    pub fn decode_text_row(&self, row: &StringRecord, notes: &mut NotesCollector) -> RowOutcome {
        if self.is_comment_row(row.get(0)) {
            return RowOutcome::Comment;
        }

        let zone = self
            .text_field(row, self.fields.timezone)
            .and_then(|text| resolve_zone(text, &self.config.timezone_aliases))
            .unwrap_or(self.default_zone);

        let mut point_type = None;
        let mut time = None;

        if self.fields.date_only.is_some() {
            let mut date = None;

            if let Some(text) = self.text_field(row, self.fields.date_only) {
                if let Some(matched) = PointType::from_token(text) {
                    point_type = Some(matched);
                } else {
                    date = parse_date_only(text, self.config.date_only_format.as_deref());
                }
            }

            let time_of_day = self
                .text_field(row, self.fields.time_only)
                .and_then(|text| parse_time_only(text, self.config.time_only_format.as_deref()))
                .unwrap_or(NaiveTime::MIN);

            if let Some(date) = date {
                time = instant_from_naive(date.and_time(time_of_day), zone);
            }
        } else if let Some(text) = self.text_field(row, self.fields.date_time) {
            if let Some(matched) = PointType::from_token(text) {
                point_type = Some(matched);
            } else {
                time = parse_instant(text, self.config.date_time_format.as_deref(), zone);
            }
        }

        let mut value = None;

        if let Some(text) = self.text_field(row, self.fields.value) {
            if let Some(matched) = PointType::from_token(text) {
                point_type = Some(matched);
            } else if self.config.nan_value.as_deref() == Some(text) {
                // Sentinel match: the value stays unset, never parsed
            } else {
                value = parse_value(text);
            }
        }

        let grade_code = self
            .text_field(row, self.fields.grade)
            .and_then(parse_grade);

        let qualifiers = self
            .text_field(row, self.fields.qualifiers)
            .map(parse_qualifiers)
            .filter(|tokens| !tokens.is_empty());

        let note_text = self.text_field(row, self.fields.notes);

        self.finish(point_type, time, value, grade_code, qualifiers, note_text, notes)
    }

    /// Decode one workbook row of already-typed cells
    pub fn decode_cell_row(&self, cells: &[Data], notes: &mut NotesCollector) -> RowOutcome {
        if let Some(Data::String(first)) = cells.first() {
            if self.is_comment_row(Some(first)) {
                return RowOutcome::Comment;
            }
        }

        let zone = self
            .cell_text(cells, self.fields.timezone)
            .and_then(|text| resolve_zone(text, &self.config.timezone_aliases))
            .unwrap_or(self.default_zone);

        let mut point_type = None;
        let mut time = None;

        if self.fields.date_only.is_some() {
            let mut date = None;

            if let Some(cell) = self.cell(cells, self.fields.date_only) {
                match cell {
                    Data::String(text) => {
                        let text = text.trim();
                        if let Some(matched) = PointType::from_token(text) {
                            point_type = Some(matched);
                        } else {
                            date = parse_date_only(text, self.config.date_only_format.as_deref());
                        }
                    }
                    _ => date = cell_datetime(cell).map(|naive| naive.date()),
                }
            }

            let time_of_day = self
                .cell(cells, self.fields.time_only)
                .and_then(|cell| match cell {
                    Data::String(text) => {
                        parse_time_only(text.trim(), self.config.time_only_format.as_deref())
                    }
                    _ => cell_datetime(cell).map(|naive| naive.time()),
                })
                .unwrap_or(NaiveTime::MIN);

            if let Some(date) = date {
                time = instant_from_naive(date.and_time(time_of_day), zone);
            }
        } else if let Some(cell) = self.cell(cells, self.fields.date_time) {
            match cell {
                Data::String(text) => {
                    let text = text.trim();
                    if let Some(matched) = PointType::from_token(text) {
                        point_type = Some(matched);
                    } else {
                        time = parse_instant(text, self.config.date_time_format.as_deref(), zone);
                    }
                }
                _ => {
                    time = cell_datetime(cell).and_then(|naive| instant_from_naive(naive, zone));
                }
            }
        }

        let mut value = None;

        if let Some(cell) = self.cell(cells, self.fields.value) {
            // The sentinel may arrive as a pure string like "NA" or as a
            // typed number like -9999.0, so compare its string conversion.
            let is_sentinel = self
                .config
                .nan_value
                .as_deref()
                .is_some_and(|sentinel| cell_to_string(cell) == sentinel);

            if !is_sentinel {
                value = cell_number(cell);
            }
        }

        let grade_code = self
            .cell(cells, self.fields.grade)
            .and_then(|cell| match cell {
                Data::Float(number) => Some(*number as i32),
                Data::Int(number) => Some(*number as i32),
                _ => None,
            });

        let qualifiers = self
            .cell_text(cells, self.fields.qualifiers)
            .map(parse_qualifiers)
            .filter(|tokens| !tokens.is_empty());

        let note_text = self.cell_text(cells, self.fields.notes);

        self.finish(point_type, time, value, grade_code, qualifiers, note_text, notes)
    }

    /// Shared decode tail: acceptance rule, type clearing, note emission
    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        point_type: Option<PointType>,
        time: Option<chrono::DateTime<Utc>>,
        value: Option<f64>,
        grade_code: Option<i32>,
        qualifiers: Option<Vec<String>>,
        note_text: Option<&str>,
        notes: &mut NotesCollector,
    ) -> RowOutcome {
        if matches!(point_type, None | Some(PointType::Unknown)) && time.is_none() {
            return RowOutcome::Rejected;
        }

        // Only Gap is a meaningful carried type
        let point_type = point_type.filter(|matched| *matched == PointType::Gap);

        if self.config.notes_file.is_none() {
            if let (Some(time), Some(text)) = (time, note_text) {
                notes.add(time, text);
            }
        }

        RowOutcome::Point(Point {
            point_type,
            time,
            value,
            grade_code,
            qualifiers,
        })
    }

    fn is_comment_row(&self, first_field: Option<&str>) -> bool {
        match (&self.config.comment_token, first_field) {
            (Some(token), Some(field)) if !token.is_empty() => {
                field.trim_start().starts_with(token)
            }
            _ => false,
        }
    }

    /// Non-empty trimmed text of a 1-based column, if configured and present
    fn text_field<'r>(&self, row: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
        let index = index?;
        row.get(index - 1)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Non-empty cell of a 1-based column, if configured and present
    fn cell<'r>(&self, cells: &'r [Data], index: Option<usize>) -> Option<&'r Data> {
        let index = index?;
        cells.get(index - 1).filter(|cell| !matches!(cell, Data::Empty))
    }

    /// Non-empty string content of a 1-based column's cell
    fn cell_text<'r>(&self, cells: &'r [Data], index: Option<usize>) -> Option<&'r str> {
        match self.cell(cells, index)? {
            Data::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }
}

/// Interpret a typed cell as a local date-time
fn cell_datetime(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(excel) => excel.as_datetime(),
        Data::DateTimeIso(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            }),
        _ => None,
    }
}

/// Interpret a typed cell as a numeric value
fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(number) => Some(*number),
        Data::Int(number) => Some(*number as f64),
        _ => None,
    }
}

/// String conversion of a typed cell, used for sentinel comparison and for
/// raw-field error reporting
pub(crate) fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(number) => format!("{}", number),
        Data::Int(number) => number.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(excel) => format!("{}", excel.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Error(error) => format!("{:?}", error),
    }
}
