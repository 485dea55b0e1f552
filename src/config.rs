//! Configuration management and validation.
//!
//! Provides the full knob surface for one import invocation: source list,
//! delimited-text shape, header handling, field mapping, timestamp formats,
//! timezone handling, and normalization flags.

use crate::app::services::point_reader::field_map::FieldMap;
use crate::constants::{DEFAULT_DELIMITER, DEFAULT_TIMEZONE};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration for one import invocation
///
/// All entities built from this configuration live for the duration of a
/// single pipeline run and are discarded once the normalized points and
/// notes are returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Source paths or absolute URIs, processed strictly in order
    pub sources: Vec<String>,

    /// Field delimiter for delimited-text sources (single byte)
    pub delimiter: String,

    /// Comment marker; rows whose first column starts with it are skipped
    pub comment_token: Option<String>,

    /// Whether the source carries a header row
    pub has_header_row: bool,

    /// Expected header-prefix labels used to anchor the header row; empty
    /// means no anchoring
    pub header_starts_with: Vec<String>,

    /// Rows to discard before header handling begins
    pub skip_rows: usize,

    /// Rows to discard after the header row (delimited-text sources only)
    pub skip_rows_after_header: usize,

    /// Sentinel text meaning "no numeric value here"; compared exactly,
    /// never parsed
    pub nan_value: Option<String>,

    /// Remove exact-duplicate timestamps after decoding each source
    pub remove_duplicate_points: bool,

    /// Realign each source's batch so its first timestamp equals `start_time`
    pub realign: bool,

    /// Series start time used by realignment
    pub start_time: Option<DateTime<Utc>>,

    /// Drop undecodable rows instead of aborting the import
    pub ignore_invalid_rows: bool,

    /// Explicit format string for combined date-time columns
    pub date_time_format: Option<String>,

    /// Explicit format string for date-only columns
    pub date_only_format: Option<String>,

    /// Explicit format string for time-only columns
    pub time_only_format: Option<String>,

    /// Alias text to canonical timezone identifier, consulted before parsing
    pub timezone_aliases: HashMap<String, String>,

    /// Timezone applied when no timezone column resolves for a row
    pub default_timezone: String,

    /// 1-based worksheet number for spreadsheet sources
    pub sheet_number: Option<usize>,

    /// Worksheet name for spreadsheet sources (case-insensitive)
    pub sheet_name: Option<String>,

    /// External notes file; when set, inline note collection is disabled
    pub notes_file: Option<PathBuf>,

    /// Column declarations for each point attribute
    pub fields: FieldMap,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            comment_token: None,
            has_header_row: true,
            header_starts_with: Vec::new(),
            skip_rows: 0,
            skip_rows_after_header: 0,
            nan_value: None,
            remove_duplicate_points: false,
            realign: false,
            start_time: None,
            ignore_invalid_rows: false,
            date_time_format: None,
            date_only_format: None,
            time_only_format: None,
            timezone_aliases: HashMap::new(),
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            sheet_number: None,
            sheet_name: None,
            notes_file: None,
            fields: FieldMap::default(),
        }
    }
}

impl ImportConfig {
    /// Set the source list
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the comment marker
    pub fn with_comment_token(mut self, token: impl Into<String>) -> Self {
        self.comment_token = Some(token.into());
        self
    }

    /// Set the field map
    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }

    /// Set the header anchoring prefixes
    pub fn with_header_starts_with(mut self, prefixes: Vec<String>) -> Self {
        self.header_starts_with = prefixes;
        self
    }

    /// Set the pre-header skip-row budget
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    /// Set the after-header skip-row budget
    pub fn with_skip_rows_after_header(mut self, skip_rows: usize) -> Self {
        self.skip_rows_after_header = skip_rows;
        self
    }

    /// Set the NaN sentinel text
    pub fn with_nan_value(mut self, nan_value: impl Into<String>) -> Self {
        self.nan_value = Some(nan_value.into());
        self
    }

    /// Enable duplicate-point removal
    pub fn with_remove_duplicate_points(mut self) -> Self {
        self.remove_duplicate_points = true;
        self
    }

    /// Enable realignment to the given series start time
    pub fn with_realign(mut self, start_time: DateTime<Utc>) -> Self {
        self.realign = true;
        self.start_time = Some(start_time);
        self
    }

    /// Drop undecodable rows instead of aborting
    pub fn with_ignore_invalid_rows(mut self) -> Self {
        self.ignore_invalid_rows = true;
        self
    }

    /// Declare that sources carry no header row
    pub fn without_header_row(mut self) -> Self {
        self.has_header_row = false;
        self
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        self.default_zone()?;

        if self.fields.value.is_none() {
            return Err(Error::configuration(
                "A value column must be configured".to_string(),
            ));
        }

        match (&self.fields.date_time, &self.fields.date_only) {
            (Some(_), Some(_)) => {
                return Err(Error::configuration(
                    "Combined date-time and date-only columns are mutually exclusive".to_string(),
                ));
            }
            (None, None) => {
                return Err(Error::configuration(
                    "Either a date-time column or a date-only column must be configured"
                        .to_string(),
                ));
            }
            _ => {}
        }

        if self.fields.time_only.is_some() && self.fields.date_only.is_none() {
            return Err(Error::configuration(
                "A time-only column requires a date-only column".to_string(),
            ));
        }

        if self.realign && self.start_time.is_none() {
            return Err(Error::configuration(
                "Realignment requires a start time".to_string(),
            ));
        }

        if self.sheet_number == Some(0) {
            return Err(Error::configuration(
                "Worksheet numbers are 1-based; 0 is not a valid sheet".to_string(),
            ));
        }

        if !self.has_header_row {
            if self.fields.has_named_fields() {
                return Err(Error::configuration(
                    "Fields declared by header label require a header row".to_string(),
                ));
            }

            if !self.header_starts_with.is_empty() {
                return Err(Error::configuration(
                    "Header anchoring requires a header row".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Delimiter as a single byte for the delimited-text reader
    pub fn delimiter_byte(&self) -> Result<u8> {
        let bytes = self.delimiter.as_bytes();

        if bytes.len() != 1 {
            return Err(Error::configuration(format!(
                "Delimiter must be a single byte, got '{}'",
                self.delimiter
            )));
        }

        Ok(bytes[0])
    }

    /// Parsed default timezone
    pub fn default_zone(&self) -> Result<Tz> {
        self.default_timezone.parse::<Tz>().map_err(|_| {
            Error::configuration(format!(
                "Unknown default timezone '{}'",
                self.default_timezone
            ))
        })
    }

    /// Start time for realignment; only meaningful when `realign` is set
    pub fn realign_start(&self) -> Option<DateTime<Utc>> {
        if self.realign { self.start_time } else { None }
    }
}
