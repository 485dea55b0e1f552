//! Command-line argument definitions for pointload
//!
//! This module defines the CLI interface using the clap derive API. The
//! import subcommand exposes the full configuration surface; a TOML
//! configuration file supplies defaults that individual flags override.

use crate::app::services::point_reader::field_map::{FieldMap, FieldSpec};
use crate::app::services::point_reader::header::parse_header_prefixes;
use crate::config::ImportConfig;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the pointload ingester
///
/// Ingests time-stamped observations from delimited text, spreadsheet
/// workbooks, and remote URLs into a uniform time-series point stream.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pointload",
    version,
    about = "Ingest time-stamped observations from tabular sources into a uniform point stream",
    long_about = "Reads delimited-text files, spreadsheet workbooks, and remote URLs under a \
                  configurable column-mapping scheme, decodes each row leniently into a \
                  time-series point, and normalizes the result (duplicate removal, \
                  time realignment) for downstream appending."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for pointload
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Ingest one or more tabular sources into a point stream
    Import(ImportArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Source files or absolute URLs to ingest, in order
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<String>,

    /// Path to configuration file (TOML format)
    ///
    /// Individual flags override values loaded from the file.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Field delimiter for delimited-text sources
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Comment marker; rows starting with it are skipped
    #[arg(long = "comment", value_name = "TOKEN")]
    pub comment_token: Option<String>,

    /// Treat sources as headerless (all fields declared by column index)
    #[arg(long = "no-header")]
    pub no_header: bool,

    /// Anchor the header row by its leading labels (comma-separated)
    ///
    /// Rows are discarded until one matches these labels positionally,
    /// case-insensitively.
    #[arg(long = "header-starts-with", value_name = "LABELS")]
    pub header_starts_with: Option<String>,

    /// Rows to discard before header handling begins
    #[arg(long = "skip-rows", value_name = "COUNT")]
    pub skip_rows: Option<usize>,

    /// Rows to discard after the header row (delimited text only)
    #[arg(long = "skip-rows-after-header", value_name = "COUNT")]
    pub skip_rows_after_header: Option<usize>,

    /// Sentinel text meaning "no numeric value here"
    #[arg(long = "nan-value", value_name = "TEXT")]
    pub nan_value: Option<String>,

    /// Remove exact-duplicate timestamps after decoding each source
    #[arg(long = "remove-duplicates")]
    pub remove_duplicates: bool,

    /// Realign each source so its first timestamp equals --start-time
    #[arg(long = "realign", requires = "start_time")]
    pub realign: bool,

    /// Series start time used by realignment (RFC 3339)
    #[arg(long = "start-time", value_name = "TIMESTAMP")]
    pub start_time: Option<DateTime<Utc>>,

    /// Drop undecodable rows instead of aborting the import
    #[arg(long = "ignore-invalid-rows")]
    pub ignore_invalid_rows: bool,

    /// Combined date-time column (1-based index or header label)
    #[arg(long = "timestamp-field", value_name = "COLUMN")]
    pub timestamp_field: Option<FieldSpec>,

    /// Date-only column, for sources with split date and time columns
    #[arg(long = "date-field", value_name = "COLUMN")]
    pub date_field: Option<FieldSpec>,

    /// Time-of-day column; defaults to midnight when absent
    #[arg(long = "time-field", value_name = "COLUMN")]
    pub time_field: Option<FieldSpec>,

    /// Numeric value column
    #[arg(long = "value-field", value_name = "COLUMN")]
    pub value_field: Option<FieldSpec>,

    /// Integer grade-code column
    #[arg(long = "grade-field", value_name = "COLUMN")]
    pub grade_field: Option<FieldSpec>,

    /// Qualifier-list column
    #[arg(long = "qualifiers-field", value_name = "COLUMN")]
    pub qualifiers_field: Option<FieldSpec>,

    /// Timezone name column
    #[arg(long = "timezone-field", value_name = "COLUMN")]
    pub timezone_field: Option<FieldSpec>,

    /// Freeform notes column
    #[arg(long = "notes-field", value_name = "COLUMN")]
    pub notes_field: Option<FieldSpec>,

    /// Explicit format string for combined date-time columns
    #[arg(long = "date-time-format", value_name = "FORMAT")]
    pub date_time_format: Option<String>,

    /// Explicit format string for date-only columns
    #[arg(long = "date-format", value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Explicit format string for time-only columns
    #[arg(long = "time-format", value_name = "FORMAT")]
    pub time_format: Option<String>,

    /// Timezone alias mapping, repeatable (e.g. --timezone-alias EST=America/New_York)
    #[arg(long = "timezone-alias", value_name = "ALIAS=ZONE")]
    pub timezone_aliases: Vec<String>,

    /// Timezone applied when no timezone column resolves for a row
    #[arg(long = "default-timezone", value_name = "ZONE")]
    pub default_timezone: Option<String>,

    /// 1-based worksheet number for spreadsheet sources
    #[arg(long = "sheet-number", value_name = "N")]
    pub sheet_number: Option<usize>,

    /// Worksheet name for spreadsheet sources (case-insensitive)
    #[arg(long = "sheet-name", value_name = "NAME", conflicts_with = "sheet_number")]
    pub sheet_name: Option<String>,

    /// External notes file; disables inline note collection
    #[arg(long = "notes-file", value_name = "FILE")]
    pub notes_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for the import summary
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

/// Output format options for the import summary
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ImportArgs {
    /// Build the effective import configuration: file defaults, then flags
    pub fn to_config(&self) -> Result<ImportConfig> {
        let mut config = match &self.config_file {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|error| {
                    Error::io(format!("Failed to read config file '{}'", path.display()), error)
                })?;

                toml::from_str(&text).map_err(|error| {
                    Error::configuration(format!(
                        "Invalid config file '{}': {}",
                        path.display(),
                        error
                    ))
                })?
            }
            None => ImportConfig::default(),
        };

        config.sources = self.sources.clone();

        if let Some(delimiter) = &self.delimiter {
            config.delimiter = delimiter.clone();
        }
        if let Some(token) = &self.comment_token {
            config.comment_token = Some(token.clone());
        }
        if self.no_header {
            config.has_header_row = false;
        }
        if let Some(labels) = &self.header_starts_with {
            config.header_starts_with = parse_header_prefixes(labels);
        }
        if let Some(skip_rows) = self.skip_rows {
            config.skip_rows = skip_rows;
        }
        if let Some(skip_rows) = self.skip_rows_after_header {
            config.skip_rows_after_header = skip_rows;
        }
        if let Some(nan_value) = &self.nan_value {
            config.nan_value = Some(nan_value.clone());
        }
        if self.remove_duplicates {
            config.remove_duplicate_points = true;
        }
        if self.realign {
            config.realign = true;
        }
        if let Some(start_time) = self.start_time {
            config.start_time = Some(start_time);
        }
        if self.ignore_invalid_rows {
            config.ignore_invalid_rows = true;
        }
        if let Some(format) = &self.date_time_format {
            config.date_time_format = Some(format.clone());
        }
        if let Some(format) = &self.date_format {
            config.date_only_format = Some(format.clone());
        }
        if let Some(format) = &self.time_format {
            config.time_only_format = Some(format.clone());
        }
        if let Some(zone) = &self.default_timezone {
            config.default_timezone = zone.clone();
        }
        if let Some(number) = self.sheet_number {
            config.sheet_number = Some(number);
        }
        if let Some(name) = &self.sheet_name {
            config.sheet_name = Some(name.clone());
        }
        if let Some(path) = &self.notes_file {
            config.notes_file = Some(path.clone());
        }

        for alias in &self.timezone_aliases {
            let (alias_text, zone) = alias.split_once('=').ok_or_else(|| {
                Error::configuration(format!(
                    "Timezone alias '{}' must be in ALIAS=ZONE form",
                    alias
                ))
            })?;
            config
                .timezone_aliases
                .insert(alias_text.trim().to_string(), zone.trim().to_string());
        }

        apply_field_overrides(&mut config.fields, self);

        config.validate()?;
        Ok(config)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

fn apply_field_overrides(fields: &mut FieldMap, args: &ImportArgs) {
    if let Some(spec) = &args.timestamp_field {
        fields.date_time = Some(spec.clone());
    }
    if let Some(spec) = &args.date_field {
        fields.date_only = Some(spec.clone());
    }
    if let Some(spec) = &args.time_field {
        fields.time_only = Some(spec.clone());
    }
    if let Some(spec) = &args.value_field {
        fields.value = Some(spec.clone());
    }
    if let Some(spec) = &args.grade_field {
        fields.grade = Some(spec.clone());
    }
    if let Some(spec) = &args.qualifiers_field {
        fields.qualifiers = Some(spec.clone());
    }
    if let Some(spec) = &args.timezone_field {
        fields.timezone = Some(spec.clone());
    }
    if let Some(spec) = &args.notes_field {
        fields.notes = Some(spec.clone());
    }
}
