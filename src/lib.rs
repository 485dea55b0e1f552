//! Pointload Library
//!
//! A Rust library for ingesting time-stamped numeric observations from
//! tabular sources into a uniform time-series point stream.
//!
//! This library provides tools for:
//! - Reading delimited-text files with header anchoring and skip-row budgets
//! - Reading spreadsheet workbooks with sheet selection by index or name
//! - Fetching remote delimited text over HTTP and decoding it in place
//! - Mapping source columns onto point attributes via a configurable field map
//! - Decoding rows leniently (gap markers, NaN sentinels, timezone columns)
//! - Normalizing decoded batches (duplicate removal, time realignment)

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod metadata_lookup;
        pub mod point_normalizer;
        pub mod point_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{NoteEntry, Point, PointType};
pub use config::ImportConfig;

/// Result type alias for point ingestion
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for point ingestion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Source file does not exist
    #[error("File '{path}' does not exist")]
    FileNotFound { path: String },

    /// Requested worksheet could not be selected
    #[error("Can't find worksheet {sheet}")]
    SheetNotFound { sheet: String },

    /// Header row is missing one or more required column labels
    #[error("Missing header column(s): {}", columns.join(", "))]
    MissingHeaderColumns { columns: Vec<String> },

    /// A single row could not be decoded into a point
    #[error("Can't parse '{source_name}' ({line}): {fields}")]
    RowParse {
        source_name: String,
        line: u64,
        fields: String,
    },

    /// Remote download failed
    #[error("Fetch of '{url}' failed: {message}")]
    Fetch {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Delimited-text reader failed below the row level
    #[error("CSV parsing error in '{source_name}': {message}")]
    CsvParsing {
        source_name: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Workbook could not be read after a successful probe
    #[error("Workbook error in '{source_name}': {message}")]
    Workbook { source_name: String, message: String },
}

impl Error {
    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a sheet not found error
    pub fn sheet_not_found(sheet: impl Into<String>) -> Self {
        Self::SheetNotFound {
            sheet: sheet.into(),
        }
    }

    /// Create a missing header columns error
    pub fn missing_header_columns(columns: Vec<String>) -> Self {
        Self::MissingHeaderColumns { columns }
    }

    /// Create a row-level parse error with its 1-based source location
    pub fn row_parse(source_name: impl Into<String>, line: u64, fields: impl Into<String>) -> Self {
        Self::RowParse {
            source_name: source_name.into(),
            line,
            fields: fields.into(),
        }
    }

    /// Create a fetch error with context
    pub fn fetch(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        source_name: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            source_name: source_name.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a workbook error
    pub fn workbook(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Workbook {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error belongs to the expected, user-facing category
    /// (bad input or bad configuration) as opposed to an internal failure.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::SheetNotFound { .. }
                | Self::MissingHeaderColumns { .. }
                | Self::RowParse { .. }
                | Self::Fetch { .. }
                | Self::Configuration { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            source_name: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
