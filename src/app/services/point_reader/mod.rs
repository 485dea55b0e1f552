//! Tabular point reader for time-series ingestion
//!
//! This module turns heterogeneous tabular sources (delimited text,
//! spreadsheet workbooks, remote URLs) into a uniform point stream under a
//! configurable column-mapping scheme.
//!
//! ## Architecture
//!
//! The reader is organized into logical components:
//! - [`reader`] - Per-source dispatch and import orchestration
//! - [`delimited`] - Delimited-text adapter (skip budgets, header anchoring)
//! - [`excel`] - Spreadsheet workbook adapter and probe
//! - [`remote`] - Synchronous remote fetch
//! - [`header`] - Header row discovery and prefix matching
//! - [`field_map`] - Column-to-attribute mapping and header resolution
//! - [`row_decoder`] - Per-row decoding into candidate points
//! - [`field_parsers`] - Utility functions for field parsing
//! - [`timezone`] - Alias-aware timezone resolution
//! - [`qualifiers`] - Qualifier-list decoding
//! - [`notes`] - Inline note collection
//! - [`stats`] - Load statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pointload::ImportConfig;
//! use pointload::app::services::point_reader::PointReader;
//!
//! # fn example(config: ImportConfig) -> pointload::Result<()> {
//! let reader = PointReader::new(&config)?;
//! let result = reader.load_points()?;
//!
//! println!(
//!     "Loaded {} points and {} notes",
//!     result.points.len(),
//!     result.notes.len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod delimited;
pub mod excel;
pub mod field_map;
pub mod field_parsers;
pub mod header;
pub mod notes;
pub mod qualifiers;
pub mod reader;
pub mod remote;
pub mod row_decoder;
pub mod stats;
pub mod timezone;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use field_map::{FieldMap, FieldSpec, ResolvedFieldMap};
pub use notes::NotesCollector;
pub use reader::PointReader;
pub use row_decoder::{RowDecoder, RowOutcome};
pub use stats::{LoadResult, LoadStats};
