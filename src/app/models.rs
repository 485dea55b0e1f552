//! Data models for point ingestion
//!
//! This module contains the core data structures for representing decoded
//! time-series observations: points, point types, and inline row notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Point Type Enumeration
// =============================================================================

/// Type of a decoded point
///
/// Only `Gap` is recognized from input text today. `Unknown` is the
/// non-match sentinel and never survives decoding into an output point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointType {
    /// Intentional discontinuity marker in a series
    Gap,

    /// Token did not match any recognized point type
    Unknown,
}

/// Case-insensitive name table for point-type tokens.
///
/// Extend by adding entries; lookups never allocate.
const POINT_TYPE_NAMES: &[(&str, PointType)] = &[("Gap", PointType::Gap)];

impl PointType {
    /// Look up a raw field token in the point-type name table.
    ///
    /// Returns `None` when the token is not a point-type name at all, so
    /// callers can fall through to timestamp or numeric parsing.
    pub fn from_token(text: &str) -> Option<PointType> {
        POINT_TYPE_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(text))
            .map(|(_, point_type)| *point_type)
    }
}

// =============================================================================
// Point Structure
// =============================================================================

/// One decoded time-stamped observation, or a typed gap marker
///
/// A point is produced by decoding exactly one source row and is immutable
/// afterward, except for the realignment step which shifts `time` uniformly
/// across a whole batch. A point lacking both a recognized type and a
/// timestamp is invalid and never appears in an output list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Point type; `Some(Gap)` marks a discontinuity, `None` is a plain value
    pub point_type: Option<PointType>,

    /// Timestamp of the observation
    pub time: Option<DateTime<Utc>>,

    /// Numeric value; `None` for gaps, NaN sentinels, and unparsable text
    pub value: Option<f64>,

    /// Quality grade code
    pub grade_code: Option<i32>,

    /// Qualifier tokens attached to the observation
    pub qualifiers: Option<Vec<String>>,
}

impl Point {
    /// Check whether this point is a gap marker
    pub fn is_gap(&self) -> bool {
        self.point_type == Some(PointType::Gap)
    }
}

// =============================================================================
// Inline Row Notes
// =============================================================================

/// A freeform annotation discovered inline while decoding a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEntry {
    /// Timestamp of the row the note was found on
    pub time: DateTime<Utc>,

    /// Raw note text
    pub text: String,
}
