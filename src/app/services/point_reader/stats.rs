//! Load statistics and result structures for point ingestion
//!
//! This module provides types for tracking decode success rates and
//! organizing loaded results for the append collaborator.

use crate::app::models::{NoteEntry, Point};

/// Load result with points, inline notes, and basic statistics
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// Normalized points in source-list order, then timestamp order as
    /// produced by normalization
    pub points: Vec<Point>,

    /// Inline notes collected across all sources, in discovery order
    pub notes: Vec<NoteEntry>,

    /// Aggregate load statistics
    pub stats: LoadStats,
}

/// Simple load statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoadStats {
    /// Total number of data rows presented to the decoder
    pub total_rows: usize,

    /// Number of rows successfully decoded into points
    pub points_decoded: usize,

    /// Number of rows rejected under the ignore-invalid-rows policy
    pub rows_rejected: usize,

    /// Number of exact-duplicate points removed during normalization
    pub duplicates_removed: usize,

    /// Rejected-row descriptions for debugging
    pub errors: Vec<String>,
}

impl LoadStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_rows: 0,
            points_decoded: 0,
            rows_rejected: 0,
            duplicates_removed: 0,
            errors: Vec::new(),
        }
    }

    /// Calculate decode success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.points_decoded as f64 / self.total_rows as f64) * 100.0
        }
    }
}

impl Default for LoadStats {
    fn default() -> Self {
        Self::new()
    }
}
