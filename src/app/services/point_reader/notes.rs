//! Inline note collection
//!
//! Side channel for freeform annotation text discovered while decoding
//! rows. Notes are only collected when a notes column is configured and no
//! external notes file supplies them instead.

use crate::app::models::NoteEntry;
use chrono::{DateTime, Utc};

/// Accumulates timestamp-keyed notes during one import's row pass
///
/// Owned by the reader; drained once after the full pass completes.
#[derive(Debug, Default)]
pub struct NotesCollector {
    entries: Vec<NoteEntry>,
}

impl NotesCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one note against a row timestamp
    pub fn add(&mut self, time: DateTime<Utc>, text: impl Into<String>) {
        self.entries.push(NoteEntry {
            time,
            text: text.into(),
        });
    }

    /// Number of collected notes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no notes were collected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the collector, yielding the notes in discovery order
    pub fn into_entries(self) -> Vec<NoteEntry> {
        self.entries
    }
}
