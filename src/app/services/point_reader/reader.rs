//! Point reader orchestration
//!
//! Drives one import invocation: dispatches each configured source to the
//! right adapter, normalizes each decoded batch, and concatenates batches
//! in source-list order.
//!
//! Dispatch order per source: a syntactically valid absolute http(s) URI is
//! fetched remotely; a local path must exist; an existing path is probed as
//! a spreadsheet first and falls back to delimited text when the probe
//! reports it is not one.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use chrono_tz::Tz;
use tracing::info;

use super::excel::{self, WorkbookProbe, probe_workbook};
use super::notes::NotesCollector;
use super::remote::{fetch_text, parse_remote_url};
use super::stats::{LoadResult, LoadStats};
use super::delimited;
use crate::app::models::Point;
use crate::app::services::point_normalizer::normalize_points;
use crate::config::ImportConfig;
use crate::{Error, Result};

/// Reads all configured sources into one normalized point stream
///
/// Sources are processed strictly sequentially in the order supplied; each
/// is fully decoded and normalized before the next begins.
#[derive(Debug)]
pub struct PointReader<'a> {
    config: &'a ImportConfig,
    default_zone: Tz,
}

impl<'a> PointReader<'a> {
    /// Create a reader over a validated configuration
    pub fn new(config: &'a ImportConfig) -> Result<Self> {
        config.validate()?;
        let default_zone = config.default_zone()?;

        Ok(Self {
            config,
            default_zone,
        })
    }

    /// Load, decode, and normalize every configured source
    pub fn load_points(&self) -> Result<LoadResult> {
        let mut notes = NotesCollector::new();
        let mut stats = LoadStats::new();
        let mut points = Vec::new();

        for source in &self.config.sources {
            let batch = self.load_source(source, &mut notes, &mut stats)?;

            let (batch, duplicates_removed) = normalize_points(
                batch,
                self.config.remove_duplicate_points,
                self.config.realign_start(),
            );
            stats.duplicates_removed += duplicates_removed;

            info!("Loaded {} points from '{}'.", batch.len(), source);
            points.extend(batch);
        }

        if !notes.is_empty() {
            info!("Collected {} inline notes.", notes.len());
        }

        Ok(LoadResult {
            points,
            notes: notes.into_entries(),
            stats,
        })
    }

    fn load_source(
        &self,
        source: &str,
        notes: &mut NotesCollector,
        stats: &mut LoadStats,
    ) -> Result<Vec<Point>> {
        if let Some(url) = parse_remote_url(source) {
            let body = fetch_text(&url)?;
            return delimited::load_points(
                self.config,
                source,
                Cursor::new(body),
                self.default_zone,
                notes,
                stats,
            );
        }

        let path = Path::new(source);

        if !path.exists() {
            return Err(Error::file_not_found(source));
        }

        match probe_workbook(path) {
            WorkbookProbe::Workbook(mut workbook) => excel::load_points(
                self.config,
                source,
                &mut workbook,
                self.default_zone,
                notes,
                stats,
            ),
            WorkbookProbe::NotASpreadsheet => {
                let file = File::open(path)
                    .map_err(|error| Error::io(format!("Failed to open '{}'", source), error))?;

                delimited::load_points(
                    self.config,
                    source,
                    BufReader::new(file),
                    self.default_zone,
                    notes,
                    stats,
                )
            }
        }
    }
}
