//! Delimited-text source adapter
//!
//! Scans one delimited-text stream row by row: comment suppression, the
//! pre-header skip budget, header anchoring and validation, the
//! after-header skip budget, then per-row decoding with rejected-row
//! accounting under the ignore-invalid-rows policy.

use std::io::Read;
use tracing::debug;

use super::header::is_header_row_matched;
use super::notes::NotesCollector;
use super::row_decoder::{RowDecoder, RowOutcome};
use super::stats::LoadStats;
use crate::app::models::Point;
use crate::config::ImportConfig;
use crate::{Error, Result};
use chrono_tz::Tz;

/// Decode one delimited-text stream into points
pub fn load_points<R: Read>(
    config: &ImportConfig,
    source_name: &str,
    input: R,
    default_zone: Tz,
    notes: &mut NotesCollector,
    stats: &mut LoadStats,
) -> Result<Vec<Point>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut skip_count = config.skip_rows;
    let mut after_header_skip = config.skip_rows_after_header;
    let mut pending_header = config.has_header_row;
    let anchoring = &config.header_starts_with;

    let mut decoder = if pending_header {
        None
    } else {
        Some(RowDecoder::new(
            config,
            config.fields.resolve_unlabeled()?,
            default_zone,
        ))
    };

    let mut points = Vec::new();
    let mut record = csv::StringRecord::new();

    loop {
        let line = reader.position().line();

        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(error) => {
                return Err(Error::csv_parsing(
                    source_name,
                    format!("line {}", line),
                    Some(error),
                ));
            }
        }

        let fields: Vec<String> = record.iter().map(|field| field.to_string()).collect();

        // Comment rows are suppressed before any budget is consumed
        if is_comment_row(config, &fields) {
            continue;
        }

        if skip_count > 0 {
            skip_count -= 1;
            continue;
        }

        if pending_header {
            if !anchoring.is_empty() && !is_header_row_matched(&fields, anchoring) {
                continue;
            }

            decoder = Some(RowDecoder::new(
                config,
                config.fields.resolve(&fields)?,
                default_zone,
            ));
            pending_header = false;
            continue;
        }

        if after_header_skip > 0 {
            after_header_skip -= 1;
            continue;
        }

        let decoder = decoder
            .as_ref()
            .expect("decoder is initialized once the header is handled");

        match decoder.decode_text_row(&record, notes) {
            RowOutcome::Point(point) => {
                stats.total_rows += 1;
                stats.points_decoded += 1;
                points.push(point);
            }
            RowOutcome::Comment => {}
            RowOutcome::Rejected => {
                stats.total_rows += 1;

                if !config.ignore_invalid_rows {
                    return Err(Error::row_parse(source_name, line, fields.join(", ")));
                }

                stats.rows_rejected += 1;
                stats
                    .errors
                    .push(format!("{} ({}): {}", source_name, line, fields.join(", ")));
                debug!("Skipped undecodable row {} of '{}'", line, source_name);
            }
        }
    }

    Ok(points)
}

fn is_comment_row(config: &ImportConfig, fields: &[String]) -> bool {
    match &config.comment_token {
        Some(token) if !token.is_empty() => fields
            .first()
            .map(|field| field.trim_start().starts_with(token))
            .unwrap_or(false),
        _ => false,
    }
}
