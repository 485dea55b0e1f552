//! Batch normalization transforms
//!
//! Both transforms sort by timestamp first and operate on the whole decoded
//! batch of a single source. Batches containing any gap marker are returned
//! untouched: gap markers make ordering and dedup semantics ambiguous, so
//! neither transform applies regardless of the opt-in flags.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::app::models::Point;

/// Apply the configured normalization transforms to one source's batch.
///
/// Returns the normalized batch and the number of duplicates removed.
pub fn normalize_points(
    mut points: Vec<Point>,
    remove_duplicates: bool,
    realign_start: Option<DateTime<Utc>>,
) -> (Vec<Point>, usize) {
    let any_gaps = points.iter().any(Point::is_gap);

    if any_gaps {
        if remove_duplicates || realign_start.is_some() {
            info!("Gap markers present; skipping duplicate removal and realignment.");
        }
        return (points, 0);
    }

    let mut duplicates_removed = 0;

    if remove_duplicates {
        duplicates_removed = remove_duplicate_points(&mut points);
    }

    if let Some(start_time) = realign_start {
        realign_points(&mut points, start_time);
    }

    (points, duplicates_removed)
}

/// Remove exact-duplicate timestamps from a batch.
///
/// Sorts by timestamp ascending (stable), then discards the later-indexed
/// point of every equal-timestamp adjacent pair. Returns the number of
/// points discarded.
pub fn remove_duplicate_points(points: &mut Vec<Point>) -> usize {
    points.sort_by_key(|point| point.time);

    let mut removed = 0;
    let mut index = 1;

    while index < points.len() {
        if points[index].time == points[index - 1].time {
            let discarded = points.remove(index);

            warn!(
                "Discarding duplicate point at {} with value {:?}",
                discarded
                    .time
                    .map(|time| time.to_rfc3339())
                    .unwrap_or_default(),
                discarded.value
            );
            removed += 1;
        } else {
            index += 1;
        }
    }

    if removed > 0 {
        warn!("Removed {} duplicate points.", removed);
    }

    removed
}

/// Shift a batch uniformly so its first timestamp equals `start_time`.
///
/// Sorts by timestamp ascending first; inter-point spacing is preserved.
pub fn realign_points(points: &mut [Point], start_time: DateTime<Utc>) {
    points.sort_by_key(|point| point.time);

    let Some(first_time) = points.first().and_then(|point| point.time) else {
        return;
    };

    let delta = first_time - start_time;
    info!("Realigning {} points to start at {}.", points.len(), start_time);

    for point in points.iter_mut() {
        point.time = point.time.map(|time| time - delta);
    }
}
