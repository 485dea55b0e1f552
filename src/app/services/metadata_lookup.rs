//! Sliding-window matcher over time-ordered interval metadata
//!
//! Collaborator for the append side: given a time-ordered sequence of
//! intervals (grades, qualifiers, approval ranges), answers "which
//! interval(s) cover this timestamp" in a single forward pass. Lookups must
//! arrive in non-decreasing timestamp order; expired intervals are advanced
//! past and never revisited.
//!
//! Nothing in the ingestion pipeline calls this; it exists for consumers
//! stitching external metadata onto a decoded point stream.

use chrono::{DateTime, Utc};

/// A half-open time interval `[start_time, end_time)`
pub trait TimeRange {
    fn start_time(&self) -> DateTime<Utc>;
    fn end_time(&self) -> DateTime<Utc>;
}

/// Single-pass cursor over a time-ordered interval sequence
///
/// Holds the current interval plus a candidate buffer for overlapping
/// lookups, advancing on expiry rather than rescanning.
#[derive(Debug)]
pub struct MetadataLookup<T: TimeRange> {
    items: std::vec::IntoIter<T>,
    current: Option<T>,
    candidates: Vec<T>,
}

impl<T: TimeRange> MetadataLookup<T> {
    /// Create a lookup over a time-ordered interval sequence
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut items = items.into_iter().collect::<Vec<_>>().into_iter();
        let current = items.next();

        Self {
            items,
            current,
            candidates: Vec::new(),
        }
    }

    /// First interval containing `timestamp`, advancing past expired ones.
    ///
    /// Returns `None` once the cursor reaches an interval that has not
    /// started yet, or when the sequence is exhausted.
    pub fn first_valid(&mut self, timestamp: DateTime<Utc>) -> Option<&T> {
        loop {
            let (valid, expired) = match &self.current {
                Some(item) => (is_valid(item, timestamp), is_expired(item, timestamp)),
                None => return None,
            };

            if valid {
                return self.current.as_ref();
            }

            if expired {
                self.advance();
            } else {
                return None;
            }
        }
    }

    fn advance(&mut self) {
        self.current = self.items.next();
    }
}

impl<T: TimeRange + Clone> MetadataLookup<T> {
    /// All intervals containing `timestamp`.
    ///
    /// Buffers every interval that becomes valid at this timestamp, drops
    /// buffered intervals once they expire, and returns the currently valid
    /// candidates.
    pub fn all_valid(&mut self, timestamp: DateTime<Utc>) -> Vec<T> {
        while let Some(item) = self
            .current
            .take_if(|item| is_valid(item, timestamp))
        {
            self.candidates.push(item);
            self.advance();
        }

        self.candidates.retain(|item| !is_expired(item, timestamp));

        self.candidates
            .iter()
            .filter(|&item| is_valid(item, timestamp))
            .cloned()
            .collect()
    }
}

fn is_valid<T: TimeRange>(item: &T, timestamp: DateTime<Utc>) -> bool {
    item.start_time() <= timestamp && timestamp < item.end_time()
}

fn is_expired<T: TimeRange>(item: &T, timestamp: DateTime<Utc>) -> bool {
    item.end_time() <= timestamp
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq)]
    struct Interval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        label: &'static str,
    }

    impl TimeRange for Interval {
        fn start_time(&self) -> DateTime<Utc> {
            self.start
        }

        fn end_time(&self) -> DateTime<Utc> {
            self.end
        }
    }

    fn hour(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, h, 0, 0).unwrap()
    }

    fn interval(start: u32, end: u32, label: &'static str) -> Interval {
        Interval {
            start: hour(start),
            end: hour(end),
            label,
        }
    }

    #[test]
    fn test_first_valid_advances_on_expiry() {
        let mut lookup =
            MetadataLookup::new(vec![interval(0, 2, "a"), interval(2, 4, "b")]);

        assert_eq!(lookup.first_valid(hour(1)).map(|i| i.label), Some("a"));
        // End times are exclusive, so the boundary belongs to the successor
        assert_eq!(lookup.first_valid(hour(2)).map(|i| i.label), Some("b"));
        assert_eq!(lookup.first_valid(hour(5)), None);
    }

    #[test]
    fn test_first_valid_before_first_interval() {
        let mut lookup = MetadataLookup::new(vec![interval(3, 4, "a")]);

        assert_eq!(lookup.first_valid(hour(1)), None);
        // The cursor did not advance past the pending interval
        assert_eq!(lookup.first_valid(hour(3)).map(|i| i.label), Some("a"));
    }

    #[test]
    fn test_first_valid_empty_sequence() {
        let mut lookup: MetadataLookup<Interval> = MetadataLookup::new(Vec::new());
        assert_eq!(lookup.first_valid(hour(0)), None);
    }

    #[test]
    fn test_all_valid_buffers_overlapping_intervals() {
        let mut lookup = MetadataLookup::new(vec![
            interval(0, 10, "wide"),
            interval(1, 3, "narrow"),
            interval(6, 8, "late"),
        ]);

        let at_two: Vec<_> = lookup.all_valid(hour(2)).into_iter().map(|i| i.label).collect();
        assert_eq!(at_two, vec!["wide", "narrow"]);

        // The narrow interval has expired; the late one is now buffered
        let at_seven: Vec<_> = lookup.all_valid(hour(7)).into_iter().map(|i| i.label).collect();
        assert_eq!(at_seven, vec!["wide", "late"]);

        let at_nine: Vec<_> = lookup.all_valid(hour(9)).into_iter().map(|i| i.label).collect();
        assert_eq!(at_nine, vec!["wide"]);
    }

    #[test]
    fn test_all_valid_empty_when_nothing_covers() {
        let mut lookup = MetadataLookup::new(vec![interval(0, 1, "a")]);
        assert!(lookup.all_valid(hour(4)).is_empty());
    }
}
