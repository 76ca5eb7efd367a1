//! Partitioning of a day range into contiguous calendar-aligned segments.

use crate::report::PeriodSegment;
use crate::schema::SplitPeriod;
use crate::utils::days_between;
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// Walks `[start, effective_end)` and partitions it into per-period day
/// counts, returning the segments in chronological order together with the
/// total day count.
///
/// Every day in the range lands in exactly one segment; proportions are
/// computed against the total once all day counts are known. Day counts
/// accumulate additively per identifier, so a period reached twice would
/// still end up with a single correct segment.
pub fn segment_range(
    start: NaiveDate,
    effective_end: NaiveDate,
    period: SplitPeriod,
) -> (Vec<PeriodSegment>, i64) {
    let total_days = days_between(start, effective_end);
    let mut day_counts: BTreeMap<String, i64> = BTreeMap::new();

    let mut cursor = start;
    while cursor < effective_end {
        let identifier = period.identifier_for(cursor);
        // next_boundary is strictly after the cursor, so the loop advances.
        let segment_end = period.next_boundary(cursor).min(effective_end);
        let days = days_between(cursor, segment_end);

        if days > 0 {
            debug!("segment {}: {} day(s)", identifier, days);
            *day_counts.entry(identifier).or_insert(0) += days;
        }

        cursor = segment_end;
    }

    let segments = day_counts
        .into_iter()
        .map(|(period, days)| PeriodSegment {
            period,
            days,
            proportion: days as f64 / total_days as f64,
        })
        .collect();

    (segments, total_days)
}
