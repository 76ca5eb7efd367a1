//! Aggregation of per-amount splits into per-period totals.

use crate::report::{AggregatedPeriodSplit, AmountSplitResult, PeriodSegment};
use crate::rounding::round_currency;

/// Sums each period's split across all amounts, returning the per-period
/// totals (in segment order) and the overall adjusted total.
///
/// Because every amount's splits already reconcile to that amount's rounded
/// value, the adjusted total equals the sum of the rounded amounts.
pub fn aggregate_splits(
    segments: &[PeriodSegment],
    per_amount: &[AmountSplitResult],
) -> (Vec<AggregatedPeriodSplit>, f64) {
    let aggregated: Vec<AggregatedPeriodSplit> = segments
        .iter()
        .map(|segment| {
            let period_sum: f64 = per_amount
                .iter()
                .filter_map(|result| result.splits.get(&segment.period))
                .map(|split| split.split_amount)
                .sum();

            AggregatedPeriodSplit {
                period: segment.period.clone(),
                days_in_period: segment.days,
                proportion: segment.proportion,
                total_split_amount: round_currency(period_sum),
            }
        })
        .collect();

    let adjusted_total = round_currency(
        aggregated
            .iter()
            .map(|split| split.total_split_amount)
            .sum(),
    );

    (aggregated, adjusted_total)
}
