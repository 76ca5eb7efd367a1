//! Per-amount splitting with rounding-discrepancy reconciliation.

use crate::report::{
    AmountSplitResult, AmountStepDetail, PeriodSegment, PeriodSplit, PeriodStepDetail,
};
use crate::rounding::round_currency;
use log::debug;
use std::collections::BTreeMap;

/// Splits one amount across the segments so that the rounded per-period
/// values sum to exactly the rounded amount.
///
/// Each segment first receives `amount * proportion` rounded to cents. The
/// discrepancy between the rounded original amount and the sum of rounded
/// shares, if any, is then folded into the period with the largest absolute
/// raw (pre-rounding) share. On an exact tie the earliest period wins, which
/// keeps the selection deterministic.
pub fn split_amount(
    amount: f64,
    segments: &[PeriodSegment],
) -> (AmountSplitResult, AmountStepDetail) {
    let mut periods: Vec<PeriodStepDetail> = segments
        .iter()
        .map(|segment| {
            let raw_split = amount * segment.proportion;
            let rounded_split = round_currency(raw_split);
            PeriodStepDetail {
                period: segment.period.clone(),
                raw_split,
                rounded_split,
                final_split: rounded_split,
            }
        })
        .collect();

    let current_total = round_currency(periods.iter().map(|p| p.rounded_split).sum());
    // Reconcile against the rounded amount, not the raw one: for a value like
    // 1.005 (stored just below the half-cent) the raw difference would round
    // to zero while the target total is 1.01.
    let discrepancy = round_currency(round_currency(amount) - current_total);

    let adjusted_period = if discrepancy != 0.0 {
        largest_raw_index(&periods).map(|idx| {
            let target = &mut periods[idx];
            target.final_split = round_currency(target.rounded_split + discrepancy);
            debug!(
                "amount {}: {} absorbs rounding discrepancy of {}",
                amount, target.period, discrepancy
            );
            target.period.clone()
        })
    } else {
        None
    };

    let splits: BTreeMap<String, PeriodSplit> = periods
        .iter()
        .map(|p| {
            (
                p.period.clone(),
                PeriodSplit {
                    split_amount: p.final_split,
                },
            )
        })
        .collect();

    let adjusted_total_amount = round_currency(periods.iter().map(|p| p.final_split).sum());

    let result = AmountSplitResult {
        original_amount: amount,
        splits,
        adjusted_total_amount,
    };

    let steps = AmountStepDetail {
        original_amount: amount,
        periods,
        discrepancy,
        adjusted_period,
    };

    (result, steps)
}

/// Index of the period with the largest absolute raw split. Strict
/// comparison keeps the first of any exact tie.
fn largest_raw_index(periods: &[PeriodStepDetail]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, period) in periods.iter().enumerate() {
        let magnitude = period.raw_split.abs();
        match best {
            Some((_, current)) if magnitude <= current => {}
            _ => best = Some((idx, magnitude)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(parts: &[(&str, i64)]) -> Vec<PeriodSegment> {
        let total: i64 = parts.iter().map(|(_, d)| d).sum();
        parts
            .iter()
            .map(|(period, days)| PeriodSegment {
                period: period.to_string(),
                days: *days,
                proportion: *days as f64 / total as f64,
            })
            .collect()
    }

    #[test]
    fn test_even_split_needs_no_adjustment() {
        let segs = segments(&[("2023", 31), ("2024", 31)]);
        let (result, steps) = split_amount(1000.0, &segs);

        assert_eq!(result.splits["2023"].split_amount, 500.0);
        assert_eq!(result.splits["2024"].split_amount, 500.0);
        assert_eq!(result.adjusted_total_amount, 1000.0);
        assert_eq!(steps.discrepancy, 0.0);
        assert_eq!(steps.adjusted_period, None);
    }

    #[test]
    fn test_reconciliation_invariant() {
        let segs = segments(&[("2023", 17), ("2024", 75)]);

        for amount in [10000.0, 816.0, 0.01, 1.0, 99.99, 1234.56, 1.005, 100.005] {
            let (result, _) = split_amount(amount, &segs);
            let sum: f64 = result.splits.values().map(|s| s.split_amount).sum();
            assert_eq!(
                round_currency(sum),
                round_currency(amount),
                "splits of {} must reconcile",
                amount
            );
            assert_eq!(result.adjusted_total_amount, round_currency(amount));
        }
    }

    #[test]
    fn test_adjustment_goes_to_largest_raw_share() {
        // 34.44 + 31.11 + 34.44 = 99.99, so one cent is missing. Jan and Mar
        // tie on the largest raw share and the first must absorb it.
        let segs = segments(&[("2023-01", 31), ("2023-02", 28), ("2023-03", 31)]);
        let (result, steps) = split_amount(100.0, &segs);

        let sum: f64 = result.splits.values().map(|s| s.split_amount).sum();
        assert_eq!(round_currency(sum), 100.0);
        assert_eq!(steps.discrepancy, 0.01);
        assert_eq!(steps.adjusted_period.as_deref(), Some("2023-01"));
        assert_eq!(result.splits["2023-01"].split_amount, 34.45);
    }

    #[test]
    fn test_tie_break_picks_first_period() {
        let segs = segments(&[("2023", 31), ("2024", 31)]);
        // 0.005 per side rounds up twice, leaving a -0.01 discrepancy and an
        // exact raw-share tie.
        let (result, steps) = split_amount(0.01, &segs);

        assert_eq!(steps.discrepancy, -0.01);
        assert_eq!(steps.adjusted_period.as_deref(), Some("2023"));
        assert_eq!(result.splits["2023"].split_amount, 0.0);
        assert_eq!(result.splits["2024"].split_amount, 0.01);
        assert_eq!(result.adjusted_total_amount, 0.01);
    }

    #[test]
    fn test_half_cent_amount_two_segments() {
        // 1.005 rounds to 1.01 but each half-share rounds down to 0.50, so
        // the reconciliation must add the missing cent.
        let segs = segments(&[("2023", 31), ("2024", 31)]);
        let (result, steps) = split_amount(1.005, &segs);

        assert_eq!(steps.discrepancy, 0.01);
        assert_eq!(steps.adjusted_period.as_deref(), Some("2023"));
        assert_eq!(result.splits["2023"].split_amount, 0.51);
        assert_eq!(result.splits["2024"].split_amount, 0.5);
        assert_eq!(result.adjusted_total_amount, 1.01);
    }

    #[test]
    fn test_half_cent_amount_single_segment() {
        // With one segment the rounded share already is the rounded amount;
        // no adjustment may fire and none may be needed.
        let segs = segments(&[("2023", 59)]);
        let (result, steps) = split_amount(1.005, &segs);

        assert_eq!(steps.discrepancy, 0.0);
        assert_eq!(steps.adjusted_period, None);
        assert_eq!(result.splits["2023"].split_amount, 1.01);
        assert_eq!(result.adjusted_total_amount, 1.01);
    }

    #[test]
    fn test_zero_amount() {
        let segs = segments(&[("2023", 10), ("2024", 20)]);
        let (result, steps) = split_amount(0.0, &segs);

        assert_eq!(result.adjusted_total_amount, 0.0);
        assert_eq!(steps.discrepancy, 0.0);
        assert_eq!(steps.adjusted_period, None);
    }

    #[test]
    fn test_step_trace_records_raw_and_rounded() {
        let segs = segments(&[("2023", 17), ("2024", 75)]);
        let (_, steps) = split_amount(816.0, &segs);

        assert_eq!(steps.periods.len(), 2);
        let first = &steps.periods[0];
        assert_eq!(first.period, "2023");
        assert!((first.raw_split - 816.0 * 17.0 / 92.0).abs() < 1e-9);
        assert_eq!(first.rounded_split, 150.78);
        assert_eq!(first.final_split, 150.78);
    }
}
