//! # Invoice Split
//!
//! A library for proportionally allocating ("splitting") monetary amounts
//! across calendar sub-periods based on the fraction of a date range's days
//! falling in each period. Typical use is accounting period allocation, e.g.
//! recognizing a prepaid expense or deferred revenue across fiscal years.
//!
//! ## Core Concepts
//!
//! - **Period**: a sub-interval of the date range aligned to calendar year,
//!   quarter or month boundaries, identified by a sortable string key
//!   (`"2023"`, `"2023-Q4"`, `"2023-12"`)
//! - **Proportion**: the fraction of total range days falling in a period
//! - **Reconciliation**: after rounding each period's share to cents, a
//!   single corrective adjustment guarantees the splits sum to exactly the
//!   rounded original amount
//! - **Audit Trail**: every result carries the raw, rounded and adjusted
//!   value per period so the arithmetic can be displayed and verified
//!
//! ## Example
//!
//! ```rust
//! use invoice_split::{calculate_invoice_split, CalculationInput, SplitPeriod};
//! use chrono::NaiveDate;
//!
//! let input = CalculationInput {
//!     start_date: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
//!     end_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
//!     include_end_date: false,
//!     amounts: vec![1000.0, 80.0],
//!     split_period: SplitPeriod::Yearly,
//! };
//!
//! let result = calculate_invoice_split(&input);
//! assert!(!result.is_error());
//! assert_eq!(result.total_days, 62);
//! assert_eq!(result.aggregated_splits[0].total_split_amount, 540.0);
//! assert_eq!(result.aggregated_splits[1].total_split_amount, 540.0);
//! ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod report;
pub mod rounding;
pub mod schema;
pub mod segmentation;
pub mod splitter;
pub mod utils;

pub use aggregate::aggregate_splits;
pub use cache::{canonical_key, CalculationCache};
pub use error::{Result, SplitError};
pub use report::{
    AggregatedPeriodSplit, AmountSplitResult, AmountStepDetail, CalculationResult,
    CalculationStepDetails, PeriodSegment, PeriodSplit, PeriodStepDetail,
};
pub use schema::{CalculationInput, SplitPeriod};
pub use segmentation::segment_range;
pub use splitter::split_amount;

use log::{debug, info, warn};
use rounding::round_currency;

pub struct SplitCalculator;

impl SplitCalculator {
    /// Runs the full pipeline: validation, segmentation, per-amount split
    /// and aggregation. Total function; validation failures come back as an
    /// error-carrying [`CalculationResult`] rather than an `Err`.
    pub fn calculate(input: &CalculationInput) -> CalculationResult {
        match Self::try_calculate(input) {
            Ok(result) => result,
            Err(kind) => CalculationResult::from_error(kind, input.split_period),
        }
    }

    /// `Result`-returning variant for callers that prefer `?` over checking
    /// [`CalculationResult::error`].
    pub fn try_calculate(input: &CalculationInput) -> Result<CalculationResult> {
        validate_input(input)?;

        let effective_end = input.effective_end_date();

        info!(
            "Splitting {} amount(s) over {} to {} ({:?})",
            input.amounts.len(),
            input.start_date,
            effective_end,
            input.split_period
        );

        let (segments, total_days) =
            segment_range(input.start_date, effective_end, input.split_period);
        debug!(
            "Partitioned {} day(s) into {} segment(s)",
            total_days,
            segments.len()
        );

        let mut results_per_amount = Vec::with_capacity(input.amounts.len());
        let mut amount_steps = Vec::with_capacity(input.amounts.len());
        for &amount in &input.amounts {
            let (result, steps) = split_amount(amount, &segments);
            results_per_amount.push(result);
            amount_steps.push(steps);
        }

        let (aggregated_splits, adjusted_total_amount) =
            aggregate_splits(&segments, &results_per_amount);

        let original_total_amount = round_currency(input.amounts.iter().sum());

        // Each amount reconciles to its own rounded value, so the aggregate
        // can drift from the rounded sum of raw amounts by at most one cent
        // per amount. Anything past that bound is logged, never failed.
        let residual = (original_total_amount - adjusted_total_amount).abs();
        let residual_bound = 0.01 * input.amounts.len() as f64;
        if residual > residual_bound + f64::EPSILON {
            warn!(
                "Aggregated total {} deviates from original total {} beyond the {} bound",
                adjusted_total_amount, original_total_amount, residual_bound
            );
        }

        Ok(CalculationResult {
            total_days,
            original_total_amount,
            adjusted_total_amount,
            results_per_amount,
            aggregated_splits,
            calculation_steps: CalculationStepDetails {
                error: None,
                start_date: Some(input.start_date),
                effective_end_date: Some(effective_end),
                total_days,
                segments,
                amounts: amount_steps,
            },
            split_period_used: input.split_period,
        })
    }
}

/// Convenience wrapper around [`SplitCalculator::calculate`].
pub fn calculate_invoice_split(input: &CalculationInput) -> CalculationResult {
    SplitCalculator::calculate(input)
}

fn validate_input(input: &CalculationInput) -> Result<()> {
    if input.amounts.is_empty() {
        return Err(SplitError::NoAmounts);
    }

    if input.amounts.iter().any(|a| !a.is_finite()) {
        return Err(SplitError::InvalidAmount);
    }

    let effective_end = input.effective_end_date();
    if input.start_date >= effective_end {
        return Err(SplitError::InvalidDateOrder);
    }

    if utils::days_between(input.start_date, effective_end) <= 0 {
        return Err(SplitError::ZeroDuration);
    }

    Ok(())
}
