//! Output model for a split calculation: per-period segments, per-amount
//! splits, aggregated totals and the step-by-step audit trail.

use crate::error::SplitError;
use crate::schema::SplitPeriod;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar period touched by the date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSegment {
    /// Sortable period key (`"2023"`, `"2023-Q4"`, `"2023-12"`).
    pub period: String,
    /// Days of the range falling in this period.
    pub days: i64,
    /// `days / total_days`, in (0, 1].
    pub proportion: f64,
}

/// Rounded currency value allocated to one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodSplit {
    pub split_amount: f64,
}

/// Split of a single input amount across all periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountSplitResult {
    pub original_amount: f64,
    /// Keyed by period identifier; iteration order is chronological.
    pub splits: BTreeMap<String, PeriodSplit>,
    /// Sum of the splits, rounded to cents. Equals `original_amount` rounded
    /// to cents (the reconciliation invariant).
    pub adjusted_total_amount: f64,
}

/// Per-period totals across all input amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPeriodSplit {
    pub period: String,
    pub days_in_period: i64,
    pub proportion: f64,
    pub total_split_amount: f64,
}

/// Arithmetic trace for one period of one amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStepDetail {
    pub period: String,
    /// `amount * proportion` before rounding.
    pub raw_split: f64,
    /// Raw split rounded to cents, before any discrepancy adjustment.
    pub rounded_split: f64,
    /// Value that ends up in the result, after adjustment (if any).
    pub final_split: f64,
}

/// Arithmetic trace for one input amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountStepDetail {
    pub original_amount: f64,
    pub periods: Vec<PeriodStepDetail>,
    /// `round(round(amount) - sum(rounded splits))`; zero when rounding lost
    /// nothing.
    pub discrepancy: f64,
    /// Period that absorbed the discrepancy, when one was needed.
    pub adjusted_period: Option<String>,
}

/// Full audit trail of the calculation. When `error` is set all numeric
/// fields are zero and all collections empty; callers must check it before
/// trusting anything else in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStepDetails {
    pub error: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
    pub total_days: i64,
    pub segments: Vec<PeriodSegment>,
    pub amounts: Vec<AmountStepDetail>,
}

/// Top-level return value of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total_days: i64,
    /// Sum of the raw input amounts, rounded to cents.
    pub original_total_amount: f64,
    /// Sum of the aggregated period totals, rounded to cents.
    pub adjusted_total_amount: f64,
    pub results_per_amount: Vec<AmountSplitResult>,
    pub aggregated_splits: Vec<AggregatedPeriodSplit>,
    pub calculation_steps: CalculationStepDetails,
    pub split_period_used: SplitPeriod,
}

impl CalculationResult {
    /// Validation error message, if the calculation failed.
    pub fn error(&self) -> Option<&str> {
        self.calculation_steps.error.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.calculation_steps.error.is_some()
    }

    /// Error-shaped result: zeroed numerics, empty collections, message set.
    pub(crate) fn from_error(kind: SplitError, split_period: SplitPeriod) -> Self {
        CalculationResult {
            total_days: 0,
            original_total_amount: 0.0,
            adjusted_total_amount: 0.0,
            results_per_amount: Vec::new(),
            aggregated_splits: Vec::new(),
            calculation_steps: CalculationStepDetails {
                error: Some(kind.to_string()),
                start_date: None,
                effective_end_date: None,
                total_days: 0,
                segments: Vec::new(),
                amounts: Vec::new(),
            },
            split_period_used: split_period,
        }
    }
}
