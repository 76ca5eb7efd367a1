use crate::utils::{
    quarter_of_month, start_of_next_month, start_of_next_quarter, start_of_next_year,
};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Granularity of the sub-period segmentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitPeriod {
    #[default]
    Yearly,
    Quarterly,
    Monthly,
}

impl SplitPeriod {
    /// String key for the period containing `date`: `"YYYY"`, `"YYYY-Qn"` or
    /// `"YYYY-MM"`. Zero-padding keeps lexicographic order equal to
    /// chronological order for all three formats.
    pub fn identifier_for(&self, date: NaiveDate) -> String {
        match self {
            SplitPeriod::Yearly => format!("{:04}", date.year()),
            SplitPeriod::Quarterly => {
                format!("{:04}-Q{}", date.year(), quarter_of_month(date.month()))
            }
            SplitPeriod::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
        }
    }

    /// First day after the period containing `date` ends. Always strictly
    /// after `date`, so the segmentation cursor makes progress.
    pub fn next_boundary(&self, date: NaiveDate) -> NaiveDate {
        match self {
            SplitPeriod::Yearly => start_of_next_year(date),
            SplitPeriod::Quarterly => start_of_next_quarter(date),
            SplitPeriod::Monthly => start_of_next_month(date),
        }
    }
}

/// Caller-supplied input for one split calculation.
///
/// `NaiveDate` carries no time-of-day, so both dates are already at the
/// "midnight" resolution the day math expects. Callers holding timestamps
/// must reduce them to a fixed-reference calendar date (e.g. UTC) first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// When true the end date's full day is counted (the effective end
    /// becomes `end_date + 1 day`, exclusive).
    #[serde(default)]
    pub include_end_date: bool,

    /// Amounts to split, each processed independently. Order is preserved in
    /// the output.
    pub amounts: Vec<f64>,

    #[serde(default)]
    pub split_period: SplitPeriod,
}

impl CalculationInput {
    /// Exclusive end of the day range.
    pub fn effective_end_date(&self) -> NaiveDate {
        if self.include_end_date {
            self.end_date
                .checked_add_days(Days::new(1))
                .unwrap_or(NaiveDate::MAX)
        } else {
            self.end_date
        }
    }
}
