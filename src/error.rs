use thiserror::Error;

/// Closed set of input validation failures.
///
/// The engine itself is total: [`crate::calculate_invoice_split`] converts any of
/// these into an error-carrying result instead of returning `Err`. The enum is
/// still public so callers that prefer `Result` semantics can use
/// [`crate::SplitCalculator::try_calculate`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    #[error("At least one amount is required.")]
    NoAmounts,

    #[error("Invalid non-numeric amount provided.")]
    InvalidAmount,

    #[error("Start date must be before the effective end date.")]
    InvalidDateOrder,

    #[error("Calculated duration is zero or negative.")]
    ZeroDuration,
}

pub type Result<T> = std::result::Result<T, SplitError>;
