//! Decimal-safe rounding for currency values.
//!
//! Naive `(x * 100.0).round() / 100.0` rounds through the binary
//! representation, so a value like `1.005` (stored as `1.00499...`) lands on
//! `1.00` instead of `1.01`. Shifting the decimal point textually and parsing
//! back routes the operation through the decimal parser, which keeps
//! half-away-from-zero behavior at the requested decimal place.

/// Rounds `value` to `decimals` places, half away from zero.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let shifted = shift_decimal(value, decimals as i32);
    shift_decimal(shifted.round(), -(decimals as i32))
}

/// Rounds to 2 decimal places (cent precision).
pub fn round_currency(value: f64) -> f64 {
    round_to_decimals(value, 2)
}

fn shift_decimal(value: f64, exponent: i32) -> f64 {
    // `Display` for finite f64 never prints exponent notation, so the
    // composed literal always parses; plain scaling stands in otherwise.
    format!("{}e{}", value, exponent)
        .parse()
        .unwrap_or_else(|_| value * 10f64.powi(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(round_currency(0.005), 0.01);
        assert_eq!(round_currency(1.005), 1.01);
        assert_eq!(round_currency(2.675), 2.68);
        assert_eq!(round_currency(-0.005), -0.01);
        assert_eq!(round_currency(-1.005), -1.01);
    }

    #[test]
    fn test_plain_values_unchanged() {
        assert_eq!(round_currency(531.25), 531.25);
        assert_eq!(round_currency(100.0), 100.0);
        assert_eq!(round_currency(0.0), 0.0);
    }

    #[test]
    fn test_truncating_cases() {
        assert_eq!(round_currency(1847.8260869565217), 1847.83);
        assert_eq!(round_currency(150.78260869565216), 150.78);
        assert_eq!(round_currency(0.004), 0.0);
        assert_eq!(round_currency(-0.004), 0.0);
    }

    #[test]
    fn test_other_precisions() {
        assert_eq!(round_to_decimals(1.23456, 3), 1.235);
        assert_eq!(round_to_decimals(1234.5, 0), 1235.0);
        assert_eq!(round_to_decimals(0.15, 1), 0.2);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_currency(f64::NAN).is_nan());
        assert_eq!(round_currency(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_extreme_magnitudes_do_not_panic() {
        let big = round_to_decimals(1e300, 2);
        assert!(big.is_finite());
    }
}
