//! Custom Test Assertions
//!
//! Provides assertion helpers for decimals and NAV-derived output that give
//! more meaningful failure messages than a bare `assert!`.

use domain_fund::{GrowthPoint, NavSeries};
use rust_decimal::Decimal;

/// Asserts that two decimals are equal within a tolerance
///
/// # Arguments
///
/// * `actual` - The computed value
/// * `expected` - The expected value
/// * `tolerance` - The allowed absolute difference
///
/// # Panics
///
/// Panics if the values differ by more than `tolerance`
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a decimal is not negative
pub fn assert_non_negative(value: Decimal, what: &str) {
    assert!(
        !value.is_sign_negative() || value.is_zero(),
        "Expected {} to be non-negative, got {}",
        what,
        value
    );
}

/// Asserts that a series is strictly ascending by date
pub fn assert_series_ascending(series: &NavSeries) {
    let observations = series.observations();
    for pair in observations.windows(2) {
        assert!(
            pair[0].date < pair[1].date,
            "Series out of order: {} followed by {}",
            pair[0].date,
            pair[1].date
        );
    }
}

/// Asserts that cumulative invested amounts never decrease
pub fn assert_invested_non_decreasing(points: &[GrowthPoint]) {
    for pair in points.windows(2) {
        assert!(
            pair[1].invested >= pair[0].invested,
            "Invested amount decreased from {} on {} to {} on {}",
            pair[0].invested,
            pair[0].date,
            pair[1].invested,
            pair[1].date
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_approx_eq_within_tolerance() {
        assert_decimal_approx_eq(dec!(310584.8207), dec!(310584.82), dec!(0.01));
    }

    #[test]
    #[should_panic(expected = "differ by more than tolerance")]
    fn test_approx_eq_outside_tolerance() {
        assert_decimal_approx_eq(dec!(1.5), dec!(1.0), dec!(0.1));
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_non_negative_rejects_negative() {
        assert_non_negative(dec!(-0.01), "corpus");
    }
}
