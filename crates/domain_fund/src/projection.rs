//! Shared building blocks for the projectors
//!
//! Percent conversion, annualization, contribution schedules and the
//! time-series point types returned by the SIP, lump-sum and SWP projectors.

use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FundError;

/// Decimal places kept for percentages in results
pub const PERCENT_PRECISION: u32 = 4;

/// How often a periodic contribution is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionFrequency {
    /// One installment per calendar month
    Monthly,
    /// One installment every three calendar months
    Quarterly,
}

impl ContributionFrequency {
    /// Calendar months between two installments
    pub fn months_between_installments(&self) -> u32 {
        match self {
            ContributionFrequency::Monthly => 1,
            ContributionFrequency::Quarterly => 3,
        }
    }

    /// Number of installments in one year
    pub fn installments_per_year(&self) -> u32 {
        12 / self.months_between_installments()
    }
}

/// Value of an investment on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub date: NaiveDate,
    /// Cumulative amount invested up to and including this date
    pub invested: Decimal,
    /// Market value of all units held on this date
    pub value: Decimal,
}

/// Value of an investment at the end of a whole year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyValue {
    pub year: u32,
    pub value: Decimal,
}

/// Converts a percentage into a growth factor (`12` -> `1.12`)
pub fn growth_factor(percent: Decimal) -> Decimal {
    Decimal::ONE + percent / dec!(100)
}

/// Percentage change from `start` to `end`, zero when `start` is zero
///
/// Saturates at the `Decimal` bounds instead of overflowing.
pub fn percent_change(start: Decimal, end: Decimal) -> Decimal {
    if start.is_zero() {
        return Decimal::ZERO;
    }
    end.checked_sub(start)
        .and_then(|change| change.checked_div(start))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(round_percent)
        .unwrap_or(if (end > start) == start.is_sign_positive() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

/// Annualized percentage for a growth `ratio` raised to `exponent`
///
/// Computes `(ratio^exponent - 1) * 100`.
///
/// # Errors
///
/// Returns `FundError::CalculationError` if the power overflows or the
/// ratio is negative.
pub fn annualize(ratio: Decimal, exponent: Decimal) -> Result<Decimal, FundError> {
    if ratio.is_sign_negative() && !ratio.is_zero() {
        return Err(FundError::CalculationError(format!(
            "cannot annualize negative growth ratio {}",
            ratio
        )));
    }
    if ratio.is_zero() {
        return Ok(dec!(-100));
    }

    ratio
        .checked_powd(exponent)
        .map(|compounded| round_percent((compounded - Decimal::ONE) * dec!(100)))
        .ok_or_else(|| {
            FundError::CalculationError(format!(
                "overflow raising {} to the power {}",
                ratio, exponent
            ))
        })
}

/// Annualized percentage that never fails for a non-negative ratio
///
/// Falls back to floating point when the exact power overflows, and
/// saturates at `Decimal::MAX` when even that is out of range. Very short
/// spans with large gains land here.
pub fn annualize_saturating(ratio: Decimal, exponent: Decimal) -> Decimal {
    if let Ok(annual) = annualize(ratio, exponent) {
        return annual;
    }

    let approximate = match (ratio.to_f64(), exponent.to_f64()) {
        (Some(ratio), Some(exponent)) => (ratio.max(0.0).powf(exponent) - 1.0) * 100.0,
        _ => f64::INFINITY,
    };
    Decimal::from_f64(approximate)
        .map(round_percent)
        .unwrap_or(if approximate < 0.0 { dec!(-100) } else { Decimal::MAX })
}

/// `value * factor`, or a `CalculationError` naming `what` on overflow
pub(crate) fn checked_product(value: Decimal, factor: Decimal, what: &str) -> Result<Decimal, FundError> {
    value
        .checked_mul(factor)
        .ok_or_else(|| FundError::CalculationError(format!("{} overflowed", what)))
}

/// `total + amount`, or a `CalculationError` naming `what` on overflow
pub(crate) fn checked_sum(total: Decimal, amount: Decimal, what: &str) -> Result<Decimal, FundError> {
    total
        .checked_add(amount)
        .ok_or_else(|| FundError::CalculationError(format!("{} overflowed", what)))
}

/// Rounds a percentage to [`PERCENT_PRECISION`] decimal places
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp(PERCENT_PRECISION)
}

/// Rejects amounts that are zero or negative
pub(crate) fn require_positive(field: &str, value: Decimal) -> Result<(), FundError> {
    if value <= Decimal::ZERO {
        return Err(FundError::invalid_parameters(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Rejects negative step-up percentages
pub(crate) fn require_step_up(value: Decimal) -> Result<(), FundError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FundError::invalid_parameters(format!(
            "stepUpPercent must not be negative, got {}",
            value
        )));
    }
    Ok(())
}

/// Rejects annual rates at or below -100%, which would wipe out or invert the corpus
pub(crate) fn require_rate(value: Decimal) -> Result<(), FundError> {
    if value <= dec!(-100) {
        return Err(FundError::invalid_parameters(format!(
            "rate must be greater than -100, got {}",
            value
        )));
    }
    Ok(())
}
