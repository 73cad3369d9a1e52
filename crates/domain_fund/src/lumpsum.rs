//! Lump-sum projection at a constant annual rate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FundError;
use crate::projection::{growth_factor, require_positive, require_rate, YearlyValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpSumParams {
    pub principal: Decimal,
    /// Assumed annual return, in percent
    pub annual_rate: Decimal,
    pub tenure_years: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpSumProjection {
    pub principal: Decimal,
    pub future_value: Decimal,
    pub total_gain: Decimal,
    /// One point per whole year, starting at year 0
    pub growth_over_time: Vec<YearlyValue>,
}

/// Compounds a one-time investment annually
///
/// `future_value = principal * (1 + rate/100)^tenure`, with the growth series
/// holding the value at the end of every year from 0 to `tenure`.
///
/// # Errors
///
/// Returns `InvalidParameters` for a non-positive principal or a rate at or
/// below -100%.
pub fn project_lump_sum(params: &LumpSumParams) -> Result<LumpSumProjection, FundError> {
    require_positive("principal", params.principal)?;
    require_rate(params.annual_rate)?;

    let factor = growth_factor(params.annual_rate);
    let mut value = params.principal;
    let mut growth_over_time = Vec::with_capacity(params.tenure_years as usize + 1);
    growth_over_time.push(YearlyValue {
        year: 0,
        value: value.round_dp(2),
    });

    for year in 1..=params.tenure_years {
        value = value
            .checked_mul(factor)
            .ok_or_else(|| FundError::CalculationError(format!("value overflow in year {}", year)))?;
        growth_over_time.push(YearlyValue {
            year,
            value: value.round_dp(2),
        });
    }

    let future_value = value.round_dp(2);

    debug!(
        principal = %params.principal,
        rate = %params.annual_rate,
        tenure_years = params.tenure_years,
        %future_value,
        "Lump-sum projection complete"
    );

    Ok(LumpSumProjection {
        principal: params.principal,
        future_value,
        total_gain: future_value - params.principal.round_dp(2),
        growth_over_time,
    })
}
