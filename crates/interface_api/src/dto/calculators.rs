//! Calculator DTOs
//!
//! Rates are annual percentages (`12` means 12% a year). Responses are the
//! domain projections serialized as they are.

use domain_fund::{LumpSumParams, SipEstimateParams, SwpParams};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use super::{validate_rate, validate_step_up};

/// Longest tenure accepted by the calculators
pub const MAX_TENURE_YEARS: u32 = 100;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LumpSumRequest {
    pub principal: Decimal,
    #[serde(alias = "annualRate")]
    #[validate(custom(function = "validate_rate"))]
    pub rate: Decimal,
    #[validate(range(max = 100))]
    pub tenure_years: u32,
}

impl LumpSumRequest {
    pub fn to_params(&self) -> LumpSumParams {
        LumpSumParams {
            principal: self.principal,
            annual_rate: self.rate,
            tenure_years: self.tenure_years,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SwpRequest {
    pub corpus: Decimal,
    pub withdrawal: Decimal,
    #[serde(alias = "annualRate")]
    #[validate(custom(function = "validate_rate"))]
    pub rate: Decimal,
    #[validate(range(max = 100))]
    pub tenure_years: u32,
    #[validate(custom(function = "validate_step_up"))]
    pub step_up_percent: Option<Decimal>,
    /// Months between points of the returned series
    #[validate(range(min = 1, max = 120))]
    pub sample_every_months: Option<u32>,
}

impl SwpRequest {
    pub fn to_params(&self) -> SwpParams {
        let mut params = SwpParams::new(self.corpus, self.withdrawal, self.rate, self.tenure_years)
            .with_step_up(self.step_up_percent.unwrap_or_default());
        params.sample_every_months = self.sample_every_months;
        params
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SipEstimateRequest {
    #[serde(alias = "amount")]
    pub monthly_amount: Decimal,
    #[serde(alias = "annualRate")]
    #[validate(custom(function = "validate_rate"))]
    pub rate: Decimal,
    #[validate(range(max = 100))]
    pub tenure_years: u32,
    #[validate(custom(function = "validate_step_up"))]
    pub step_up_percent: Option<Decimal>,
}

impl SipEstimateRequest {
    pub fn to_params(&self) -> SipEstimateParams {
        SipEstimateParams {
            monthly_amount: self.monthly_amount,
            annual_rate: self.rate,
            tenure_years: self.tenure_years,
            step_up_percent: self.step_up_percent.unwrap_or_default(),
        }
    }
}
