//! Systematic Investment Plan (SIP) projections
//!
//! Two calculators live here:
//!
//! - [`project_sip`] replays a SIP against a real NAV history, buying units at
//!   the NAV prevailing on each installment date.
//! - [`estimate_sip`] projects a SIP forward at an assumed constant rate with
//!   no NAV history involved.
//!
//! Both take an annual step-up percentage. A step-up of zero is the plain SIP,
//! so there is a single code path per calculator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::temporal::{shift_months, DateRange};
use crate::error::FundError;
use crate::nav::NavSeries;
use crate::projection::{
    annualize_saturating, checked_product, checked_sum, growth_factor, percent_change, require_positive,
    require_rate, require_step_up, ContributionFrequency, GrowthPoint,
};
use crate::{calculate_units, calculate_value};

/// Parameters for replaying a SIP against NAV history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipParams {
    /// First installment amount
    pub amount: Decimal,
    pub frequency: ContributionFrequency,
    /// Date of the first installment
    pub from: NaiveDate,
    /// Last date on which an installment may fall
    pub to: NaiveDate,
    /// Annual increase of the installment amount, in percent
    #[serde(default)]
    pub step_up_percent: Decimal,
}

impl SipParams {
    pub fn new(amount: Decimal, frequency: ContributionFrequency, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            amount,
            frequency,
            from,
            to,
            step_up_percent: Decimal::ZERO,
        }
    }

    pub fn with_step_up(mut self, percent: Decimal) -> Self {
        self.step_up_percent = percent;
        self
    }

    /// The dates between which installments fall
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` when `to` is before `from`.
    pub fn span(&self) -> Result<DateRange, FundError> {
        DateRange::new(self.from, self.to).map_err(|err| FundError::invalid_parameters(err.to_string()))
    }

    /// Validates the parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` for a non-positive amount, a negative
    /// step-up, or an end date before the start date.
    pub fn validate(&self) -> Result<(), FundError> {
        require_positive("amount", self.amount)?;
        require_step_up(self.step_up_percent)?;
        self.span()?;
        Ok(())
    }

    /// Installment dates with the amount due on each
    ///
    /// Each date is one interval after the previous one, clamped to the end
    /// of shorter months, so a start on the 31st moves to the 29th after a
    /// leap-year February and stays there.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` for a reversed span, or `CalculationError`
    /// if the stepped-up amount overflows.
    pub fn schedule(&self) -> Result<Vec<(NaiveDate, Decimal)>, FundError> {
        let span = self.span()?;
        let step = i32::try_from(self.frequency.months_between_installments()).unwrap_or(1);
        let per_year = self.frequency.installments_per_year();
        let step_up = growth_factor(self.step_up_percent);

        let mut schedule = Vec::new();
        let mut amount = self.amount;
        let mut next = Some(span.start);
        let mut k: u32 = 0;

        while let Some(date) = next.filter(|date| span.contains(*date)) {
            if k > 0 && k % per_year == 0 && !self.step_up_percent.is_zero() {
                amount = checked_product(amount, step_up, "stepped-up installment")?;
            }
            schedule.push((date, amount));
            next = shift_months(date, step);
            k += 1;
        }

        Ok(schedule)
    }
}

/// Outcome of a SIP replayed against NAV history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipProjection {
    pub total_invested: Decimal,
    pub total_units: Decimal,
    /// Units valued at the most recent usable NAV in the series
    pub current_value: Decimal,
    pub absolute_return: Decimal,
    pub annualized_return: Decimal,
    /// Installments that found a usable NAV
    pub installments: u32,
    /// True when no installment could be processed
    pub degenerate: bool,
    pub growth_over_time: Vec<GrowthPoint>,
}

/// Replays a SIP (or step-up SIP) against a NAV series
///
/// Each installment buys units at the latest usable NAV on or before its
/// date. Installments with no such NAV are skipped. When nothing could be
/// bought the result is zero-valued and flagged `degenerate`.
///
/// # Errors
///
/// Returns `InvalidParameters` when the parameters fail validation, or
/// `CalculationError` when an amount is too large to represent.
pub fn project_sip(series: &NavSeries, params: &SipParams) -> Result<SipProjection, FundError> {
    params.validate()?;
    let span = params.span()?;

    debug!(
        amount = %params.amount,
        frequency = ?params.frequency,
        from = %params.from,
        to = %params.to,
        step_up = %params.step_up_percent,
        "Projecting SIP"
    );

    let mut total_units = Decimal::ZERO;
    let mut total_invested = Decimal::ZERO;
    let mut installments = 0u32;
    let mut growth_over_time = Vec::new();

    for (date, amount) in params.schedule()? {
        let Some(observation) = series.on_or_before(date) else {
            continue;
        };

        total_units = checked_sum(total_units, calculate_units(amount, observation.nav)?, "total units")?;
        total_invested = checked_sum(total_invested, amount, "total invested")?;
        installments += 1;

        growth_over_time.push(GrowthPoint {
            date,
            invested: total_invested,
            value: calculate_value(total_units, observation.nav)?,
        });
    }

    let current_value = match series.latest_usable() {
        Some(latest) => calculate_value(total_units, latest.nav)?,
        None => Decimal::ZERO,
    };

    let degenerate = total_invested.is_zero();
    let years = span.years();

    let absolute_return = percent_change(total_invested, current_value);
    let annualized_return = if degenerate || years <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        current_value
            .checked_div(total_invested)
            .map_or(Decimal::MAX, |ratio| annualize_saturating(ratio, Decimal::ONE / years))
    };

    debug!(
        %total_invested,
        %current_value,
        installments,
        degenerate,
        "SIP projection complete"
    );

    Ok(SipProjection {
        total_invested,
        total_units,
        current_value,
        absolute_return,
        annualized_return,
        installments,
        degenerate,
        growth_over_time,
    })
}

/// Parameters for a rate-based SIP estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipEstimateParams {
    /// Installment in the first year
    pub monthly_amount: Decimal,
    /// Assumed annual return, in percent
    pub annual_rate: Decimal,
    pub tenure_years: u32,
    #[serde(default)]
    pub step_up_percent: Decimal,
}

/// Installment, cumulative investment and corpus at the end of a year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipEstimateYear {
    pub year: u32,
    pub monthly_installment: Decimal,
    pub invested: Decimal,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipEstimate {
    pub total_invested: Decimal,
    pub future_value: Decimal,
    pub estimated_gains: Decimal,
    pub yearly: Vec<SipEstimateYear>,
}

/// Projects a monthly SIP at a constant assumed rate
///
/// The corpus compounds monthly at `annual_rate / 12` and each installment
/// is added after that month's growth. The installment grows by the
/// step-up percentage at the start of every year after the first.
///
/// # Errors
///
/// Returns `InvalidParameters` for a non-positive amount or tenure, a
/// negative step-up, or a rate at or below -100%. Returns
/// `CalculationError` when the corpus grows past what can be represented.
pub fn estimate_sip(params: &SipEstimateParams) -> Result<SipEstimate, FundError> {
    require_positive("monthlyAmount", params.monthly_amount)?;
    require_rate(params.annual_rate)?;
    require_step_up(params.step_up_percent)?;
    if params.tenure_years == 0 {
        return Err(FundError::invalid_parameters("tenureYears must be positive"));
    }

    let monthly_factor = Decimal::ONE + params.annual_rate / dec!(12) / dec!(100);
    let step_up = growth_factor(params.step_up_percent);
    let months = params
        .tenure_years
        .checked_mul(12)
        .ok_or_else(|| FundError::invalid_parameters("tenureYears is too large"))?;

    let mut installment = params.monthly_amount;
    let mut corpus = Decimal::ZERO;
    let mut invested = Decimal::ZERO;
    let mut yearly = Vec::with_capacity(params.tenure_years as usize);

    for month in 1..=months {
        if month > 1 && (month - 1) % 12 == 0 && !params.step_up_percent.is_zero() {
            installment = checked_product(installment, step_up, "stepped-up installment")?;
        }

        corpus = checked_sum(checked_product(corpus, monthly_factor, "corpus")?, installment, "corpus")?;
        invested = checked_sum(invested, installment, "total invested")?;

        if month % 12 == 0 {
            yearly.push(SipEstimateYear {
                year: month / 12,
                monthly_installment: installment.round_dp(2),
                invested: invested.round_dp(2),
                value: corpus.round_dp(2),
            });
        }
    }

    let future_value = corpus.round_dp(2);
    let total_invested = invested.round_dp(2);

    debug!(%total_invested, %future_value, "SIP estimate complete");

    Ok(SipEstimate {
        total_invested,
        future_value,
        estimated_gains: future_value - total_invested,
        yearly,
    })
}
