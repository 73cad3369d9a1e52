//! Systematic Withdrawal Plan (SWP) simulation
//!
//! The corpus is simulated month by month: the withdrawal is taken first,
//! then the remainder grows at `annual_rate / 12`. A withdrawal that empties
//! the corpus ends the simulation. The withdrawal can step up once a year;
//! a step-up of zero is the plain SWP.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FundError;
use crate::projection::{checked_product, checked_sum, growth_factor, require_positive, require_rate, require_step_up};

/// Sampling interval of the plain SWP series, in months
pub const PLAIN_SAMPLE_MONTHS: u32 = 6;
/// Sampling interval of the step-up SWP series, in months
pub const STEP_UP_SAMPLE_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpParams {
    /// Initial corpus
    pub corpus: Decimal,
    /// Withdrawal taken every month in the first year
    pub withdrawal: Decimal,
    /// Assumed annual return, in percent
    pub annual_rate: Decimal,
    pub tenure_years: u32,
    #[serde(default)]
    pub step_up_percent: Decimal,
    /// Overrides the default sampling interval of the series
    #[serde(default)]
    pub sample_every_months: Option<u32>,
}

impl SwpParams {
    pub fn new(corpus: Decimal, withdrawal: Decimal, annual_rate: Decimal, tenure_years: u32) -> Self {
        Self {
            corpus,
            withdrawal,
            annual_rate,
            tenure_years,
            step_up_percent: Decimal::ZERO,
            sample_every_months: None,
        }
    }

    pub fn with_step_up(mut self, percent: Decimal) -> Self {
        self.step_up_percent = percent;
        self
    }

    /// Validates the parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` for a non-positive corpus, withdrawal or
    /// tenure, a negative step-up, a zero sampling interval, or a rate at or
    /// below -100%.
    pub fn validate(&self) -> Result<(), FundError> {
        require_positive("corpus", self.corpus)?;
        require_positive("withdrawal", self.withdrawal)?;
        require_rate(self.annual_rate)?;
        require_step_up(self.step_up_percent)?;
        if self.tenure_years == 0 {
            return Err(FundError::invalid_parameters("tenureYears must be positive"));
        }
        if self.sample_every_months == Some(0) {
            return Err(FundError::invalid_parameters("sampleEveryMonths must be positive"));
        }
        Ok(())
    }

    /// Months between two points of the output series
    pub fn sample_interval(&self) -> u32 {
        self.sample_every_months.unwrap_or(if self.step_up_percent.is_zero() {
            PLAIN_SAMPLE_MONTHS
        } else {
            STEP_UP_SAMPLE_MONTHS
        })
    }
}

/// Corpus state after a simulated month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpPoint {
    /// `"M6"` style for sub-year intervals, `"Y2"` on year boundaries
    pub label: String,
    pub month: u32,
    pub corpus: Decimal,
    /// Cumulative amount withdrawn
    pub withdrawn: Decimal,
    /// Withdrawal in effect for this month
    pub withdrawal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpProjection {
    pub remaining_corpus: Decimal,
    pub total_withdrawn: Decimal,
    /// True when the corpus ran out before the tenure ended
    pub depleted: bool,
    pub months_simulated: u32,
    pub series: Vec<SwpPoint>,
}

fn label_for(month: u32) -> String {
    if month > 0 && month % 12 == 0 {
        format!("Y{}", month / 12)
    } else {
        format!("M{}", month)
    }
}

fn point(month: u32, corpus: Decimal, withdrawn: Decimal, withdrawal: Decimal) -> SwpPoint {
    SwpPoint {
        label: label_for(month),
        month,
        corpus: corpus.round_dp(2),
        withdrawn: withdrawn.round_dp(2),
        withdrawal: withdrawal.round_dp(2),
    }
}

/// Simulates monthly withdrawals from a compounding corpus
///
/// The series starts with a month-0 point, then one point per sampling
/// interval, and always ends on the last simulated month.
///
/// # Errors
///
/// Returns `InvalidParameters` when the parameters fail validation, or
/// `CalculationError` when the corpus grows past what can be represented.
pub fn project_swp(params: &SwpParams) -> Result<SwpProjection, FundError> {
    params.validate()?;

    debug!(
        corpus = %params.corpus,
        withdrawal = %params.withdrawal,
        rate = %params.annual_rate,
        tenure_years = params.tenure_years,
        step_up = %params.step_up_percent,
        "Projecting SWP"
    );

    let monthly_factor = Decimal::ONE + params.annual_rate / dec!(12) / dec!(100);
    let step_up = growth_factor(params.step_up_percent);
    let interval = params.sample_interval();
    let months = params
        .tenure_years
        .checked_mul(12)
        .ok_or_else(|| FundError::invalid_parameters("tenureYears is too large"))?;

    let mut corpus = params.corpus;
    let mut withdrawal = params.withdrawal;
    let mut total_withdrawn = Decimal::ZERO;
    let mut depleted = false;
    let mut months_simulated = 0;
    let mut series = vec![point(0, corpus, total_withdrawn, withdrawal)];

    for month in 1..=months {
        if month > 1 && (month - 1) % 12 == 0 && !params.step_up_percent.is_zero() {
            withdrawal = checked_product(withdrawal, step_up, "stepped-up withdrawal")?;
        }

        corpus -= withdrawal;
        total_withdrawn = checked_sum(total_withdrawn, withdrawal, "total withdrawn")?;
        months_simulated = month;

        if corpus <= Decimal::ZERO {
            corpus = Decimal::ZERO;
            depleted = true;
            series.push(point(month, corpus, total_withdrawn, withdrawal));
            break;
        }

        corpus = checked_product(corpus, monthly_factor, "corpus")?;

        if month % interval == 0 {
            series.push(point(month, corpus, total_withdrawn, withdrawal));
        }
    }

    if series.last().map(|p| p.month) != Some(months_simulated) {
        series.push(point(months_simulated, corpus, total_withdrawn, withdrawal));
    }

    let remaining_corpus = corpus.round_dp(2);
    let total_withdrawn = total_withdrawn.round_dp(2);

    debug!(
        %remaining_corpus,
        %total_withdrawn,
        depleted,
        months_simulated,
        "SWP projection complete"
    );

    Ok(SwpProjection {
        remaining_corpus,
        total_withdrawn,
        depleted,
        months_simulated,
        series,
    })
}
