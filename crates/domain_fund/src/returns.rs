//! Point-to-point returns over named trailing periods or explicit dates
//!
//! A named period is resolved against the most recent observation in the
//! series (the anchor): the start date is the anchor shifted back by the
//! period's calendar offset and the end date is the anchor itself. Both
//! resolution paths then share the same lookup, so a period and its resolved
//! dates always produce the same figures.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::temporal::{days_between, shift_months};
use crate::error::FundError;
use crate::nav::NavSeries;
use crate::projection::{annualize, percent_change};

/// Spans shorter than this are not annualized
pub const MIN_ANNUALIZATION_DAYS: i64 = 30;

/// Named trailing windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Period {
    /// All named periods, shortest first
    pub const ALL: [Period; 6] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::ThreeYears,
        Period::FiveYears,
    ];

    /// Token used in requests (`"1m"`, `"3y"`, ...)
    pub fn token(&self) -> &'static str {
        match self {
            Period::OneMonth => "1m",
            Period::ThreeMonths => "3m",
            Period::SixMonths => "6m",
            Period::OneYear => "1y",
            Period::ThreeYears => "3y",
            Period::FiveYears => "5y",
        }
    }

    /// Calendar offset of the period in months
    pub fn months(&self) -> i32 {
        match self {
            Period::OneMonth => 1,
            Period::ThreeMonths => 3,
            Period::SixMonths => 6,
            Period::OneYear => 12,
            Period::ThreeYears => 36,
            Period::FiveYears => 60,
        }
    }

    /// Start date of the period ending on `anchor`
    pub fn start_from(&self, anchor: NaiveDate) -> Option<NaiveDate> {
        shift_months(anchor, -self.months())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Period {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.token() == token)
            .ok_or_else(|| FundError::InvalidPeriod(s.to_string()))
    }
}

/// The window a returns request covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnWindow {
    /// Trailing period anchored at the latest observation
    Trailing(Period),
    /// Explicit start and end dates
    Between { from: NaiveDate, to: NaiveDate },
}

impl ReturnWindow {
    /// Builds a window from raw request parameters
    ///
    /// A period token takes precedence over dates. Without a period, both
    /// `from` and `to` are required.
    ///
    /// # Errors
    ///
    /// * `InvalidPeriod` - unknown period token
    /// * `MissingDateRange` - no period and at least one date missing
    /// * `InvalidParameters` - `from` after `to`
    pub fn from_request(
        period: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Self, FundError> {
        if let Some(token) = period.filter(|t| !t.trim().is_empty()) {
            return Ok(ReturnWindow::Trailing(token.parse()?));
        }

        match (from, to) {
            (Some(from), Some(to)) if from > to => Err(FundError::invalid_parameters(format!(
                "from {} must not be after to {}",
                from, to
            ))),
            (Some(from), Some(to)) => Ok(ReturnWindow::Between { from, to }),
            _ => Err(FundError::MissingDateRange),
        }
    }

    /// Resolves the window to concrete start and end dates
    ///
    /// # Errors
    ///
    /// Returns `EmptySeries` when a trailing period has no anchor.
    pub fn resolve(&self, series: &NavSeries) -> Result<(NaiveDate, NaiveDate), FundError> {
        match *self {
            ReturnWindow::Between { from, to } => Ok((from, to)),
            ReturnWindow::Trailing(period) => {
                let anchor = series.latest().ok_or(FundError::EmptySeries)?.date;
                let start = period.start_from(anchor).ok_or_else(|| {
                    FundError::CalculationError(format!("cannot shift {} back by {}", anchor, period))
                })?;
                Ok((start, anchor))
            }
        }
    }
}

/// Realized return between two dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsResult {
    /// Requested start of the window
    pub start_date: NaiveDate,
    /// Requested end of the window
    pub end_date: NaiveDate,
    /// Date of the observation used as the starting NAV
    pub start_nav_date: NaiveDate,
    /// Date of the observation used as the ending NAV
    pub end_nav_date: NaiveDate,
    pub start_nav: Decimal,
    pub end_nav: Decimal,
    /// `(end - start) / start * 100`
    pub simple_return: Decimal,
    /// Compound annual rate, absent for spans under 30 days
    pub annualized_return: Option<Decimal>,
}

/// Computes the simple and annualized return for a window
///
/// Each boundary uses the latest usable observation on or before its date.
/// When the start date precedes the available history, the oldest usable
/// observation is used instead.
///
/// # Errors
///
/// * `EmptySeries` - no observations at all
/// * `NoUsableObservation` - nothing usable on or before the end date
pub fn calculate_returns(series: &NavSeries, window: &ReturnWindow) -> Result<ReturnsResult, FundError> {
    if series.is_empty() {
        return Err(FundError::EmptySeries);
    }

    let (start_date, end_date) = window.resolve(series)?;

    let end = series
        .on_or_before(end_date)
        .ok_or(FundError::NoUsableObservation(end_date))?;
    let start = series
        .on_or_before(start_date)
        .or_else(|| series.earliest_usable())
        .ok_or(FundError::NoUsableObservation(start_date))?;

    let simple_return = percent_change(start.nav, end.nav);

    let days = days_between(start_date, end_date);
    let annualized_return = if days >= MIN_ANNUALIZATION_DAYS {
        let exponent = dec!(365) / Decimal::from(days);
        Some(annualize(end.nav / start.nav, exponent)?)
    } else {
        None
    };

    debug!(
        %start_date,
        %end_date,
        start_nav = %start.nav,
        end_nav = %end.nav,
        %simple_return,
        "Calculated returns"
    );

    Ok(ReturnsResult {
        start_date,
        end_date,
        start_nav_date: start.date,
        end_nav_date: end.date,
        start_nav: start.nav,
        end_nav: end.nav,
        simple_return,
        annualized_return,
    })
}

/// Return for one named period in a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReturn {
    pub period: Period,
    /// Absent when the period could not be computed for this series
    pub result: Option<ReturnsResult>,
}

/// Computes the trailing return for every named period
///
/// Periods that fail individually are reported without a result so that
/// one short history does not hide the periods that are available.
pub fn returns_summary(series: &NavSeries) -> Vec<PeriodReturn> {
    Period::ALL
        .iter()
        .map(|&period| {
            let result = calculate_returns(series, &ReturnWindow::Trailing(period));
            if let Err(e) = &result {
                debug!(period = %period, error = %e, "Period return unavailable");
            }
            PeriodReturn {
                period,
                result: result.ok(),
            }
        })
        .collect()
}
