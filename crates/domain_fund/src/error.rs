//! Fund domain errors

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in the fund domain
///
/// Input errors (`InvalidPeriod`, `MissingDateRange`, `InvalidParameters`)
/// are terminal for a request. Sparse history is reported through
/// `EmptySeries` / `NoUsableObservation` only where no degenerate result
/// can be produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FundError {
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Provide either a period or both from and to dates")]
    MissingDateRange,

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("NAV series is empty")]
    EmptySeries,

    #[error("No usable NAV on or before {0}")]
    NoUsableObservation(NaiveDate),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

impl FundError {
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        FundError::InvalidParameters(message.into())
    }

    /// Returns true if the error was caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FundError::InvalidPeriod(_) | FundError::MissingDateRange | FundError::InvalidParameters(_)
        )
    }
}
