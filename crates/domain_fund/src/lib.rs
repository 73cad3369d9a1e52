//! Fund Analytics Domain
//!
//! This crate holds the calculation core for mutual fund analysis: realized
//! returns from NAV history and projections of systematic investment and
//! withdrawal strategies.
//!
//! # Key Concepts
//!
//! - **NAV**: Net Asset Value per unit, published daily per scheme
//! - **Returns**: Simple and annualized change between two dates
//! - **Rolling Returns**: A trailing-window return at every observation
//! - **SIP**: Periodic contributions converted into units at the prevailing NAV
//! - **Lump Sum**: One-time investment compounding at an assumed rate
//! - **SWP**: Periodic withdrawals from a corpus compounding at an assumed rate
//!
//! Every calculator is a pure function of its inputs. Replaying the same
//! inputs always reproduces the same output.
//!
//! # Unit Precision
//!
//! Units are stored with 6 decimal places:
//! - Installment: 1,000
//! - NAV: 15.45
//! - Units: 64.724919

pub mod error;
pub mod lumpsum;
pub mod nav;
pub mod ports;
pub mod projection;
pub mod returns;
pub mod rolling;
pub mod scheme;
pub mod sip;
pub mod swp;

pub use error::FundError;
pub use lumpsum::{project_lump_sum, LumpSumParams, LumpSumProjection};
pub use nav::{NavObservation, NavSeries};
pub use ports::{SchemeDataPort, SchemeDataPortExt};
pub use projection::{ContributionFrequency, GrowthPoint, YearlyValue};
pub use returns::{calculate_returns, returns_summary, Period, PeriodReturn, ReturnWindow, ReturnsResult};
pub use rolling::{rolling_returns, RollingPoint};
pub use scheme::{SchemeDetails, SchemeMeta, SchemePage, SchemeQuery, SchemeSummary};
pub use sip::{estimate_sip, project_sip, SipEstimate, SipEstimateParams, SipEstimateYear, SipParams, SipProjection};
pub use swp::{project_swp, SwpParams, SwpPoint, SwpProjection};

use rust_decimal::Decimal;

/// Standard unit precision (6 decimal places)
pub const UNIT_PRECISION: u32 = 6;

/// Currency precision used for reported values
pub const CURRENCY_PRECISION: u32 = 2;

/// Rounds a value to standard unit precision
pub fn round_units(value: Decimal) -> Decimal {
    value.round_dp(UNIT_PRECISION)
}

/// Calculates units bought by `amount` at `nav`
///
/// # Arguments
///
/// * `amount` - The monetary amount to convert
/// * `nav` - The Net Asset Value per unit
///
/// # Returns
///
/// The number of units (rounded to 6 decimal places), or zero for a zero NAV
///
/// # Errors
///
/// Returns `FundError::CalculationError` if the unit count is not representable
///
/// # Example
///
/// ```rust
/// use domain_fund::calculate_units;
/// use rust_decimal_macros::dec;
///
/// let units = calculate_units(dec!(1000), dec!(15.45)).unwrap();
/// assert_eq!(units, dec!(64.724919));
/// ```
pub fn calculate_units(amount: Decimal, nav: Decimal) -> Result<Decimal, FundError> {
    if nav.is_zero() {
        return Ok(Decimal::ZERO);
    }
    amount
        .checked_div(nav)
        .map(round_units)
        .ok_or_else(|| FundError::CalculationError(format!("units for {} at NAV {} overflowed", amount, nav)))
}

/// Market value of `units` at `nav`, rounded to currency precision
///
/// # Errors
///
/// Returns `FundError::CalculationError` if the value is not representable
pub fn calculate_value(units: Decimal, nav: Decimal) -> Result<Decimal, FundError> {
    units
        .checked_mul(nav)
        .map(|value| value.round_dp(CURRENCY_PRECISION))
        .ok_or_else(|| FundError::CalculationError(format!("value of {} units at NAV {} overflowed", units, nav)))
}
