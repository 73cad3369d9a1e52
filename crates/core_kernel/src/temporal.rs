//! Calendar arithmetic for NAV dates
//!
//! Fund prices are published once per business day, so every calculation in
//! the system works on `NaiveDate` rather than timestamps. This module holds
//! the date helpers shared by the calculators:
//!
//! - month shifts that clamp to the last day of shorter months
//! - whole-day spans between two dates
//! - fractional years measured in calendar months
//! - parsing of the date formats published by the upstream provider

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date formats accepted from the upstream provider, tried in order
const NAV_DATE_FORMATS: [&str; 2] = ["%d-%m-%Y", "%Y-%m-%d"];

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid range: start {start} must not be after end {end}")]
    InvalidRange {
        start: String,
        end: String,
    },

    #[error("Unparseable date: {0}")]
    InvalidDate(String),

    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// Shifts a date by a signed number of calendar months
///
/// The day of month is clamped when the target month is shorter, so
/// 31 January plus one month is 28 (or 29) February.
///
/// # Returns
///
/// `None` if the result falls outside the representable date range
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

/// Number of whole days from `start` to `end` (negative if `end` is earlier)
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Number of whole calendar months from `start` to `end`
///
/// A month only counts once the same day-of-month (or the clamped month end)
/// has been reached.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    if end <= start {
        return 0;
    }

    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    while months > 0 && shift_months(start, months).map_or(true, |anchor| anchor > end) {
        months -= 1;
    }
    months
}

/// Elapsed years between two dates, including the fractional part
///
/// Whole calendar months are counted first; the remainder is the share of
/// the following month that has elapsed. The total is divided by twelve.
/// Returns zero when `end` is not after `start`.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use core_kernel::temporal::fractional_years;
/// use rust_decimal_macros::dec;
///
/// let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2021, 7, 1).unwrap();
/// assert_eq!(fractional_years(start, end), dec!(1.5));
/// ```
pub fn fractional_years(start: NaiveDate, end: NaiveDate) -> Decimal {
    if end <= start {
        return Decimal::ZERO;
    }

    let months = whole_months_between(start, end);
    let (anchor, next) = match (shift_months(start, months), shift_months(start, months + 1)) {
        (Some(anchor), Some(next)) => (anchor, next),
        _ => return Decimal::from(months) / dec!(12),
    };

    let span = days_between(anchor, next);
    let partial = if span > 0 {
        Decimal::from(days_between(anchor, end)) / Decimal::from(span)
    } else {
        Decimal::ZERO
    };

    (Decimal::from(months) + partial) / dec!(12)
}

/// Parses a NAV date as published by the provider (`DD-MM-YYYY`) or in ISO form
pub fn parse_nav_date(raw: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = raw.trim();
    NAV_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| TemporalError::InvalidDate(raw.to_string()))
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting an end date before the start date
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        days_between(self.start, self.end)
    }

    /// Elapsed years covered by the range, see [`fractional_years`]
    pub fn years(&self) -> Decimal {
        fractional_years(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_shift_months_clamps_to_month_end() {
        assert_eq!(shift_months(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
        assert_eq!(shift_months(date(2023, 3, 31), -1), Some(date(2023, 2, 28)));
    }

    #[test]
    fn test_whole_months_between() {
        assert_eq!(whole_months_between(date(2024, 1, 15), date(2024, 4, 14)), 2);
        assert_eq!(whole_months_between(date(2024, 1, 15), date(2024, 4, 15)), 3);
        assert_eq!(whole_months_between(date(2024, 4, 15), date(2024, 1, 15)), 0);
    }

    #[test]
    fn test_fractional_years_whole_year() {
        assert_eq!(fractional_years(date(2023, 1, 1), date(2024, 1, 1)), dec!(1));
    }

    #[test]
    fn test_fractional_years_reversed_is_zero() {
        assert_eq!(fractional_years(date(2024, 1, 1), date(2023, 1, 1)), Decimal::ZERO);
    }

    #[test]
    fn test_parse_nav_date_formats() {
        assert_eq!(parse_nav_date("25-09-2025"), Ok(date(2025, 9, 25)));
        assert_eq!(parse_nav_date("2025-09-25"), Ok(date(2025, 9, 25)));
        assert!(parse_nav_date("25/09/2025").is_err());
    }

    #[test]
    fn test_date_range_rejects_reversed() {
        assert!(DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).is_err());
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert_eq!(range.days(), 0);
        assert!(range.contains(date(2024, 1, 1)));
    }
}
