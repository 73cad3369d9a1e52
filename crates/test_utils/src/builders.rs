//! Test Data Builders
//!
//! Provides builder patterns for constructing NAV histories and scheme data
//! with sensible defaults. Tests specify only the fields they care about.

use chrono::{Duration, NaiveDate};
use core_kernel::temporal::shift_months;
use core_kernel::SchemeCode;
use domain_fund::{NavObservation, NavSeries, SchemeDetails, SchemeMeta};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{DateFixtures, SchemeFixtures};

/// Spacing between generated observations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    Days(u32),
    Months(u32),
}

/// Builder for NAV series
///
/// Generated observations start at `start` and are spaced by `spacing`. Each
/// NAV is the previous one grown by `growth_percent`. Explicit observations
/// added with [`with_observation`](Self::with_observation) are merged in
/// ahead of the generated ones, so they win on duplicate dates.
#[derive(Debug, Clone)]
pub struct NavSeriesBuilder {
    start: NaiveDate,
    spacing: Spacing,
    count: u32,
    initial_nav: Decimal,
    growth_percent: Decimal,
    extra: Vec<NavObservation>,
}

impl Default for NavSeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NavSeriesBuilder {
    /// Creates a builder for 12 monthly observations at a flat NAV of 10
    pub fn new() -> Self {
        Self {
            start: DateFixtures::history_start(),
            spacing: Spacing::Months(1),
            count: 12,
            initial_nav: dec!(10),
            growth_percent: Decimal::ZERO,
            extra: Vec::new(),
        }
    }

    pub fn starting(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    /// Observations every `days` calendar days
    pub fn daily(mut self, days: u32) -> Self {
        self.spacing = Spacing::Days(days.max(1));
        self
    }

    /// Observations every `months` calendar months
    pub fn monthly(mut self, months: u32) -> Self {
        self.spacing = Spacing::Months(months.max(1));
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_initial_nav(mut self, nav: Decimal) -> Self {
        self.initial_nav = nav;
        self
    }

    /// Growth applied between consecutive generated observations, in percent
    pub fn with_growth(mut self, percent: Decimal) -> Self {
        self.growth_percent = percent;
        self
    }

    pub fn with_observation(mut self, date: NaiveDate, nav: Decimal) -> Self {
        self.extra.push(NavObservation::new(date, nav));
        self
    }

    fn date_at(&self, index: u32) -> Option<NaiveDate> {
        match self.spacing {
            Spacing::Days(days) => self
                .start
                .checked_add_signed(Duration::days(i64::from(index) * i64::from(days))),
            Spacing::Months(months) => i32::try_from(index * months)
                .ok()
                .and_then(|offset| shift_months(self.start, offset)),
        }
    }

    /// Builds the series
    pub fn build(self) -> NavSeries {
        let factor = Decimal::ONE + self.growth_percent / dec!(100);
        let mut nav = self.initial_nav;
        let mut observations = self.extra.clone();

        for index in 0..self.count {
            if let Some(date) = self.date_at(index) {
                observations.push(NavObservation::new(date, nav.round_dp(4)));
            }
            nav *= factor;
        }

        NavSeries::new(observations)
    }
}

/// Builder for scheme details
#[derive(Debug, Clone)]
pub struct SchemeDetailsBuilder {
    meta: SchemeMeta,
    nav_history: NavSeries,
}

impl Default for SchemeDetailsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeDetailsBuilder {
    /// Creates a builder with the fixture metadata and a default series
    pub fn new() -> Self {
        Self {
            meta: SchemeFixtures::meta(),
            nav_history: NavSeriesBuilder::new().build(),
        }
    }

    pub fn with_code(mut self, code: SchemeCode) -> Self {
        self.meta.code = code;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.meta.name = name.into();
        self
    }

    pub fn with_history(mut self, nav_history: NavSeries) -> Self {
        self.nav_history = nav_history;
        self
    }

    pub fn build(self) -> SchemeDetails {
        SchemeDetails {
            meta: self.meta,
            nav_history: self.nav_history,
        }
    }
}
