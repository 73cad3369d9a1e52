//! Net Asset Value (NAV) observations and series
//!
//! A `NavSeries` is the shared input of every NAV-driven calculation. It is
//! always held in ascending date order with one observation per date, no
//! matter how the provider delivered it (the public API publishes newest
//! first).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single published NAV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavObservation {
    /// Publication date
    pub date: NaiveDate,
    /// NAV value per unit
    pub nav: Decimal,
}

impl NavObservation {
    pub fn new(date: NaiveDate, nav: Decimal) -> Self {
        Self { date, nav }
    }

    /// A non-positive NAV cannot be used for unit conversion or returns
    pub fn is_usable(&self) -> bool {
        self.nav > Decimal::ZERO
    }
}

/// Date-ordered NAV history for one scheme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NavObservation>", into = "Vec<NavObservation>")]
pub struct NavSeries {
    observations: Vec<NavObservation>,
}

impl NavSeries {
    /// Builds a series from observations in any order
    ///
    /// Observations are sorted by date. When the same date appears more
    /// than once, the first occurrence in the input wins.
    pub fn new(observations: impl IntoIterator<Item = NavObservation>) -> Self {
        let mut observations: Vec<NavObservation> = observations.into_iter().collect();
        observations.sort_by_key(|o| o.date);
        observations.dedup_by_key(|o| o.date);
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations in ascending date order
    pub fn observations(&self) -> &[NavObservation] {
        &self.observations
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavObservation> {
        self.observations.iter()
    }

    /// Oldest observation
    pub fn first(&self) -> Option<&NavObservation> {
        self.observations.first()
    }

    /// Most recent observation
    pub fn latest(&self) -> Option<&NavObservation> {
        self.observations.last()
    }

    /// Most recent observation with a positive NAV
    pub fn latest_usable(&self) -> Option<&NavObservation> {
        self.observations.iter().rev().find(|o| o.is_usable())
    }

    /// Oldest observation with a positive NAV
    pub fn earliest_usable(&self) -> Option<&NavObservation> {
        self.observations.iter().find(|o| o.is_usable())
    }

    /// Observation published exactly on `date`
    pub fn on(&self, date: NaiveDate) -> Option<&NavObservation> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .map(|idx| &self.observations[idx])
    }

    /// Latest usable observation dated on or before `date`
    pub fn on_or_before(&self, date: NaiveDate) -> Option<&NavObservation> {
        let end = self.observations.partition_point(|o| o.date <= date);
        self.observations[..end].iter().rev().find(|o| o.is_usable())
    }
}

impl From<Vec<NavObservation>> for NavSeries {
    fn from(observations: Vec<NavObservation>) -> Self {
        Self::new(observations)
    }
}

impl From<NavSeries> for Vec<NavObservation> {
    fn from(series: NavSeries) -> Self {
        series.observations
    }
}

impl FromIterator<NavObservation> for NavSeries {
    fn from_iter<I: IntoIterator<Item = NavObservation>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn obs(y: i32, m: u32, d: u32, nav: Decimal) -> NavObservation {
        NavObservation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), nav)
    }

    #[test]
    fn test_series_sorts_newest_first_input() {
        let series = NavSeries::new(vec![
            obs(2024, 3, 1, dec!(12)),
            obs(2024, 2, 1, dec!(11)),
            obs(2024, 1, 1, dec!(10)),
        ]);

        assert_eq!(series.first().unwrap().nav, dec!(10));
        assert_eq!(series.latest().unwrap().nav, dec!(12));
    }

    #[test]
    fn test_duplicate_dates_keep_first() {
        let series = NavSeries::new(vec![
            obs(2024, 1, 1, dec!(10)),
            obs(2024, 1, 1, dec!(99)),
        ]);

        assert_eq!(series.len(), 1);
        assert_eq!(series.on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap().nav, dec!(10));
    }

    #[test]
    fn test_on_or_before_skips_unusable() {
        let series = NavSeries::new(vec![
            obs(2024, 1, 1, dec!(10)),
            obs(2024, 1, 2, dec!(0)),
            obs(2024, 1, 4, dec!(12)),
        ]);

        let found = series.on_or_before(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()).unwrap();
        assert_eq!(found.nav, dec!(10));

        let exact = series.on_or_before(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()).unwrap();
        assert_eq!(exact.nav, dec!(12));

        assert!(series.on_or_before(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()).is_none());
    }
}
