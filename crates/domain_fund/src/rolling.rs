//! Rolling (trailing-window) returns
//!
//! Produces one point per observation. The baseline for each point is the
//! most recent observation dated on or before `date - lookback`; points
//! without enough history use their own NAV as the baseline and report a
//! zero return.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nav::NavSeries;
use crate::projection::percent_change;

/// Trailing return at one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub date: NaiveDate,
    #[serde(rename = "return")]
    pub return_pct: Decimal,
}

/// Computes the trailing return over `lookback_days` at every observation
///
/// The output has exactly one point per observation in `series`.
pub fn rolling_returns(series: &NavSeries, lookback_days: u32) -> Vec<RollingPoint> {
    let observations = series.observations();
    let lookback = Duration::days(i64::from(lookback_days));

    let points: Vec<RollingPoint> = observations
        .iter()
        .enumerate()
        .map(|(i, current)| {
            let past_nav = current
                .date
                .checked_sub_signed(lookback)
                .and_then(|past_date| {
                    let end = observations[..i].partition_point(|o| o.date <= past_date);
                    end.checked_sub(1).map(|idx| observations[idx].nav)
                })
                .unwrap_or(current.nav);

            let return_pct = if past_nav <= Decimal::ZERO {
                Decimal::ZERO
            } else {
                percent_change(past_nav, current.nav)
            };

            RollingPoint {
                date: current.date,
                return_pct,
            }
        })
        .collect();

    debug!(lookback_days, points = points.len(), "Calculated rolling returns");
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavObservation;
    use rust_decimal_macros::dec;

    fn obs(y: i32, m: u32, d: u32, nav: Decimal) -> NavObservation {
        NavObservation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), nav)
    }

    #[test]
    fn test_insufficient_history_is_zero() {
        let series = NavSeries::new(vec![obs(2024, 1, 1, dec!(10)), obs(2024, 1, 5, dec!(11))]);
        let points = rolling_returns(&series, 30);

        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.return_pct.is_zero()));
    }

    #[test]
    fn test_uses_nearest_on_or_before_baseline() {
        let series = NavSeries::new(vec![
            obs(2024, 1, 1, dec!(100)),
            obs(2024, 1, 3, dec!(105)),
            obs(2024, 1, 10, dec!(110)),
        ]);
        // 2024-01-10 minus 7 days is 2024-01-03
        let points = rolling_returns(&series, 7);
        assert_eq!(points[2].return_pct, dec!(4.7619));

        // 2024-01-10 minus 8 days is 2024-01-02, nearest before is 2024-01-01
        let points = rolling_returns(&series, 8);
        assert_eq!(points[2].return_pct, dec!(10));
    }

    #[test]
    fn test_non_positive_baseline_is_zero() {
        let series = NavSeries::new(vec![obs(2024, 1, 1, dec!(0)), obs(2024, 2, 1, dec!(10))]);
        let points = rolling_returns(&series, 30);
        assert_eq!(points[1].return_pct, Decimal::ZERO);
    }

    #[test]
    fn test_empty_series() {
        assert!(rolling_returns(&NavSeries::default(), 365).is_empty());
    }
}
