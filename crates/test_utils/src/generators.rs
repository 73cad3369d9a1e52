//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating calculator inputs that
//! respect domain invariants (positive NAVs, sensible rates, bounded tenures).

use chrono::{Duration, NaiveDate};
use domain_fund::{ContributionFrequency, NavObservation, NavSeries, Period};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::date;

/// Strategy for valid NAV values (1.00 to 999.99)
pub fn nav_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for positive amounts (100.00 to 1,000,000.00)
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (10_000i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for non-negative annual rates (0% to 30%, two decimals)
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..3_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for step-up percentages (0% to 25%, whole numbers)
pub fn step_up_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=25i64).prop_map(Decimal::from)
}

/// Strategy for tenures in years (1 to 40)
pub fn tenure_strategy() -> impl Strategy<Value = u32> {
    1u32..=40u32
}

/// Strategy for dates between 2000-01-01 and roughly 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..11_000i64).prop_map(|offset| date(2000, 1, 1) + Duration::days(offset))
}

/// Strategy for named periods
pub fn period_strategy() -> impl Strategy<Value = Period> {
    proptest::sample::select(Period::ALL.to_vec())
}

pub fn frequency_strategy() -> impl Strategy<Value = ContributionFrequency> {
    prop_oneof![
        Just(ContributionFrequency::Monthly),
        Just(ContributionFrequency::Quarterly),
    ]
}

/// Largest NAV a generated series can reach
const MAX_GENERATED_NAV: i64 = 10_000;

/// Strategy for non-empty NAV series of up to `max_len` observations
///
/// Observations are 1 to 10 days apart starting from a random date. NAVs
/// follow a random walk moving at most 5% between observations and bounded
/// to 1..=10,000, like a real fund's history.
pub fn nav_series_strategy(max_len: usize) -> impl Strategy<Value = NavSeries> {
    walk_strategy(max_len, 0)
}

/// Like [`nav_series_strategy`] but with roughly one in ten NAVs unusable (zero)
pub fn sparse_nav_series_strategy(max_len: usize) -> impl Strategy<Value = NavSeries> {
    walk_strategy(max_len, 10)
}

fn walk_strategy(max_len: usize, zero_percent: u32) -> impl Strategy<Value = NavSeries> {
    (
        date_strategy(),
        nav_strategy(),
        proptest::collection::vec((1i64..=10i64, -500i64..=500i64, 0u32..100u32), 1..=max_len.max(1)),
    )
        .prop_map(move |(start, initial_nav, steps)| {
            let mut current = start;
            let mut nav = initial_nav;
            let floor = Decimal::ONE;
            let ceiling = Decimal::from(MAX_GENERATED_NAV);

            steps
                .into_iter()
                .map(|(gap, move_bps, roll)| {
                    let published = if roll < zero_percent { Decimal::ZERO } else { nav };
                    let observation = NavObservation::new(current, published);
                    current += Duration::days(gap);
                    nav = (nav * (Decimal::ONE + Decimal::new(move_bps, 4)))
                        .round_dp(4)
                        .clamp(floor, ceiling);
                    observation
                })
                .collect()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_nav_is_positive(nav in nav_strategy()) {
            prop_assert!(nav > Decimal::ZERO);
        }

        #[test]
        fn prop_series_is_sorted_and_non_empty(series in nav_series_strategy(50)) {
            prop_assert!(!series.is_empty());
            let dates: Vec<_> = series.iter().map(|o| o.date).collect();
            prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
