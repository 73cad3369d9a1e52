//! Property tests for the domain_fund calculators

use chrono::{Duration, Months, NaiveDate};
use proptest::prelude::*;
use rust_decimal::{Decimal, MathematicalOps};

use domain_fund::projection::growth_factor;
use domain_fund::{
    calculate_returns, estimate_sip, project_lump_sum, project_sip, project_swp, rolling_returns,
    ContributionFrequency, FundError, LumpSumParams, NavSeries, ReturnWindow, SipEstimateParams,
    SipParams, SwpParams,
};
use test_utils::{
    amount_strategy, assert_series_ascending, frequency_strategy, nav_series_strategy,
    period_strategy, rate_strategy, sparse_nav_series_strategy, step_up_strategy, tenure_strategy,
};

// ============================================================================
// Reference Implementations
// ============================================================================

/// Plain SIP computed directly: fixed amount, each date one interval after the last
fn reference_sip(series: &NavSeries, amount: Decimal, frequency: ContributionFrequency, from: NaiveDate, to: NaiveDate) -> (u32, Decimal, Decimal) {
    let step = Months::new(frequency.months_between_installments());
    let mut installments = 0u32;
    let mut units = Decimal::ZERO;
    let mut next = Some(from);

    while let Some(date) = next.filter(|d| *d <= to) {
        if let Some(observation) = series.on_or_before(date) {
            units += (amount / observation.nav).round_dp(6);
            installments += 1;
        }
        next = date.checked_add_months(step);
    }

    let value = series
        .latest_usable()
        .map(|latest| (units * latest.nav).round_dp(2))
        .unwrap_or(Decimal::ZERO);
    (installments, units, value)
}

/// Plain SWP computed directly: constant withdrawal, then monthly growth
fn reference_swp(corpus: Decimal, withdrawal: Decimal, rate: Decimal, tenure: u32) -> (Decimal, Decimal, bool, u32) {
    let monthly = Decimal::ONE + rate / Decimal::from(12) / Decimal::from(100);
    let mut corpus = corpus;
    let mut withdrawn = Decimal::ZERO;

    for month in 1..=tenure * 12 {
        corpus -= withdrawal;
        withdrawn += withdrawal;
        if corpus <= Decimal::ZERO {
            return (Decimal::ZERO, withdrawn.round_dp(2), true, month);
        }
        corpus *= monthly;
    }
    (corpus.round_dp(2), withdrawn.round_dp(2), false, tenure * 12)
}

// ============================================================================
// Returns Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_period_equals_resolved_dates(series in nav_series_strategy(400), period in period_strategy()) {
        let trailing = ReturnWindow::Trailing(period);
        let (from, to) = trailing.resolve(&series).unwrap();

        let via_period = calculate_returns(&series, &trailing);
        let via_dates = calculate_returns(&series, &ReturnWindow::Between { from, to });
        prop_assert_eq!(via_period, via_dates);
    }

    #[test]
    fn prop_short_spans_never_annualized(series in nav_series_strategy(100), offset in 0i64..60, span in 0i64..30) {
        let from = series.first().unwrap().date + Duration::days(offset);
        let to = from + Duration::days(span);

        if let Ok(result) = calculate_returns(&series, &ReturnWindow::Between { from, to }) {
            prop_assert!(result.annualized_return.is_none());
        }
    }
}

// ============================================================================
// Rolling Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_rolling_length_matches_series(series in sparse_nav_series_strategy(300), days in 1u32..800) {
        assert_series_ascending(&series);
        prop_assert_eq!(rolling_returns(&series, days).len(), series.len());
    }
}

// ============================================================================
// Projection Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_lump_sum_zero_tenure_is_principal(principal in amount_strategy(), rate in rate_strategy()) {
        let result = project_lump_sum(&LumpSumParams { principal, annual_rate: rate, tenure_years: 0 }).unwrap();
        prop_assert_eq!(result.future_value, principal);
    }

    #[test]
    fn prop_lump_sum_monotonic_in_tenure(principal in amount_strategy(), rate in rate_strategy(), tenure in 0u32..40) {
        let shorter = project_lump_sum(&LumpSumParams { principal, annual_rate: rate, tenure_years: tenure }).unwrap();
        let longer = project_lump_sum(&LumpSumParams { principal, annual_rate: rate, tenure_years: tenure + 1 }).unwrap();
        prop_assert!(longer.future_value >= shorter.future_value);
    }

    #[test]
    fn prop_swp_corpus_never_negative(
        corpus in amount_strategy(),
        withdrawal in amount_strategy(),
        rate in rate_strategy(),
        tenure in tenure_strategy(),
        step_up in step_up_strategy(),
    ) {
        let result = project_swp(&SwpParams::new(corpus, withdrawal, rate, tenure).with_step_up(step_up)).unwrap();
        prop_assert!(result.remaining_corpus >= Decimal::ZERO);
        prop_assert!(result.series.iter().all(|p| p.corpus >= Decimal::ZERO));
    }

    #[test]
    fn prop_swp_outpaced_growth_depletes(
        corpus in amount_strategy(),
        withdrawal in amount_strategy(),
        rate in rate_strategy(),
        tenure in 1u32..=30,
    ) {
        let grown = corpus * growth_factor(rate).powi(i64::from(tenure));
        let withdrawn = withdrawal * Decimal::from(12 * tenure);
        prop_assume!(withdrawn > grown);

        let result = project_swp(&SwpParams::new(corpus, withdrawal, rate, tenure)).unwrap();
        prop_assert!(result.depleted);
        prop_assert_eq!(result.remaining_corpus, Decimal::ZERO);
        prop_assert!(result.months_simulated <= tenure * 12);
    }

    #[test]
    fn prop_zero_step_up_swp_matches_reference(
        corpus in amount_strategy(),
        withdrawal in amount_strategy(),
        rate in rate_strategy(),
        tenure in tenure_strategy(),
    ) {
        let params = SwpParams::new(corpus, withdrawal, rate, tenure).with_step_up(Decimal::ZERO);
        let result = project_swp(&params).unwrap();
        let (remaining, withdrawn, depleted, months) = reference_swp(corpus, withdrawal, rate, tenure);

        prop_assert_eq!(result.remaining_corpus, remaining);
        prop_assert_eq!(result.total_withdrawn, withdrawn);
        prop_assert_eq!(result.depleted, depleted);
        prop_assert_eq!(result.months_simulated, months);
    }

    #[test]
    fn prop_zero_step_up_sip_matches_reference(
        series in nav_series_strategy(200),
        amount in amount_strategy(),
        frequency in frequency_strategy(),
        extra_days in 0i64..400,
    ) {
        let from = series.first().unwrap().date;
        let to = series.latest().unwrap().date + Duration::days(extra_days);
        let params = SipParams::new(amount, frequency, from, to).with_step_up(Decimal::ZERO);
        let result = project_sip(&series, &params).unwrap();
        let (installments, units, value) = reference_sip(&series, amount, frequency, from, to);

        prop_assert_eq!(result.installments, installments);
        prop_assert_eq!(result.total_units, units);
        prop_assert_eq!(result.current_value, value);
        prop_assert_eq!(result.total_invested, amount * Decimal::from(installments));
    }

    #[test]
    fn prop_sip_invested_matches_installments(
        series in nav_series_strategy(200),
        amount in amount_strategy(),
        frequency in frequency_strategy(),
        extra_days in 0i64..400,
    ) {
        let from = series.first().unwrap().date;
        let to = series.latest().unwrap().date + Duration::days(extra_days);
        let params = SipParams::new(amount, frequency, from, to);
        let result = project_sip(&series, &params).unwrap();

        prop_assert_eq!(result.total_invested, amount * Decimal::from(result.installments));
        prop_assert_eq!(result.growth_over_time.len() as u32, result.installments);
        prop_assert!(!result.degenerate);
    }
}

// ============================================================================
// Extreme Input Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_runaway_growth_fails_cleanly(
        rate in (0i64..=100_000i64).prop_map(|n| Decimal::new(n, 2)),
        step_up in (0i64..=1_000i64).prop_map(Decimal::from),
        tenure in 1u32..=100,
    ) {
        let swp = project_swp(&SwpParams::new(Decimal::from(100_000), Decimal::ONE, rate, tenure).with_step_up(step_up));
        prop_assert!(matches!(swp, Ok(_) | Err(FundError::CalculationError(_))));

        let sip = estimate_sip(&SipEstimateParams {
            monthly_amount: Decimal::from(1_000),
            annual_rate: rate,
            tenure_years: tenure,
            step_up_percent: step_up,
        });
        prop_assert!(matches!(sip, Ok(_) | Err(FundError::CalculationError(_))));
    }

    #[test]
    fn prop_short_sip_span_always_projects(
        series in nav_series_strategy(200),
        amount in amount_strategy(),
        span in 0i64..28,
    ) {
        let from = series.first().unwrap().date;
        let params = SipParams::new(amount, ContributionFrequency::Monthly, from, from + Duration::days(span));
        let result = project_sip(&series, &params);
        prop_assert!(result.is_ok());
        prop_assert_eq!(result.unwrap().installments, 1);
    }
}
