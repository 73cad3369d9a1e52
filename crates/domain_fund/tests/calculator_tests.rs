//! Calculator tests for domain_fund
//!
//! Worked scenarios for each calculator, using the shared fixtures.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_fund::{
    calculate_returns, estimate_sip, project_lump_sum, project_sip, project_swp, returns_summary,
    rolling_returns, ContributionFrequency, FundError, LumpSumParams, NavObservation, NavSeries,
    Period, ReturnWindow, SipEstimateParams, SipParams, SwpParams,
};
use test_utils::{assert_decimal_approx_eq, assert_invested_non_decreasing, NavFixtures, NavSeriesBuilder};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Returns Tests
// ============================================================================

mod returns_tests {
    use super::*;

    #[test]
    fn test_one_year_twenty_percent() {
        let series = NavFixtures::one_year_twenty_percent();
        let result = calculate_returns(&series, &ReturnWindow::Trailing(Period::OneYear)).unwrap();

        assert_eq!(result.start_date, date(2023, 1, 1));
        assert_eq!(result.end_date, date(2024, 1, 1));
        assert_eq!(result.simple_return, dec!(20));
        assert_decimal_approx_eq(result.annualized_return.unwrap(), dec!(20), dec!(0.0001));
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let newest_first = NavSeries::new(vec![
            NavObservation::new(date(2024, 1, 1), dec!(120)),
            NavObservation::new(date(2023, 1, 1), dec!(100)),
        ]);
        let window = ReturnWindow::Trailing(Period::OneYear);

        assert_eq!(
            calculate_returns(&newest_first, &window).unwrap(),
            calculate_returns(&NavFixtures::one_year_twenty_percent(), &window).unwrap()
        );
    }

    #[test]
    fn test_start_uses_nearest_prior_observation() {
        let series = NavFixtures::monthly_linear();
        let window = ReturnWindow::Between {
            from: date(2020, 3, 15),
            to: date(2021, 3, 15),
        };
        let result = calculate_returns(&series, &window).unwrap();

        assert_eq!(result.start_nav_date, date(2020, 3, 1));
        assert_eq!(result.end_nav_date, date(2021, 3, 1));
        assert_eq!(result.start_nav, dec!(114));
        assert_eq!(result.end_nav, dec!(126));
    }

    #[test]
    fn test_start_before_history_uses_oldest() {
        let series = NavFixtures::monthly_linear();
        let result = calculate_returns(&series, &ReturnWindow::Between {
            from: date(2010, 1, 1),
            to: date(2019, 2, 1),
        })
        .unwrap();

        assert_eq!(result.start_nav_date, date(2019, 1, 1));
        assert_eq!(result.simple_return, dec!(1));
    }

    #[test]
    fn test_zero_nav_is_skipped() {
        let series = NavFixtures::with_gap();
        let result = calculate_returns(&series, &ReturnWindow::Between {
            from: date(2024, 2, 10),
            to: date(2024, 3, 1),
        })
        .unwrap();

        assert_eq!(result.start_nav_date, date(2024, 1, 1));
        assert_eq!(result.simple_return, dec!(50));
        assert!(result.annualized_return.is_none());
    }

    #[test]
    fn test_end_before_history_has_no_observation() {
        let series = NavFixtures::monthly_linear();
        let result = calculate_returns(&series, &ReturnWindow::Between {
            from: date(2010, 1, 1),
            to: date(2011, 1, 1),
        });
        assert_eq!(result, Err(FundError::NoUsableObservation(date(2011, 1, 1))));
    }

    #[test]
    fn test_empty_series() {
        let result = calculate_returns(&NavSeries::default(), &ReturnWindow::Trailing(Period::OneMonth));
        assert_eq!(result, Err(FundError::EmptySeries));
    }

    #[test]
    fn test_request_errors() {
        assert_eq!(
            ReturnWindow::from_request(Some("10y"), None, None),
            Err(FundError::InvalidPeriod("10y".to_string()))
        );
        assert_eq!(ReturnWindow::from_request(None, None, None), Err(FundError::MissingDateRange));
        assert!(matches!(
            ReturnWindow::from_request(None, Some(date(2024, 2, 1)), Some(date(2024, 1, 1))),
            Err(FundError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_summary_reports_every_period() {
        let summary = returns_summary(&NavFixtures::monthly_linear());
        assert_eq!(summary.len(), Period::ALL.len());

        let five_year = summary.iter().find(|p| p.period == Period::FiveYears).unwrap();
        let result = five_year.result.as_ref().unwrap();
        assert_eq!(result.start_nav, dec!(100));
        assert_eq!(result.simple_return, dec!(60));
    }

    #[test]
    fn test_summary_of_empty_series_is_all_absent() {
        let summary = returns_summary(&NavSeries::default());
        assert!(summary.iter().all(|p| p.result.is_none()));
    }
}

// ============================================================================
// Rolling Returns Tests
// ============================================================================

mod rolling_tests {
    use super::*;

    #[test]
    fn test_one_year_rolling_on_monthly_series() {
        let series = NavFixtures::monthly_linear();
        let points = rolling_returns(&series, 365);

        assert_eq!(points.len(), series.len());
        // First year has no baseline
        assert!(points[..12].iter().all(|p| p.return_pct.is_zero()));
        // 2020-01-01 minus 365 days is 2019-01-01 (NAV 100 -> 112)
        assert_eq!(points[12].date, date(2020, 1, 1));
        assert_eq!(points[12].return_pct, dec!(12));
    }

    #[test]
    fn test_flat_series_has_zero_returns() {
        let points = rolling_returns(&NavFixtures::flat_2023(), 30);
        assert!(points.iter().all(|p| p.return_pct.is_zero()));
    }
}

// ============================================================================
// SIP Tests
// ============================================================================

mod sip_tests {
    use super::*;

    #[test]
    fn test_single_observation_single_installment() {
        let params = SipParams::new(
            dec!(1000),
            ContributionFrequency::Monthly,
            date(2023, 6, 1),
            date(2023, 6, 1),
        );
        let result = project_sip(&NavFixtures::single_observation(), &params).unwrap();

        assert_eq!(result.installments, 1);
        assert_eq!(result.total_units, dec!(20));
        assert_eq!(result.total_invested, dec!(1000));
        assert_eq!(result.current_value, dec!(1000));
        assert_eq!(result.annualized_return, Decimal::ZERO);
        assert!(!result.degenerate);
    }

    #[test]
    fn test_flat_nav_has_no_gain() {
        let params = SipParams::new(
            dec!(500),
            ContributionFrequency::Monthly,
            date(2023, 1, 1),
            date(2023, 12, 1),
        );
        let result = project_sip(&NavFixtures::flat_2023(), &params).unwrap();

        assert_eq!(result.installments, 12);
        assert_eq!(result.total_invested, dec!(6000));
        assert_eq!(result.total_units, dec!(600));
        assert_eq!(result.absolute_return, Decimal::ZERO);
        assert_eq!(result.annualized_return, Decimal::ZERO);
        assert_invested_non_decreasing(&result.growth_over_time);
    }

    #[test]
    fn test_quarterly_installments() {
        let params = SipParams::new(
            dec!(1000),
            ContributionFrequency::Quarterly,
            date(2023, 1, 1),
            date(2023, 12, 31),
        );
        let result = project_sip(&NavFixtures::flat_2023(), &params).unwrap();

        assert_eq!(result.installments, 4);
        assert_eq!(result.total_invested, dec!(4000));
    }

    #[test]
    fn test_step_up_increases_second_year() {
        let series = NavSeriesBuilder::new()
            .starting(date(2022, 1, 1))
            .with_count(24)
            .with_initial_nav(dec!(10))
            .build();
        let params = SipParams::new(
            dec!(1000),
            ContributionFrequency::Monthly,
            date(2022, 1, 1),
            date(2023, 12, 1),
        )
        .with_step_up(dec!(10));

        let result = project_sip(&series, &params).unwrap();
        assert_eq!(result.total_invested, dec!(12000) + dec!(13200));
        assert_eq!(result.total_units, dec!(2520));
    }

    #[test]
    fn test_installment_between_observations_uses_prior_nav() {
        let series = NavSeries::new(vec![
            NavObservation::new(date(2024, 1, 1), dec!(10)),
            NavObservation::new(date(2024, 1, 20), dec!(20)),
        ]);
        let params = SipParams::new(
            dec!(100),
            ContributionFrequency::Monthly,
            date(2024, 1, 15),
            date(2024, 1, 15),
        );

        let result = project_sip(&series, &params).unwrap();
        assert_eq!(result.total_units, dec!(10));
        // Valued at the latest NAV, after the end date
        assert_eq!(result.current_value, dec!(200));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let params = SipParams::new(
            dec!(100),
            ContributionFrequency::Monthly,
            date(2024, 2, 1),
            date(2024, 1, 1),
        );
        assert!(matches!(
            project_sip(&NavFixtures::flat_2023(), &params),
            Err(FundError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_sip_estimate_ten_years() {
        let result = estimate_sip(&SipEstimateParams {
            monthly_amount: dec!(1000),
            annual_rate: dec!(12),
            tenure_years: 10,
            step_up_percent: Decimal::ZERO,
        })
        .unwrap();

        assert_eq!(result.total_invested, dec!(120000));
        assert_decimal_approx_eq(result.future_value, dec!(230038.69), dec!(0.01));
        assert_eq!(result.yearly.len(), 10);
        assert_eq!(result.yearly.last().unwrap().value, result.future_value);
    }
}

// ============================================================================
// Lump Sum Tests
// ============================================================================

mod lump_sum_tests {
    use super::*;

    #[test]
    fn test_ten_years_at_twelve_percent() {
        let result = project_lump_sum(&LumpSumParams {
            principal: dec!(100000),
            annual_rate: dec!(12),
            tenure_years: 10,
        })
        .unwrap();

        assert_decimal_approx_eq(result.future_value, dec!(310584.82), dec!(0.01));
        assert_eq!(result.growth_over_time[0].value, dec!(100000));
        assert_eq!(result.growth_over_time[1].value, dec!(112000));
    }

    #[test]
    fn test_rate_at_minus_hundred_rejected() {
        let result = project_lump_sum(&LumpSumParams {
            principal: dec!(100),
            annual_rate: dec!(-100),
            tenure_years: 1,
        });
        assert!(matches!(result, Err(FundError::InvalidParameters(_))));
    }
}

// ============================================================================
// SWP Tests
// ============================================================================

mod swp_tests {
    use super::*;

    #[test]
    fn test_sustainable_withdrawals_run_full_tenure() {
        let result = project_swp(&SwpParams::new(dec!(100000), dec!(1000), dec!(12), 10)).unwrap();

        assert!(!result.depleted);
        assert_eq!(result.months_simulated, 120);
        assert_eq!(result.total_withdrawn, dec!(120000));
        assert_decimal_approx_eq(result.remaining_corpus, dec!(97699.61), dec!(0.01));
        // month 0 plus every six months
        assert_eq!(result.series.len(), 21);
    }

    #[test]
    fn test_step_up_depletes_before_tenure() {
        let params = SwpParams::new(dec!(100000), dec!(1000), dec!(12), 10).with_step_up(dec!(10));
        let result = project_swp(&params).unwrap();

        assert!(result.depleted);
        assert_eq!(result.months_simulated, 117);
        assert_eq!(result.remaining_corpus, Decimal::ZERO);
        assert!(result.total_withdrawn < dec!(1000) * dec!(120) * dec!(2));
        assert_decimal_approx_eq(result.total_withdrawn, dec!(184175.25), dec!(0.01));
        assert_eq!(result.series.last().unwrap().month, 117);
    }

    #[test]
    fn test_custom_sampling_ends_on_last_month() {
        let mut params = SwpParams::new(dec!(100000), dec!(100), dec!(8), 1);
        params.sample_every_months = Some(5);
        let result = project_swp(&params).unwrap();

        let months: Vec<u32> = result.series.iter().map(|p| p.month).collect();
        assert_eq!(months, vec![0, 5, 10, 12]);
    }
}
