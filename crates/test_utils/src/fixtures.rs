//! Pre-built Test Fixtures
//!
//! Provides ready-to-use NAV histories and scheme data. Values are fixed so
//! that expected results can be worked out by hand.

use chrono::NaiveDate;
use core_kernel::SchemeCode;
use domain_fund::{NavObservation, NavSeries, SchemeDetails, SchemeMeta, SchemeSummary};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builds a date, panicking on invalid input
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| panic!("invalid fixture date {}-{}-{}", y, m, d))
}

/// Fixture for calendar dates used across tests
pub struct DateFixtures;

impl DateFixtures {
    /// Start of the standard fixture history (Jan 1, 2019)
    pub fn history_start() -> NaiveDate {
        date(2019, 1, 1)
    }

    /// End of the standard fixture history (Jan 1, 2024)
    pub fn history_end() -> NaiveDate {
        date(2024, 1, 1)
    }

    /// A leap day, for month-end clamping tests
    pub fn leap_day() -> NaiveDate {
        date(2024, 2, 29)
    }
}

/// Fixture for NAV series
pub struct NavFixtures;

impl NavFixtures {
    /// Two observations one year apart: 100 then 120
    pub fn one_year_twenty_percent() -> NavSeries {
        NavSeries::new(vec![
            NavObservation::new(date(2023, 1, 1), dec!(100)),
            NavObservation::new(date(2024, 1, 1), dec!(120)),
        ])
    }

    /// A single observation of 50 on 2023-06-01
    pub fn single_observation() -> NavSeries {
        NavSeries::new(vec![NavObservation::new(date(2023, 6, 1), dec!(50))])
    }

    /// Monthly observations on the 1st from 2019-01 to 2024-01, rising by
    /// one unit of NAV each month from 100
    pub fn monthly_linear() -> NavSeries {
        (0..=60)
            .map(|i| {
                let year = 2019 + i / 12;
                let month = (i % 12) as u32 + 1;
                NavObservation::new(date(year, month, 1), Decimal::from(100 + i))
            })
            .collect()
    }

    /// Flat NAV of 10 on the 1st of every month of 2023
    pub fn flat_2023() -> NavSeries {
        (1..=12)
            .map(|month| NavObservation::new(date(2023, month, 1), dec!(10)))
            .collect()
    }

    /// Newest-first observations including a zero NAV in the middle
    pub fn with_gap() -> NavSeries {
        NavSeries::new(vec![
            NavObservation::new(date(2024, 3, 1), dec!(30)),
            NavObservation::new(date(2024, 2, 1), Decimal::ZERO),
            NavObservation::new(date(2024, 1, 1), dec!(20)),
        ])
    }
}

/// Fixture for scheme metadata
pub struct SchemeFixtures;

impl SchemeFixtures {
    pub fn code() -> SchemeCode {
        SchemeFixtures::parse_code("119551")
    }

    pub fn other_code() -> SchemeCode {
        SchemeFixtures::parse_code("120503")
    }

    /// Parses a code that is known to be valid
    pub fn parse_code(raw: &str) -> SchemeCode {
        raw.parse().unwrap_or_else(|e| panic!("invalid fixture scheme code {}: {}", raw, e))
    }

    pub fn meta() -> SchemeMeta {
        SchemeMeta::new(SchemeFixtures::code(), "Aditya Birla Sun Life Banking & PSU Debt Fund - DIRECT - IDCW")
            .with_fund_house("Aditya Birla Sun Life Mutual Fund")
            .with_category("Debt Scheme - Banking and PSU Fund")
    }

    /// Scheme details backed by [`NavFixtures::monthly_linear`]
    pub fn details() -> SchemeDetails {
        SchemeDetails {
            meta: SchemeFixtures::meta(),
            nav_history: NavFixtures::monthly_linear(),
        }
    }

    /// A small catalogue for listing tests
    pub fn catalogue() -> Vec<SchemeSummary> {
        [
            ("119551", "Aditya Birla Sun Life Banking & PSU Debt Fund - DIRECT - IDCW"),
            ("120503", "Axis ELSS Tax Saver Fund - Direct Plan - Growth Option"),
            ("118989", "HDFC Mid-Cap Opportunities Fund - Growth Option - Direct Plan"),
            ("120716", "UTI Nifty 50 Index Fund - Growth Option- Direct"),
            ("122639", "Parag Parikh Flexi Cap Fund - Direct Plan - Growth"),
        ]
        .into_iter()
        .map(|(code, name)| SchemeSummary {
            code: SchemeFixtures::parse_code(code),
            name: name.to_string(),
        })
        .collect()
    }
}
