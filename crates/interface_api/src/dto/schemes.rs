//! Scheme DTOs

use chrono::NaiveDate;
use core_kernel::SchemeCode;
use domain_fund::scheme::DEFAULT_PAGE_LIMIT;
use domain_fund::{
    ContributionFrequency, NavObservation, PeriodReturn, ReturnWindow, ReturnsResult, RollingPoint,
    SchemeDetails, SchemeQuery, SipParams, SipProjection,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_step_up;
use crate::error::ApiError;

/// Lookback used when `days` is not given
pub const DEFAULT_ROLLING_DAYS: u32 = 365;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct FundListQuery {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u32>,
    #[validate(length(max = 200))]
    pub search: Option<String>,
}

impl FundListQuery {
    pub fn to_query(&self) -> SchemeQuery {
        let mut query = SchemeQuery::default();
        query.search = self.search.clone().filter(|s| !s.trim().is_empty());
        query.paginate(self.page.unwrap_or(1), self.limit.unwrap_or(DEFAULT_PAGE_LIMIT))
    }
}

/// Either `period` or both `from` and `to`
#[derive(Debug, Default, Deserialize)]
pub struct ReturnsQuery {
    pub period: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ReturnsQuery {
    pub fn window(&self) -> Result<ReturnWindow, ApiError> {
        Ok(ReturnWindow::from_request(self.period.as_deref(), self.from, self.to)?)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct RollingQuery {
    #[validate(range(min = 1, max = 3650))]
    pub days: Option<u32>,
}

impl RollingQuery {
    pub fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_ROLLING_DAYS)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SipRequest {
    pub amount: Decimal,
    #[serde(default = "default_frequency")]
    pub frequency: ContributionFrequency,
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[validate(custom(function = "validate_step_up"))]
    pub step_up_percent: Option<Decimal>,
}

fn default_frequency() -> ContributionFrequency {
    ContributionFrequency::Monthly
}

impl SipRequest {
    pub fn to_params(&self) -> SipParams {
        SipParams::new(self.amount, self.frequency, self.from, self.to)
            .with_step_up(self.step_up_percent.unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeDetailResponse {
    pub code: SchemeCode,
    pub name: String,
    pub fund_house: Option<String>,
    pub category: Option<String>,
    pub scheme_type: Option<String>,
    pub isin_growth: Option<String>,
    pub isin_div_reinvestment: Option<String>,
    pub latest_nav: Option<NavObservation>,
    /// Ascending by date
    pub nav_history: Vec<NavObservation>,
}

impl From<SchemeDetails> for SchemeDetailResponse {
    fn from(details: SchemeDetails) -> Self {
        let meta = details.meta;
        Self {
            code: meta.code,
            name: meta.name,
            fund_house: meta.fund_house,
            category: meta.category,
            scheme_type: meta.scheme_type,
            isin_growth: meta.isin_growth,
            isin_div_reinvestment: meta.isin_div_reinvestment,
            latest_nav: details.nav_history.latest_usable().copied(),
            nav_history: details.nav_history.observations().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsResponse {
    pub scheme_code: SchemeCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(flatten)]
    pub result: ReturnsResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsSummaryResponse {
    pub scheme_code: SchemeCode,
    /// Date of the latest observation the periods are anchored at
    pub as_of: Option<NaiveDate>,
    pub returns: Vec<PeriodReturn>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingReturnsResponse {
    pub scheme_code: SchemeCode,
    pub days: u32,
    pub points: Vec<RollingPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResponse {
    pub scheme_code: SchemeCode,
    #[serde(flatten)]
    pub projection: SipProjection,
}
