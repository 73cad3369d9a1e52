//! Wire models of the public mutual fund API
//!
//! The provider publishes:
//!
//! - `GET /mf` as `[{ "schemeCode": 119551, "schemeName": "..." }, ...]`
//! - `GET /mf/{code}` as `{ "meta": {...}, "data": [{ "date": "DD-MM-YYYY", "nav": "123.45" }], "status": "SUCCESS" }`
//!
//! Scheme codes arrive as JSON numbers and NAVs as strings. Rows that cannot
//! be parsed are dropped with a warning rather than failing the whole
//! response.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use core_kernel::temporal::parse_nav_date;
use core_kernel::SchemeCode;
use domain_fund::{NavObservation, NavSeries, SchemeDetails, SchemeMeta, SchemeSummary};

use crate::error::ProviderError;

/// A scheme code as published: usually a number, occasionally a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCode {
    Number(u64),
    Text(String),
}

impl RawCode {
    fn parse(&self) -> Option<SchemeCode> {
        match self {
            RawCode::Number(n) => SchemeCode::new(n.to_string()).ok(),
            RawCode::Text(s) => SchemeCode::new(s.as_str()).ok(),
        }
    }
}

/// Catalogue entry of `GET /mf`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeListItem {
    pub scheme_code: RawCode,
    pub scheme_name: String,
}

/// Metadata block of `GET /mf/{code}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaDto {
    pub fund_house: Option<String>,
    pub scheme_type: Option<String>,
    pub scheme_category: Option<String>,
    pub scheme_code: Option<RawCode>,
    pub scheme_name: Option<String>,
    pub isin_growth: Option<String>,
    pub isin_div_reinvestment: Option<String>,
}

/// One NAV row of `GET /mf/{code}`
#[derive(Debug, Clone, Deserialize)]
pub struct NavDto {
    pub date: String,
    pub nav: NavValue,
}

/// NAV as published: a numeric string, sometimes a bare number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NavValue {
    Text(String),
    Number(serde_json::Number),
}

impl NavValue {
    fn parse(&self) -> Option<Decimal> {
        match self {
            NavValue::Text(s) => Decimal::from_str(s.trim()).ok(),
            NavValue::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        }
    }
}

/// Body of `GET /mf/{code}`
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeResponse {
    #[serde(default)]
    pub meta: MetaDto,
    #[serde(default)]
    pub data: Vec<NavDto>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Converts the catalogue, skipping entries with unusable codes
pub fn into_summaries(items: Vec<SchemeListItem>) -> Vec<SchemeSummary> {
    let total = items.len();
    let summaries: Vec<SchemeSummary> = items
        .into_iter()
        .filter_map(|item| match item.scheme_code.parse() {
            Some(code) => Some(SchemeSummary {
                code,
                name: item.scheme_name.trim().to_string(),
            }),
            None => {
                warn!(code = ?item.scheme_code, name = %item.scheme_name, "Skipping catalogue entry with invalid code");
                None
            }
        })
        .collect();

    if summaries.len() < total {
        warn!(skipped = total - summaries.len(), total, "Dropped unusable catalogue entries");
    }
    summaries
}

/// Parses NAV rows, skipping rows with bad dates or values
pub fn into_series(code: &SchemeCode, rows: &[NavDto]) -> NavSeries {
    rows.iter()
        .filter_map(|row| {
            let date = match parse_nav_date(&row.date) {
                Ok(date) => date,
                Err(e) => {
                    warn!(scheme = %code, error = %e, "Skipping NAV row with invalid date");
                    return None;
                }
            };
            match row.nav.parse() {
                Some(nav) => Some(NavObservation::new(date, nav)),
                None => {
                    warn!(scheme = %code, %date, nav = ?row.nav, "Skipping NAV row with invalid value");
                    None
                }
            }
        })
        .collect()
}

impl SchemeResponse {
    /// Converts the response for the requested scheme
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NotFound` when no NAV row survives parsing.
    /// The provider answers unknown codes with an empty body rather than 404.
    pub fn into_details(self, code: &SchemeCode) -> Result<SchemeDetails, ProviderError> {
        let nav_history = into_series(code, &self.data);
        if nav_history.is_empty() {
            return Err(ProviderError::NotFound(code.to_string()));
        }

        let meta = self.meta;
        if let Some(published) = meta.scheme_code.as_ref().and_then(RawCode::parse) {
            if &published != code {
                warn!(requested = %code, %published, "Provider returned a different scheme code");
            }
        }

        Ok(SchemeDetails {
            meta: SchemeMeta {
                code: code.clone(),
                name: meta.scheme_name.unwrap_or_default(),
                fund_house: meta.fund_house,
                category: meta.scheme_category,
                scheme_type: meta.scheme_type,
                isin_growth: meta.isin_growth.filter(|s| !s.is_empty()),
                isin_div_reinvestment: meta.isin_div_reinvestment.filter(|s| !s.is_empty()),
            },
            nav_history,
        })
    }
}
