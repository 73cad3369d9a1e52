//! Mutual fund scheme metadata and listing queries

use serde::{Deserialize, Serialize};

use core_kernel::SchemeCode;
use crate::nav::NavSeries;

/// Default page size for scheme listings
pub const DEFAULT_PAGE_LIMIT: u32 = 50;
/// Largest page size a listing may request
pub const MAX_PAGE_LIMIT: u32 = 500;

/// Entry in the scheme catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeSummary {
    pub code: SchemeCode,
    pub name: String,
}

/// Descriptive metadata of a scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeMeta {
    pub code: SchemeCode,
    pub name: String,
    /// Asset management company
    pub fund_house: Option<String>,
    /// e.g. "Equity Scheme - Large Cap Fund"
    pub category: Option<String>,
    /// e.g. "Open Ended Schemes"
    pub scheme_type: Option<String>,
    pub isin_growth: Option<String>,
    pub isin_div_reinvestment: Option<String>,
}

impl SchemeMeta {
    /// Metadata with only code and name known
    pub fn new(code: SchemeCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            fund_house: None,
            category: None,
            scheme_type: None,
            isin_growth: None,
            isin_div_reinvestment: None,
        }
    }

    pub fn with_fund_house(mut self, fund_house: impl Into<String>) -> Self {
        self.fund_house = Some(fund_house.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn summary(&self) -> SchemeSummary {
        SchemeSummary {
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }
}

/// Scheme metadata together with its NAV history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeDetails {
    pub meta: SchemeMeta,
    /// Ascending by date
    pub nav_history: NavSeries,
}

/// Filter and page selection for a scheme listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeQuery {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
    /// Case-insensitive substring of the scheme name
    pub search: Option<String>,
}

impl Default for SchemeQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            search: None,
        }
    }
}

impl SchemeQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Default::default()
        }
    }

    /// Selects a page, clamping to the allowed ranges
    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.clamp(1, MAX_PAGE_LIMIT);
        self
    }

    fn matches(&self, scheme: &SchemeSummary) -> bool {
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                scheme.name.to_lowercase().contains(&term.to_lowercase())
            }
            _ => true,
        }
    }

    /// Applies the filter and page selection to a full catalogue
    ///
    /// `total` in the result counts matching schemes across all pages.
    pub fn apply(&self, schemes: &[SchemeSummary]) -> SchemePage {
        let matching: Vec<&SchemeSummary> = schemes.iter().filter(|s| self.matches(s)).collect();
        let offset = (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize);

        SchemePage {
            total: matching.len(),
            page: self.page,
            limit: self.limit,
            funds: matching
                .into_iter()
                .skip(offset)
                .take(self.limit as usize)
                .cloned()
                .collect(),
        }
    }
}

/// One page of a scheme listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemePage {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub funds: Vec<SchemeSummary>,
}
