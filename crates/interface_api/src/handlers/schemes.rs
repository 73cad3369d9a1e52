//! Scheme handlers
//!
//! Every handler fetches the scheme through the shared `SchemeDataPort` and
//! runs one of the pure calculators on the result.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use core_kernel::SchemeCode;
use domain_fund::{
    calculate_returns, project_sip, returns_summary, rolling_returns, SchemeDataPort, SchemeDataPortExt,
    SchemePage,
};
use tracing::debug;
use validator::Validate;

use crate::dto::schemes::*;
use crate::{error::ApiError, AppState};

fn scheme_code(path: Result<Path<String>, PathRejection>) -> Result<SchemeCode, ApiError> {
    let Path(raw) = path?;
    Ok(SchemeCode::new(raw)?)
}

/// Lists funds, optionally filtered by name
pub async fn list_funds(
    State(state): State<AppState>,
    query: Result<Query<FundListQuery>, QueryRejection>,
) -> Result<Json<SchemePage>, ApiError> {
    let Query(query) = query?;
    query.validate()?;

    let page = state.schemes.find_schemes(&query.to_query()).await?;
    debug!(total = page.total, page = page.page, "Listed funds");
    Ok(Json(page))
}

/// Gets scheme metadata and NAV history
pub async fn get_scheme(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<SchemeDetailResponse>, ApiError> {
    let code = scheme_code(path)?;
    let details = state.schemes.get_scheme(&code).await?;
    Ok(Json(details.into()))
}

/// Computes the return over a named period or explicit dates
pub async fn get_returns(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<ReturnsQuery>, QueryRejection>,
) -> Result<Json<ReturnsResponse>, ApiError> {
    let code = scheme_code(path)?;
    let Query(query) = query?;
    // Reject bad input before hitting the provider
    let window = query.window()?;

    let series = state.schemes.nav_series(&code).await?;
    let result = calculate_returns(&series, &window)?;

    Ok(Json(ReturnsResponse {
        scheme_code: code,
        period: query.period.filter(|p| !p.trim().is_empty()),
        result,
    }))
}

/// Computes trailing returns for every named period
pub async fn get_returns_summary(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ReturnsSummaryResponse>, ApiError> {
    let code = scheme_code(path)?;
    let series = state.schemes.nav_series(&code).await?;

    Ok(Json(ReturnsSummaryResponse {
        scheme_code: code,
        as_of: series.latest().map(|o| o.date),
        returns: returns_summary(&series),
    }))
}

/// Computes the trailing return at every observation
pub async fn get_rolling_returns(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<RollingQuery>, QueryRejection>,
) -> Result<Json<RollingReturnsResponse>, ApiError> {
    let code = scheme_code(path)?;
    let Query(query) = query?;
    query.validate()?;

    let days = query.days();
    let series = state.schemes.nav_series(&code).await?;

    Ok(Json(RollingReturnsResponse {
        scheme_code: code,
        days,
        points: rolling_returns(&series, days),
    }))
}

/// Replays a SIP against the scheme's NAV history
pub async fn project_scheme_sip(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    request: Result<Json<SipRequest>, JsonRejection>,
) -> Result<Json<SipResponse>, ApiError> {
    let code = scheme_code(path)?;
    let Json(request) = request?;
    request.validate()?;
    let params = request.to_params();
    params.validate()?;

    let series = state.schemes.nav_series(&code).await?;
    let projection = project_sip(&series, &params)?;

    Ok(Json(SipResponse {
        scheme_code: code,
        projection,
    }))
}
