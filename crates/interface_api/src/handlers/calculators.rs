//! Calculator handlers
//!
//! Projections at an assumed rate. None of them needs NAV history.

use axum::{extract::rejection::JsonRejection, Json};
use domain_fund::{estimate_sip, project_lump_sum, project_swp, LumpSumProjection, SipEstimate, SwpProjection};
use validator::Validate;

use crate::dto::calculators::*;
use crate::error::ApiError;

/// Projects a one-time investment
pub async fn lump_sum(
    request: Result<Json<LumpSumRequest>, JsonRejection>,
) -> Result<Json<LumpSumProjection>, ApiError> {
    let Json(request) = request?;
    request.validate()?;
    Ok(Json(project_lump_sum(&request.to_params())?))
}

/// Simulates monthly withdrawals from a corpus
pub async fn swp(
    request: Result<Json<SwpRequest>, JsonRejection>,
) -> Result<Json<SwpProjection>, ApiError> {
    let Json(request) = request?;
    request.validate()?;
    Ok(Json(project_swp(&request.to_params())?))
}

/// Estimates the corpus of a SIP at an assumed rate
pub async fn sip_estimate(
    request: Result<Json<SipEstimateRequest>, JsonRejection>,
) -> Result<Json<SipEstimate>, ApiError> {
    let Json(request) = request?;
    request.validate()?;
    Ok(Json(estimate_sip(&request.to_params())?))
}
