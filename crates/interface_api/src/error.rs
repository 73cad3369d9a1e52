//! API error handling

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_kernel::{CoreError, PortError};
use domain_fund::FundError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The data provider failed or is unreachable
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error_type, message) = match &self {
            ApiError::NotFound(msg) => ("not_found", msg.clone()),
            ApiError::BadRequest(msg) => ("bad_request", msg.clone()),
            ApiError::Validation(msg) => ("validation_error", msg.clone()),
            ApiError::Upstream(msg) => ("upstream_error", msg.clone()),
            ApiError::Internal(msg) => ("internal_error", msg.clone()),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<FundError> for ApiError {
    fn from(err: FundError) -> Self {
        match &err {
            FundError::EmptySeries | FundError::NoUsableObservation(_) => ApiError::NotFound(err.to_string()),
            FundError::CalculationError(_) => {
                error!(error = %err, "Calculation failed");
                ApiError::Internal(err.to_string())
            }
            FundError::InvalidPeriod(_) | FundError::MissingDateRange | FundError::InvalidParameters(_) => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        if err.is_not_found() {
            return ApiError::NotFound(err.to_string());
        }
        if err.is_transient() {
            warn!(error = %err, "Provider request failed");
            return ApiError::Upstream(err.to_string());
        }
        error!(error = %err, "Provider returned unusable data");
        ApiError::Internal(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_input_errors_are_bad_requests() {
        let err = ApiError::from(FundError::InvalidPeriod("2w".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(FundError::MissingDateRange).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_history_is_not_found() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let err = ApiError::from(FundError::NoUsableObservation(date));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_port_errors_map_by_kind() {
        assert_eq!(ApiError::from(PortError::not_found("Scheme", "1")).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(PortError::ServiceUnavailable { service: "mfapi".to_string() }).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(PortError::transformation("bad body")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
