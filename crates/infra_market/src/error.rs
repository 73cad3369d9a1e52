//! Provider error types
//!
//! Failures talking to the upstream mutual fund API, and their translation
//! into `PortError` for the domain layer.

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur while fetching scheme data from the provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// The request never produced a response (DNS, connect, TLS)
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The request exceeded the configured timeout
    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// The provider answered with a non-success status
    #[error("Provider returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The provider is throttling requests
    #[error("Provider rate limited the request, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The provider has no data for the scheme
    #[error("Scheme not found: {0}")]
    NotFound(String),

    /// The response body could not be decoded
    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    /// Calls are suspended after repeated failures
    #[error("Circuit breaker is open for {0}")]
    CircuitOpen(String),
}

impl ProviderError {
    /// Classifies a reqwest failure for `url`
    pub fn from_reqwest(url: &str, timeout_ms: u64, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            ProviderError::Timeout {
                url: url.to_string(),
                timeout_ms,
            }
        } else if error.is_decode() {
            ProviderError::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            ProviderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            ProviderError::Transport {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// Checks if repeating the request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Transport { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. } => true,
            ProviderError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<ProviderError> for PortError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::NotFound(code) => PortError::not_found("Scheme", code),
            ProviderError::Timeout { url, timeout_ms } => PortError::Timeout {
                operation: format!("GET {}", url),
                duration_ms: timeout_ms,
            },
            ProviderError::RateLimited { retry_after_secs } => PortError::RateLimited { retry_after_secs },
            ProviderError::Transport { .. } => PortError::connection(error.to_string()),
            ProviderError::Status { status, .. } if status >= 500 => PortError::ServiceUnavailable {
                service: error.to_string(),
            },
            ProviderError::CircuitOpen(service) => PortError::ServiceUnavailable { service },
            ProviderError::Decode(message) => PortError::transformation(message),
            ProviderError::Status { .. } | ProviderError::ClientBuild(_) => PortError::internal(error.to_string()),
        }
    }
}
