//! HTTP adapter for the public mutual fund API
//!
//! Implements `SchemeDataPort` against `https://api.mfapi.in` (or any server
//! with the same contract). Requests are retried with exponential backoff on
//! transient failures and guarded by a circuit breaker.
//!
//! # Error Mapping
//!
//! - 404 or empty history -> `PortError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx, open circuit -> `PortError::ServiceUnavailable`
//! - Timeouts -> `PortError::Timeout`
//! - Undecodable body -> `PortError::Transformation`

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use core_kernel::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable, PortError,
    SchemeCode,
};
use domain_fund::{SchemeDataPort, SchemeDetails, SchemeSummary};

use crate::circuit_breaker::CircuitBreaker;
use crate::error::ProviderError;
use crate::models::{into_summaries, SchemeListItem, SchemeResponse};

/// Default provider endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.mfapi.in";

const ADAPTER_ID: &str = "mfapi-client";
const USER_AGENT: &str = concat!("navlens/", env!("CARGO_PKG_VERSION"));

/// Configuration for the provider client
///
/// # Example
///
/// ```rust
/// use infra_market::MfApiConfig;
///
/// let config = MfApiConfig::new("https://api.mfapi.in")
///     .timeout_secs(10)
///     .retry_attempts(2);
/// assert_eq!(config.retry_attempts, 2);
/// ```
#[derive(Debug, Clone)]
pub struct MfApiConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Attempts per call, including the first
    pub retry_attempts: u32,
    /// Delay before the first retry; doubles on each further retry
    pub retry_base_delay_ms: u64,
    /// Upper bound on any single retry delay, including `Retry-After`
    pub max_retry_delay_secs: u64,
    /// Scheme fetched by the health check
    pub health_probe_code: String,
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for MfApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MfApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: 30,
            retry_attempts: 3,
            retry_base_delay_ms: 200,
            max_retry_delay_secs: 30,
            health_probe_code: "119551".to_string(),
            circuit_breaker: Some(CircuitBreakerConfig::default()),
        }
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the number of attempts per call (at least one)
    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts.max(1);
        self
    }

    pub fn retry_base_delay_ms(mut self, millis: u64) -> Self {
        self.retry_base_delay_ms = millis;
        self
    }

    pub fn max_retry_delay_secs(mut self, secs: u64) -> Self {
        self.max_retry_delay_secs = secs;
        self
    }

    pub fn circuit_breaker(mut self, config: Option<CircuitBreakerConfig>) -> Self {
        self.circuit_breaker = config;
        self
    }

    fn backoff(&self, retry: u32) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms.saturating_mul(1u64 << retry.min(10)))
    }

    /// Wait before retry number `retry` after `error`, never above the configured maximum
    fn retry_delay(&self, retry: u32, error: &ProviderError) -> Duration {
        let backoff = self.backoff(retry);
        let delay = match error {
            ProviderError::RateLimited { retry_after_secs } => Duration::from_secs(*retry_after_secs).max(backoff),
            _ => backoff,
        };
        delay.min(Duration::from_secs(self.max_retry_delay_secs))
    }
}

/// Client for the public mutual fund API
#[derive(Debug, Clone)]
pub struct MfApiClient {
    http: Client,
    config: MfApiConfig,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
}

impl MfApiClient {
    /// Creates a client
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ClientBuild` if the TLS backend cannot be
    /// initialised.
    pub fn new(config: MfApiConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        let circuit_breaker = config
            .circuit_breaker
            .clone()
            .map(|cb| Arc::new(CircuitBreaker::new(cb)));

        Ok(Self {
            http,
            config,
            circuit_breaker,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Checks if the circuit breaker is refusing calls
    pub async fn is_circuit_open(&self) -> bool {
        match &self.circuit_breaker {
            Some(cb) => !cb.is_available().await,
            None => false,
        }
    }

    /// Fetches and decodes `path`, retrying transient failures
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.config.base_url, path);
        let attempts = self.config.retry_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            if let Some(cb) = &self.circuit_breaker {
                if !cb.is_available().await {
                    return Err(ProviderError::CircuitOpen(self.config.base_url.clone()));
                }
            }

            let started = Instant::now();
            let result = self.send_once::<T>(&url).await;

            match result {
                Ok(value) => {
                    if let Some(cb) = &self.circuit_breaker {
                        cb.record_success();
                    }
                    debug!(%url, attempt, elapsed_ms = started.elapsed().as_millis() as u64, "Provider request succeeded");
                    return Ok(value);
                }
                Err(error) if error.is_retryable() => {
                    if let Some(cb) = &self.circuit_breaker {
                        cb.record_failure().await;
                    }
                    if attempt >= attempts {
                        warn!(%url, attempt, error = %error, "Provider request failed, giving up");
                        return Err(error);
                    }
                    let delay = self.config.retry_delay(attempt - 1, &error);
                    warn!(%url, attempt, delay_ms = delay.as_millis() as u64, error = %error, "Provider request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn send_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        let timeout_ms = self.config.timeout_secs.saturating_mul(1000);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(url, timeout_ms, &e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(url.to_string()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(1);
            return Err(ProviderError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::from_reqwest(url, timeout_ms, &e))
    }

    /// Fetches the full scheme catalogue
    pub async fn fetch_catalogue(&self) -> Result<Vec<SchemeSummary>, ProviderError> {
        let items: Vec<SchemeListItem> = self.get_json("/mf").await?;
        let schemes = into_summaries(items);
        info!(count = schemes.len(), "Fetched scheme catalogue");
        Ok(schemes)
    }

    /// Fetches metadata and NAV history of one scheme
    pub async fn fetch_scheme(&self, code: &SchemeCode) -> Result<SchemeDetails, ProviderError> {
        let response: SchemeResponse = match self.get_json(&format!("/mf/{}", code)).await {
            Err(ProviderError::NotFound(_)) => return Err(ProviderError::NotFound(code.to_string())),
            other => other?,
        };
        if let Some(status) = response.status.as_deref().filter(|s| !s.eq_ignore_ascii_case("SUCCESS")) {
            debug!(scheme = %code, status, "Provider reported non-success status");
        }

        let details = response.into_details(code)?;
        info!(scheme = %code, observations = details.nav_history.len(), "Fetched scheme");
        Ok(details)
    }
}

impl DomainPort for MfApiClient {}

#[async_trait]
impl HealthCheckable for MfApiClient {
    /// Fetches the probe scheme and reports how the provider responded
    async fn health_check(&self) -> HealthCheckResult {
        if self.is_circuit_open().await {
            return HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Degraded, 0)
                .with_message("Circuit breaker is open");
        }

        let started = Instant::now();
        let probe = match SchemeCode::new(self.config.health_probe_code.as_str()) {
            Ok(code) => code,
            Err(e) => {
                return HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Unhealthy, 0)
                    .with_message(format!("Invalid probe code: {}", e));
            }
        };
        let result = self.fetch_scheme(&probe).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Healthy, latency_ms),
            Err(e) => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Unhealthy, latency_ms)
                .with_message(e.to_string()),
        }
    }
}

#[async_trait]
impl SchemeDataPort for MfApiClient {
    async fn list_schemes(&self) -> Result<Vec<SchemeSummary>, PortError> {
        Ok(self.fetch_catalogue().await?)
    }

    async fn get_scheme(&self, code: &SchemeCode) -> Result<SchemeDetails, PortError> {
        Ok(self.fetch_scheme(code).await?)
    }
}
