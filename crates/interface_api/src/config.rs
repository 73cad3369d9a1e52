//! API configuration

use std::time::Duration;

use infra_market::{CacheConfig, MfApiConfig};
use serde::Deserialize;

/// API configuration
///
/// Loaded from `API_`-prefixed environment variables, e.g. `API_PORT=9090`
/// or `API_PROVIDER_BASE_URL=http://localhost:9000`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Base URL of the mutual fund data provider
    pub provider_base_url: String,
    /// Per-request timeout for provider calls in seconds
    pub provider_timeout_secs: u64,
    /// Attempts per provider call, including the first
    pub provider_retry_attempts: u32,
    /// Longest wait between provider retries in seconds, `Retry-After` included
    pub provider_max_retry_delay_secs: u64,
    /// Time-to-live of cached provider responses in seconds
    pub cache_ttl_secs: u64,
    /// Maximum number of cached provider responses
    pub cache_capacity: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            provider_base_url: infra_market::DEFAULT_BASE_URL.to_string(),
            provider_timeout_secs: 30,
            provider_retry_attempts: 3,
            provider_max_retry_delay_secs: 30,
            cache_ttl_secs: infra_market::cache::DEFAULT_TTL_SECS,
            cache_capacity: infra_market::cache::DEFAULT_CAPACITY,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment, falling back to defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port.to_string())?
            .set_default("log_level", defaults.log_level)?
            .set_default("provider_base_url", defaults.provider_base_url)?
            .set_default("provider_timeout_secs", defaults.provider_timeout_secs.to_string())?
            .set_default("provider_retry_attempts", defaults.provider_retry_attempts.to_string())?
            .set_default(
                "provider_max_retry_delay_secs",
                defaults.provider_max_retry_delay_secs.to_string(),
            )?
            .set_default("cache_ttl_secs", defaults.cache_ttl_secs.to_string())?
            .set_default("cache_capacity", defaults.cache_capacity.to_string())?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the provider client
    pub fn provider_config(&self) -> MfApiConfig {
        MfApiConfig::new(self.provider_base_url.as_str())
            .timeout_secs(self.provider_timeout_secs)
            .retry_attempts(self.provider_retry_attempts)
            .max_retry_delay_secs(self.provider_max_retry_delay_secs)
    }

    /// Settings for the provider response cache
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(Duration::from_secs(self.cache_ttl_secs), self.cache_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.cache_ttl_secs, 43_200);
        assert_eq!(config.cache_capacity, 1000);
    }

    #[test]
    fn test_provider_config_carries_settings() {
        let config = ApiConfig {
            provider_base_url: "http://localhost:9000/".to_string(),
            provider_retry_attempts: 5,
            provider_max_retry_delay_secs: 7,
            ..ApiConfig::default()
        };
        let provider = config.provider_config();
        assert_eq!(provider.base_url, "http://localhost:9000");
        assert_eq!(provider.retry_attempts, 5);
        assert_eq!(provider.max_retry_delay_secs, 7);
        assert_eq!(config.cache_config().ttl, Duration::from_secs(43_200));
    }
}
