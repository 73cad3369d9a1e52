//! Market Data Infrastructure
//!
//! Adapters that supply scheme metadata and NAV history to the domain layer
//! through `SchemeDataPort`.
//!
//! - [`MfApiClient`]: HTTP client for the public mutual fund API with retry,
//!   backoff, and a circuit breaker
//! - [`CachedSchemeSource`]: TTL cache decorating any `SchemeDataPort`
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use infra_market::{CacheConfig, CachedSchemeSource, MfApiClient, MfApiConfig};
//!
//! # fn main() -> Result<(), infra_market::ProviderError> {
//! let client = MfApiClient::new(MfApiConfig::default())?;
//! let source = CachedSchemeSource::new(Arc::new(client), CacheConfig::default());
//! # let _ = source;
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod circuit_breaker;
pub mod client;
pub mod error;
pub mod models;

pub use cache::{CacheConfig, CacheKey, CacheStats, CachedSchemeSource};
pub use client::{MfApiClient, MfApiConfig, DEFAULT_BASE_URL};
pub use error::ProviderError;
