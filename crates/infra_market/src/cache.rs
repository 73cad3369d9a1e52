//! TTL cache for scheme data
//!
//! `CachedSchemeSource` wraps any `SchemeDataPort` and serves repeated
//! requests from memory until the entry's time-to-live expires. The
//! provider's data changes once a day at most, so a multi-hour TTL is safe.
//! Failed lookups are never cached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, SchemeCode};
use domain_fund::{SchemeDataPort, SchemeDetails, SchemeSummary};

/// Default time-to-live (12 hours)
pub const DEFAULT_TTL_SECS: u64 = 12 * 60 * 60;
/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 1000;

/// What a cache entry holds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The full scheme catalogue
    Listing,
    /// Details of one scheme
    Scheme(SchemeCode),
}

#[derive(Debug, Clone)]
enum CachedValue {
    Listing(Arc<Vec<SchemeSummary>>),
    Scheme(Arc<SchemeDetails>),
}

/// Cache settings
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    /// Entries kept before eviction starts
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

/// `SchemeDataPort` decorator caching successful responses
pub struct CachedSchemeSource {
    inner: Arc<dyn SchemeDataPort>,
    config: CacheConfig,
    entries: Cache<CacheKey, CachedValue>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for CachedSchemeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSchemeSource")
            .field("config", &self.config)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl CachedSchemeSource {
    /// Wraps `inner` with a cache
    pub fn new(inner: Arc<dyn SchemeDataPort>, config: CacheConfig) -> Self {
        let entries = Cache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.capacity as u64)
            .build();

        Self {
            inner,
            config,
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    async fn lookup(&self, key: &CacheKey) -> Option<CachedValue> {
        let hit = self.entries.get(key).await;
        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    /// Removes one entry
    pub async fn invalidate(&self, key: &CacheKey) {
        self.entries.invalidate(key).await;
    }

    /// Removes every entry
    pub async fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entry_count().await,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    // Moka applies evictions lazily; flush them so the count is current
    async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

impl DomainPort for CachedSchemeSource {}

#[async_trait]
impl HealthCheckable for CachedSchemeSource {
    async fn health_check(&self) -> HealthCheckResult {
        let mut result = self.inner.health_check().await;
        let cached = self.entry_count().await;

        // Cached data keeps serving while the provider is down
        if result.status == AdapterHealth::Unhealthy && cached > 0 {
            result.status = AdapterHealth::Degraded;
        }
        let detail = format!("{} cached entries", cached);
        result.message = Some(match result.message.take() {
            Some(message) => format!("{}; {}", message, detail),
            None => detail,
        });
        result
    }
}

#[async_trait]
impl SchemeDataPort for CachedSchemeSource {
    async fn list_schemes(&self) -> Result<Vec<SchemeSummary>, PortError> {
        if let Some(CachedValue::Listing(schemes)) = self.lookup(&CacheKey::Listing).await {
            debug!("Scheme catalogue served from cache");
            return Ok(schemes.as_ref().clone());
        }

        let schemes = self.inner.list_schemes().await?;
        self.entries
            .insert(CacheKey::Listing, CachedValue::Listing(Arc::new(schemes.clone())))
            .await;
        Ok(schemes)
    }

    async fn get_scheme(&self, code: &SchemeCode) -> Result<SchemeDetails, PortError> {
        let key = CacheKey::Scheme(code.clone());
        if let Some(CachedValue::Scheme(details)) = self.lookup(&key).await {
            debug!(scheme = %code, "Scheme served from cache");
            return Ok(details.as_ref().clone());
        }

        let details = self.inner.get_scheme(code).await?;
        self.entries
            .insert(key, CachedValue::Scheme(Arc::new(details.clone())))
            .await;
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{InMemorySchemePort, SchemeDetailsBuilder, SchemeFixtures};

    fn source(port: Arc<InMemorySchemePort>, ttl_secs: u64, capacity: usize) -> CachedSchemeSource {
        CachedSchemeSource::new(port, CacheConfig::new(Duration::from_secs(ttl_secs), capacity))
    }

    #[tokio::test]
    async fn test_second_lookup_is_cached() {
        let port = Arc::new(InMemorySchemePort::with_schemes(vec![SchemeFixtures::details()]));
        let cache = source(port.clone(), 60, 10);

        cache.get_scheme(&SchemeFixtures::code()).await.unwrap();
        cache.get_scheme(&SchemeFixtures::code()).await.unwrap();

        assert_eq!(port.get_calls(), 1);
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let port = Arc::new(InMemorySchemePort::with_schemes(vec![SchemeFixtures::details()]));
        let cache = CachedSchemeSource::new(
            port.clone(),
            CacheConfig::new(Duration::from_millis(50), 10),
        );

        cache.list_schemes().await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
        cache.list_schemes().await.unwrap();

        assert_eq!(port.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let port = Arc::new(InMemorySchemePort::with_schemes(vec![SchemeFixtures::details()]));
        let cache = source(port.clone(), 60, 10);

        port.set_unavailable(true);
        assert!(cache.get_scheme(&SchemeFixtures::code()).await.is_err());

        port.set_unavailable(false);
        assert!(cache.get_scheme(&SchemeFixtures::code()).await.is_ok());
        assert_eq!(port.get_calls(), 2);
    }

    #[tokio::test]
    async fn test_capacity_bounds_entry_count() {
        let first = SchemeFixtures::details();
        let second = SchemeDetailsBuilder::new().with_code(SchemeFixtures::other_code()).build();
        let port = Arc::new(InMemorySchemePort::with_schemes(vec![first, second]));
        let cache = source(port.clone(), 600, 1);

        cache.get_scheme(&SchemeFixtures::code()).await.unwrap();
        cache.get_scheme(&SchemeFixtures::other_code()).await.unwrap();

        assert_eq!(cache.stats().await.entries, 1);
    }

    #[tokio::test]
    async fn test_clear_drops_entries() {
        let port = Arc::new(InMemorySchemePort::with_schemes(vec![SchemeFixtures::details()]));
        let cache = source(port.clone(), 60, 10);

        cache.get_scheme(&SchemeFixtures::code()).await.unwrap();
        assert_eq!(cache.stats().await.entries, 1);

        cache.clear().await;
        assert_eq!(cache.stats().await.entries, 0);
        cache.get_scheme(&SchemeFixtures::code()).await.unwrap();
        assert_eq!(port.get_calls(), 2);
    }

    #[tokio::test]
    async fn test_unhealthy_inner_with_cache_is_degraded() {
        let port = Arc::new(InMemorySchemePort::with_schemes(vec![SchemeFixtures::details()]));
        let cache = source(port.clone(), 60, 10);
        cache.list_schemes().await.unwrap();

        port.set_unavailable(true);
        let health = cache.health_check().await;
        assert_eq!(health.status, AdapterHealth::Degraded);
    }
}
