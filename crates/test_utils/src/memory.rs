//! In-memory scheme data port
//!
//! Serves fixture data through `SchemeDataPort` so that handlers and caches
//! can be tested without network access. Calls are counted and the port can
//! be switched into a failing state to exercise error paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, SchemeCode};
use domain_fund::{SchemeDataPort, SchemeDetails, SchemeSummary};
use tokio::sync::RwLock;

/// In-memory implementation of `SchemeDataPort`
#[derive(Debug, Default)]
pub struct InMemorySchemePort {
    catalogue: Arc<RwLock<Vec<SchemeSummary>>>,
    schemes: Arc<RwLock<HashMap<SchemeCode, SchemeDetails>>>,
    unavailable: AtomicBool,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl InMemorySchemePort {
    /// Creates an empty port
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates with schemes; the catalogue lists them in the given order
    pub fn with_schemes(schemes: Vec<SchemeDetails>) -> Self {
        let catalogue = schemes.iter().map(|s| s.meta.summary()).collect();
        let schemes = schemes.into_iter().map(|s| (s.meta.code.clone(), s)).collect();
        Self {
            catalogue: Arc::new(RwLock::new(catalogue)),
            schemes: Arc::new(RwLock::new(schemes)),
            ..Default::default()
        }
    }

    /// Replaces the catalogue without adding scheme details
    pub async fn set_catalogue(&self, catalogue: Vec<SchemeSummary>) {
        *self.catalogue.write().await = catalogue;
    }

    pub async fn insert(&self, details: SchemeDetails) {
        let mut catalogue = self.catalogue.write().await;
        if !catalogue.iter().any(|s| s.code == details.meta.code) {
            catalogue.push(details.meta.summary());
        }
        self.schemes.write().await.insert(details.meta.code.clone(), details);
    }

    /// Makes every subsequent call fail with `ServiceUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), PortError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PortError::ServiceUnavailable {
                service: "in-memory-schemes".to_string(),
            });
        }
        Ok(())
    }
}

impl DomainPort for InMemorySchemePort {}

#[async_trait]
impl HealthCheckable for InMemorySchemePort {
    async fn health_check(&self) -> HealthCheckResult {
        if self.unavailable.load(Ordering::SeqCst) {
            HealthCheckResult::new("in-memory-schemes", AdapterHealth::Unhealthy, 0)
                .with_message("Marked unavailable")
        } else {
            HealthCheckResult::new("in-memory-schemes", AdapterHealth::Healthy, 0)
        }
    }
}

#[async_trait]
impl SchemeDataPort for InMemorySchemePort {
    async fn list_schemes(&self) -> Result<Vec<SchemeSummary>, PortError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.catalogue.read().await.clone())
    }

    async fn get_scheme(&self, code: &SchemeCode) -> Result<SchemeDetails, PortError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.schemes
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| PortError::not_found("Scheme", code))
    }
}
