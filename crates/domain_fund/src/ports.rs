//! Fund Domain Ports
//!
//! The calculators never fetch data themselves. Scheme catalogues and NAV
//! histories come through `SchemeDataPort`, which is implemented by:
//!
//! - **HTTP Adapter**: the public mutual fund API client (infra_market)
//! - **Cache Decorator**: a TTL cache wrapping any other implementation
//! - **In-memory Adapter**: fixtures for tests (test_utils)
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_fund::ports::{SchemeDataPort, SchemeDataPortExt};
//! use std::sync::Arc;
//!
//! pub struct ReturnsService {
//!     schemes: Arc<dyn SchemeDataPort>,
//! }
//!
//! impl ReturnsService {
//!     pub async fn one_year(&self, code: &SchemeCode) -> Result<ReturnsResult, ApiError> {
//!         let series = self.schemes.nav_series(code).await?;
//!         Ok(calculate_returns(&series, &ReturnWindow::Trailing(Period::OneYear))?)
//!     }
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, SchemeCode};

use crate::nav::NavSeries;
use crate::scheme::{SchemeDetails, SchemePage, SchemeQuery, SchemeSummary};

/// Source of scheme metadata and NAV history
#[async_trait]
pub trait SchemeDataPort: DomainPort + HealthCheckable {
    /// Lists every scheme in the catalogue
    ///
    /// # Returns
    ///
    /// All known schemes, in provider order
    async fn list_schemes(&self) -> Result<Vec<SchemeSummary>, PortError>;

    /// Retrieves metadata and NAV history for one scheme
    ///
    /// # Arguments
    ///
    /// * `code` - The scheme code
    ///
    /// # Returns
    ///
    /// The scheme details, or `PortError::NotFound` when the provider has
    /// no history for the code
    async fn get_scheme(&self, code: &SchemeCode) -> Result<SchemeDetails, PortError>;
}

/// Convenience operations built on [`SchemeDataPort`]
#[async_trait]
pub trait SchemeDataPortExt: SchemeDataPort {
    /// Fetches the catalogue and applies a listing query
    async fn find_schemes(&self, query: &SchemeQuery) -> Result<SchemePage, PortError> {
        let schemes = self.list_schemes().await?;
        Ok(query.apply(&schemes))
    }

    /// Fetches only the NAV history of a scheme
    async fn nav_series(&self, code: &SchemeCode) -> Result<NavSeries, PortError> {
        Ok(self.get_scheme(code).await?.nav_history)
    }
}

impl<T: SchemeDataPort + ?Sized> SchemeDataPortExt for T {}
