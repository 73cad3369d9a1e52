//! Circuit breaker guarding calls to the provider
//!
//! Opens after `failure_threshold` consecutive transient failures. While
//! open, calls are refused until `reset_timeout_secs` have passed; the next
//! call is then let through as a trial (half-open). `success_threshold`
//! successes close the circuit again.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::warn;

use core_kernel::CircuitBreakerConfig;

#[derive(Debug)]
pub(crate) struct CircuitBreaker {
    config: CircuitBreakerConfig,
    failure_count: AtomicU64,
    success_count: AtomicU64,
    is_open: AtomicBool,
    opened_at: RwLock<Option<Instant>>,
}

impl CircuitBreaker {
    pub(crate) fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            failure_count: AtomicU64::new(0),
            success_count: AtomicU64::new(0),
            is_open: AtomicBool::new(false),
            opened_at: RwLock::new(None),
        }
    }

    /// Returns true if a call may be attempted
    pub(crate) async fn is_available(&self) -> bool {
        if !self.is_open.load(Ordering::Relaxed) {
            return true;
        }

        match *self.opened_at.read().await {
            Some(opened) => opened.elapsed() >= Duration::from_secs(self.config.reset_timeout_secs),
            None => true,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.is_open.load(Ordering::Relaxed)
    }

    pub(crate) fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
        if !self.is_open.load(Ordering::Relaxed) {
            return;
        }
        let successes = self.success_count.fetch_add(1, Ordering::Relaxed) + 1;
        if successes >= u64::from(self.config.success_threshold) {
            self.is_open.store(false, Ordering::Relaxed);
            self.success_count.store(0, Ordering::Relaxed);
        }
    }

    pub(crate) async fn record_failure(&self) {
        self.success_count.store(0, Ordering::Relaxed);
        let failures = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        if failures >= u64::from(self.config.failure_threshold) {
            if !self.is_open.swap(true, Ordering::Relaxed) {
                warn!(failures, "Opening provider circuit breaker");
            }
            *self.opened_at.write().await = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker() -> CircuitBreaker {
        CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: 2,
            reset_timeout_secs: 10,
            success_threshold: 1,
        })
    }

    #[tokio::test]
    async fn test_opens_after_threshold() {
        let cb = breaker();
        cb.record_failure().await;
        assert!(cb.is_available().await);
        cb.record_failure().await;
        assert!(cb.is_open());
        assert!(!cb.is_available().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_after_timeout_then_closes() {
        let cb = breaker();
        cb.record_failure().await;
        cb.record_failure().await;

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(cb.is_available().await);

        cb.record_success();
        assert!(!cb.is_open());
    }

    #[tokio::test]
    async fn test_success_resets_failures() {
        let cb = breaker();
        cb.record_failure().await;
        cb.record_success();
        cb.record_failure().await;
        assert!(!cb.is_open());
    }
}
