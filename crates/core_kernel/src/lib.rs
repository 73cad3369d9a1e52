//! Core Kernel - Foundational types and utilities for the fund analytics system
//!
//! This crate provides the building blocks used across the domain and adapter crates:
//! - Calendar arithmetic for NAV dates (month shifts, day counts, fractional years)
//! - The scheme identifier used by the upstream data provider
//! - Port error and health types for the hexagonal adapter layer

pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use temporal::{DateRange, TemporalError};
pub use identifiers::SchemeCode;
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
    CircuitBreakerConfig,
};
pub use error::CoreError;
