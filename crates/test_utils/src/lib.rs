//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! fund analytics test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built NAV series and scheme data
//! - `builders`: Builder patterns for NAV series and calculator parameters
//! - `memory`: In-memory `SchemeDataPort` with failure injection
//! - `assertions`: Custom assertion helpers for decimals and series
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod memory;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use memory::*;
pub use assertions::*;
pub use generators::*;
