//! Request handlers

pub mod calculators;
pub mod health;
pub mod schemes;
