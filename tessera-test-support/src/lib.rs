//! Shared test utilities used across tessera crates.

pub mod ci;
pub mod tracing;
