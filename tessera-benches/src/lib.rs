//! Benchmark support crate for tessera.
//!
//! Generates seeded synthetic assemblies and groups the parameters used by
//! the Criterion benchmarks for contact matrix construction and graph
//! analytics.

pub mod error;
pub mod params;
pub mod scene;
