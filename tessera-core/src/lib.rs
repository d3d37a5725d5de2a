//! Tessera core library.
//!
//! Turns an assembly of solid parts into a symmetric binary contact matrix
//! and analyses the contact graph derived from it. The pipeline is a chain of
//! pure functions over immutable values:
//!
//! ```text
//! GeometryProvider --ContactAnalyzer::compute--> ContactMatrix
//! ContactMatrix --ContactGraph::from_matrix--> ContactGraph --analyze--> AnalysisResult
//! ```
//!
//! # Examples
//! ```
//! use tessera_core::{
//!     ContactAnalyzerBuilder, ContactGraph, GeometryError, GeometryProvider, analyze,
//! };
//!
//! /// Unit-length rods laid end to end on the x axis.
//! struct Rods(Vec<f64>);
//!
//! impl GeometryProvider for Rods {
//!     fn len(&self) -> usize { self.0.len() }
//!     fn name(&self) -> &str { "rods" }
//!     fn part_name(&self, index: usize) -> Option<&str> {
//!         ["a", "b", "c"].get(index).copied()
//!     }
//!     fn distance(&self, left: usize, right: usize) -> Result<f64, GeometryError> {
//!         let a = self.0.get(left).ok_or(GeometryError::OutOfBounds { index: left })?;
//!         let b = self.0.get(right).ok_or(GeometryError::OutOfBounds { index: right })?;
//!         Ok(((a - b).abs() - 1.0).max(0.0))
//!     }
//! }
//!
//! let analyzer = ContactAnalyzerBuilder::new().with_tolerance(1e-9).build()?;
//! let matrix = analyzer.compute(&Rods(vec![0.0, 1.0, 2.0]))?;
//! let graph = ContactGraph::from_matrix(&matrix);
//! let result = analyze(&graph);
//! assert_eq!(graph.edge_count(), 2);
//! assert_eq!(result.bridges().len(), 2);
//! # Ok::<(), tessera_core::ContactError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analytics;
mod analyzer;
mod builder;
mod error;
mod graph;
mod layout;
mod matrix;
mod names;
mod persistence;
mod provider;

#[cfg(test)]
mod test_utils;

pub use crate::{
    analytics::{AnalysisResult, Centrality, GraphAlgorithms, StandardAlgorithms, analyze, analyze_with},
    analyzer::{ContactAnalyzer, compute_contact_matrix},
    builder::{ContactAnalyzerBuilder, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_TOLERANCE, ExecutionStrategy},
    error::{
        ContactError, ContactErrorCode, GeometryError, GeometryErrorCode, Result, ValidationError,
        ValidationErrorCode,
    },
    graph::{ContactGraph, Edge},
    layout::{Layout, LayoutPolicy, RenderPlan, edge_density, select_layout},
    matrix::{ContactMatrix, MatrixStats},
    names::unique_names,
    persistence::{export_csv, import_csv, write_csv},
    provider::{Bounds, GeometryProvider, Part},
};
