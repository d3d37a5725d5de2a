//! Shared test utilities for `tessera-core`.

use proptest::test_runner::Config as ProptestConfig;
use tessera_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::{
    error::GeometryError,
    matrix::ContactMatrix,
    provider::{Bounds, GeometryProvider},
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Builds a standard proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// [`GeometryProvider`] over closed intervals on the x axis that counts
/// exact distance queries.
///
/// The distance between two intervals is the gap between them, and the
/// bounds are the intervals themselves, so pruning is exact.
#[derive(Clone, Debug)]
pub(crate) struct IntervalSource {
    spans: Vec<(String, f64, f64)>,
    with_bounds: bool,
    override_pair: Option<(usize, usize, Result<f64, GeometryError>)>,
    queries: Arc<AtomicUsize>,
}

impl IntervalSource {
    /// Creates a source from `(name, start, end)` triples.
    #[must_use]
    pub(crate) fn from_spans(spans: &[(&str, f64, f64)]) -> Self {
        Self {
            spans: spans
                .iter()
                .map(|(name, start, end)| ((*name).to_owned(), *start, *end))
                .collect(),
            with_bounds: true,
            override_pair: None,
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Stops reporting bounds, forcing an exact query for every pair.
    #[must_use]
    pub(crate) fn without_bounds(mut self) -> Self {
        self.with_bounds = false;
        self
    }

    /// Replaces the outcome of one pair's distance query.
    #[must_use]
    pub(crate) fn with_distance_override(
        mut self,
        left: usize,
        right: usize,
        outcome: Result<f64, GeometryError>,
    ) -> Self {
        self.override_pair = Some((left, right, outcome));
        self
    }

    /// Returns the number of exact distance queries answered so far.
    #[must_use]
    pub(crate) fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    fn span(&self, index: usize) -> Result<(f64, f64), GeometryError> {
        self.spans
            .get(index)
            .map(|(_, start, end)| (*start, *end))
            .ok_or(GeometryError::OutOfBounds { index })
    }
}

impl GeometryProvider for IntervalSource {
    fn len(&self) -> usize {
        self.spans.len()
    }

    fn name(&self) -> &str {
        "intervals"
    }

    fn part_name(&self, index: usize) -> Option<&str> {
        self.spans.get(index).map(|(name, _, _)| name.as_str())
    }

    fn distance(&self, left: usize, right: usize) -> Result<f64, GeometryError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        if let Some((a, b, outcome)) = &self.override_pair
            && (*a, *b) == (left, right)
        {
            return outcome.clone();
        }
        let (left_start, left_end) = self.span(left)?;
        let (right_start, right_end) = self.span(right)?;
        Ok((right_start - left_end).max(left_start - right_end).max(0.0))
    }

    fn bounds(&self, index: usize) -> Option<Bounds> {
        if !self.with_bounds {
            return None;
        }
        let (start, end) = self.span(index).ok()?;
        Some(Bounds::new([start, 0.0, 0.0], [end, 0.0, 0.0]))
    }
}

/// Builds a matrix named `P0..Pn` with the listed contacts.
#[must_use]
pub(crate) fn matrix_from_edges(size: usize, edges: &[(usize, usize)]) -> ContactMatrix {
    let mut rows = vec![vec![0_u8; size]; size];
    for (index, row) in rows.iter_mut().enumerate() {
        row[index] = 1;
    }
    for &(left, right) in edges {
        rows[left][right] = 1;
        rows[right][left] = 1;
    }
    let names = (0..size).map(|index| format!("P{index}")).collect();
    ContactMatrix::try_new(names, rows).expect("test matrix must be valid")
}

/// A path `P0 - P1 - ... - P(n-1)`.
#[must_use]
pub(crate) fn path_matrix(size: usize) -> ContactMatrix {
    let edges: Vec<_> = (1..size).map(|index| (index - 1, index)).collect();
    matrix_from_edges(size, &edges)
}

/// A cycle over `size >= 3` nodes.
#[must_use]
pub(crate) fn cycle_matrix(size: usize) -> ContactMatrix {
    let mut edges: Vec<_> = (1..size).map(|index| (index - 1, index)).collect();
    edges.push((0, size - 1));
    matrix_from_edges(size, &edges)
}
