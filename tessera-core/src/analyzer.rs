//! Contact matrix construction for the Tessera library.
//!
//! Provides the [`ContactAnalyzer`] entry point, which evaluates every
//! unordered part pair against the configured tolerance and assembles a
//! validated [`ContactMatrix`] once all pairs have succeeded.

use std::{
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    builder::{ContactAnalyzerBuilder, ExecutionStrategy},
    error::{ContactError, GeometryError},
    matrix::{ContactMatrix, upper_triangle},
    names::unique_names,
    provider::{Bounds, GeometryProvider},
};

type PairResult = core::result::Result<bool, PairFailure>;

#[derive(Debug)]
struct PairFailure {
    left: usize,
    right: usize,
    error: GeometryError,
}

/// Immutable configuration that turns a [`GeometryProvider`] into a
/// [`ContactMatrix`].
///
/// Two parts are in contact when their exact minimum distance does not exceed
/// the tolerance. Instances hold no state between calls.
///
/// # Examples
/// ```
/// use tessera_core::{ContactAnalyzerBuilder, GeometryError, GeometryProvider};
///
/// struct Beads(Vec<f64>);
///
/// impl GeometryProvider for Beads {
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "beads" }
///     fn part_name(&self, index: usize) -> Option<&str> {
///         (index < self.0.len()).then_some("bead")
///     }
///     fn distance(&self, left: usize, right: usize) -> Result<f64, GeometryError> {
///         let a = self.0.get(left).ok_or(GeometryError::OutOfBounds { index: left })?;
///         let b = self.0.get(right).ok_or(GeometryError::OutOfBounds { index: right })?;
///         Ok((a - b).abs())
///     }
/// }
///
/// let analyzer = ContactAnalyzerBuilder::new().with_tolerance(1.0).build()?;
/// let matrix = analyzer.compute(&Beads(vec![0.0, 1.0, 5.0]))?;
/// assert_eq!(matrix.names(), ["bead", "bead_2", "bead_3"]);
/// assert!(matrix.is_contact(0, 1));
/// assert!(!matrix.is_contact(1, 2));
/// # Ok::<(), tessera_core::ContactError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ContactAnalyzer {
    tolerance: f64,
    execution_strategy: ExecutionStrategy,
    max_workers: Option<NonZeroUsize>,
    parallel_threshold: usize,
}

impl ContactAnalyzer {
    pub(crate) fn new(
        tolerance: f64,
        execution_strategy: ExecutionStrategy,
        max_workers: Option<NonZeroUsize>,
        parallel_threshold: usize,
    ) -> Self {
        Self {
            tolerance,
            execution_strategy,
            max_workers,
            parallel_threshold,
        }
    }

    /// Returns the contact tolerance.
    #[rustfmt::skip]
    #[must_use]
    pub fn tolerance(&self) -> f64 { self.tolerance }

    /// Returns the configured execution strategy.
    #[rustfmt::skip]
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Returns the worker bound used for parallel evaluation.
    #[rustfmt::skip]
    #[must_use]
    pub fn max_workers(&self) -> Option<NonZeroUsize> { self.max_workers }

    /// Returns the pair count from which `Auto` evaluates in parallel.
    #[rustfmt::skip]
    #[must_use]
    pub fn parallel_threshold(&self) -> usize { self.parallel_threshold }

    /// Computes the contact matrix for every part the provider lists.
    ///
    /// Pairs whose bounds are already further apart than the tolerance are
    /// recorded as non-contacts without an exact query. Names are made unique
    /// with [`unique_names`] before they enter the matrix.
    ///
    /// # Errors
    /// Returns [`ContactError::EmptyAssembly`] when the provider has no parts,
    /// [`ContactError::Geometry`] when a part name is missing,
    /// [`ContactError::GeometryQuery`] when a distance query fails or yields a
    /// negative or non-finite value, [`ContactError::BackendUnavailable`] when
    /// parallel evaluation is requested without the `parallel` feature, and
    /// [`ContactError::WorkerPool`] when the bounded pool cannot start. No
    /// partial matrix is returned.
    pub fn compute<P: GeometryProvider + Sync>(&self, provider: &P) -> Result<ContactMatrix> {
        let parts = provider.len();
        self.compute_with_len(provider, parts)
    }

    #[instrument(
        name = "core.compute",
        err,
        skip(self, provider),
        fields(
            assembly = %provider.name(),
            parts = parts,
            tolerance = self.tolerance,
            strategy = ?self.execution_strategy
        ),
    )]
    fn compute_with_len<P: GeometryProvider + Sync>(
        &self,
        provider: &P,
        parts: usize,
    ) -> Result<ContactMatrix> {
        if parts == 0 {
            warn!(assembly = provider.name(), "assembly is empty, returning error");
            return Err(ContactError::EmptyAssembly {
                assembly: Arc::from(provider.name()),
            });
        }

        let names = (0..parts)
            .map(|index| {
                provider
                    .part_name(index)
                    .map(str::to_owned)
                    .ok_or(GeometryError::OutOfBounds { index })
            })
            .collect::<core::result::Result<Vec<_>, _>>()
            .map_err(|error| ContactError::Geometry {
                assembly: Arc::from(provider.name()),
                error,
            })?;
        let names = unique_names(names);
        let bounds: Vec<Option<Bounds>> = (0..parts)
            .map(|index| provider.bounds(index).filter(Bounds::is_finite))
            .collect();
        let pairs: Vec<(usize, usize)> = upper_triangle(parts).collect();
        let pruned = AtomicUsize::new(0);
        let evaluator = PairEvaluator {
            provider,
            bounds: &bounds,
            tolerance: self.tolerance,
            pruned: &pruned,
        };

        let contacts = self
            .evaluate(&evaluator, &pairs)?
            .map_err(|failure| ContactError::GeometryQuery {
                assembly: Arc::from(provider.name()),
                left: failure.left,
                right: failure.right,
                error: failure.error,
            })?;

        let matrix = ContactMatrix::from_pair_contacts(names, &contacts)?;
        info!(
            contacts = matrix.contact_count(),
            pairs = pairs.len(),
            pruned = pruned.load(Ordering::Relaxed),
            "contact matrix computed"
        );
        Ok(matrix)
    }

    fn evaluate<P: GeometryProvider + Sync>(
        &self,
        evaluator: &PairEvaluator<'_, P>,
        pairs: &[(usize, usize)],
    ) -> Result<core::result::Result<Vec<bool>, PairFailure>> {
        match self.execution_strategy {
            ExecutionStrategy::Sequential => Ok(evaluate_sequential(evaluator, pairs)),
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => self.evaluate_parallel(evaluator, pairs),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(ContactError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Auto if pairs.len() >= self.parallel_threshold => {
                self.evaluate_parallel(evaluator, pairs)
            }
            ExecutionStrategy::Auto => Ok(evaluate_sequential(evaluator, pairs)),
        }
    }

    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    fn evaluate_parallel<P: GeometryProvider + Sync>(
        &self,
        evaluator: &PairEvaluator<'_, P>,
        pairs: &[(usize, usize)],
    ) -> Result<core::result::Result<Vec<bool>, PairFailure>> {
        let run = || {
            pairs
                .par_iter()
                .map(|&(left, right)| evaluator.evaluate(left, right))
                .collect::<core::result::Result<Vec<_>, _>>()
        };
        match self.max_workers {
            None => {
                debug!(pairs = pairs.len(), "evaluating pairs on the global pool");
                Ok(run())
            }
            Some(workers) => {
                debug!(
                    pairs = pairs.len(),
                    workers = workers.get(),
                    "evaluating pairs on a bounded pool"
                );
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(workers.get())
                    .build()
                    .map_err(|error| ContactError::WorkerPool {
                        workers: workers.get(),
                        reason: Arc::from(error.to_string()),
                    })?;
                Ok(pool.install(run))
            }
        }
    }
}

fn evaluate_sequential<P: GeometryProvider>(
    evaluator: &PairEvaluator<'_, P>,
    pairs: &[(usize, usize)],
) -> core::result::Result<Vec<bool>, PairFailure> {
    debug!(pairs = pairs.len(), "evaluating pairs sequentially");
    pairs
        .iter()
        .map(|&(left, right)| evaluator.evaluate(left, right))
        .collect()
}

struct PairEvaluator<'a, P> {
    provider: &'a P,
    bounds: &'a [Option<Bounds>],
    tolerance: f64,
    pruned: &'a AtomicUsize,
}

impl<P: GeometryProvider> PairEvaluator<'_, P> {
    fn evaluate(&self, left: usize, right: usize) -> PairResult {
        if let (Some(Some(a)), Some(Some(b))) = (self.bounds.get(left), self.bounds.get(right))
            && clearly_beyond(a, b, self.tolerance)
        {
            self.pruned.fetch_add(1, Ordering::Relaxed);
            return Ok(false);
        }

        let distance = self
            .provider
            .distance(left, right)
            .map_err(|error| PairFailure { left, right, error })?;
        if !distance.is_finite() || distance < 0.0 {
            return Err(PairFailure {
                left,
                right,
                error: GeometryError::InvalidDistance {
                    left,
                    right,
                    value: distance,
                },
            });
        }
        Ok(distance <= self.tolerance)
    }
}

/// Rounding slack, in units of the largest coordinate involved, that a
/// bounds gap must clear before a pair is pruned.
const PRUNE_SLACK: f64 = 16.0 * f64::EPSILON;

/// Whether the boxes are far enough apart that no rounding in the exact
/// query could still bring the pair within `tolerance`.
fn clearly_beyond(a: &Bounds, b: &Bounds, tolerance: f64) -> bool {
    let gap = a.gap(b);
    let magnitude = [a.min(), a.max(), b.min(), b.max()]
        .iter()
        .flatten()
        .fold(gap.max(1.0), |largest, value| largest.max(value.abs()));
    gap > tolerance + PRUNE_SLACK * magnitude
}

/// Computes a contact matrix with the default configuration and the given
/// tolerance.
///
/// # Errors
/// Returns [`ContactError::InvalidParameter`] for a negative or non-finite
/// tolerance before any geometry is queried, and otherwise the errors of
/// [`ContactAnalyzer::compute`].
///
/// # Examples
/// ```
/// use tessera_core::{ContactError, GeometryError, GeometryProvider, compute_contact_matrix};
///
/// struct Pair;
///
/// impl GeometryProvider for Pair {
///     fn len(&self) -> usize { 2 }
///     fn name(&self) -> &str { "pair" }
///     fn part_name(&self, index: usize) -> Option<&str> {
///         ["left", "right"].get(index).copied()
///     }
///     fn distance(&self, _left: usize, _right: usize) -> Result<f64, GeometryError> {
///         Ok(0.0)
///     }
/// }
///
/// let matrix = compute_contact_matrix(&Pair, 0.0)?;
/// assert!(matrix.is_contact(0, 1));
/// assert!(matches!(
///     compute_contact_matrix(&Pair, -1.0),
///     Err(ContactError::InvalidParameter { .. })
/// ));
/// # Ok::<(), ContactError>(())
/// ```
pub fn compute_contact_matrix<P: GeometryProvider + Sync>(
    provider: &P,
    tolerance: f64,
) -> Result<ContactMatrix> {
    ContactAnalyzerBuilder::new()
        .with_tolerance(tolerance)
        .build()?
        .compute(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ContactErrorCode, test_utils::IntervalSource};

    use rstest::rstest;

    fn analyzer(tolerance: f64, strategy: ExecutionStrategy) -> ContactAnalyzer {
        ContactAnalyzerBuilder::new()
            .with_tolerance(tolerance)
            .with_execution_strategy(strategy)
            .build()
            .expect("configuration is valid")
    }

    fn chain() -> IntervalSource {
        IntervalSource::from_spans(&[("A", 0.0, 1.0), ("B", 1.0, 2.0), ("C", 2.0, 3.0)])
    }

    #[rstest]
    #[case(ExecutionStrategy::Sequential)]
    #[case(ExecutionStrategy::Auto)]
    fn touching_chain_yields_two_contacts(#[case] strategy: ExecutionStrategy) {
        let matrix = analyzer(1e-9, strategy)
            .compute(&chain())
            .expect("chain must compute");
        let rows: Vec<Vec<u8>> = matrix.rows().map(<[u8]>::to_vec).collect();
        assert_eq!(rows, vec![vec![1, 1, 0], vec![1, 1, 1], vec![0, 1, 1]]);
        assert_eq!(matrix.names(), ["A", "B", "C"]);
    }

    #[test]
    fn empty_assembly_is_rejected() {
        let source = IntervalSource::from_spans(&[]);
        let err = analyzer(0.0, ExecutionStrategy::Auto)
            .compute(&source)
            .expect_err("empty assembly must fail");
        assert_eq!(err.code(), ContactErrorCode::EmptyAssembly);
    }

    #[test]
    fn single_part_yields_unit_matrix() {
        let source = IntervalSource::from_spans(&[("solo", 0.0, 1.0)]);
        let matrix = analyzer(0.0, ExecutionStrategy::Auto)
            .compute(&source)
            .expect("single part must compute");
        assert_eq!(matrix.size(), 1);
        assert_eq!(matrix.get(0, 0), Some(1));
        assert_eq!(source.queries(), 0);
    }

    #[test]
    fn negative_tolerance_fails_before_any_query() {
        let source = chain();
        let err = compute_contact_matrix(&source, -1.0).expect_err("tolerance must be rejected");
        assert_eq!(err.code(), ContactErrorCode::InvalidParameter);
        assert_eq!(source.queries(), 0);
    }

    #[test]
    fn distant_bounds_skip_exact_queries() {
        let source = IntervalSource::from_spans(&[("A", 0.0, 1.0), ("B", 1.0, 2.0), ("far", 10.0, 11.0)]);
        let matrix = analyzer(0.5, ExecutionStrategy::Sequential)
            .compute(&source)
            .expect("assembly must compute");
        assert_eq!(source.queries(), 1);
        assert!(matrix.is_contact(0, 1));
        assert!(!matrix.is_contact(0, 2));
    }

    #[rstest]
    #[case::unit_scale(3.0, 2.0 - f64::EPSILON)]
    #[case::large_coordinates(1.0e6, 2.0 - 1.0e-10)]
    fn gap_rounding_above_exact_distance_keeps_contact(#[case] origin: f64, #[case] exact: f64) {
        // The boxes are exactly 2.0 apart but the exact query lands just below.
        let source = IntervalSource::from_spans(&[
            ("A", origin, origin + 1.0),
            ("B", origin + 3.0, origin + 4.0),
        ])
        .with_distance_override(0, 1, Ok(exact));
        let matrix = analyzer(exact, ExecutionStrategy::Sequential)
            .compute(&source)
            .expect("assembly must compute");
        assert_eq!(source.queries(), 1);
        assert!(matrix.is_contact(0, 1));
    }

    #[test]
    fn pruning_does_not_change_the_outcome() {
        let spans = [("A", 0.0, 1.0), ("B", 1.2, 2.0), ("C", 2.5, 3.0), ("D", 9.0, 9.5)];
        let pruned = IntervalSource::from_spans(&spans);
        let exhaustive = IntervalSource::from_spans(&spans).without_bounds();
        for tolerance in [0.0, 0.2, 0.5, 1.0, 7.0] {
            let analyzer = analyzer(tolerance, ExecutionStrategy::Sequential);
            assert_eq!(
                analyzer.compute(&pruned).expect("pruned run"),
                analyzer.compute(&exhaustive).expect("exhaustive run"),
            );
        }
    }

    #[rstest]
    #[case::failure(Err(GeometryError::Degenerate { index: 2, reason: Arc::from("inverted box") }))]
    #[case::nan(Ok(f64::NAN))]
    #[case::negative(Ok(-0.5))]
    fn bad_distance_names_the_pair(#[case] outcome: core::result::Result<f64, GeometryError>) {
        let source = chain().with_distance_override(1, 2, outcome);
        let err = analyzer(1e-9, ExecutionStrategy::Sequential)
            .compute(&source)
            .expect_err("query must fail");
        match err {
            ContactError::GeometryQuery {
                left, right, assembly, ..
            } => {
                assert_eq!((left, right), (1, 2));
                assert_eq!(&*assembly, "intervals");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_are_suffixed() {
        let source = IntervalSource::from_spans(&[("bolt", 0.0, 1.0), ("bolt", 3.0, 4.0)]);
        let matrix = analyzer(0.0, ExecutionStrategy::Auto)
            .compute(&source)
            .expect("assembly must compute");
        assert_eq!(matrix.names(), ["bolt", "bolt_2"]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn bounded_pool_matches_sequential() {
        let spans: Vec<(String, f64, f64)> = (0..24)
            .map(|index| (format!("p{index}"), index as f64 * 0.75, index as f64 * 0.75 + 1.0))
            .collect();
        let borrowed: Vec<(&str, f64, f64)> = spans
            .iter()
            .map(|(name, start, end)| (name.as_str(), *start, *end))
            .collect();
        let source = IntervalSource::from_spans(&borrowed);
        let parallel = ContactAnalyzerBuilder::new()
            .with_tolerance(0.3)
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .with_max_workers(2)
            .build()
            .expect("configuration is valid")
            .compute(&source)
            .expect("parallel run");
        let sequential = analyzer(0.3, ExecutionStrategy::Sequential)
            .compute(&source)
            .expect("sequential run");
        assert_eq!(parallel, sequential);
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn parallel_without_feature_is_unavailable() {
        let err = analyzer(0.0, ExecutionStrategy::Parallel)
            .compute(&chain())
            .expect_err("parallel is unavailable");
        assert_eq!(err.code(), ContactErrorCode::BackendUnavailable);
    }
}
