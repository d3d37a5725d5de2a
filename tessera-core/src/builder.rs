//! Builder utilities for configuring contact analysis.
//!
//! Exposes the execution strategy selection surface and the builder validation
//! used before constructing [`ContactAnalyzer`] instances.

use std::{num::NonZeroUsize, sync::Arc};

use crate::{Result, analyzer::ContactAnalyzer, error::ContactError};

/// Default contact tolerance in model units.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Default number of part pairs from which [`ExecutionStrategy::Auto`] switches
/// to parallel evaluation.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Indicates how [`ContactAnalyzer`] evaluates pairwise distance queries.
///
/// `Auto` resolves deterministically: it evaluates pairs in parallel when the
/// `parallel` feature is enabled and the pair count reaches the configured
/// threshold, and sequentially otherwise.
///
/// # Examples
/// ```
/// use tessera_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select an evaluation path automatically.
    Auto,
    /// Evaluate every pair on the calling thread.
    Sequential,
    /// Evaluate pairs on a rayon worker pool.
    Parallel,
}

/// Configures and constructs [`ContactAnalyzer`] instances.
///
/// # Examples
/// ```
/// use tessera_core::{ContactAnalyzerBuilder, ExecutionStrategy};
///
/// let analyzer = ContactAnalyzerBuilder::new()
///     .with_tolerance(0.01)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(analyzer.tolerance(), 0.01);
/// assert_eq!(analyzer.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct ContactAnalyzerBuilder {
    tolerance: f64,
    execution_strategy: ExecutionStrategy,
    max_workers: Option<usize>,
    parallel_threshold: usize,
}

impl Default for ContactAnalyzerBuilder {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            execution_strategy: ExecutionStrategy::Auto,
            max_workers: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ContactAnalyzerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use tessera_core::{ContactAnalyzerBuilder, DEFAULT_TOLERANCE, ExecutionStrategy};
    ///
    /// let builder = ContactAnalyzerBuilder::new();
    /// assert_eq!(builder.tolerance(), DEFAULT_TOLERANCE);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.max_workers(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the contact tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the configured contact tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Sets the execution strategy to use when computing the matrix.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Bounds the number of parallel workers. Without a bound the global
    /// rayon pool is used.
    ///
    /// # Examples
    /// ```
    /// use tessera_core::ContactAnalyzerBuilder;
    ///
    /// let builder = ContactAnalyzerBuilder::new().with_max_workers(4);
    /// assert_eq!(builder.max_workers(), Some(4));
    /// ```
    #[must_use]
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Returns the configured worker bound.
    #[must_use]
    pub fn max_workers(&self) -> Option<usize> {
        self.max_workers
    }

    /// Overrides the pair count from which `Auto` runs in parallel.
    #[must_use]
    pub fn with_parallel_threshold(mut self, pairs: usize) -> Self {
        self.parallel_threshold = pairs;
        self
    }

    /// Returns the pair count from which `Auto` runs in parallel.
    #[must_use]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Validates the configuration and constructs a [`ContactAnalyzer`].
    ///
    /// # Errors
    /// Returns [`ContactError::InvalidParameter`] when the tolerance is
    /// negative or not finite, or when the worker bound is zero.
    ///
    /// # Examples
    /// ```
    /// use tessera_core::{ContactAnalyzerBuilder, ContactError};
    ///
    /// let err = ContactAnalyzerBuilder::new().with_tolerance(-1.0).build();
    /// assert!(matches!(err, Err(ContactError::InvalidParameter { parameter: "tolerance", .. })));
    /// ```
    pub fn build(self) -> Result<ContactAnalyzer> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ContactError::InvalidParameter {
                parameter: "tolerance",
                reason: Arc::from(format!(
                    "must be a finite value of at least 0 (got {})",
                    self.tolerance
                )),
            });
        }
        let max_workers = match self.max_workers {
            None => None,
            Some(workers) => Some(NonZeroUsize::new(workers).ok_or_else(|| {
                ContactError::InvalidParameter {
                    parameter: "max_workers",
                    reason: Arc::from("must be at least 1"),
                }
            })?),
        };

        Ok(ContactAnalyzer::new(
            self.tolerance,
            self.execution_strategy,
            max_workers,
            self.parallel_threshold,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(-1.0)]
    #[case(-f64::MIN_POSITIVE)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn build_rejects_invalid_tolerance(#[case] tolerance: f64) {
        let err = ContactAnalyzerBuilder::new()
            .with_tolerance(tolerance)
            .build()
            .expect_err("tolerance must be rejected");
        assert!(matches!(
            err,
            ContactError::InvalidParameter {
                parameter: "tolerance",
                ..
            }
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(1e-6)]
    #[case(25.0)]
    fn build_accepts_non_negative_tolerance(#[case] tolerance: f64) {
        let analyzer = ContactAnalyzerBuilder::new()
            .with_tolerance(tolerance)
            .build()
            .expect("tolerance must be accepted");
        assert_eq!(analyzer.tolerance(), tolerance);
    }

    #[test]
    fn build_rejects_zero_workers() {
        let err = ContactAnalyzerBuilder::new()
            .with_max_workers(0)
            .build()
            .expect_err("zero workers must be rejected");
        assert!(matches!(
            err,
            ContactError::InvalidParameter {
                parameter: "max_workers",
                ..
            }
        ));
    }

    #[test]
    fn build_carries_configuration() {
        let analyzer = ContactAnalyzerBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .with_max_workers(2)
            .with_parallel_threshold(8)
            .build()
            .expect("configuration is valid");
        assert_eq!(analyzer.execution_strategy(), ExecutionStrategy::Parallel);
        assert_eq!(analyzer.max_workers().map(NonZeroUsize::get), Some(2));
        assert_eq!(analyzer.parallel_threshold(), 8);
    }
}
