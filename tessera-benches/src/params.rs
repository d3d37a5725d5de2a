//! Benchmark parameter types.

use std::fmt;

use tessera_core::ExecutionStrategy;

/// Parameters for a contact matrix benchmark run.
#[derive(Clone, Debug)]
pub struct ContactBenchParams {
    /// Number of parts in the assembly.
    pub part_count: usize,
    /// How pair queries are scheduled.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for ContactBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self.strategy {
            ExecutionStrategy::Auto => "auto",
            ExecutionStrategy::Sequential => "sequential",
            ExecutionStrategy::Parallel => "parallel",
        };
        write!(f, "n={},{strategy}", self.part_count)
    }
}

/// Parameters for an analytics benchmark run.
#[derive(Clone, Debug)]
pub struct AnalyticsBenchParams {
    /// Number of parts in the assembly.
    pub part_count: usize,
}

impl fmt::Display for AnalyticsBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.part_count)
    }
}
