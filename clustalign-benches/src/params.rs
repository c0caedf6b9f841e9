//! Benchmark parameter types.

use std::fmt;

/// Shape of one evaluation benchmark run.
#[derive(Clone, Debug)]
pub struct EvaluationBenchParams {
    /// Number of items.
    pub point_count: usize,
    /// Number of true labels and of predicted clusters.
    pub cluster_count: usize,
}

impl fmt::Display for EvaluationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.point_count, self.cluster_count)
    }
}
