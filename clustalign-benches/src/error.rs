//! Benchmark setup error type.

use clustalign_core::InvalidInputError;

use crate::synthetic::SyntheticError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic data generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The evaluator rejected the generated data.
    #[error("evaluator rejected benchmark input: {0}")]
    Input(#[from] InvalidInputError),
}
