//! Command-line interface orchestration for clustalign.
//!
//! The `evaluate` command loads a label column, one cluster id column per
//! clustering run and an optional Parquet feature matrix, evaluates every run
//! with the same evaluator and renders a text or JSON report.

mod commands;
mod render;

pub use commands::{
    Cli, CliError, Command, EvaluateArgs, EvaluatedRun, ExecutionSummary, MetricArg,
    OutputFormat, RunReport, run_cli,
};
pub use render::render_summary;

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod test_helpers;
