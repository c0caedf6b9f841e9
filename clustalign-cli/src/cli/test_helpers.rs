//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_evaluate;
use super::{CliError, EvaluateArgs, MetricArg, OutputFormat};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Arguments evaluating `clusters` against `labels` with default options.
pub(super) fn evaluate_args(labels: PathBuf, clusters: Vec<PathBuf>) -> EvaluateArgs {
    EvaluateArgs {
        labels,
        clusters,
        features: None,
        column: None,
        metric: MetricArg::Euclidean,
        format: OutputFormat::Text,
        skip_intrinsic: false,
    }
}

pub(super) fn run_evaluate_expecting_error(args: EvaluateArgs, panic_msg: &str) -> CliError {
    match run_evaluate(args) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
