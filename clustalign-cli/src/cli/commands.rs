//! Command implementations and argument parsing for the clustalign CLI.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use clustalign_core::{
    EvaluationReport, Evaluator, EvaluatorBuilder, InvalidInputError, SilhouetteMetric,
};
use clustalign_providers_dense::{DenseMatrixProvider, DenseMatrixProviderError};
use clustalign_providers_text::{IdColumn, TextProvider, TextProviderError};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_FEATURE_COLUMN: &str = "embedding";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "clustalign",
    about = "Evaluate cluster assignments against ground-truth labels."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Score one or more clustering runs against the same labels.
    Evaluate(EvaluateArgs),
}

/// Options accepted by the `evaluate` command.
#[derive(Debug, Args, Clone)]
pub struct EvaluateArgs {
    /// UTF-8 file with one true label per line.
    #[arg(long)]
    pub labels: PathBuf,

    /// UTF-8 file with one cluster id per line; repeat for several runs.
    #[arg(long, required = true, num_args = 1..)]
    pub clusters: Vec<PathBuf>,

    /// Parquet file holding the feature row of each item.
    #[arg(long)]
    pub features: Option<PathBuf>,

    /// Column containing `FixedSizeList<Float32, D>` rows [default: embedding].
    #[arg(long, requires = "features")]
    pub column: Option<String>,

    /// Distance used by the silhouette score.
    #[arg(long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,

    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Skip intrinsic metrics even when features are supplied.
    #[arg(long)]
    pub skip_intrinsic: bool,
}

/// Silhouette distances selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Straight-line distance between feature rows.
    Euclidean,
    /// One minus the cosine similarity of feature rows.
    Cosine,
}

impl From<MetricArg> for SilhouetteMetric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Euclidean => Self::Euclidean,
            MetricArg::Cosine => Self::Cosine,
        }
    }
}

/// Output formats for the rendered summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    Text,
    /// One JSON document holding every run.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading a label or cluster id file failed.
    #[error("failed to read `{path}`: {source}")]
    Text {
        /// File being read.
        path: PathBuf,
        /// Provider failure.
        #[source]
        source: TextProviderError,
    },
    /// Dense matrix ingestion failed.
    #[error(transparent)]
    Dense(#[from] DenseMatrixProviderError),
    /// The evaluator rejected the inputs.
    #[error(transparent)]
    Core(#[from] InvalidInputError),
}

/// Report of one run, typed by how its cluster ids order.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "cluster_ids", content = "report", rename_all = "snake_case")]
pub enum RunReport {
    /// Cluster ids were all integers.
    Integer(EvaluationReport<String, i64>),
    /// Cluster ids were arbitrary strings.
    Text(EvaluationReport<String, String>),
}

impl RunReport {
    /// Accuracy of the optimally mapped predictions.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        match self {
            Self::Integer(report) => report.extrinsic.accuracy,
            Self::Text(report) => report.extrinsic.accuracy,
        }
    }

    /// Number of degenerate cases found.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        match self {
            Self::Integer(report) => report.warnings.len(),
            Self::Text(report) => report.warnings.len(),
        }
    }
}

/// One evaluated cluster id file.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluatedRun {
    /// Run name derived from the file stem.
    pub name: String,
    /// File the cluster ids were read from.
    pub path: PathBuf,
    /// Evaluation outcome.
    #[serde(flatten)]
    pub report: RunReport,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionSummary {
    /// Name of the label source.
    pub labels: String,
    /// Name of the feature source, when one was loaded.
    pub features: Option<String>,
    /// Silhouette distance in effect.
    pub metric: SilhouetteMetric,
    /// Evaluated runs in command-line order.
    pub runs: Vec<EvaluatedRun>,
    /// Rendering requested for the summary.
    #[serde(skip)]
    pub format: OutputFormat,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when an input cannot be loaded or the evaluator
/// rejects it.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clustalign_cli::cli::{Cli, Command, EvaluateArgs, MetricArg, OutputFormat, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let labels = dir.path().join("labels.txt");
/// let clusters = dir.path().join("kmeans.txt");
/// std::fs::write(&labels, "billing\nbilling\nrefund\n")?;
/// std::fs::write(&clusters, "0\n0\n1\n")?;
/// let cli = Cli {
///     command: Command::Evaluate(EvaluateArgs {
///         labels,
///         clusters: vec![clusters],
///         features: None,
///         column: None,
///         metric: MetricArg::Euclidean,
///         format: OutputFormat::Text,
///         skip_intrinsic: false,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.runs[0].name, "kmeans");
/// assert_eq!(summary.runs[0].report.accuracy(), 1.0);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Evaluate(args) => {
            Span::current().record("command", field::display("evaluate"));
            run_evaluate(args)
        }
    }
}

#[instrument(
    name = "cli.evaluate",
    err,
    skip(args),
    fields(runs = args.clusters.len(), features = args.features.is_some(), items = field::Empty),
)]
pub(super) fn run_evaluate(args: EvaluateArgs) -> Result<ExecutionSummary, CliError> {
    let EvaluateArgs {
        labels,
        clusters,
        features,
        column,
        metric,
        format,
        skip_intrinsic,
    } = args;
    let evaluator = EvaluatorBuilder::new()
        .with_silhouette_metric(metric.into())
        .with_intrinsic_metrics(!skip_intrinsic)
        .build();

    let label_provider = load_text(&labels)?;
    let labels_name = label_provider.name().to_owned();
    let true_labels = label_provider.into_lines();
    Span::current().record("items", true_labels.len());

    let dense = features
        .map(|path| {
            let name = derive_source_name(&path, "features");
            let column_name = column.as_deref().unwrap_or(DEFAULT_FEATURE_COLUMN);
            DenseMatrixProvider::try_from_parquet_path(name, &path, column_name)
        })
        .transpose()?;

    let runs = clusters
        .into_iter()
        .map(|path| evaluate_run(&evaluator, &true_labels, dense.as_ref(), path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExecutionSummary {
        labels: labels_name,
        features: dense.map(|provider| provider.name().to_owned()),
        metric: evaluator.silhouette_metric(),
        runs,
        format,
    })
}

#[instrument(
    name = "cli.evaluate_run",
    err,
    skip(evaluator, true_labels, dense, path),
    fields(path = %path.display(), ids = field::Empty),
)]
pub(super) fn evaluate_run(
    evaluator: &Evaluator,
    true_labels: &[String],
    dense: Option<&DenseMatrixProvider>,
    path: PathBuf,
) -> Result<EvaluatedRun, CliError> {
    let provider = load_text(&path)?;
    let name = provider.name().to_owned();
    let representation = dense.map(DenseMatrixProvider::representation);
    let span = Span::current();
    let report = match provider.into_ids() {
        IdColumn::Integers(ids) => {
            span.record("ids", "integer");
            RunReport::Integer(evaluator.evaluate(true_labels, &ids, representation)?)
        }
        IdColumn::Strings(ids) => {
            span.record("ids", "text");
            RunReport::Text(evaluator.evaluate(true_labels, &ids, representation)?)
        }
    };
    info!(
        run = name.as_str(),
        accuracy = report.accuracy(),
        warnings = report.warning_count(),
        "run evaluated"
    );
    Ok(EvaluatedRun { name, path, report })
}

fn load_text(path: &Path) -> Result<TextProvider, CliError> {
    let reader = open_text_reader(path)?;
    let name = derive_source_name(path, "column");
    TextProvider::try_from_reader(name, reader).map_err(|source| CliError::Text {
        path: path.to_path_buf(),
        source,
    })
}

#[instrument(name = "cli.open_text_reader", err, fields(path = field::Empty))]
pub(super) fn open_text_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_source_name(path: &Path, fallback: &str) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| fallback.to_owned(), ToOwned::to_owned)
}
