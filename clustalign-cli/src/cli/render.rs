//! Text and JSON rendering of an [`ExecutionSummary`].

use std::fmt::Display;
use std::io::{self, Write};

use clustalign_core::{DegenerateCase, EvaluationReport, IntrinsicMetrics, SilhouetteMetric};

use super::commands::{ExecutionSummary, OutputFormat, RunReport};

/// Renders `summary` to `writer` in the format it was requested in.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clustalign_cli::cli::{ExecutionSummary, OutputFormat, render_summary};
/// # use clustalign_core::SilhouetteMetric;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     labels: "labels".into(),
///     features: None,
///     metric: SilhouetteMetric::Euclidean,
///     runs: Vec::new(),
///     format: OutputFormat::Text,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "labels: labels\nfeatures: none\nruns: 0\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, summary)?;
            writeln!(writer)
        }
        OutputFormat::Text => render_text(summary, writer),
    }
}

fn render_text(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "labels: {}", summary.labels)?;
    match &summary.features {
        Some(features) => writeln!(
            writer,
            "features: {features} ({})",
            metric_name(summary.metric)
        )?,
        None => writeln!(writer, "features: none")?,
    }
    writeln!(writer, "runs: {}", summary.runs.len())?;
    for run in &summary.runs {
        writeln!(writer)?;
        writeln!(writer, "run: {} ({})", run.name, run.path.display())?;
        match &run.report {
            RunReport::Integer(report) => render_report(report, &mut writer)?,
            RunReport::Text(report) => render_report(report, &mut writer)?,
        }
    }
    Ok(())
}

const fn metric_name(metric: SilhouetteMetric) -> &'static str {
    match metric {
        SilhouetteMetric::Euclidean => "euclidean",
        SilhouetteMetric::Cosine => "cosine",
    }
}

fn render_report<C: Display>(
    report: &EvaluationReport<String, C>,
    writer: &mut impl Write,
) -> io::Result<()> {
    let extrinsic = &report.extrinsic;
    writeln!(writer, "  items: {}", report.items())?;
    writeln!(writer, "  purity: {:.4}", report.purity)?;
    writeln!(writer, "  adjusted rand index: {:.4}", report.agreement.ari)?;
    writeln!(
        writer,
        "  normalized mutual information: {:.4}",
        report.agreement.nmi
    )?;
    writeln!(
        writer,
        "  mapped accuracy upper bound: {:.4}",
        report.mapped_accuracy_upper_bound()
    )?;
    writeln!(writer, "  accuracy: {:.4}", extrinsic.accuracy)?;
    writeln!(
        writer,
        "  macro precision/recall/f1: {:.4} / {:.4} / {:.4}",
        extrinsic.macro_precision, extrinsic.macro_recall, extrinsic.macro_f1
    )?;
    writeln!(
        writer,
        "  weighted precision/recall/f1: {:.4} / {:.4} / {:.4}",
        extrinsic.weighted_precision, extrinsic.weighted_recall, extrinsic.weighted_f1
    )?;

    writeln!(writer, "  mapping:")?;
    for pair in report.mapping.pairs() {
        writeln!(
            writer,
            "    {} -> {} ({} items)",
            pair.cluster, pair.label, pair.weight
        )?;
    }
    for cluster in report.mapping.unmapped_clusters() {
        writeln!(writer, "    {cluster} -> unmapped")?;
    }

    writeln!(writer, "  per label:")?;
    for row in &extrinsic.per_label {
        writeln!(
            writer,
            "    {}\tprecision {:.4}\trecall {:.4}\tf1 {:.4}\tsupport {}",
            row.label, row.precision, row.recall, row.f1, row.support
        )?;
    }
    if extrinsic.unmapped > 0 {
        writeln!(writer, "    unmapped items: {}", extrinsic.unmapped)?;
    }

    if let Some(intrinsic) = &report.intrinsic {
        render_intrinsic(intrinsic, writer)?;
    }

    if !report.warnings.is_empty() {
        writeln!(writer, "  warnings:")?;
        for warning in &report.warnings {
            writeln!(writer, "    {}", describe_warning(warning))?;
        }
    }
    Ok(())
}

fn render_intrinsic<C>(intrinsic: &IntrinsicMetrics<C>, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "  intrinsic:")?;
    writeln!(
        writer,
        "    silhouette: {:.4}",
        intrinsic.cohesion_separation_score
    )?;
    writeln!(
        writer,
        "    calinski-harabasz: {}",
        optional_score(intrinsic.variance_ratio_score)
    )?;
    writeln!(
        writer,
        "    davies-bouldin: {}",
        optional_score(intrinsic.cluster_distance_ratio_score)
    )
}

fn optional_score(score: Option<f64>) -> String {
    score.map_or_else(|| "n/a".to_owned(), |value| format!("{value:.4}"))
}

pub(super) fn describe_warning<C: Display>(warning: &DegenerateCase<String, C>) -> String {
    match warning {
        DegenerateCase::SingletonCluster { cluster } => format!("cluster {cluster} is a singleton"),
        DegenerateCase::UnmappedCluster { cluster, size } => {
            format!("cluster {cluster} ({size} items) has no label")
        }
        DegenerateCase::UnmappedLabel { label, support } => {
            format!("label {label} ({support} items) has no cluster")
        }
    }
}
