//! Runs every evaluation step for one clustering run.
//!
//! The evaluator owns no data. Each call derives a fresh contingency table
//! and mapping from its arguments, so one instance can score any number of
//! clustering runs (for example K-Means and Ward over the same items).

use tracing::{Span, debug, field, instrument, warn};

use crate::{
    Result,
    agreement::partition_agreement,
    builder::EvaluatorBuilder,
    contingency::{ContingencyTable, build_contingency, purity},
    extrinsic::extrinsic_metrics,
    intrinsic::{IntrinsicMetrics, SilhouetteMetric, intrinsic_metrics},
    mapping::{ClusterToLabelMap, apply_mapping, optimal_cluster_to_label_map},
    matrix::Representation,
    report::{DegenerateCase, EvaluationReport},
};

/// Evaluates cluster assignments against true labels.
///
/// # Examples
/// ```
/// use clustalign_core::{DegenerateCase, Evaluator, MappedPrediction};
///
/// let evaluator = Evaluator::default();
/// let report = evaluator.evaluate(
///     &["X", "X", "X", "Y", "Y", "Y", "X", "Y"],
///     &[0, 0, 0, 1, 1, 1, 2, 2],
///     None,
/// )?;
/// assert_eq!(report.mapping.unmapped_clusters(), &[2]);
/// assert_eq!(report.mapped_predictions[7], MappedPrediction::Unmapped);
/// assert!((report.extrinsic.accuracy - 0.75).abs() < 1e-12);
/// assert!(report
///     .warnings
///     .contains(&DegenerateCase::UnmappedCluster { cluster: 2, size: 2 }));
/// # Ok::<(), clustalign_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    silhouette_metric: SilhouetteMetric,
    intrinsic_metrics: bool,
}

impl Default for Evaluator {
    fn default() -> Self {
        EvaluatorBuilder::new().build()
    }
}

impl Evaluator {
    pub(crate) const fn new(silhouette_metric: SilhouetteMetric, intrinsic_metrics: bool) -> Self {
        Self {
            silhouette_metric,
            intrinsic_metrics,
        }
    }

    /// Returns the distance used by the cohesion/separation score.
    #[must_use]
    pub const fn silhouette_metric(&self) -> SilhouetteMetric {
        self.silhouette_metric
    }

    /// Returns whether intrinsic metrics are computed when a representation
    /// is supplied.
    #[must_use]
    pub const fn intrinsic_metrics_enabled(&self) -> bool {
        self.intrinsic_metrics
    }

    /// Scores `cluster_ids` against `true_labels`.
    ///
    /// When `representation` is given and intrinsic metrics are enabled, the
    /// geometry-only scores are included too. All preconditions are checked
    /// before any metric is computed.
    ///
    /// # Errors
    /// Returns [`InvalidInputError`](crate::InvalidInputError) when the
    /// sequences are empty or misaligned, when the representation does not
    /// have one row per item, or when intrinsic metrics are requested for
    /// fewer than two distinct clusters.
    #[instrument(
        name = "clustalign.evaluate",
        err,
        skip_all,
        fields(
            items = true_labels.len(),
            labels = field::Empty,
            clusters = field::Empty,
            intrinsic = field::Empty,
        ),
    )]
    pub fn evaluate<L, C>(
        &self,
        true_labels: &[L],
        cluster_ids: &[C],
        representation: Option<Representation<'_>>,
    ) -> Result<EvaluationReport<L, C>>
    where
        L: Ord + Clone,
        C: Ord + Clone,
    {
        let contingency = build_contingency(true_labels, cluster_ids)?;
        let span = Span::current();
        span.record("labels", contingency.labels().len());
        span.record("clusters", contingency.clusters().len());

        let intrinsic = match representation.filter(|_| self.intrinsic_metrics) {
            Some(representation) => Some(intrinsic_metrics(
                representation,
                cluster_ids,
                self.silhouette_metric,
            )?),
            None => None,
        };
        span.record("intrinsic", intrinsic.is_some());

        let mapping = optimal_cluster_to_label_map(&contingency);
        let mapped_predictions = apply_mapping(cluster_ids, &mapping)?;
        let extrinsic = extrinsic_metrics(true_labels, &mapped_predictions)?;
        let warnings = degenerate_cases(&contingency, &mapping, intrinsic.as_ref());
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "evaluation found degenerate cases");
        }

        let report = EvaluationReport {
            purity: purity(&contingency),
            clusters: contingency.cluster_summaries(),
            agreement: partition_agreement(&contingency),
            contingency,
            mapping,
            mapped_predictions,
            extrinsic,
            intrinsic,
            warnings,
        };
        debug!(
            purity = report.purity,
            ari = report.agreement.ari,
            accuracy = report.extrinsic.accuracy,
            "evaluation complete"
        );
        Ok(report)
    }
}

fn degenerate_cases<L, C>(
    contingency: &ContingencyTable<L, C>,
    mapping: &ClusterToLabelMap<L, C>,
    intrinsic: Option<&IntrinsicMetrics<C>>,
) -> Vec<DegenerateCase<L, C>>
where
    L: Ord + Clone,
    C: Ord + Clone,
{
    let singletons: Vec<C> = match intrinsic {
        Some(metrics) => metrics.singleton_clusters.clone(),
        None => contingency
            .clusters()
            .iter()
            .zip(contingency.column_sums())
            .filter(|&(_, size)| size == 1)
            .map(|(cluster, _)| cluster.clone())
            .collect(),
    };
    let column_sums = contingency.column_sums();
    let row_sums = contingency.row_sums();

    let mut warnings: Vec<DegenerateCase<L, C>> = singletons
        .into_iter()
        .map(|cluster| DegenerateCase::SingletonCluster { cluster })
        .collect();
    warnings.extend(mapping.unmapped_clusters().iter().map(|cluster| {
        DegenerateCase::UnmappedCluster {
            cluster: cluster.clone(),
            size: contingency
                .cluster_index(cluster)
                .and_then(|column| column_sums.get(column).copied())
                .unwrap_or_default(),
        }
    }));
    warnings.extend(mapping.unmapped_labels().iter().map(|label| {
        DegenerateCase::UnmappedLabel {
            label: label.clone(),
            support: contingency
                .label_index(label)
                .and_then(|row| row_sums.get(row).copied())
                .unwrap_or_default(),
        }
    }));
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FeatureMatrix, InputKind, InvalidInputError};
    use rstest::rstest;

    #[rstest]
    fn reports_worked_example() {
        let report = Evaluator::default()
            .evaluate(&["X", "X", "X", "Y", "Y", "Y"], &[0, 0, 1, 1, 1, 1], None)
            .expect("inputs are aligned");
        assert!((report.purity - 5.0 / 6.0).abs() < 1e-12);
        assert_eq!(report.mapping.label_for(&0), Some(&"X"));
        assert_eq!(report.mapping.label_for(&1), Some(&"Y"));
        assert!((report.mapped_accuracy_upper_bound() - 5.0 / 6.0).abs() < 1e-12);
        assert!((report.extrinsic.accuracy - 5.0 / 6.0).abs() < 1e-12);
        assert_eq!(report.items(), 6);
        assert!(report.intrinsic.is_none());
        assert!(report.warnings.is_empty());
    }

    #[rstest]
    fn lists_unmapped_labels_and_singletons() {
        let report = Evaluator::default()
            .evaluate(&["a", "a", "b", "c", "c"], &[1, 1, 1, 2, 2], None)
            .expect("inputs are aligned");
        assert_eq!(
            report.warnings,
            vec![DegenerateCase::UnmappedLabel {
                label: "b",
                support: 1
            }]
        );

        let report = Evaluator::default()
            .evaluate(&["a", "a", "b"], &[1, 1, 7], None)
            .expect("inputs are aligned");
        assert_eq!(
            report.warnings,
            vec![DegenerateCase::SingletonCluster { cluster: 7 }]
        );
    }

    #[rstest]
    fn skips_intrinsic_metrics_when_disabled() {
        let features =
            FeatureMatrix::from_rows(&[vec![0.0], vec![1.0], vec![2.0]]).expect("rows are valid");
        let evaluator = EvaluatorBuilder::new().with_intrinsic_metrics(false).build();
        // A single cluster would fail intrinsic validation if it ran.
        let report = evaluator
            .evaluate(
                &["a", "a", "b"],
                &[0, 0, 0],
                Some(Representation::Features(&features)),
            )
            .expect("intrinsic metrics are disabled");
        assert!(report.intrinsic.is_none());
    }

    #[rstest]
    fn fails_before_computing_anything_on_misaligned_representation() {
        let features = FeatureMatrix::from_rows(&[vec![0.0], vec![1.0]]).expect("rows are valid");
        let err = Evaluator::default()
            .evaluate(
                &["a", "a", "b"],
                &[0, 0, 1],
                Some(Representation::Features(&features)),
            )
            .expect_err("representation is too short");
        assert_eq!(
            err,
            InvalidInputError::LengthMismatch {
                input: InputKind::Features,
                expected: 3,
                actual: 2,
            }
        );
    }
}
