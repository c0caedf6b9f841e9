//! Result of one evaluation run.

use crate::{
    agreement::PartitionAgreement,
    contingency::{ClusterSummary, ContingencyTable, ratio},
    extrinsic::ExtrinsicMetrics,
    intrinsic::IntrinsicMetrics,
    mapping::{ClusterToLabelMap, MappedPrediction},
};

/// A valid but noteworthy outcome of an evaluation.
///
/// These are expected in real clustering runs and never abort the
/// evaluation; they are listed in [`EvaluationReport::warnings`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DegenerateCase<L, C> {
    /// A cluster holds one item, so its silhouette is fixed at zero.
    SingletonCluster {
        /// The singleton cluster.
        cluster: C,
    },
    /// The optimal assignment left this cluster without a label; its items
    /// are scored as incorrect.
    UnmappedCluster {
        /// Cluster without a label.
        cluster: C,
        /// Items in the cluster.
        size: usize,
    },
    /// The optimal assignment left this label without a cluster; none of its
    /// items can be predicted correctly.
    UnmappedLabel {
        /// Label without a cluster.
        label: L,
        /// Items carrying the label.
        support: usize,
    },
}

/// Everything computed for one clustering run against the true labels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EvaluationReport<L, C> {
    /// Label-by-cluster co-occurrence counts.
    pub contingency: ContingencyTable<L, C>,
    /// Fraction of items matching their cluster's majority label.
    pub purity: f64,
    /// Size, majority label and purity of each cluster.
    pub clusters: Vec<ClusterSummary<L, C>>,
    /// Mapping-free agreement scores.
    pub agreement: PartitionAgreement,
    /// Optimal cluster-to-label assignment.
    pub mapping: ClusterToLabelMap<L, C>,
    /// Mapped label of every item, in input order.
    pub mapped_predictions: Vec<MappedPrediction<L>>,
    /// Classification metrics over `mapped_predictions`.
    pub extrinsic: ExtrinsicMetrics<L>,
    /// Geometry-only scores, present when a representation was evaluated.
    pub intrinsic: Option<IntrinsicMetrics<C>>,
    /// Degenerate cases found along the way.
    pub warnings: Vec<DegenerateCase<L, C>>,
}

impl<L, C> EvaluationReport<L, C> {
    /// Best accuracy any injective cluster-to-label mapping can reach.
    #[must_use]
    pub fn mapped_accuracy_upper_bound(&self) -> f64 {
        ratio(self.mapping.matched_weight(), self.contingency.total())
    }

    /// Number of items that were evaluated.
    #[must_use]
    pub const fn items(&self) -> usize {
        self.contingency.total()
    }
}
