//! Optimal cluster-to-label alignment.
//!
//! The contingency table is read as a complete weighted bipartite graph
//! between labels and clusters. The exact assignment solver pairs
//! `min(K_true, K_pred)` entities so that the number of items explained by the
//! pairing is maximal; everything left over is reported as unmapped instead
//! of being dropped or paired arbitrarily.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::{
    assignment::solve_max_weight,
    contingency::ContingencyTable,
    error::{InputKind, InvalidInputError, Result},
};

/// One cluster paired with one label by the optimal assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatchedPair<L, C> {
    /// Cluster side of the pair.
    pub cluster: C,
    /// Label side of the pair.
    pub label: L,
    /// Items with `label` that were placed in `cluster`.
    pub weight: usize,
}

/// Injective mapping from clusters to labels with explicit leftovers.
///
/// # Examples
/// ```
/// use clustalign_core::{build_contingency, optimal_cluster_to_label_map};
///
/// let table = build_contingency(&["x", "x", "x", "y", "y", "y"], &[0, 0, 1, 1, 1, 1])?;
/// let mapping = optimal_cluster_to_label_map(&table);
/// assert_eq!(mapping.label_for(&0), Some(&"x"));
/// assert_eq!(mapping.label_for(&1), Some(&"y"));
/// assert_eq!(mapping.matched_weight(), 5);
/// assert!(mapping.unmapped_clusters().is_empty());
/// # Ok::<(), clustalign_core::InvalidInputError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClusterToLabelMap<L, C> {
    pairs: Vec<MatchedPair<L, C>>,
    unmapped_clusters: Vec<C>,
    unmapped_labels: Vec<L>,
    matched_weight: usize,
}

impl<L, C> ClusterToLabelMap<L, C> {
    /// Matched pairs in ascending cluster order.
    #[must_use]
    pub fn pairs(&self) -> &[MatchedPair<L, C>] {
        &self.pairs
    }

    /// Clusters the assignment left without a label, in ascending order.
    #[must_use]
    pub fn unmapped_clusters(&self) -> &[C] {
        &self.unmapped_clusters
    }

    /// Labels the assignment left without a cluster, in ascending order.
    #[must_use]
    pub fn unmapped_labels(&self) -> &[L] {
        &self.unmapped_labels
    }

    /// Total number of items explained by the matched pairs.
    #[must_use]
    pub const fn matched_weight(&self) -> usize {
        self.matched_weight
    }
}

impl<L: PartialEq, C: Ord> ClusterToLabelMap<L, C> {
    /// Label paired with `cluster`, if any.
    #[must_use]
    pub fn label_for(&self, cluster: &C) -> Option<&L> {
        self.pairs
            .binary_search_by(|pair| pair.cluster.cmp(cluster))
            .ok()
            .and_then(|index| self.pairs.get(index))
            .map(|pair| &pair.label)
    }

    /// Cluster paired with `label`, if any.
    #[must_use]
    pub fn cluster_for(&self, label: &L) -> Option<&C> {
        self.pairs
            .iter()
            .find(|pair| &pair.label == label)
            .map(|pair| &pair.cluster)
    }
}

/// Outcome of looking up one item's cluster in a [`ClusterToLabelMap`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MappedPrediction<L> {
    /// The item's cluster is paired with this label.
    Label(L),
    /// The item's cluster has no label. Always scored as incorrect.
    Unmapped,
}

impl<L> MappedPrediction<L> {
    /// Returns the predicted label, or `None` for the unmapped sentinel.
    #[must_use]
    pub const fn label(&self) -> Option<&L> {
        match self {
            Self::Label(label) => Some(label),
            Self::Unmapped => None,
        }
    }

    /// Whether this is the unmapped sentinel.
    #[must_use]
    pub const fn is_unmapped(&self) -> bool {
        matches!(self, Self::Unmapped)
    }
}

/// Solves the maximum-weight assignment between the table's labels and clusters.
///
/// Ties between equally good assignments resolve lexicographically: the
/// lowest label takes the lowest cluster any optimum allows, then the next
/// label does the same, whichever side has more entities. A label is left
/// unmapped only when no optimum pairs it.
/// Pairs with zero co-occurrence are kept when the optimum needs them to stay
/// injective over `min(K_true, K_pred)` entities.
#[must_use]
#[instrument(
    name = "clustalign.assignment",
    skip_all,
    fields(labels = table.labels().len(), clusters = table.clusters().len()),
)]
pub fn optimal_cluster_to_label_map<L, C>(table: &ContingencyTable<L, C>) -> ClusterToLabelMap<L, C>
where
    L: Ord + Clone,
    C: Ord + Clone,
{
    let solved = solve_max_weight(table.rows());

    let mut matched_rows = BTreeSet::new();
    let mut matched_columns = BTreeSet::new();
    let mut pairs = Vec::with_capacity(solved.len());
    let mut matched_weight = 0_usize;
    for (row, column) in solved {
        let (Some(label), Some(cluster)) = (table.labels().get(row), table.clusters().get(column))
        else {
            continue;
        };
        let weight = table.get(row, column).unwrap_or_default();
        matched_weight += weight;
        matched_rows.insert(row);
        matched_columns.insert(column);
        pairs.push(MatchedPair {
            cluster: cluster.clone(),
            label: label.clone(),
            weight,
        });
    }
    pairs.sort_by(|left, right| left.cluster.cmp(&right.cluster));

    let unmapped_clusters = unused(table.clusters(), &matched_columns);
    let unmapped_labels = unused(table.labels(), &matched_rows);
    debug!(
        matched = pairs.len(),
        matched_weight,
        unmapped_clusters = unmapped_clusters.len(),
        unmapped_labels = unmapped_labels.len(),
        "cluster-to-label assignment solved"
    );

    ClusterToLabelMap {
        pairs,
        unmapped_clusters,
        unmapped_labels,
        matched_weight,
    }
}

fn unused<T: Clone>(values: &[T], taken: &BTreeSet<usize>) -> Vec<T> {
    values
        .iter()
        .enumerate()
        .filter(|(index, _)| !taken.contains(index))
        .map(|(_, value)| value.clone())
        .collect()
}

/// Translates each cluster id into its mapped label.
///
/// Clusters without a label, including ids the mapping has never seen,
/// become [`MappedPrediction::Unmapped`] rather than an error.
///
/// # Errors
/// Returns [`InvalidInputError::EmptyInput`] when `cluster_ids` is empty.
///
/// # Examples
/// ```
/// use clustalign_core::{MappedPrediction, apply_mapping, build_contingency, optimal_cluster_to_label_map};
///
/// let table = build_contingency(&["x", "y", "x", "y"], &[0, 1, 2, 2])?;
/// let mapping = optimal_cluster_to_label_map(&table);
/// let predictions = apply_mapping(&[0, 1, 2, 2], &mapping)?;
/// assert_eq!(predictions[0], MappedPrediction::Label("x"));
/// assert_eq!(predictions[3], MappedPrediction::Unmapped);
/// # Ok::<(), clustalign_core::InvalidInputError>(())
/// ```
pub fn apply_mapping<L, C>(
    cluster_ids: &[C],
    mapping: &ClusterToLabelMap<L, C>,
) -> Result<Vec<MappedPrediction<L>>>
where
    L: Clone + PartialEq,
    C: Ord,
{
    if cluster_ids.is_empty() {
        return Err(InvalidInputError::EmptyInput {
            input: InputKind::ClusterIds,
        });
    }
    Ok(cluster_ids
        .iter()
        .map(|cluster| {
            mapping
                .label_for(cluster)
                .map_or(MappedPrediction::Unmapped, |label| {
                    MappedPrediction::Label(label.clone())
                })
        })
        .collect())
}
