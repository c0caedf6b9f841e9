//! Contingency tables between true labels and predicted clusters.
//!
//! Rows follow the `Ord` order of the labels and columns the `Ord` order of
//! the cluster ids, so two tables built from the same multiset of
//! `(label, cluster)` pairs are equal regardless of item order.

use std::collections::BTreeSet;

use tracing::{Span, field, instrument};

use crate::error::{Result, validate_alignment};

/// Co-occurrence counts between true labels (rows) and clusters (columns).
///
/// # Examples
/// ```
/// use clustalign_core::build_contingency;
///
/// let table = build_contingency(&["x", "x", "y"], &[0, 1, 1])?;
/// assert_eq!(table.labels(), &["x", "y"]);
/// assert_eq!(table.clusters(), &[0, 1]);
/// assert_eq!(table.get(1, 1), Some(1));
/// assert_eq!(table.total(), 3);
/// # Ok::<(), clustalign_core::InvalidInputError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContingencyTable<L, C> {
    labels: Vec<L>,
    clusters: Vec<C>,
    counts: Vec<Vec<usize>>,
    total: usize,
}

impl<L, C> ContingencyTable<L, C> {
    /// Distinct true labels in row order.
    #[must_use]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Distinct cluster ids in column order.
    #[must_use]
    pub fn clusters(&self) -> &[C] {
        &self.clusters
    }

    /// Count rows, one per label, each holding one count per cluster.
    #[must_use]
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.counts
    }

    /// Count of items with label ordinal `row` placed in cluster ordinal `column`.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<usize> {
        self.counts.get(row)?.get(column).copied()
    }

    /// Number of items per label.
    #[must_use]
    pub fn row_sums(&self) -> Vec<usize> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Number of items per cluster.
    #[must_use]
    pub fn column_sums(&self) -> Vec<usize> {
        let mut sums = vec![0; self.clusters.len()];
        for row in &self.counts {
            for (sum, count) in sums.iter_mut().zip(row) {
                *sum += count;
            }
        }
        sums
    }

    /// Total number of items.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns `(labels, clusters)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.labels.len(), self.clusters.len())
    }

    /// Majority row for `column`: the highest count, lowest label ordinal on ties.
    fn column_majority(&self, column: usize) -> Option<(usize, usize)> {
        self.counts
            .iter()
            .enumerate()
            .filter_map(|(row, counts)| counts.get(column).map(|&count| (row, count)))
            .fold(None, |best, (row, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((row, count)),
            })
    }
}

impl<L: Ord, C: Ord> ContingencyTable<L, C> {
    /// Row ordinal of `label`.
    #[must_use]
    pub fn label_index(&self, label: &L) -> Option<usize> {
        self.labels.binary_search(label).ok()
    }

    /// Column ordinal of `cluster`.
    #[must_use]
    pub fn cluster_index(&self, cluster: &C) -> Option<usize> {
        self.clusters.binary_search(cluster).ok()
    }
}

impl<L: Clone, C: Clone> ContingencyTable<L, C> {
    /// Summarises every cluster: its size, majority label and purity.
    #[must_use]
    pub fn cluster_summaries(&self) -> Vec<ClusterSummary<L, C>> {
        self.clusters
            .iter()
            .zip(self.column_sums())
            .enumerate()
            .map(|(column, (cluster, size))| {
                let majority = self.column_majority(column);
                let majority_count = majority.map_or(0, |(_, count)| count);
                ClusterSummary {
                    cluster: cluster.clone(),
                    size,
                    majority_label: majority
                        .and_then(|(row, _)| self.labels.get(row))
                        .cloned(),
                    majority_count,
                    purity: ratio(majority_count, size),
                }
            })
            .collect()
    }
}

/// Per-cluster composition derived from a [`ContingencyTable`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClusterSummary<L, C> {
    /// Cluster described by this summary.
    pub cluster: C,
    /// Number of items in the cluster.
    pub size: usize,
    /// Most frequent true label inside the cluster.
    pub majority_label: Option<L>,
    /// Number of items carrying the majority label.
    pub majority_count: usize,
    /// `majority_count / size`.
    pub purity: f64,
}

/// Counts how often each `(label, cluster)` pair occurs.
///
/// # Errors
/// Returns [`InvalidInputError::EmptyInput`](crate::InvalidInputError::EmptyInput)
/// when either sequence is empty and
/// [`InvalidInputError::LengthMismatch`](crate::InvalidInputError::LengthMismatch)
/// when their lengths differ. Trailing elements are never dropped.
#[instrument(
    name = "clustalign.contingency",
    err,
    skip_all,
    fields(items = true_labels.len(), labels = field::Empty, clusters = field::Empty),
)]
pub fn build_contingency<L, C>(true_labels: &[L], cluster_ids: &[C]) -> Result<ContingencyTable<L, C>>
where
    L: Ord + Clone,
    C: Ord + Clone,
{
    let total = validate_alignment(true_labels, cluster_ids)?;
    let labels = sorted_distinct(true_labels);
    let clusters = sorted_distinct(cluster_ids);

    let mut counts = vec![vec![0_usize; clusters.len()]; labels.len()];
    for (label, cluster) in true_labels.iter().zip(cluster_ids) {
        // Both values are present, so the partition points are their ordinals.
        let row = labels.partition_point(|candidate| candidate < label);
        let column = clusters.partition_point(|candidate| candidate < cluster);
        if let Some(count) = counts.get_mut(row).and_then(|counts| counts.get_mut(column)) {
            *count += 1;
        }
    }

    let span = Span::current();
    span.record("labels", labels.len());
    span.record("clusters", clusters.len());

    Ok(ContingencyTable {
        labels,
        clusters,
        counts,
        total,
    })
}

/// Fraction of items that share their cluster's majority label.
///
/// A cluster with no items contributes nothing; such columns never appear in
/// tables produced by [`build_contingency`].
///
/// # Examples
/// ```
/// use clustalign_core::{build_contingency, purity};
///
/// let table = build_contingency(&["x", "x", "x", "y", "y", "y"], &[0, 0, 1, 1, 1, 1])?;
/// assert!((purity(&table) - 5.0 / 6.0).abs() < 1e-12);
/// # Ok::<(), clustalign_core::InvalidInputError>(())
/// ```
#[must_use]
pub fn purity<L, C>(table: &ContingencyTable<L, C>) -> f64 {
    let explained: usize = (0..table.clusters.len())
        .filter_map(|column| table.column_majority(column))
        .map(|(_, count)| count)
        .sum();
    ratio(explained, table.total)
}

fn sorted_distinct<T: Ord + Clone>(values: &[T]) -> Vec<T> {
    values
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "item-count ratios are reported as floating-point fractions"
)]
pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
