//! Label-free agreement scores between the true and predicted partitions.
//!
//! Adjusted Rand Index (ARI) and Normalized Mutual Information (NMI) only look
//! at which items share a group, so they need no cluster-to-label mapping and
//! are invariant to renaming labels or clusters.

use tracing::instrument;

use crate::{
    contingency::{ContingencyTable, build_contingency},
    error::Result,
};

/// ARI and NMI values computed from one contingency table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionAgreement {
    /// Adjusted Rand Index in `[-1.0, 1.0]`.
    pub ari: f64,
    /// Normalized Mutual Information in `[0.0, 1.0]`.
    pub nmi: f64,
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "ARI/NMI combinatorics require floating-point arithmetic."
)]
fn comb2(value: usize) -> f64 {
    let as_float = value as f64;
    as_float * (as_float - 1.0) / 2.0
}

#[expect(
    clippy::float_arithmetic,
    reason = "ARI definition requires floating-point arithmetic."
)]
fn adjusted_rand_index_from_table<L, C>(table: &ContingencyTable<L, C>) -> f64 {
    if table.total() < 2 {
        return 1.0;
    }

    let sum_pair_counts: f64 = table.rows().iter().flatten().copied().map(comb2).sum();
    let sum_label_groups: f64 = table.row_sums().into_iter().map(comb2).sum();
    let sum_cluster_groups: f64 = table.column_sums().into_iter().map(comb2).sum();
    let total = comb2(table.total());

    let expected = (sum_label_groups * sum_cluster_groups) / total;
    let max_index = 0.5 * (sum_label_groups + sum_cluster_groups);
    let denominator = max_index - expected;
    if denominator == 0.0 {
        1.0
    } else {
        (sum_pair_counts - expected) / denominator
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "entropy computation requires floating-point arithmetic."
)]
fn entropy(counts: &[usize], item_count: usize) -> f64 {
    let item_count_f64 = item_count as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let probability = count as f64 / item_count_f64;
            -probability * probability.ln()
        })
        .sum()
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "NMI definition requires floating-point arithmetic."
)]
fn normalized_mutual_information_from_table<L, C>(table: &ContingencyTable<L, C>) -> f64 {
    let item_count = table.total();
    if item_count == 0 {
        return 1.0;
    }

    let row_sums = table.row_sums();
    let column_sums = table.column_sums();
    let label_entropy = entropy(&row_sums, item_count);
    let cluster_entropy = entropy(&column_sums, item_count);

    match (label_entropy == 0.0, cluster_entropy == 0.0) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let n = item_count as f64;
    let mut mutual_information = 0.0_f64;
    for (row, &row_sum) in table.rows().iter().zip(&row_sums) {
        for (&count, &column_sum) in row.iter().zip(&column_sums) {
            if count == 0 {
                continue;
            }
            let joint = count as f64;
            mutual_information +=
                (joint / n) * ((joint * n) / (row_sum as f64 * column_sum as f64)).ln();
        }
    }
    mutual_information / (label_entropy * cluster_entropy).sqrt()
}

/// Computes ARI and NMI from an existing table.
#[must_use]
pub fn partition_agreement<L, C>(table: &ContingencyTable<L, C>) -> PartitionAgreement {
    PartitionAgreement {
        ari: adjusted_rand_index_from_table(table),
        nmi: normalized_mutual_information_from_table(table),
    }
}

/// Computes the Adjusted Rand Index between true labels and cluster ids.
///
/// # Errors
///
/// Returns [`InvalidInputError`](crate::InvalidInputError) when the sequences
/// are empty or differ in length.
///
/// # Examples
/// ```
/// use clustalign_core::adjusted_rand_index;
///
/// let ari = adjusted_rand_index(&["a", "a", "b", "b"], &[7, 7, 3, 3])?;
/// assert!((ari - 1.0).abs() < 1e-12);
/// # Ok::<(), clustalign_core::InvalidInputError>(())
/// ```
#[instrument(name = "clustalign.ari", err, skip_all, fields(items = true_labels.len()))]
pub fn adjusted_rand_index<L, C>(true_labels: &[L], cluster_ids: &[C]) -> Result<f64>
where
    L: Ord + Clone,
    C: Ord + Clone,
{
    let table = build_contingency(true_labels, cluster_ids)?;
    Ok(adjusted_rand_index_from_table(&table))
}

/// Computes Normalized Mutual Information between true labels and cluster ids.
///
/// Uses the geometric mean of the two entropies as the normaliser.
///
/// # Errors
///
/// Returns [`InvalidInputError`](crate::InvalidInputError) when the sequences
/// are empty or differ in length.
#[instrument(name = "clustalign.nmi", err, skip_all, fields(items = true_labels.len()))]
pub fn normalized_mutual_information<L, C>(true_labels: &[L], cluster_ids: &[C]) -> Result<f64>
where
    L: Ord + Clone,
    C: Ord + Clone,
{
    let table = build_contingency(true_labels, cluster_ids)?;
    Ok(normalized_mutual_information_from_table(&table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[0, 0, 1, 1], &[1, 1, 0, 0], 1.0)]
    #[case(&[0, 0, 1, 1], &[0, 1, 0, 1], -0.5)]
    #[case(&[0, 0, 0, 0], &[0, 0, 0, 0], 1.0)]
    fn ari_matches_known_values(
        #[case] truth: &[u8],
        #[case] predicted: &[u8],
        #[case] expected: f64,
    ) {
        let ari = adjusted_rand_index(truth, predicted).expect("inputs are aligned");
        assert!((ari - expected).abs() < 1e-12, "ari={ari}, expected={expected}");
    }

    #[rstest]
    fn worked_example_ari() {
        // n=6, pairs: comb2(2)+comb2(1)+comb2(3)=4, rows 3+3=6, columns 1+6=7.
        // expected = 6*7/15 = 2.8, max = 6.5, ari = (4-2.8)/(6.5-2.8).
        let ari = adjusted_rand_index(&["X", "X", "X", "Y", "Y", "Y"], &[0, 0, 1, 1, 1, 1])
            .expect("inputs are aligned");
        assert!((ari - 1.2 / 3.7).abs() < 1e-12);
    }

    #[rstest]
    #[case(&[0, 0, 1, 1], &[5, 5, 9, 9], 1.0)]
    #[case(&[0, 0, 1, 1], &[0, 0, 0, 0], 0.0)]
    #[case(&[0, 0, 0, 0], &[3, 3, 3, 3], 1.0)]
    fn nmi_matches_known_values(
        #[case] truth: &[u8],
        #[case] predicted: &[u8],
        #[case] expected: f64,
    ) {
        let nmi = normalized_mutual_information(truth, predicted).expect("inputs are aligned");
        assert!((nmi - expected).abs() < 1e-12, "nmi={nmi}, expected={expected}");
    }

    #[rstest]
    fn independent_partitions_have_zero_nmi() {
        let nmi = normalized_mutual_information(&[0, 0, 1, 1], &[0, 1, 0, 1])
            .expect("inputs are aligned");
        assert!(nmi.abs() < 1e-12);
    }

    #[rstest]
    fn rejects_mismatched_lengths() {
        assert!(adjusted_rand_index(&[0, 1], &[0]).is_err());
        assert!(normalized_mutual_information(&[0], &[0, 1]).is_err());
    }
}
