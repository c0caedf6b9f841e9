//! Classification-style metrics over mapped predictions.
//!
//! The label set is the union of the true labels and every label that
//! appears as a mapped prediction. A label that is never predicted has a
//! precision of zero, and a label that never occurs in the truth has a recall
//! of zero. [`MappedPrediction::Unmapped`] is not a class: it is a miss for
//! the item's true label and a false positive for nobody.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::{
    contingency::ratio,
    error::{InputKind, InvalidInputError, Result},
    mapping::MappedPrediction,
};

/// Precision, recall and F1 for one label.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LabelReport<L> {
    /// Label described by this row.
    pub label: L,
    /// Fraction of items predicted as `label` that truly carry it.
    pub precision: f64,
    /// Fraction of items carrying `label` that were predicted as it.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Number of items whose true label is `label`.
    pub support: usize,
}

/// Aggregate classification metrics for one set of mapped predictions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtrinsicMetrics<L> {
    /// Fraction of items whose mapped prediction equals their true label.
    pub accuracy: f64,
    /// Unweighted mean of the per-label precision.
    pub macro_precision: f64,
    /// Unweighted mean of the per-label recall.
    pub macro_recall: f64,
    /// Unweighted mean of the per-label F1.
    pub macro_f1: f64,
    /// Support-weighted mean of the per-label precision.
    pub weighted_precision: f64,
    /// Support-weighted mean of the per-label recall.
    pub weighted_recall: f64,
    /// Support-weighted mean of the per-label F1.
    pub weighted_f1: f64,
    /// One row per label, in ascending label order.
    pub per_label: Vec<LabelReport<L>>,
    /// Number of items whose cluster had no label.
    pub unmapped: usize,
}

#[derive(Clone, Copy, Default)]
struct LabelCounts {
    true_positives: usize,
    predicted: usize,
    support: usize,
}

impl LabelCounts {
    #[expect(
        clippy::float_arithmetic,
        reason = "F1 is the harmonic mean of two fractions"
    )]
    fn report<L>(self, label: L) -> LabelReport<L> {
        let precision = ratio(self.true_positives, self.predicted);
        let recall = ratio(self.true_positives, self.support);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        LabelReport {
            label,
            precision,
            recall,
            f1,
            support: self.support,
        }
    }
}

/// Scores mapped predictions against the true labels.
///
/// # Errors
/// Returns [`InvalidInputError::EmptyInput`] when either sequence is empty
/// and [`InvalidInputError::LengthMismatch`] when their lengths differ.
///
/// # Examples
/// ```
/// use clustalign_core::{MappedPrediction, extrinsic_metrics};
///
/// let truth = ["x", "x", "y", "y"];
/// let predicted = [
///     MappedPrediction::Label("x"),
///     MappedPrediction::Label("x"),
///     MappedPrediction::Label("y"),
///     MappedPrediction::Unmapped,
/// ];
/// let metrics = extrinsic_metrics(&truth, &predicted)?;
/// assert!((metrics.accuracy - 0.75).abs() < 1e-12);
/// assert_eq!(metrics.unmapped, 1);
/// # Ok::<(), clustalign_core::InvalidInputError>(())
/// ```
#[instrument(name = "clustalign.extrinsic", err, skip_all, fields(items = true_labels.len()))]
pub fn extrinsic_metrics<L>(
    true_labels: &[L],
    mapped_predictions: &[MappedPrediction<L>],
) -> Result<ExtrinsicMetrics<L>>
where
    L: Ord + Clone,
{
    if true_labels.is_empty() {
        return Err(InvalidInputError::EmptyInput {
            input: InputKind::TrueLabels,
        });
    }
    if mapped_predictions.is_empty() {
        return Err(InvalidInputError::EmptyInput {
            input: InputKind::MappedPredictions,
        });
    }
    if true_labels.len() != mapped_predictions.len() {
        return Err(InvalidInputError::LengthMismatch {
            input: InputKind::MappedPredictions,
            expected: true_labels.len(),
            actual: mapped_predictions.len(),
        });
    }

    let mut counts: BTreeMap<&L, LabelCounts> = BTreeMap::new();
    let mut correct = 0_usize;
    let mut unmapped = 0_usize;
    for (truth, prediction) in true_labels.iter().zip(mapped_predictions) {
        counts.entry(truth).or_default().support += 1;
        match prediction {
            MappedPrediction::Label(predicted) => {
                let entry = counts.entry(predicted).or_default();
                entry.predicted += 1;
                if predicted == truth {
                    entry.true_positives += 1;
                    correct += 1;
                }
            }
            MappedPrediction::Unmapped => unmapped += 1,
        }
    }

    let per_label: Vec<LabelReport<L>> = counts
        .into_iter()
        .map(|(label, counts)| counts.report(label.clone()))
        .collect();
    let metrics = summarise(per_label, correct, unmapped, true_labels.len());
    debug!(
        labels = metrics.per_label.len(),
        accuracy = metrics.accuracy,
        unmapped,
        "extrinsic metrics computed"
    );
    Ok(metrics)
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "averages over label rows are floating-point"
)]
fn summarise<L>(
    per_label: Vec<LabelReport<L>>,
    correct: usize,
    unmapped: usize,
    items: usize,
) -> ExtrinsicMetrics<L> {
    let label_count = per_label.len() as f64;
    let item_count = items as f64;
    let mean = |metric: fn(&LabelReport<L>) -> f64| {
        per_label.iter().map(metric).sum::<f64>() / label_count
    };
    let weighted = |metric: fn(&LabelReport<L>) -> f64| {
        per_label
            .iter()
            .map(|row| metric(row) * row.support as f64)
            .sum::<f64>()
            / item_count
    };

    ExtrinsicMetrics {
        accuracy: ratio(correct, items),
        macro_precision: mean(|row| row.precision),
        macro_recall: mean(|row| row.recall),
        macro_f1: mean(|row| row.f1),
        weighted_precision: weighted(|row| row.precision),
        weighted_recall: weighted(|row| row.recall),
        weighted_f1: weighted(|row| row.f1),
        per_label,
        unmapped,
    }
}
