//! Geometry-only clustering quality scores.
//!
//! None of these metrics look at the true labels. They measure how compact
//! and well separated the clusters are in the representation the clustering
//! algorithm worked on.

mod centroids;
mod silhouette;

use std::collections::BTreeSet;

use tracing::{Span, debug, field, instrument, warn};

use crate::{
    error::{InputKind, InvalidInputError, Result},
    matrix::Representation,
};

/// Distance used by the cohesion/separation score on feature rows.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SilhouetteMetric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// `1 - cos(θ)`, the usual choice for TF-IDF and sentence embeddings.
    Cosine,
}

/// Intrinsic quality scores for one cluster assignment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntrinsicMetrics<C> {
    /// Mean silhouette over all items, in `[-1.0, 1.0]`, higher is better.
    pub cohesion_separation_score: f64,
    /// Calinski-Harabasz index, higher is better. `None` for distance input.
    pub variance_ratio_score: Option<f64>,
    /// Davies-Bouldin index, lower is better. `None` for distance input.
    pub cluster_distance_ratio_score: Option<f64>,
    /// Clusters holding a single item, whose silhouette is fixed at zero.
    pub singleton_clusters: Vec<C>,
}

/// Items grouped by cluster ordinal.
pub(crate) struct ClusterLayout {
    /// Cluster ordinal of each item.
    pub(crate) ordinals: Vec<usize>,
    /// Number of items per cluster ordinal.
    pub(crate) sizes: Vec<usize>,
}

/// Computes the intrinsic metrics of `cluster_ids` over `representation`.
///
/// # Errors
/// Returns [`InvalidInputError::EmptyInput`] when `cluster_ids` is empty,
/// [`InvalidInputError::LengthMismatch`] when the representation does not
/// have one row per cluster id, [`InvalidInputError::TooFewClusters`] when
/// fewer than two distinct clusters are present, and
/// [`InvalidInputError::ZeroMagnitudeRow`] when the cosine metric meets an
/// all-zero feature row.
///
/// # Examples
/// ```
/// use clustalign_core::{FeatureMatrix, Representation, SilhouetteMetric, intrinsic_metrics};
///
/// let features = FeatureMatrix::from_rows(&[
///     vec![0.0, 0.0],
///     vec![0.0, 1.0],
///     vec![10.0, 0.0],
///     vec![10.0, 1.0],
/// ])?;
/// let metrics = intrinsic_metrics(
///     Representation::Features(&features),
///     &[0, 0, 1, 1],
///     SilhouetteMetric::Euclidean,
/// )?;
/// assert!(metrics.cohesion_separation_score > 0.9);
/// assert!(metrics.cluster_distance_ratio_score.is_some_and(|score| score < 0.2));
/// # Ok::<(), clustalign_core::InvalidInputError>(())
/// ```
#[instrument(
    name = "clustalign.intrinsic",
    err,
    skip_all,
    fields(items = cluster_ids.len(), clusters = field::Empty, metric = ?metric),
)]
pub fn intrinsic_metrics<C>(
    representation: Representation<'_>,
    cluster_ids: &[C],
    metric: SilhouetteMetric,
) -> Result<IntrinsicMetrics<C>>
where
    C: Ord + Clone,
{
    if cluster_ids.is_empty() {
        return Err(InvalidInputError::EmptyInput {
            input: InputKind::ClusterIds,
        });
    }
    if representation.items() != cluster_ids.len() {
        return Err(InvalidInputError::LengthMismatch {
            input: representation.input_kind(),
            expected: cluster_ids.len(),
            actual: representation.items(),
        });
    }
    let clusters: Vec<C> = cluster_ids
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();
    if clusters.len() < 2 {
        return Err(InvalidInputError::TooFewClusters {
            found: clusters.len(),
        });
    }
    Span::current().record("clusters", clusters.len());

    let layout = ClusterLayout::new(&clusters, cluster_ids);
    let singleton_clusters: Vec<C> = clusters
        .iter()
        .zip(&layout.sizes)
        .filter(|&(_, &size)| size == 1)
        .map(|(cluster, _)| cluster.clone())
        .collect();
    if !singleton_clusters.is_empty() {
        warn!(
            singletons = singleton_clusters.len(),
            "singleton clusters contribute a silhouette of zero"
        );
    }

    let cohesion_separation_score = silhouette::mean_silhouette(representation, &layout, metric)?;
    let (variance_ratio_score, cluster_distance_ratio_score) = match representation {
        Representation::Features(features) => {
            let geometry = centroids::ClusterGeometry::new(features, &layout);
            (
                Some(geometry.calinski_harabasz()),
                Some(geometry.davies_bouldin()),
            )
        }
        Representation::Distances(_) => (None, None),
    };
    debug!(
        silhouette = cohesion_separation_score,
        variance_ratio = ?variance_ratio_score,
        distance_ratio = ?cluster_distance_ratio_score,
        "intrinsic metrics computed"
    );

    Ok(IntrinsicMetrics {
        cohesion_separation_score,
        variance_ratio_score,
        cluster_distance_ratio_score,
        singleton_clusters,
    })
}

impl ClusterLayout {
    fn new<C: Ord>(clusters: &[C], cluster_ids: &[C]) -> Self {
        let mut sizes = vec![0_usize; clusters.len()];
        let ordinals = cluster_ids
            .iter()
            .map(|cluster| {
                let ordinal = clusters.partition_point(|candidate| candidate < cluster);
                if let Some(size) = sizes.get_mut(ordinal) {
                    *size += 1;
                }
                ordinal
            })
            .collect();
        Self { ordinals, sizes }
    }

    pub(crate) fn cluster_count(&self) -> usize {
        self.sizes.len()
    }

    pub(crate) fn item_count(&self) -> usize {
        self.ordinals.len()
    }
}
