//! Centroid-based scores: Calinski-Harabasz and Davies-Bouldin.

use crate::{intrinsic::ClusterLayout, matrix::FeatureMatrix};

/// Cluster centroids plus the per-item data needed to score them.
pub(super) struct ClusterGeometry<'a> {
    features: &'a FeatureMatrix,
    layout: &'a ClusterLayout,
    centroids: Vec<Vec<f64>>,
}

fn squared_gap(left: &[f64], right: &[f64]) -> f64 {
    left.iter()
        .zip(right)
        .map(|(l, r)| (l - r) * (l - r))
        .sum()
}

fn squared_gap_to_row(row: &[f32], centroid: &[f64]) -> f64 {
    row.iter()
        .zip(centroid)
        .map(|(&value, centre)| {
            let diff = f64::from(value) - centre;
            diff * diff
        })
        .sum()
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "centroids and dispersion sums are floating-point"
)]
impl<'a> ClusterGeometry<'a> {
    pub(super) fn new(features: &'a FeatureMatrix, layout: &'a ClusterLayout) -> Self {
        let dimension = features.dimension();
        let mut centroids = vec![vec![0.0_f64; dimension]; layout.cluster_count()];
        for (row, &cluster) in features.iter_rows().zip(&layout.ordinals) {
            let Some(centroid) = centroids.get_mut(cluster) else {
                continue;
            };
            for (sum, &value) in centroid.iter_mut().zip(row) {
                *sum += f64::from(value);
            }
        }
        for (centroid, &size) in centroids.iter_mut().zip(&layout.sizes) {
            if size > 0 {
                let count = size as f64;
                centroid.iter_mut().for_each(|value| *value /= count);
            }
        }
        Self {
            features,
            layout,
            centroids,
        }
    }

    /// Between-cluster dispersion over within-cluster dispersion, scaled by
    /// their degrees of freedom. Returns `1.0` when every item sits exactly
    /// on its centroid.
    pub(super) fn calinski_harabasz(&self) -> f64 {
        let items = self.layout.item_count();
        let clusters = self.layout.cluster_count();
        let mut overall = vec![0.0_f64; self.features.dimension()];
        for row in self.features.iter_rows() {
            for (sum, &value) in overall.iter_mut().zip(row) {
                *sum += f64::from(value);
            }
        }
        overall.iter_mut().for_each(|value| *value /= items as f64);

        let between: f64 = self
            .centroids
            .iter()
            .zip(&self.layout.sizes)
            .map(|(centroid, &size)| size as f64 * squared_gap(centroid, &overall))
            .sum();
        let within: f64 = self
            .features
            .iter_rows()
            .zip(&self.layout.ordinals)
            .filter_map(|(row, &cluster)| {
                self.centroids
                    .get(cluster)
                    .map(|centroid| squared_gap_to_row(row, centroid))
            })
            .sum();

        if within == 0.0 {
            1.0
        } else {
            between * (items - clusters) as f64 / (within * (clusters - 1) as f64)
        }
    }

    /// Mean over clusters of the worst scatter-to-separation ratio against any
    /// other cluster. Pairs of coincident centroids are skipped.
    pub(super) fn davies_bouldin(&self) -> f64 {
        let clusters = self.layout.cluster_count();
        let mut scatter = vec![0.0_f64; clusters];
        for (row, &cluster) in self.features.iter_rows().zip(&self.layout.ordinals) {
            if let (Some(value), Some(centroid)) =
                (scatter.get_mut(cluster), self.centroids.get(cluster))
            {
                *value += squared_gap_to_row(row, centroid).sqrt();
            }
        }
        for (value, &size) in scatter.iter_mut().zip(&self.layout.sizes) {
            if size > 0 {
                *value /= size as f64;
            }
        }

        let separation: Vec<Vec<f64>> = self
            .centroids
            .iter()
            .map(|left| {
                self.centroids
                    .iter()
                    .map(|right| squared_gap(left, right).sqrt())
                    .collect()
            })
            .collect();
        let all_scatter_zero = scatter.iter().all(|&value| value == 0.0);
        let all_centroids_coincide = separation.iter().flatten().all(|&value| value == 0.0);
        if all_scatter_zero || all_centroids_coincide {
            return 0.0;
        }

        let total: f64 = scatter
            .iter()
            .zip(&separation)
            .enumerate()
            .map(|(i, (&own_scatter, gaps))| {
                scatter
                    .iter()
                    .zip(gaps)
                    .enumerate()
                    .filter(|&(j, (_, &gap))| j != i && gap > 0.0)
                    .map(|(_, (&other_scatter, &gap))| (own_scatter + other_scatter) / gap)
                    .fold(0.0_f64, f64::max)
            })
            .sum();
        total / clusters as f64
    }
}
