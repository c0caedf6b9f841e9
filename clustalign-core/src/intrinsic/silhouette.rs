use crate::{
    distance::{Distance, DistanceError, VectorKind, cosine_distance, euclidean_distance},
    error::{InvalidInputError, Result},
    intrinsic::{ClusterLayout, SilhouetteMetric},
    matrix::{FeatureMatrix, Representation},
};

/// Mean silhouette over every item.
///
/// Items alone in their cluster score zero. Only an `items x clusters` table
/// of distance sums is kept, so memory stays linear in the item count.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "silhouette values are ratios of mean distances"
)]
pub(super) fn mean_silhouette(
    representation: Representation<'_>,
    layout: &ClusterLayout,
    metric: SilhouetteMetric,
) -> Result<f64> {
    let sums = match representation {
        Representation::Features(features) => feature_distance_sums(features, layout, metric)?,
        Representation::Distances(distances) => {
            let items = layout.item_count();
            let mut sums = vec![vec![0.0_f64; layout.cluster_count()]; items];
            for (i, row) in sums.iter_mut().enumerate() {
                for (j, &cluster) in layout.ordinals.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    if let Some(sum) = row.get_mut(cluster) {
                        *sum += distances.get(i, j).unwrap_or_default();
                    }
                }
            }
            sums
        }
    };

    let total: f64 = layout
        .ordinals
        .iter()
        .zip(&sums)
        .map(|(&own, row)| item_silhouette(own, row, &layout.sizes))
        .sum();
    Ok(total / layout.item_count() as f64)
}

#[expect(
    clippy::indexing_slicing,
    reason = "the sums table has one row per item and one column per cluster ordinal"
)]
fn feature_distance_sums(
    features: &FeatureMatrix,
    layout: &ClusterLayout,
    metric: SilhouetteMetric,
) -> Result<Vec<Vec<f64>>> {
    let distance: fn(&[f32], &[f32]) -> core::result::Result<Distance, DistanceError> = match metric {
        SilhouetteMetric::Euclidean => euclidean_distance,
        SilhouetteMetric::Cosine => cosine_distance,
    };
    let rows: Vec<&[f32]> = features.iter_rows().collect();
    let mut sums = vec![vec![0.0_f64; layout.cluster_count()]; rows.len()];
    for (i, &left) in rows.iter().enumerate() {
        for (j, &right) in rows.iter().enumerate().skip(i + 1) {
            let value = distance(left, right)
                .map_err(|err| locate_zero_magnitude(err, i, j))?
                .value();
            sums[i][layout.ordinals[j]] += value;
            sums[j][layout.ordinals[i]] += value;
        }
    }
    Ok(sums)
}

/// Names the feature row behind a zero-magnitude cosine failure.
fn locate_zero_magnitude(err: DistanceError, left: usize, right: usize) -> InvalidInputError {
    match err {
        DistanceError::ZeroMagnitude {
            which: VectorKind::Left,
        } => InvalidInputError::ZeroMagnitudeRow { row: left },
        DistanceError::ZeroMagnitude {
            which: VectorKind::Right,
        } => InvalidInputError::ZeroMagnitudeRow { row: right },
        other => InvalidInputError::Distance(other),
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "silhouette values are ratios of mean distances"
)]
fn item_silhouette(own: usize, sums: &[f64], sizes: &[usize]) -> f64 {
    let (Some(&own_size), Some(&own_sum)) = (sizes.get(own), sums.get(own)) else {
        return 0.0;
    };
    if own_size <= 1 {
        return 0.0;
    }
    let cohesion = own_sum / (own_size - 1) as f64;
    let separation = sums
        .iter()
        .zip(sizes)
        .enumerate()
        .filter(|&(cluster, (_, &size))| cluster != own && size > 0)
        .map(|(_, (&sum, &size))| sum / size as f64)
        .fold(f64::INFINITY, f64::min);
    let scale = cohesion.max(separation);
    if scale == 0.0 || !scale.is_finite() {
        0.0
    } else {
        (separation - cohesion) / scale
    }
}
