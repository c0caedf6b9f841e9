//! Labelled Gaussian blobs with a noisy clustering of them.

use std::f32::consts::PI;

use clustalign_core::{FeatureMatrix, InvalidInputError};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors raised for invalid generator settings.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested dimension count was zero.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,
    /// The requested cluster count was zero.
    #[error("cluster count must be greater than zero")]
    ZeroClusters,
    /// The configured cluster count exceeded the available points.
    #[error("cluster count ({cluster_count}) must not exceed point count ({point_count})")]
    ClusterCountExceedsPointCount {
        /// Number of clusters requested.
        cluster_count: usize,
        /// Number of points requested.
        point_count: usize,
    },
    /// A floating-point parameter was out of range.
    #[error("invalid value for {parameter}")]
    InvalidFloatParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
    },
    /// The generated values did not form a feature matrix.
    #[error(transparent)]
    Matrix(#[from] InvalidInputError),
}

/// Generator settings.
#[derive(Clone, Debug)]
pub struct BlobConfig {
    /// Number of items.
    pub point_count: usize,
    /// Number of true labels; the clustering uses as many clusters.
    pub cluster_count: usize,
    /// Feature dimensionality.
    pub dimensions: usize,
    /// Half-width of the cube the centroids are drawn from.
    pub separation: f32,
    /// Probability that an item is assigned to a random cluster instead of
    /// the one matching its label.
    pub noise: f64,
    /// Seed for every random draw.
    pub seed: u64,
}

/// Items with features, true labels and predicted clusters.
#[derive(Clone, Debug)]
pub struct LabelledBlobs {
    /// One feature row per item.
    pub features: FeatureMatrix,
    /// True label of each item, assigned round-robin.
    pub labels: Vec<usize>,
    /// Predicted cluster of each item. Clusters are numbered in reverse
    /// label order, so the optimal mapping is never the identity.
    pub clusters: Vec<usize>,
}

impl LabelledBlobs {
    /// Generates blobs for `config`; equal configs give equal output.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    #[expect(
        clippy::float_arithmetic,
        reason = "Gaussian data generation requires floating-point arithmetic"
    )]
    pub fn generate(config: &BlobConfig) -> Result<Self, SyntheticError> {
        validate(config)?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let centroids: Vec<Vec<f32>> = (0..config.cluster_count)
            .map(|_| {
                (0..config.dimensions)
                    .map(|_| rng.gen_range(-config.separation..config.separation))
                    .collect()
            })
            .collect();

        let mut values = Vec::with_capacity(config.point_count * config.dimensions);
        let mut labels = Vec::with_capacity(config.point_count);
        let mut clusters = Vec::with_capacity(config.point_count);
        for (label, centroid) in centroids
            .iter()
            .enumerate()
            .cycle()
            .take(config.point_count)
        {
            labels.push(label);
            let cluster = if rng.gen_bool(config.noise) {
                rng.gen_range(0..config.cluster_count)
            } else {
                config.cluster_count - 1 - label
            };
            clusters.push(cluster);
            for coordinate in centroid {
                values.push(coordinate + standard_normal_sample(&mut rng)?);
            }
        }

        let features = FeatureMatrix::try_new(config.point_count, config.dimensions, values)?;
        Ok(Self {
            features,
            labels,
            clusters,
        })
    }
}

fn validate(config: &BlobConfig) -> Result<(), SyntheticError> {
    if config.point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if config.dimensions == 0 {
        return Err(SyntheticError::ZeroDimensions);
    }
    if config.cluster_count == 0 {
        return Err(SyntheticError::ZeroClusters);
    }
    if config.cluster_count > config.point_count {
        return Err(SyntheticError::ClusterCountExceedsPointCount {
            cluster_count: config.cluster_count,
            point_count: config.point_count,
        });
    }
    if !config.separation.is_finite() || config.separation <= 0.0 {
        return Err(SyntheticError::InvalidFloatParameter {
            parameter: "separation",
        });
    }
    if !(0.0..=1.0).contains(&config.noise) {
        return Err(SyntheticError::InvalidFloatParameter { parameter: "noise" });
    }
    Ok(())
}

#[expect(
    clippy::float_arithmetic,
    reason = "Box-Muller transform requires floating-point arithmetic"
)]
fn standard_normal_sample(rng: &mut SmallRng) -> Result<f32, SyntheticError> {
    let u1 = rng.gen_range(0.0_f32..1.0_f32).max(f32::EPSILON);
    let u2 = rng.gen_range(0.0_f32..1.0_f32);
    let sample = (-2.0_f32 * u1.ln()).sqrt() * (2.0_f32 * PI * u2).cos();
    if sample.is_finite() {
        Ok(sample)
    } else {
        Err(SyntheticError::InvalidFloatParameter {
            parameter: "standard_normal_sample",
        })
    }
}
