//! Configuration surface for [`Evaluator`].

use crate::{evaluator::Evaluator, intrinsic::SilhouetteMetric};

/// Configures and constructs [`Evaluator`] instances.
///
/// # Examples
/// ```
/// use clustalign_core::{EvaluatorBuilder, SilhouetteMetric};
///
/// let evaluator = EvaluatorBuilder::new()
///     .with_silhouette_metric(SilhouetteMetric::Cosine)
///     .with_intrinsic_metrics(false)
///     .build();
/// assert_eq!(evaluator.silhouette_metric(), SilhouetteMetric::Cosine);
/// assert!(!evaluator.intrinsic_metrics_enabled());
/// ```
#[derive(Debug, Clone)]
pub struct EvaluatorBuilder {
    silhouette_metric: SilhouetteMetric,
    intrinsic_metrics: bool,
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        Self {
            silhouette_metric: SilhouetteMetric::Euclidean,
            intrinsic_metrics: true,
        }
    }
}

impl EvaluatorBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use clustalign_core::{EvaluatorBuilder, SilhouetteMetric};
    ///
    /// let builder = EvaluatorBuilder::new();
    /// assert_eq!(builder.silhouette_metric(), SilhouetteMetric::Euclidean);
    /// assert!(builder.intrinsic_metrics_enabled());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the distance used by the cohesion/separation score on
    /// feature rows. Precomputed distance matrices ignore this setting.
    #[must_use]
    pub fn with_silhouette_metric(mut self, metric: SilhouetteMetric) -> Self {
        self.silhouette_metric = metric;
        self
    }

    /// Returns the configured silhouette distance.
    #[must_use]
    pub const fn silhouette_metric(&self) -> SilhouetteMetric {
        self.silhouette_metric
    }

    /// Controls whether intrinsic metrics are computed when a representation
    /// is supplied.
    #[must_use]
    pub fn with_intrinsic_metrics(mut self, enabled: bool) -> Self {
        self.intrinsic_metrics = enabled;
        self
    }

    /// Returns whether intrinsic metrics are enabled.
    #[must_use]
    pub const fn intrinsic_metrics_enabled(&self) -> bool {
        self.intrinsic_metrics
    }

    /// Constructs the configured [`Evaluator`].
    #[must_use]
    pub fn build(self) -> Evaluator {
        Evaluator::new(self.silhouette_metric, self.intrinsic_metrics)
    }
}
