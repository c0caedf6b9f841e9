//! Intrinsic metric and full evaluation benchmarks.
//!
//! The silhouette is quadratic in the item count and dominates a full
//! evaluation once features are supplied; both are measured on the same
//! blobs so the mapping overhead can be read off the difference.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use clustalign_benches::{
    error::BenchSetupError,
    params::EvaluationBenchParams,
    synthetic::{BlobConfig, LabelledBlobs},
};
use clustalign_core::{Evaluator, Representation, SilhouetteMetric, intrinsic_metrics};

const SEED: u64 = 42;

/// Feature dimensionality for all benchmark datasets.
const DIMENSIONS: usize = 16;

/// Number of labels and clusters.
const CLUSTER_COUNT: usize = 8;

/// Dataset sizes to benchmark.
const POINT_COUNTS: &[usize] = &[200, 500, 1_000];

fn generate(point_count: usize) -> Result<LabelledBlobs, BenchSetupError> {
    LabelledBlobs::generate(&BlobConfig {
        point_count,
        cluster_count: CLUSTER_COUNT,
        dimensions: DIMENSIONS,
        separation: 10.0,
        noise: 0.1,
        seed: SEED,
    })
    .map_err(BenchSetupError::from)
}

fn intrinsic_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("intrinsic_metrics");
    group.sample_size(10);

    for &point_count in POINT_COUNTS {
        let blobs = generate(point_count)?;
        let params = EvaluationBenchParams {
            point_count,
            cluster_count: CLUSTER_COUNT,
        };
        for metric in [SilhouetteMetric::Euclidean, SilhouetteMetric::Cosine] {
            let id = BenchmarkId::new(format!("{metric:?}").to_lowercase(), &params);
            group.bench_with_input(id, &blobs, |b, blobs| {
                b.iter(|| {
                    intrinsic_metrics(
                        Representation::Features(&blobs.features),
                        &blobs.clusters,
                        metric,
                    )
                });
            });
        }
    }

    group.finish();
    Ok(())
}

fn evaluate_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("evaluate");
    group.sample_size(10);
    let evaluator = Evaluator::default();

    for &point_count in POINT_COUNTS {
        let blobs = generate(point_count)?;
        let params = EvaluationBenchParams {
            point_count,
            cluster_count: CLUSTER_COUNT,
        };
        group.bench_with_input(BenchmarkId::from_parameter(&params), &blobs, |b, blobs| {
            b.iter(|| {
                evaluator.evaluate(
                    &blobs.labels,
                    &blobs.clusters,
                    Some(Representation::Features(&blobs.features)),
                )
            });
        });
    }

    group.finish();
    Ok(())
}

fn intrinsic(c: &mut Criterion) {
    if let Err(err) = intrinsic_impl(c) {
        panic!("intrinsic benchmark setup failed: {err}");
    }
}

fn evaluate(c: &mut Criterion) {
    if let Err(err) = evaluate_impl(c) {
        panic!("evaluate benchmark setup failed: {err}");
    }
}

criterion_group!(benches, intrinsic, evaluate);
criterion_main!(benches);
