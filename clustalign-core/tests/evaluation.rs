//! End-to-end evaluation scenarios.

use clustalign_core::{
    DegenerateCase, DistanceMatrix, Evaluator, EvaluatorBuilder, FeatureMatrix, InvalidInputError,
    MappedPrediction, Representation, SilhouetteMetric, build_contingency,
    intrinsic_metrics, purity,
};
use rstest::{fixture, rstest};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "actual={actual}, expected={expected}"
    );
}

/// Ticket categories and two clustering runs over the same eight tickets.
struct Tickets {
    labels: Vec<&'static str>,
    kmeans: Vec<u32>,
    ward: Vec<u32>,
    features: FeatureMatrix,
}

#[fixture]
fn tickets() -> Tickets {
    Tickets {
        labels: vec![
            "billing", "billing", "billing", "login", "login", "login", "shipping", "shipping",
        ],
        kmeans: vec![0, 0, 0, 1, 1, 1, 2, 2],
        ward: vec![5, 5, 6, 6, 6, 6, 7, 7],
        features: FeatureMatrix::from_rows(&[
            vec![0.0, 0.0],
            vec![0.2, 0.1],
            vec![0.1, 0.3],
            vec![5.0, 5.0],
            vec![5.2, 4.9],
            vec![4.8, 5.1],
            vec![10.0, 0.0],
            vec![10.1, 0.2],
        ])
        .expect("rows are valid"),
    }
}

#[rstest]
fn worked_example_matches_hand_computation() {
    let labels = ["X", "X", "X", "Y", "Y", "Y"];
    let clusters = [0, 0, 1, 1, 1, 1];
    let table = build_contingency(&labels, &clusters).expect("inputs are aligned");
    assert_eq!(table.rows(), &[vec![2, 1], vec![0, 3]]);
    assert_close(purity(&table), 0.8333333333333334);

    let report = Evaluator::default()
        .evaluate(&labels, &clusters, None)
        .expect("inputs are aligned");
    assert_eq!(report.mapping.label_for(&0), Some(&"X"));
    assert_eq!(report.mapping.label_for(&1), Some(&"Y"));
    assert_close(report.purity, 5.0 / 6.0);
}

#[rstest]
fn surplus_cluster_is_unmapped_and_scored_as_incorrect() {
    let labels = ["X", "X", "X", "Y", "Y", "Y", "X", "Y"];
    let clusters = [0, 0, 0, 1, 1, 1, 2, 2];
    let report = Evaluator::default()
        .evaluate(&labels, &clusters, None)
        .expect("inputs are aligned");

    assert_eq!(report.mapping.unmapped_clusters(), &[2]);
    assert_eq!(
        &report.mapped_predictions[6..],
        &[MappedPrediction::Unmapped, MappedPrediction::Unmapped]
    );
    assert_close(report.extrinsic.accuracy, 0.75);
    assert_eq!(report.extrinsic.unmapped, 2);
    assert_eq!(
        report.warnings,
        vec![DegenerateCase::UnmappedCluster {
            cluster: 2,
            size: 2
        }]
    );
}

#[rstest]
fn single_cluster_keeps_purity_but_rejects_intrinsic_metrics() {
    let labels = ["a", "a", "a", "b"];
    let clusters = [0, 0, 0, 0];
    let table = build_contingency(&labels, &clusters).expect("inputs are aligned");
    assert_close(purity(&table), 0.75);

    let distances = DistanceMatrix::try_new(4, vec![0.0; 16]).expect("matrix is valid");
    let err = intrinsic_metrics(
        Representation::Distances(&distances),
        &clusters,
        SilhouetteMetric::Euclidean,
    )
    .expect_err("one cluster has no separation");
    assert_eq!(err, InvalidInputError::TooFewClusters { found: 1 });

    let err = Evaluator::default()
        .evaluate(&labels, &clusters, Some(Representation::Distances(&distances)))
        .expect_err("intrinsic metrics were requested");
    assert_eq!(err, InvalidInputError::TooFewClusters { found: 1 });
}

#[rstest]
fn one_evaluator_scores_several_runs(tickets: Tickets) {
    let evaluator = EvaluatorBuilder::new().build();
    let representation = Representation::Features(&tickets.features);

    let kmeans = evaluator
        .evaluate(&tickets.labels, &tickets.kmeans, Some(representation))
        .expect("kmeans run is valid");
    let ward = evaluator
        .evaluate(&tickets.labels, &tickets.ward, Some(representation))
        .expect("ward run is valid");

    assert_close(kmeans.purity, 1.0);
    assert_close(kmeans.agreement.ari, 1.0);
    assert_close(kmeans.agreement.nmi, 1.0);
    assert_close(kmeans.extrinsic.macro_f1, 1.0);
    let intrinsic = kmeans.intrinsic.as_ref().expect("features were supplied");
    assert!(intrinsic.cohesion_separation_score > 0.9);

    assert_close(ward.purity, 7.0 / 8.0);
    assert_eq!(ward.mapping.label_for(&6), Some(&"login"));
    assert!(ward.agreement.ari < kmeans.agreement.ari);
    let ward_intrinsic = ward.intrinsic.as_ref().expect("features were supplied");
    assert!(ward_intrinsic.cohesion_separation_score < intrinsic.cohesion_separation_score);
}

#[rstest]
fn evaluation_is_deterministic(tickets: Tickets) {
    let evaluator = EvaluatorBuilder::new()
        .with_silhouette_metric(SilhouetteMetric::Cosine)
        .build();
    let representation = Some(Representation::Features(&tickets.features));
    // The first row is the origin, so cosine silhouettes need a shifted copy.
    let shifted = FeatureMatrix::try_new(
        tickets.features.rows(),
        tickets.features.dimension(),
        tickets.features.values().iter().map(|value| value + 1.0).collect(),
    )
    .expect("rows are valid");
    assert!(
        evaluator
            .evaluate(&tickets.labels, &tickets.ward, representation)
            .is_err()
    );

    let representation = Some(Representation::Features(&shifted));
    let first = evaluator
        .evaluate(&tickets.labels, &tickets.ward, representation)
        .expect("ward run is valid");
    let second = evaluator
        .evaluate(&tickets.labels, &tickets.ward, representation)
        .expect("ward run is valid");
    assert_eq!(first, second);
}

#[cfg(feature = "serde")]
#[rstest]
fn serialised_reports_are_byte_identical(tickets: Tickets) {
    let evaluator = Evaluator::default();
    let render = || {
        let report = evaluator
            .evaluate(
                &tickets.labels,
                &tickets.ward,
                Some(Representation::Features(&tickets.features)),
            )
            .expect("ward run is valid");
        serde_json::to_string(&report).expect("report serialises")
    };
    let first = render();
    assert_eq!(first, render());

    let value: serde_json::Value = serde_json::from_str(&first).expect("valid JSON");
    assert_eq!(value["mapping"]["unmapped_clusters"], serde_json::json!([]));
    assert_eq!(value["mapped_predictions"][0], serde_json::json!({ "label": "billing" }));
}

#[cfg(feature = "serde")]
#[rstest]
fn unmapped_predictions_serialise_as_a_sentinel() {
    let report = Evaluator::default()
        .evaluate(&["x", "x", "y"], &[0, 1, 2], None)
        .expect("inputs are aligned");
    let value = serde_json::to_value(&report).expect("report serialises");
    // Cluster 0 takes "x" on the tie; cluster 1 is left over.
    assert_eq!(value["mapped_predictions"][1], serde_json::json!("unmapped"));
    assert_eq!(value["mapped_predictions"][2], serde_json::json!({ "label": "y" }));
    assert_eq!(
        value["warnings"],
        serde_json::json!([
            { "kind": "singleton_cluster", "cluster": 0 },
            { "kind": "singleton_cluster", "cluster": 1 },
            { "kind": "singleton_cluster", "cluster": 2 },
            { "kind": "unmapped_cluster", "cluster": 1, "size": 1 },
        ])
    );
}
