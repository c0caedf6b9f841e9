//! Clustalign core library.
//!
//! Evaluates an externally produced cluster assignment against ground-truth
//! labels. The pipeline builds a label-by-cluster contingency table, solves
//! the exact maximum-weight assignment between clusters and labels, maps
//! every item's cluster to a label and scores the result. Geometry-only
//! scores are available when the feature or distance representation that
//! was clustered is supplied.
//!
//! ```
//! use clustalign_core::Evaluator;
//!
//! let report = Evaluator::default().evaluate(
//!     &["billing", "billing", "login", "login"],
//!     &[4, 4, 9, 9],
//!     None,
//! )?;
//! assert_eq!(report.purity, 1.0);
//! assert_eq!(report.mapping.label_for(&9), Some(&"login"));
//! # Ok::<(), clustalign_core::InvalidInputError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod agreement;
mod assignment;
mod builder;
mod contingency;
mod distance;
mod error;
mod evaluator;
mod extrinsic;
mod intrinsic;
mod mapping;
mod matrix;
mod report;

pub use crate::{
    agreement::{
        PartitionAgreement, adjusted_rand_index, normalized_mutual_information,
        partition_agreement,
    },
    builder::EvaluatorBuilder,
    contingency::{ClusterSummary, ContingencyTable, build_contingency, purity},
    distance::{
        Distance, DistanceError, VectorKind, cosine_distance, euclidean_distance,
        squared_euclidean_distance,
    },
    error::{InputKind, InvalidInputError, InvalidInputErrorCode, Result},
    evaluator::Evaluator,
    extrinsic::{ExtrinsicMetrics, LabelReport, extrinsic_metrics},
    intrinsic::{IntrinsicMetrics, SilhouetteMetric, intrinsic_metrics},
    mapping::{
        ClusterToLabelMap, MappedPrediction, MatchedPair, apply_mapping,
        optimal_cluster_to_label_map,
    },
    matrix::{DistanceMatrix, FeatureMatrix, Representation},
    report::{DegenerateCase, EvaluationReport},
};
