//! Error types for the clustalign core library.
//!
//! Every evaluator operation checks its preconditions before doing any work
//! and reports the first violation as an [`InvalidInputError`]. Degenerate but
//! valid outcomes (singleton clusters, unmapped clusters) are not errors; they
//! travel inside the evaluation report instead.

use std::fmt;

use thiserror::Error;

use crate::distance::DistanceError;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Names the input a failed precondition refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InputKind {
    /// Ground-truth category labels.
    TrueLabels,
    /// Cluster ids produced by an external clustering run.
    ClusterIds,
    /// Labels obtained by mapping cluster ids through a
    /// [`crate::ClusterToLabelMap`].
    MappedPredictions,
    /// Rows of a feature matrix.
    Features,
    /// Rows of a pairwise distance matrix.
    Distances,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TrueLabels => "true labels",
            Self::ClusterIds => "cluster ids",
            Self::MappedPredictions => "mapped predictions",
            Self::Features => "feature matrix",
            Self::Distances => "distance matrix",
        })
    }
}

/// A precondition of an evaluator operation was violated.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InvalidInputError {
    /// The named input contained no items.
    #[error("{input} must not be empty")]
    EmptyInput {
        /// Input that was empty.
        input: InputKind,
    },
    /// The named input is not aligned with the reference sequence.
    #[error("{input} has {actual} items but {expected} were expected")]
    LengthMismatch {
        /// Input whose length disagreed with the reference.
        input: InputKind,
        /// Length of the reference sequence.
        expected: usize,
        /// Length of the offending input.
        actual: usize,
    },
    /// Separation-based metrics need at least two distinct clusters.
    #[error("intrinsic metrics require at least 2 distinct clusters (found {found})")]
    TooFewClusters {
        /// Number of distinct clusters present in the assignment.
        found: usize,
    },
    /// Feature vectors must have at least one component.
    #[error("feature vectors must have positive dimension")]
    ZeroDimension,
    /// A matrix held NaN or an infinity.
    #[error("{input} holds a non-finite value at row {row}, column {column}")]
    NonFinite {
        /// Matrix containing the value.
        input: InputKind,
        /// Row of the offending value.
        row: usize,
        /// Column of the offending value.
        column: usize,
    },
    /// A flat buffer could not be shaped into the requested matrix.
    #[error("{input} buffer of {values} values cannot be shaped as {rows} x {columns}")]
    MatrixShape {
        /// Matrix being constructed.
        input: InputKind,
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        columns: usize,
        /// Number of values supplied.
        values: usize,
    },
    /// Distances must be non-negative.
    #[error("distance matrix holds a negative entry at row {row}, column {column}")]
    NegativeDistance {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        column: usize,
    },
    /// Cosine distance is undefined for an all-zero feature row, such as the
    /// TF-IDF row of a ticket made only of stop words.
    #[error("feature matrix row {row} has zero magnitude, so its cosine distance is undefined")]
    ZeroMagnitudeRow {
        /// Row of the offending item.
        row: usize,
    },
    /// A pairwise distance between feature rows could not be computed.
    #[error(transparent)]
    Distance(#[from] DistanceError),
}

define_error_codes! {
    /// Stable codes describing [`InvalidInputError`] variants.
    enum InvalidInputErrorCode for InvalidInputError {
        /// The named input contained no items.
        EmptyInput => EmptyInput { .. } => "INVALID_INPUT_EMPTY",
        /// The named input is not aligned with the reference sequence.
        LengthMismatch => LengthMismatch { .. } => "INVALID_INPUT_LENGTH_MISMATCH",
        /// Separation-based metrics need at least two distinct clusters.
        TooFewClusters => TooFewClusters { .. } => "INVALID_INPUT_TOO_FEW_CLUSTERS",
        /// Feature vectors must have at least one component.
        ZeroDimension => ZeroDimension => "INVALID_INPUT_ZERO_DIMENSION",
        /// A matrix held NaN or an infinity.
        NonFinite => NonFinite { .. } => "INVALID_INPUT_NON_FINITE",
        /// A flat buffer could not be shaped into the requested matrix.
        MatrixShape => MatrixShape { .. } => "INVALID_INPUT_MATRIX_SHAPE",
        /// Distances must be non-negative.
        NegativeDistance => NegativeDistance { .. } => "INVALID_INPUT_NEGATIVE_DISTANCE",
        /// Cosine distance is undefined for an all-zero feature row.
        ZeroMagnitudeRow => ZeroMagnitudeRow { .. } => "INVALID_INPUT_ZERO_MAGNITUDE_ROW",
        /// A pairwise distance between feature rows could not be computed.
        Distance => Distance { .. } => "INVALID_INPUT_DISTANCE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, InvalidInputError>;

/// Checks that `true_labels` and `cluster_ids` describe the same non-empty
/// item sequence.
pub(crate) const fn validate_alignment<L, C>(
    true_labels: &[L],
    cluster_ids: &[C],
) -> Result<usize> {
    if true_labels.is_empty() {
        return Err(InvalidInputError::EmptyInput {
            input: InputKind::TrueLabels,
        });
    }
    if cluster_ids.is_empty() {
        return Err(InvalidInputError::EmptyInput {
            input: InputKind::ClusterIds,
        });
    }
    if true_labels.len() != cluster_ids.len() {
        return Err(InvalidInputError::LengthMismatch {
            input: InputKind::ClusterIds,
            expected: true_labels.len(),
            actual: cluster_ids.len(),
        });
    }
    Ok(true_labels.len())
}
