//! Item representations consumed by the intrinsic metrics.
//!
//! Both matrices validate their shape and contents on construction, so the
//! metric code can index rows without re-checking them.

use crate::error::{InputKind, InvalidInputError, Result};

/// Dense row-major feature matrix, one row per evaluated item.
///
/// # Examples
/// ```
/// use clustalign_core::FeatureMatrix;
///
/// let features = FeatureMatrix::try_new(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])?;
/// assert_eq!(features.rows(), 2);
/// assert_eq!(features.row(1), Some(&[3.0_f32, 4.0, 5.0][..]));
/// # Ok::<(), clustalign_core::InvalidInputError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    dimension: usize,
    values: Vec<f32>,
}

impl FeatureMatrix {
    /// Wraps a flat row-major buffer.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::EmptyInput`] when `rows == 0`,
    /// [`InvalidInputError::ZeroDimension`] when `dimension == 0`,
    /// [`InvalidInputError::MatrixShape`] when `values.len()` is not
    /// `rows * dimension`, and [`InvalidInputError::NonFinite`] when any value
    /// is NaN or infinite.
    pub fn try_new(rows: usize, dimension: usize, values: Vec<f32>) -> Result<Self> {
        if rows == 0 {
            return Err(InvalidInputError::EmptyInput {
                input: InputKind::Features,
            });
        }
        if dimension == 0 {
            return Err(InvalidInputError::ZeroDimension);
        }
        if rows.checked_mul(dimension) != Some(values.len()) {
            return Err(InvalidInputError::MatrixShape {
                input: InputKind::Features,
                rows,
                columns: dimension,
                values: values.len(),
            });
        }
        let non_finite = values
            .chunks_exact(dimension)
            .enumerate()
            .find_map(|(row, items)| {
                items
                    .iter()
                    .position(|value| !value.is_finite())
                    .map(|column| (row, column))
            });
        if let Some((row, column)) = non_finite {
            return Err(InvalidInputError::NonFinite {
                input: InputKind::Features,
                row,
                column,
            });
        }
        Ok(Self {
            rows,
            dimension,
            values,
        })
    }

    /// Builds a matrix from individual rows.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::LengthMismatch`] when rows disagree on
    /// their dimension, plus every error listed for [`Self::try_new`].
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let dimension = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len().saturating_mul(dimension));
        for row in rows {
            if row.len() != dimension {
                return Err(InvalidInputError::LengthMismatch {
                    input: InputKind::Features,
                    expected: dimension,
                    actual: row.len(),
                });
            }
            values.extend_from_slice(row);
        }
        Self::try_new(rows.len(), dimension, values)
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the dimensionality of each row.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the underlying row-major buffer.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns row `index`, or `None` when out of bounds.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.values.chunks_exact(self.dimension).nth(index)
    }

    /// Iterates over the rows in item order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.dimension)
    }
}

/// Square matrix of precomputed pairwise distances.
///
/// # Examples
/// ```
/// use clustalign_core::DistanceMatrix;
///
/// let distances = DistanceMatrix::try_new(2, vec![0.0, 1.5, 1.5, 0.0])?;
/// assert_eq!(distances.get(0, 1), Some(1.5));
/// # Ok::<(), clustalign_core::InvalidInputError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Wraps a flat row-major `size x size` buffer.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::EmptyInput`] when `size == 0`,
    /// [`InvalidInputError::MatrixShape`] when the buffer is not square,
    /// [`InvalidInputError::NonFinite`] for NaN or infinite entries and
    /// [`InvalidInputError::NegativeDistance`] for negative entries.
    pub fn try_new(size: usize, values: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(InvalidInputError::EmptyInput {
                input: InputKind::Distances,
            });
        }
        if size.checked_mul(size) != Some(values.len()) {
            return Err(InvalidInputError::MatrixShape {
                input: InputKind::Distances,
                rows: size,
                columns: size,
                values: values.len(),
            });
        }
        for (row, entries) in values.chunks_exact(size).enumerate() {
            for (column, value) in entries.iter().enumerate() {
                if !value.is_finite() {
                    return Err(InvalidInputError::NonFinite {
                        input: InputKind::Distances,
                        row,
                        column,
                    });
                }
                if *value < 0.0 {
                    return Err(InvalidInputError::NegativeDistance { row, column });
                }
            }
        }
        Ok(Self { size, values })
    }

    /// Returns the number of items covered by the matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the distance between items `i` and `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.values.get(i * self.size + j).copied()
    }
}

/// Geometry of the evaluated items, aligned with the cluster ids.
#[derive(Clone, Copy, Debug)]
pub enum Representation<'a> {
    /// Raw feature vectors. Enables every intrinsic metric.
    Features(&'a FeatureMatrix),
    /// Precomputed pairwise distances. Only the cohesion/separation score is
    /// available because the centroid-based scores need coordinates.
    Distances(&'a DistanceMatrix),
}

impl Representation<'_> {
    /// Number of items described by the representation.
    #[must_use]
    pub const fn items(&self) -> usize {
        match self {
            Self::Features(features) => features.rows(),
            Self::Distances(distances) => distances.size(),
        }
    }

    pub(crate) const fn input_kind(&self) -> InputKind {
        match self {
            Self::Features(_) => InputKind::Features,
            Self::Distances(_) => InputKind::Distances,
        }
    }
}
