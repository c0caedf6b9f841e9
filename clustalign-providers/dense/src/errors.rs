use arrow_schema::{ArrowError, DataType};
use clustalign_core::InvalidInputError;
use thiserror::Error;

/// Failures while loading a dense feature matrix.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DenseMatrixProviderError {
    /// The requested column is absent from the file.
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound { column: String },
    /// The column is not a fixed-size list.
    #[error("column `{column}` must be a FixedSizeList<Float32, _> but found {actual:?}")]
    NotFixedSizeList { column: String, actual: DataType },
    /// The list items are not `Float32`.
    #[error("feature values must be Float32 but found {actual:?}")]
    NonFloatValues { actual: DataType },
    /// The declared list width is negative.
    #[error("invalid feature dimension {actual}")]
    NegativeWidth { actual: i32 },
    /// An item has no feature row.
    #[error("feature row {row} is null")]
    NullRow { row: usize },
    /// A feature row has a missing component.
    #[error("feature row {row} has a null value at position {value_index}")]
    NullValue { row: usize, value_index: usize },
    /// A feature row disagrees with the declared width.
    #[error("feature row {row} has length {actual} but expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// The flattened matrix would not fit in memory.
    #[error("matrix with {rows} rows and dimension {dimension} exceeds capacity limits")]
    CapacityOverflow { rows: usize, dimension: usize },
    /// Record batches declared different widths.
    #[error("inconsistent dimensions across batches: expected {expected}, got {actual}")]
    BatchDimension { expected: usize, actual: usize },
    /// The values were read but are not usable for intrinsic metrics, e.g.
    /// the column is empty or holds NaN.
    #[error(transparent)]
    Matrix(#[from] InvalidInputError),
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
