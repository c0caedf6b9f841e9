//! Copies Arrow fixed-size list arrays into a flat row-major buffer.

use arrow_array::{Array, FixedSizeListArray, Float32Array};
use arrow_schema::{DataType, Field};

use crate::errors::DenseMatrixProviderError;

/// Returns the row width declared by a `FixedSizeList<Float32, D>` field.
///
/// Nullable fields are accepted because most writers mark list columns as
/// nullable; actual nulls are rejected row by row in [`copy_rows`].
pub(crate) fn field_dimension(
    field: &Field,
    column: &str,
) -> Result<usize, DenseMatrixProviderError> {
    let DataType::FixedSizeList(child, width) = field.data_type() else {
        return Err(DenseMatrixProviderError::NotFixedSizeList {
            column: column.to_owned(),
            actual: field.data_type().clone(),
        });
    };
    if child.data_type() != &DataType::Float32 {
        return Err(DenseMatrixProviderError::NonFloatValues {
            actual: child.data_type().clone(),
        });
    }
    usize::try_from(*width).map_err(|_| DenseMatrixProviderError::NegativeWidth { actual: *width })
}

/// Appends every row of `array` to `out` and returns the row width.
///
/// `first_row` is the absolute index of the array's first row, used in error
/// reports when a column spans several record batches.
pub(crate) fn append_rows(
    array: &FixedSizeListArray,
    expected_dimension: Option<usize>,
    first_row: usize,
    out: &mut Vec<f32>,
) -> Result<usize, DenseMatrixProviderError> {
    let value_type = array.value_type();
    if value_type != DataType::Float32 {
        return Err(DenseMatrixProviderError::NonFloatValues { actual: value_type });
    }
    let dimension = usize::try_from(array.value_length()).map_err(|_| {
        DenseMatrixProviderError::NegativeWidth {
            actual: array.value_length(),
        }
    })?;
    if let Some(expected) = expected_dimension.filter(|&expected| expected != dimension) {
        return Err(DenseMatrixProviderError::BatchDimension {
            expected,
            actual: dimension,
        });
    }
    copy_rows(array, dimension, first_row, out)?;
    Ok(dimension)
}

pub(crate) fn copy_rows(
    array: &FixedSizeListArray,
    dimension: usize,
    first_row: usize,
    out: &mut Vec<f32>,
) -> Result<(), DenseMatrixProviderError> {
    let rows = array.len();
    let additional = rows
        .checked_mul(dimension)
        .ok_or(DenseMatrixProviderError::CapacityOverflow { rows, dimension })?;
    out.reserve(additional);

    for index in 0..rows {
        let row = first_row + index;
        if array.is_null(index) {
            return Err(DenseMatrixProviderError::NullRow { row });
        }
        let values = array.value(index);
        let floats = values
            .as_any()
            .downcast_ref::<Float32Array>()
            .ok_or_else(|| DenseMatrixProviderError::NonFloatValues {
                actual: values.data_type().clone(),
            })?;
        if floats.len() != dimension {
            return Err(DenseMatrixProviderError::RowLength {
                row,
                expected: dimension,
                actual: floats.len(),
            });
        }
        if let Some(value_index) = (0..dimension).find(|&position| floats.is_null(position)) {
            return Err(DenseMatrixProviderError::NullValue { row, value_index });
        }
        out.extend(floats.iter().flatten());
    }
    Ok(())
}
