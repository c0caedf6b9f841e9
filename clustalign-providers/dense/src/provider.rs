//! Loads the feature representation that a clustering run worked on.

use std::{fs::File, path::Path};

use arrow_array::{Array, FixedSizeListArray, RecordBatchReader};
use clustalign_core::{FeatureMatrix, Representation};
use parquet::{
    arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder},
    file::reader::ChunkReader,
};
use tracing::{debug, instrument};

use crate::{
    errors::DenseMatrixProviderError,
    ingest::{append_rows, field_dimension},
};

/// Named feature matrix read from Arrow or Parquet.
///
/// The rows keep the file order, so row `i` describes item `i` of the label
/// and cluster id sequences it is evaluated with.
#[derive(Debug, Clone)]
pub struct DenseMatrixProvider {
    name: String,
    features: FeatureMatrix,
}

impl DenseMatrixProvider {
    fn from_parts(
        name: impl Into<String>,
        rows: usize,
        dimension: usize,
        values: Vec<f32>,
    ) -> Result<Self, DenseMatrixProviderError> {
        Ok(Self {
            name: name.into(),
            features: FeatureMatrix::try_new(rows, dimension, values)?,
        })
    }

    /// Returns the name the matrix was loaded under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.features.rows()
    }

    /// Always `false`: empty matrices are rejected while loading.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.features.rows() == 0
    }

    /// Returns the dimensionality of each row.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.features.dimension()
    }

    /// Returns the validated feature matrix.
    #[must_use]
    pub const fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    /// Borrows the matrix as an evaluator representation.
    #[must_use]
    pub const fn representation(&self) -> Representation<'_> {
        Representation::Features(&self.features)
    }

    /// Consumes the provider and returns the matrix.
    #[must_use]
    pub fn into_features(self) -> FeatureMatrix {
        self.features
    }

    /// Loads rows from an Arrow [`FixedSizeListArray`].
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError`] when the array is not a non-null
    /// `Float32` list or when the values do not form a valid
    /// [`FeatureMatrix`].
    pub fn try_from_fixed_size_list(
        name: impl Into<String>,
        array: &FixedSizeListArray,
    ) -> Result<Self, DenseMatrixProviderError> {
        let mut values = Vec::new();
        let dimension = append_rows(array, None, 0, &mut values)?;
        Self::from_parts(name, array.len(), dimension, values)
    }

    /// Loads a `FixedSizeList<Float32, D>` column from the Parquet file at `path`.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::Io`] when the file cannot be
    /// opened, plus every error of [`Self::try_from_parquet_reader`].
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, column)
    }

    /// Loads a `FixedSizeList<Float32, D>` column from a Parquet reader.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError`] when the column is missing, has
    /// the wrong type, contains nulls or non-finite values, or is empty.
    #[instrument(name = "providers.dense.load", err, skip(name, reader))]
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError>
    where
        R: ChunkReader + Send + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(builder.parquet_schema(), [column]);
        let batches = builder.with_projection(mask).build()?;
        let schema = batches.schema();
        let column_index =
            schema
                .index_of(column)
                .map_err(|_| DenseMatrixProviderError::ColumnNotFound {
                    column: column.to_owned(),
                })?;
        let dimension = field_dimension(schema.field(column_index), column)?;

        let mut values = Vec::new();
        let mut rows = 0_usize;
        for batch in batches {
            let batch = batch?;
            let array = batch.column(column_index);
            let list = array
                .as_any()
                .downcast_ref::<FixedSizeListArray>()
                .ok_or_else(|| DenseMatrixProviderError::NotFixedSizeList {
                    column: column.to_owned(),
                    actual: array.data_type().clone(),
                })?;
            append_rows(list, Some(dimension), rows, &mut values)?;
            rows += list.len();
        }
        debug!(rows, dimension, "loaded dense feature matrix");
        Self::from_parts(name, rows, dimension, values)
    }
}
