//! Input files shared by the CLI tests.
//!
//! Six support tickets: three `billing` items near the origin and three
//! `refund` items near `(10, 10)`.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use tempfile::TempDir;

pub(super) const LABELS: &str = "billing\nbilling\nbilling\nrefund\nrefund\nrefund\n";
/// Recovers both groups exactly.
pub(super) const KMEANS: &str = "0\n0\n0\n1\n1\n1\n";
/// Splits one billing item off and isolates one refund item.
pub(super) const WARD: &str = "a\na\nb\nb\nb\nc\n";

const POINTS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 0.0],
    [10.0, 10.0],
    [10.0, 11.0],
    [11.0, 10.0],
];

/// Writes the ticket embeddings as an `embedding: FixedSizeList<Float32, 2>`
/// column.
pub(super) fn create_parquet_file(
    dir: &TempDir,
    name: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.path().join(name);
    let item_field = Arc::new(Field::new("item", DataType::Float32, false));
    let schema = Arc::new(Schema::new(vec![Field::new(
        "embedding",
        DataType::FixedSizeList(item_field.clone(), 2),
        false,
    )]));
    let values = Float32Array::from(POINTS.iter().flatten().copied().collect::<Vec<_>>());
    let list = FixedSizeListArray::try_new(item_field, 2, Arc::new(values) as ArrayRef, None)?;
    let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(list) as ArrayRef])?;

    let file = File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(path)
}
