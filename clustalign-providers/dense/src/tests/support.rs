use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::sync::Arc;

pub(crate) fn list_array(rows: &[Vec<f32>], dimension: usize) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == dimension));
    let values = Float32Array::from_iter_values(rows.iter().flatten().copied());
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float32, true)),
        i32::try_from(dimension).expect("dimension fits in i32"),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn embedding_field(dimension: usize) -> Field {
    Field::new(
        "embedding",
        DataType::FixedSizeList(
            Arc::new(Field::new("item", DataType::Float32, true)),
            i32::try_from(dimension).expect("dimension fits in i32"),
        ),
        true,
    )
}

/// Writes each array as its own record batch and row group.
pub(crate) fn write_batches(field: &Field, arrays: Vec<ArrayRef>) -> Bytes {
    let schema = Arc::new(Schema::new(vec![field.clone()]));
    let mut buffer = Vec::new();
    {
        let mut writer =
            ArrowWriter::try_new(&mut buffer, Arc::clone(&schema), None).expect("writer");
        for array in arrays {
            let batch = RecordBatch::try_new(Arc::clone(&schema), vec![array]).expect("batch");
            writer.write(&batch).expect("write");
            writer.flush().expect("flush");
        }
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}

pub(crate) fn embeddings_parquet(rows: &[Vec<f32>]) -> Bytes {
    let dimension = rows.first().map_or(0, Vec::len);
    write_batches(
        &embedding_field(dimension),
        vec![Arc::new(list_array(rows, dimension)) as ArrayRef],
    )
}
