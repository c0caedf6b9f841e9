use super::{DenseMatrixProviderError, support::*};
use crate::ingest::{append_rows, copy_rows, field_dimension};
use arrow_schema::{DataType, Field};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn field_dimension_accepts_nullable_float_lists() {
    assert_eq!(
        field_dimension(&embedding_field(384), "embedding").expect("valid field"),
        384
    );
}

#[rstest]
#[case(DataType::Utf8)]
#[case(DataType::Float32)]
fn field_dimension_rejects_non_lists(#[case] data_type: DataType) {
    let field = Field::new("embedding", data_type, false);
    let err = field_dimension(&field, "embedding").expect_err("not a list");
    assert!(matches!(
        err,
        DenseMatrixProviderError::NotFixedSizeList { column, .. } if column == "embedding"
    ));
}

#[rstest]
fn field_dimension_rejects_negative_width() {
    let child = Arc::new(Field::new("item", DataType::Float32, false));
    let field = Field::new("embedding", DataType::FixedSizeList(child, -1), false);
    let err = field_dimension(&field, "embedding").expect_err("negative width");
    assert!(matches!(
        err,
        DenseMatrixProviderError::NegativeWidth { actual: -1 }
    ));
}

#[rstest]
fn append_rows_rejects_changing_width() {
    let mut values = Vec::new();
    let first = list_array(&[vec![1.0, 2.0, 3.0]], 3);
    let second = list_array(&[vec![4.0, 5.0]], 2);
    append_rows(&first, None, 0, &mut values).expect("first batch is valid");
    let err = append_rows(&second, Some(3), 1, &mut values).expect_err("width changed");
    assert!(matches!(
        err,
        DenseMatrixProviderError::BatchDimension {
            expected: 3,
            actual: 2
        }
    ));
}

#[rstest]
fn copy_rows_reports_absolute_row_numbers() {
    let array = list_array(&[vec![1.0, 2.0]], 2);
    let mut values = Vec::new();
    let err = copy_rows(&array, 3, 10, &mut values).expect_err("width disagrees");
    assert!(matches!(
        err,
        DenseMatrixProviderError::RowLength {
            row: 10,
            expected: 3,
            actual: 2
        }
    ));
}
