//! Dense feature matrices loaded from Arrow and Parquet.
//!
//! Rows are stored as a `FixedSizeList<Float32, D>` column, one row per
//! evaluated item and in the same order as the label and cluster files.

mod errors;
mod ingest;
mod provider;

pub use errors::DenseMatrixProviderError;
pub use provider::DenseMatrixProvider;

#[cfg(test)]
mod tests;
