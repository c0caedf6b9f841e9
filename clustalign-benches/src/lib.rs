//! Benchmark support crate for clustalign.
//!
//! Generates labelled Gaussian blobs together with a noisy clustering of
//! them, so Criterion benchmarks can time the mapping solver and the
//! intrinsic metrics on realistic contingency tables.

pub mod error;
pub mod params;
pub mod synthetic;
