//! Shared test utilities used across clustalign crates.

pub mod tracing;
