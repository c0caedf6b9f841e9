//! Distance primitives used by the intrinsic clustering metrics.
//!
//! Feature rows are stored as `f32` (sentence embeddings, densified TF-IDF)
//! but every accumulation happens in `f64` so that silhouette and centroid
//! scores stay stable over thousands of rows.

mod cosine;
mod euclidean;
mod types;

pub use self::cosine::cosine_distance;
pub use self::euclidean::{euclidean_distance, squared_euclidean_distance};
pub use self::types::{Distance, DistanceError, VectorKind};
