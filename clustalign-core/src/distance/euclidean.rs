use crate::distance::types::{Distance, Result, Vector};

/// Computes the Euclidean distance between two vectors.
///
/// # Examples
///
/// ```
/// use clustalign_core::{DistanceError, euclidean_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0])?;
///     assert!((distance.value() - 7.071_068).abs() < 1e-6);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`DistanceError::ZeroLength`](crate::DistanceError::ZeroLength) when any input is empty.
/// - [`DistanceError::DimensionMismatch`](crate::DistanceError::DimensionMismatch) when input lengths differ.
/// - [`DistanceError::NonFinite`](crate::DistanceError::NonFinite) when a value is NaN or infinite.
pub fn euclidean_distance(left: &[f32], right: &[f32]) -> Result<Distance> {
    let squared = squared_euclidean_distance(left, right)?;
    Ok(Distance::from_raw(squared.value().sqrt()))
}

/// Computes the squared Euclidean distance between two vectors.
///
/// Skips the square root for callers that only compare or sum distances.
///
/// # Errors
///
/// Same as [`euclidean_distance`].
pub fn squared_euclidean_distance(left: &[f32], right: &[f32]) -> Result<Distance> {
    let (left, right) = Vector::pair(left, right)?;
    let mut sum = 0.0f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        let diff = f64::from(l) - f64::from(r);
        sum += diff * diff;
    }
    Ok(Distance::from_raw(sum))
}
