//! Great-circle distance and integer-meter distance matrices.
//!
//! All routing costs are integer meters: each leg is truncated independently
//! before any summation.

mod haversine;
mod matrix;

pub use haversine::{distance_km, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;

use crate::models::Coordinate;

/// Builds the all-pairs meter matrix for `coords`.
///
/// Shorthand for [`DistanceMatrix::from_coordinates`].
pub fn build_distance_matrix(coords: &[Coordinate]) -> DistanceMatrix {
    DistanceMatrix::from_coordinates(coords)
}
