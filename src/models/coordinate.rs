//! Geographic coordinate type.

use serde::{Deserialize, Serialize};

/// A `(latitude, longitude)` pair in degrees.
///
/// Construction never fails; use [`Coordinate::is_valid`] to check that both
/// components are finite and within [-90, 90] × [-180, 180].
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Coordinate;
///
/// let c = Coordinate::new(12.97, 77.59);
/// assert_eq!(c.latitude(), 12.97);
/// assert!(c.is_valid());
/// assert!(!Coordinate::new(91.0, 0.0).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    latitude: f64,
    #[serde(rename = "lon")]
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns `true` if both components are finite and in range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Planar Euclidean distance over raw degrees.
    ///
    /// Only meaningful for grouping nearby points; use
    /// [`distance_km`](crate::distance::distance_km) for travel distance.
    pub fn planar_distance_sq(&self, other: &Coordinate) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        dlat * dlat + dlon * dlon
    }

    /// Returns the pair as a `(lat, lon)` tuple.
    pub fn to_tuple(self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}
