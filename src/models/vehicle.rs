//! Vehicle type with capacity.

use serde::{Deserialize, Serialize};

use super::Coordinate;

fn default_capacity() -> u32 {
    100
}

/// A vehicle that services one route.
///
/// Every vehicle starts and ends at the shared depot; `start` is carried
/// for the service layer but routing always begins at node 0.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Coordinate, Vehicle};
///
/// let v = Vehicle::new("v1", Coordinate::new(12.97, 77.59), 3);
/// assert_eq!(v.id(), "v1");
/// assert_eq!(v.capacity(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: String,
    start: Coordinate,
    #[serde(default = "default_capacity")]
    capacity: u32,
}

impl Vehicle {
    /// Creates a vehicle with the given id, start location, and capacity.
    pub fn new(id: impl Into<String>, start: Coordinate, capacity: u32) -> Self {
        Self {
            id: id.into(),
            start,
            capacity,
        }
    }

    /// Vehicle id, unique within a solve.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Start location as supplied.
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
