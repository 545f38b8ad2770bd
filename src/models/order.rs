//! Delivery order type.

use serde::{Deserialize, Serialize};

use super::Coordinate;

fn default_demand() -> u32 {
    1
}

/// A delivery order: an id, a location, and the load it consumes.
///
/// Serializes flat as `{"id", "lat", "lon", "demand"}`; `demand` defaults
/// to 1 when absent.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Coordinate, Order};
///
/// let o = Order::new("o1", Coordinate::new(12.98, 77.58), 2);
/// assert_eq!(o.id(), "o1");
/// assert_eq!(o.demand(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: String,
    #[serde(flatten)]
    location: Coordinate,
    #[serde(default = "default_demand")]
    demand: u32,
}

impl Order {
    /// Creates a new order.
    pub fn new(id: impl Into<String>, location: Coordinate, demand: u32) -> Self {
        Self {
            id: id.into(),
            location,
            demand,
        }
    }

    /// Order id, unique within a solve.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Delivery location.
    pub fn location(&self) -> Coordinate {
        self.location
    }

    /// Units of vehicle capacity consumed.
    pub fn demand(&self) -> u32 {
        self.demand
    }
}
