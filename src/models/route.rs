//! Route type.

use serde::{Deserialize, Serialize};

/// An ordered sequence of node indices served by one vehicle (or one cluster).
///
/// `nodes` always begins with the depot (node 0) and never repeats it; the
/// return to the depot is implicit. A route with no stops is `[0]`.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Route;
///
/// let route = Route::new(Some("v1".into()), &[2, 1], 2, 1500);
/// assert_eq!(route.nodes(), &[0, 2, 1]);
/// assert_eq!(route.stops(), &[2, 1]);
/// assert_eq!(route.len(), 2);
///
/// let idle = Route::empty(Some("v2".into()));
/// assert!(idle.is_empty());
/// assert_eq!(idle.nodes(), &[0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: Option<String>,
    nodes: Vec<usize>,
    load: u64,
    distance: i64,
}

impl Route {
    /// Creates a route from its stops (node indices ≥ 1, depot excluded).
    pub fn new(vehicle_id: Option<String>, stops: &[usize], load: u64, distance: i64) -> Self {
        let mut nodes = Vec::with_capacity(stops.len() + 1);
        nodes.push(0);
        nodes.extend_from_slice(stops);
        Self {
            vehicle_id,
            nodes,
            load,
            distance,
        }
    }

    /// Creates a route with no stops.
    pub fn empty(vehicle_id: Option<String>) -> Self {
        Self::new(vehicle_id, &[], 0, 0)
    }

    /// Vehicle serving this route; `None` for hybrid cluster routes.
    pub fn vehicle_id(&self) -> Option<&str> {
        self.vehicle_id.as_deref()
    }

    /// Full node sequence starting at the depot.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Visited stops, excluding the leading depot.
    pub fn stops(&self) -> &[usize] {
        self.nodes.get(1..).unwrap_or(&[])
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Returns `true` if the route visits no stops.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Summed demand of the stops.
    pub fn load(&self) -> u64 {
        self.load
    }

    /// Route distance in meters.
    pub fn distance(&self) -> i64 {
        self.distance
    }
}
