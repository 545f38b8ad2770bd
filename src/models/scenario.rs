//! Scenario bundle forwarded by a service layer.

use serde::{Deserialize, Serialize};

use super::{Coordinate, Order, Solution, Vehicle};
use crate::config::SolverConfig;
use crate::error::RoutingResult;
use crate::solver::{CapacitatedRouter, HybridOptimizer};

/// A depot, its fleet, and the orders to deliver.
///
/// This is plain data: the engine keeps nothing between calls, so a caller
/// that stores scenarios passes one in per solve.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Scenario;
///
/// let json = r#"{
///     "depot": {"lat": 12.97, "lon": 77.59},
///     "vehicles": [{"id": "v1", "start": {"lat": 12.97, "lon": 77.59}, "capacity": 3}],
///     "orders": [
///         {"id": "o1", "lat": 12.98, "lon": 77.58},
///         {"id": "o2", "lat": 12.96, "lon": 77.60},
///         {"id": "o3", "lat": 12.99, "lon": 77.57}
///     ]
/// }"#;
/// let scenario: Scenario = serde_json::from_str(json).unwrap();
/// assert_eq!(scenario.orders.len(), 3);
/// assert_eq!(scenario.orders[0].demand(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Shared start and end point.
    pub depot: Coordinate,
    /// Fleet, in output route order.
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    /// Orders; order `i` becomes node `i + 1`.
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Scenario {
    /// Creates a scenario.
    pub fn new(depot: Coordinate, vehicles: Vec<Vehicle>, orders: Vec<Order>) -> Self {
        Self {
            depot,
            vehicles,
            orders,
        }
    }

    /// Runs the capacitated router on this scenario.
    pub fn solve_capacitated(&self, config: &SolverConfig) -> RoutingResult<Solution> {
        CapacitatedRouter::new(config.clone()).solve(self.depot, &self.vehicles, &self.orders)
    }

    /// Runs the hybrid optimizer with `k` clusters (`None` = one per vehicle).
    pub fn optimize_hybrid(&self, k: Option<usize>) -> RoutingResult<Solution> {
        let optimizer = match k {
            Some(k) => HybridOptimizer::new(k),
            None => HybridOptimizer::for_fleet(&self.vehicles),
        };
        optimizer.optimize(self.depot, &self.orders)
    }
}
