//! Solve entry points.
//!
//! - [`CapacitatedRouter`] — Capacity-respecting construction + local search
//! - [`HybridOptimizer`] — k-means clusters, nearest-neighbor route per cluster
//!
//! Node 0 is always the depot; node `i >= 1` is `orders[i - 1]`.

mod capacitated;
mod hybrid;
mod validate;

pub use capacitated::CapacitatedRouter;
pub use hybrid::HybridOptimizer;

use crate::config::SolverConfig;
use crate::error::RoutingResult;
use crate::models::{Coordinate, Order, Solution, Vehicle};

/// Solves a capacitated instance with a time limit in whole seconds.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Coordinate, Order, Vehicle};
///
/// let depot = Coordinate::new(0.0, 0.0);
/// let vehicles = vec![Vehicle::new("v1", depot, 5)];
/// let orders = vec![Order::new("o1", Coordinate::new(0.0, 1.0), 10)];
///
/// let solution = fleet_routing::solve_capacitated(depot, &vehicles, &orders, 1).unwrap();
/// assert!(!solution.feasible());
/// assert_eq!(solution.total_distance(), None);
/// ```
pub fn solve_capacitated(
    depot: Coordinate,
    vehicles: &[Vehicle],
    orders: &[Order],
    time_limit_seconds: u64,
) -> RoutingResult<Solution> {
    let config = SolverConfig::default().with_time_limit_secs(time_limit_seconds);
    CapacitatedRouter::new(config).solve(depot, vehicles, orders)
}

/// Clusters orders into `k` groups and routes each with nearest neighbor.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Coordinate;
///
/// let solution = fleet_routing::optimize_hybrid(3, Coordinate::new(0.0, 0.0), &[]).unwrap();
/// assert!(solution.routes().is_empty());
/// assert_eq!(solution.total_distance(), Some(0));
/// ```
pub fn optimize_hybrid(k: usize, depot: Coordinate, orders: &[Order]) -> RoutingResult<Solution> {
    HybridOptimizer::new(k).optimize(depot, orders)
}

/// `[depot] ++ order locations`.
fn node_coordinates(depot: Coordinate, orders: &[Order]) -> Vec<Coordinate> {
    std::iter::once(depot)
        .chain(orders.iter().map(Order::location))
        .collect()
}
