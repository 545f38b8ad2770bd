//! Cluster-first, route-second optimizer.
//!
//! Orders are partitioned with k-means, then each cluster is routed with a
//! nearest-neighbor walk from the depot. Capacity is ignored; every order is
//! always routed.

use crate::clustering::ClusterAssigner;
use crate::config::ClusterConfig;
use crate::constructive::{nearest_neighbor_order, RouteConstructor};
use crate::error::RoutingResult;
use crate::models::{Coordinate, Order, Route, Solution, SolverKind, Vehicle};

use super::{node_coordinates, validate};

/// Fast capacity-unaware optimizer.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Coordinate, Order};
/// use fleet_routing::HybridOptimizer;
///
/// let depot = Coordinate::new(0.0, 0.0);
/// let orders = vec![
///     Order::new("n1", Coordinate::new(1.0, 0.0), 1),
///     Order::new("n2", Coordinate::new(1.1, 0.0), 1),
///     Order::new("s1", Coordinate::new(-1.0, 0.0), 1),
///     Order::new("s2", Coordinate::new(-1.1, 0.0), 1),
/// ];
///
/// let solution = HybridOptimizer::new(2).optimize(depot, &orders).unwrap();
/// assert!(solution.feasible());
/// assert_eq!(solution.num_routes(), 2);
/// assert_eq!(solution.num_served(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct HybridOptimizer {
    k: usize,
    cluster_config: ClusterConfig,
}

impl HybridOptimizer {
    /// Creates an optimizer producing up to `k` routes.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            cluster_config: ClusterConfig::default(),
        }
    }

    /// One cluster per vehicle.
    pub fn for_fleet(vehicles: &[Vehicle]) -> Self {
        Self::new(vehicles.len())
    }

    /// Overrides the clustering parameters.
    pub fn with_cluster_config(mut self, config: ClusterConfig) -> Self {
        self.cluster_config = config;
        self
    }

    /// Requested cluster count.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Clusters `orders` and routes each cluster from `depot`.
    ///
    /// Routes are returned in cluster id order; an empty cluster yields `[0]`.
    pub fn optimize(&self, depot: Coordinate, orders: &[Order]) -> RoutingResult<Solution> {
        if orders.is_empty() {
            log::debug!("hybrid: no orders");
            return Ok(Solution::new(SolverKind::Hybrid, vec![depot], Vec::new()));
        }
        validate::check_depot(depot)?;
        validate::check_order_locations(orders)?;

        let locations: Vec<Coordinate> = orders.iter().map(Order::location).collect();
        let clusters = ClusterAssigner::new(self.cluster_config.clone()).assign(&locations, self.k);

        let routes: Vec<Route> = clusters
            .iter()
            .map(|(_, group)| route_cluster(depot, orders, group))
            .collect();

        let solution = Solution::new(SolverKind::Hybrid, node_coordinates(depot, orders), routes);
        log::info!(
            "hybrid: done orders={} clusters={} distance={}",
            orders.len(),
            clusters.len(),
            solution.total_distance().unwrap_or_default()
        );
        Ok(solution)
    }
}

/// Nearest-neighbor route over one cluster, in global node indices.
fn route_cluster(depot: Coordinate, orders: &[Order], group: &[usize]) -> Route {
    if group.is_empty() {
        return Route::empty(None);
    }
    let stops: Vec<Coordinate> = group.iter().map(|&o| orders[o].location()).collect();
    let local = RouteConstructor::local_matrix(depot, &stops);
    let walk = nearest_neighbor_order(&local);

    let nodes: Vec<usize> = walk[1..].iter().map(|&i| 1 + group[i - 1]).collect();
    let load = group.iter().map(|&o| u64::from(orders[o].demand())).sum();
    Route::new(None, &nodes, load, local.path_distance(&walk))
}
