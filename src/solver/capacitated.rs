//! Capacity-respecting router: construction followed by local search.
//!
//! # Algorithm
//!
//! 1. Path-cheapest-arc construction over all vehicles.
//! 2. If orders are stranded but total demand fits total capacity, retry with
//!    first-fit-decreasing packing.
//! 3. Relocate/exchange local search until no move improves or the time
//!    budget runs out.
//!
//! Infeasible instances skip step 3 and return their partial routes.

use crate::config::SolverConfig;
use crate::constructive::{first_fit_decreasing, path_cheapest_arc, Construction};
use crate::distance::DistanceMatrix;
use crate::error::{RoutingError, RoutingResult};
use crate::evaluation::RouteEvaluator;
use crate::local_search::{Deadline, LocalSearch};
use crate::models::{Coordinate, Order, Route, SearchStats, Solution, SolverKind, Vehicle};

use super::{node_coordinates, validate};

/// Capacitated vehicle router.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Coordinate, Order, Vehicle};
/// use fleet_routing::{CapacitatedRouter, SolverConfig};
///
/// let depot = Coordinate::new(0.0, 0.0);
/// let vehicles = vec![Vehicle::new("v1", depot, 1), Vehicle::new("v2", depot, 1)];
/// let orders = vec![
///     Order::new("o1", Coordinate::new(0.0, 1.0), 1),
///     Order::new("o2", Coordinate::new(0.0, -1.0), 1),
/// ];
///
/// let router = CapacitatedRouter::new(SolverConfig::default().with_time_limit_secs(1));
/// let solution = router.solve(depot, &vehicles, &orders).unwrap();
/// assert!(solution.feasible());
/// assert_eq!(solution.num_routes(), 2);
/// assert_eq!(solution.num_served(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CapacitatedRouter {
    config: SolverConfig,
}

impl CapacitatedRouter {
    /// Creates a router with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves with a haversine matrix built from the inputs.
    pub fn solve(
        &self,
        depot: Coordinate,
        vehicles: &[Vehicle],
        orders: &[Order],
    ) -> RoutingResult<Solution> {
        let deadline = Deadline::start(self.config.time_limit());
        check_inputs(depot, vehicles, orders)?;
        let coords = node_coordinates(depot, orders);
        let distances = DistanceMatrix::from_coordinates(&coords);
        Ok(self.route(coords, &distances, vehicles, orders, &deadline))
    }

    /// Solves with a caller-supplied matrix over `[depot] ++ orders`.
    pub fn solve_with_matrix(
        &self,
        depot: Coordinate,
        vehicles: &[Vehicle],
        orders: &[Order],
        distances: &DistanceMatrix,
    ) -> RoutingResult<Solution> {
        let deadline = Deadline::start(self.config.time_limit());
        check_inputs(depot, vehicles, orders)?;
        let expected = orders.len() + 1;
        if distances.size() != expected {
            return Err(RoutingError::MatrixSizeMismatch {
                expected,
                actual: distances.size(),
            });
        }
        let coords = node_coordinates(depot, orders);
        Ok(self.route(coords, distances, vehicles, orders, &deadline))
    }

    fn route(
        &self,
        coords: Vec<Coordinate>,
        distances: &DistanceMatrix,
        vehicles: &[Vehicle],
        orders: &[Order],
        deadline: &Deadline,
    ) -> Solution {
        let depot = coords[0];
        for vehicle in vehicles.iter().filter(|v| v.start() != depot) {
            log::warn!(
                "capacitated: vehicle '{}' start differs from depot, routing from depot",
                vehicle.id()
            );
        }

        let demands: Vec<u32> = std::iter::once(0)
            .chain(orders.iter().map(Order::demand))
            .collect();
        let capacities: Vec<u32> = vehicles.iter().map(Vehicle::capacity).collect();
        let evaluator = RouteEvaluator::new(distances, &demands, self.config.return_to_depot());

        log::info!(
            "capacitated: solving orders={} vehicles={} time_limit_ms={}",
            orders.len(),
            vehicles.len(),
            self.config.time_limit().as_millis()
        );

        let construction = construct(&evaluator, &capacities);
        let mut routes = construction.routes;
        let construction_distance = evaluator.total_distance(&routes);
        log::debug!("capacitated.construct: distance={construction_distance}");

        if !construction.unassigned.is_empty() {
            log::info!(
                "capacitated: infeasible, unassigned={}",
                construction.unassigned.len()
            );
            let stats = SearchStats {
                construction_distance,
                accepted_moves: 0,
                timed_out: false,
                elapsed_ms: millis(deadline),
            };
            return Solution::infeasible(
                SolverKind::Capacitated,
                coords,
                build_routes(&evaluator, vehicles, &routes),
                construction.unassigned,
            )
            .with_stats(stats);
        }

        let outcome = LocalSearch::new(evaluator, &capacities).run(&mut routes, deadline, |_| {});
        debug_assert!(evaluator.validate(&routes, &capacities, true).is_empty());

        let stats = SearchStats {
            construction_distance,
            accepted_moves: outcome.accepted_moves,
            timed_out: outcome.timed_out,
            elapsed_ms: millis(deadline),
        };
        log::info!(
            "capacitated: done distance={} moves={} timed_out={} elapsed_ms={}",
            outcome.total_distance,
            stats.accepted_moves,
            stats.timed_out,
            stats.elapsed_ms
        );

        Solution::new(
            SolverKind::Capacitated,
            coords,
            build_routes(&evaluator, vehicles, &routes),
        )
        .with_stats(stats)
    }
}

fn check_inputs(depot: Coordinate, vehicles: &[Vehicle], orders: &[Order]) -> RoutingResult<()> {
    if vehicles.is_empty() {
        return Err(RoutingError::NoVehicles);
    }
    if orders.is_empty() {
        return Err(RoutingError::NoOrders);
    }
    validate::check_depot(depot)?;
    validate::check_vehicles(vehicles)?;
    validate::check_orders(orders)
}

/// Greedy construction with a packing fallback when only the greedy order
/// is to blame for stranded orders.
fn construct(evaluator: &RouteEvaluator<'_>, capacities: &[u32]) -> Construction {
    let greedy = path_cheapest_arc(evaluator, capacities);
    if greedy.is_complete() {
        return greedy;
    }

    let n = evaluator.distances().size();
    let total_demand: u64 = (1..n).map(|node| evaluator.demand(node)).sum();
    let total_capacity: u64 = capacities.iter().copied().map(u64::from).sum();
    if total_demand > total_capacity {
        log::debug!(
            "capacitated.construct: demand={total_demand} exceeds capacity={total_capacity}"
        );
        return greedy;
    }

    log::debug!(
        "capacitated.construct: greedy stranded {} orders, trying first-fit packing",
        greedy.unassigned.len()
    );
    let packed = first_fit_decreasing(evaluator, capacities);
    if packed.is_complete() {
        packed
    } else {
        greedy
    }
}

fn build_routes(
    evaluator: &RouteEvaluator<'_>,
    vehicles: &[Vehicle],
    routes: &[Vec<usize>],
) -> Vec<Route> {
    vehicles
        .iter()
        .zip(routes)
        .map(|(vehicle, stops)| evaluator.build_route(Some(vehicle.id().to_string()), stops))
        .collect()
}

fn millis(deadline: &Deadline) -> u64 {
    u64::try_from(deadline.elapsed().as_millis()).unwrap_or(u64::MAX)
}
