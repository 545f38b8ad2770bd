//! Solution and search statistics types.

use serde::{Deserialize, Serialize};

use super::{Coordinate, Route};

/// Which engine produced a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Capacity-aware construction plus local search.
    Capacitated,
    /// Clustering plus nearest-neighbor, capacity-unaware.
    Hybrid,
}

/// Statistics from a capacitated solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total distance right after construction.
    pub construction_distance: i64,
    /// Improving moves applied by local search.
    pub accepted_moves: usize,
    /// `true` if local search stopped at the deadline rather than converging.
    pub timed_out: bool,
    /// Wall-clock time spent in the whole solve, in milliseconds.
    pub elapsed_ms: u64,
}

/// The result of a solve.
///
/// `routes` are positionally aligned with the input vehicles for the
/// capacitated solver, and with cluster ids for the hybrid solver.
/// `total_distance` is `None` when the solution is infeasible.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Coordinate, Route, Solution, SolverKind};
///
/// let coords = vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)];
/// let sol = Solution::new(SolverKind::Hybrid, coords, vec![Route::new(None, &[1], 1, 111_194)]);
/// assert!(sol.feasible());
/// assert_eq!(sol.total_distance(), Some(111_194));
/// assert_eq!(sol.route_coordinates()[0], vec![(0.0, 0.0), (0.0, 1.0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    solver: SolverKind,
    routes: Vec<Route>,
    total_distance: Option<i64>,
    feasible: bool,
    unassigned: Vec<usize>,
    coords: Vec<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stats: Option<SearchStats>,
}

impl Solution {
    /// Creates a feasible solution; the total is the sum of route distances.
    pub fn new(solver: SolverKind, coords: Vec<Coordinate>, routes: Vec<Route>) -> Self {
        let total = routes.iter().map(Route::distance).sum();
        Self {
            solver,
            routes,
            total_distance: Some(total),
            feasible: true,
            unassigned: Vec::new(),
            coords,
            stats: None,
        }
    }

    /// Creates an infeasible solution holding whatever partial routing exists.
    pub fn infeasible(
        solver: SolverKind,
        coords: Vec<Coordinate>,
        routes: Vec<Route>,
        unassigned: Vec<usize>,
    ) -> Self {
        Self {
            solver,
            routes,
            total_distance: None,
            feasible: false,
            unassigned,
            coords,
            stats: None,
        }
    }

    /// Attaches search statistics.
    pub fn with_stats(mut self, stats: SearchStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Engine that produced this solution.
    pub fn solver(&self) -> SolverKind {
        self.solver
    }

    /// Routes in vehicle (or cluster) order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Total distance in meters; `None` if infeasible.
    pub fn total_distance(&self) -> Option<i64> {
        self.total_distance
    }

    /// `true` if every order is routed within capacity.
    pub fn feasible(&self) -> bool {
        self.feasible
    }

    /// Order nodes that could not be placed.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Node list: depot first, then order locations.
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    /// Search statistics (capacitated solver only).
    pub fn stats(&self) -> Option<&SearchStats> {
        self.stats.as_ref()
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of stops across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Each route as `(lat, lon)` pairs, depot first.
    pub fn route_coordinates(&self) -> Vec<Vec<(f64, f64)>> {
        self.routes
            .iter()
            .map(|r| {
                r.nodes()
                    .iter()
                    .filter_map(|&n| self.coords.get(n).map(|c| c.to_tuple()))
                    .collect()
            })
            .collect()
    }
}
