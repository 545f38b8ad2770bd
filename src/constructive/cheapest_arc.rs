//! Path-cheapest-arc construction for capacitated fleets.
//!
//! # Algorithm
//!
//! Every vehicle grows a path from the depot. At each step, among all pairs
//! (vehicle, unrouted order) whose demand still fits the vehicle, append the
//! order with the smallest marginal distance to the end of that vehicle's
//! path. Ties go to the lowest vehicle index, then the lowest order node.
//! Construction stops when every order is routed or no pair fits.
//!
//! # Complexity
//!
//! O(V × n²) where V = vehicles, n = orders.

use crate::evaluation::RouteEvaluator;

/// Routes produced by a constructive pass, one stop list per vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    /// Stop sequences (depot excluded), aligned with the vehicle order.
    pub routes: Vec<Vec<usize>>,
    /// Order nodes that could not be placed, ascending.
    pub unassigned: Vec<usize>,
}

impl Construction {
    /// Returns `true` if every order was placed.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }
}

/// Builds initial routes with the path-cheapest-arc rule.
///
/// `capacities[v]` is the capacity of vehicle `v`; order nodes are
/// `1..evaluator.distances().size()`.
///
/// # Examples
///
/// ```
/// use fleet_routing::distance::DistanceMatrix;
/// use fleet_routing::evaluation::RouteEvaluator;
/// use fleet_routing::constructive::path_cheapest_arc;
///
/// // depot 0, orders 1 and 2 on a line: 0 —1— 1 —1— 2
/// let dm = DistanceMatrix::from_data(3, vec![0, 1, 2, 1, 0, 1, 2, 1, 0]).unwrap();
/// let demands = vec![0, 1, 1];
/// let evaluator = RouteEvaluator::new(&dm, &demands, false);
///
/// let construction = path_cheapest_arc(&evaluator, &[5]);
/// assert_eq!(construction.routes, vec![vec![1, 2]]);
/// assert!(construction.is_complete());
/// ```
pub fn path_cheapest_arc(evaluator: &RouteEvaluator<'_>, capacities: &[u32]) -> Construction {
    let n = evaluator.distances().size();
    let num_vehicles = capacities.len();

    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); num_vehicles];
    let mut loads = vec![0u64; num_vehicles];
    let mut routed = vec![false; n];
    let mut remaining = n.saturating_sub(1);

    while remaining > 0 {
        // (marginal cost, vehicle, node): tuple order encodes the tie-break
        let mut best: Option<(i64, usize, usize)> = None;

        for v in 0..num_vehicles {
            let capacity = u64::from(capacities[v]);
            let last = routes[v].last().copied();
            let tail = last.unwrap_or(0);
            let closing = last.map_or(0, |l| evaluator.arc(l, None));

            for node in 1..n {
                if routed[node] || loads[v] + evaluator.demand(node) > capacity {
                    continue;
                }
                let cost = evaluator.arc(tail, Some(node)) + evaluator.arc(node, None) - closing;
                let candidate = (cost, v, node);
                if best.is_none_or(|b| candidate < b) {
                    best = Some(candidate);
                }
            }
        }

        let Some((_, v, node)) = best else {
            break;
        };
        routes[v].push(node);
        loads[v] += evaluator.demand(node);
        routed[node] = true;
        remaining -= 1;
    }

    let unassigned = (1..n).filter(|&node| !routed[node]).collect();
    Construction { routes, unassigned }
}
