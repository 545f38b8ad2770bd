//! Capacity-first packing construction.
//!
//! # Algorithm
//!
//! Sorts orders by descending demand and places each into the first vehicle
//! with room (first-fit decreasing). Each vehicle's stops are then ordered by
//! a nearest-neighbor walk from the depot. Greedy distance-first construction
//! can strand orders on fleets that are tight on capacity; packing by size
//! first recovers most of those cases.
//!
//! # Complexity
//!
//! O(n log n + n × V + n²).

use super::Construction;
use crate::evaluation::RouteEvaluator;

/// Packs orders into vehicles by descending demand, then orders each route
/// by nearest neighbor.
///
/// # Examples
///
/// ```
/// use fleet_routing::distance::DistanceMatrix;
/// use fleet_routing::evaluation::RouteEvaluator;
/// use fleet_routing::constructive::first_fit_decreasing;
///
/// let dm = DistanceMatrix::from_data(4, vec![
///     0, 1, 2, 3,
///     1, 0, 1, 2,
///     2, 1, 0, 1,
///     3, 2, 1, 0,
/// ]).unwrap();
/// let demands = vec![0, 2, 2, 3];
/// let evaluator = RouteEvaluator::new(&dm, &demands, false);
///
/// // 3 + 2 | 2 fits only when the large order is placed first
/// let construction = first_fit_decreasing(&evaluator, &[5, 2]);
/// assert!(construction.is_complete());
/// ```
pub fn first_fit_decreasing(evaluator: &RouteEvaluator<'_>, capacities: &[u32]) -> Construction {
    let distances = evaluator.distances();
    let n = distances.size();

    let mut by_demand: Vec<usize> = (1..n).collect();
    by_demand.sort_by(|&a, &b| {
        evaluator
            .demand(b)
            .cmp(&evaluator.demand(a))
            .then(a.cmp(&b))
    });

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); capacities.len()];
    let mut loads = vec![0u64; capacities.len()];
    let mut unassigned = Vec::new();

    for node in by_demand {
        let demand = evaluator.demand(node);
        let slot = (0..capacities.len()).find(|&v| loads[v] + demand <= u64::from(capacities[v]));
        match slot {
            Some(v) => {
                members[v].push(node);
                loads[v] += demand;
            }
            None => unassigned.push(node),
        }
    }
    unassigned.sort_unstable();

    let routes = members
        .into_iter()
        .map(|mut pending| {
            pending.sort_unstable();
            let mut route = Vec::with_capacity(pending.len());
            let mut current = 0;
            while let Some(next) = distances.nearest_neighbor(current, &pending) {
                pending.retain(|&c| c != next);
                route.push(next);
                current = next;
            }
            route
        })
        .collect();

    Construction { routes, unassigned }
}
