//! Pairwise stop exchange operator.
//!
//! # Algorithm
//!
//! Swaps two stops, either within one route or across two routes. Given
//! routes `… p₁ x n₁ …` and `… p₂ y n₂ …`, the move produces
//! `… p₁ y n₁ …` and `… p₂ x n₂ …`. Cross-route swaps must keep both
//! routes within capacity. The first swap with a strictly negative delta is
//! applied (first-improvement).
//!
//! # Complexity
//!
//! O(n²) per pass where n = total stops.

use super::{positions_from, Deadline, Scan};
use crate::evaluation::RouteEvaluator;

/// Scans for the first improving swap and applies it.
///
/// `loads[r]` must hold the current load of `routes[r]`; it is kept in sync.
///
/// # Examples
///
/// ```
/// use fleet_routing::distance::DistanceMatrix;
/// use fleet_routing::evaluation::RouteEvaluator;
/// use fleet_routing::local_search::{exchange_pass, Deadline, Scan};
///
/// // 0 —1— 1 —1— 2 —1— 3
/// let dm = DistanceMatrix::from_data(4, vec![
///     0, 1, 2, 3,
///     1, 0, 1, 2,
///     2, 1, 0, 1,
///     3, 2, 1, 0,
/// ]).unwrap();
/// let demands = vec![0, 1, 1, 1];
/// let evaluator = RouteEvaluator::new(&dm, &demands, false);
///
/// let mut routes = vec![vec![3, 2, 1]];
/// let mut loads = vec![3];
/// let scan = exchange_pass(&evaluator, &[5], &mut routes, &mut loads, &Deadline::unbounded());
/// assert_eq!(scan, Scan::Improved(-2));
/// assert_eq!(routes, vec![vec![1, 2, 3]]);
/// ```
pub fn exchange_pass(
    evaluator: &RouteEvaluator<'_>,
    capacities: &[u32],
    routes: &mut [Vec<usize>],
    loads: &mut [u64],
    deadline: &Deadline,
) -> Scan {
    exchange_from(evaluator, capacities, routes, loads, deadline, &mut 0)
}

/// Like [`exchange_pass`], but starts the first stop of each pair at
/// `cursor` (wrapping around) and leaves `cursor` on the stop that improved.
pub(super) fn exchange_from(
    evaluator: &RouteEvaluator<'_>,
    capacities: &[u32],
    routes: &mut [Vec<usize>],
    loads: &mut [u64],
    deadline: &Deadline,
    cursor: &mut usize,
) -> Scan {
    for (flat, a, i) in positions_from(routes, *cursor) {
        if deadline.expired() {
            return Scan::Expired;
        }
        for b in a..routes.len() {
            let start = if b == a { i + 1 } else { 0 };
            for j in start..routes[b].len() {
                let delta = if a == b {
                    intra_swap_delta(evaluator, &routes[a], i, j)
                } else {
                    match inter_swap_delta(evaluator, capacities, routes, loads, (a, i), (b, j)) {
                        Some(delta) => delta,
                        None => continue,
                    }
                };
                if delta < 0 {
                    apply(evaluator, routes, loads, (a, i), (b, j));
                    *cursor = flat;
                    return Scan::Improved(delta);
                }
            }
        }
    }
    Scan::Exhausted
}

/// Delta of swapping `route[i]` and `route[j]` (`i < j`) within one route.
fn intra_swap_delta(evaluator: &RouteEvaluator<'_>, route: &[usize], i: usize, j: usize) -> i64 {
    let d = evaluator.distances();
    let x = route[i];
    let y = route[j];
    let prev_i = if i == 0 { 0 } else { route[i - 1] };
    let next_j = route.get(j + 1).copied();

    if j == i + 1 {
        // prev x y next → prev y x next
        let old = d.get(prev_i, x) + d.get(x, y) + evaluator.arc(y, next_j);
        let new = d.get(prev_i, y) + d.get(y, x) + evaluator.arc(x, next_j);
        return new - old;
    }

    let next_i = route[i + 1];
    let prev_j = route[j - 1];
    let old = d.get(prev_i, x) + d.get(x, next_i) + d.get(prev_j, y) + evaluator.arc(y, next_j);
    let new = d.get(prev_i, y) + d.get(y, next_i) + d.get(prev_j, x) + evaluator.arc(x, next_j);
    new - old
}

/// Delta of swapping stops across two routes; `None` if capacity breaks.
fn inter_swap_delta(
    evaluator: &RouteEvaluator<'_>,
    capacities: &[u32],
    routes: &[Vec<usize>],
    loads: &[u64],
    (a, i): (usize, usize),
    (b, j): (usize, usize),
) -> Option<i64> {
    let x = routes[a][i];
    let y = routes[b][j];
    let dx = evaluator.demand(x);
    let dy = evaluator.demand(y);

    if loads[a] - dx + dy > u64::from(capacities[a]) || loads[b] - dy + dx > u64::from(capacities[b])
    {
        return None;
    }

    Some(replace_delta(evaluator, &routes[a], i, y) + replace_delta(evaluator, &routes[b], j, x))
}

/// Delta of replacing `route[pos]` with `node` in place.
fn replace_delta(evaluator: &RouteEvaluator<'_>, route: &[usize], pos: usize, node: usize) -> i64 {
    let d = evaluator.distances();
    let old = route[pos];
    let prev = if pos == 0 { 0 } else { route[pos - 1] };
    let next = route.get(pos + 1).copied();

    d.get(prev, node) + evaluator.arc(node, next) - d.get(prev, old) - evaluator.arc(old, next)
}

fn apply(
    evaluator: &RouteEvaluator<'_>,
    routes: &mut [Vec<usize>],
    loads: &mut [u64],
    (a, i): (usize, usize),
    (b, j): (usize, usize),
) {
    if a == b {
        routes[a].swap(i, j);
        return;
    }
    let x = routes[a][i];
    let y = routes[b][j];
    routes[a][i] = y;
    routes[b][j] = x;
    loads[a] = loads[a] - evaluator.demand(x) + evaluator.demand(y);
    loads[b] = loads[b] - evaluator.demand(y) + evaluator.demand(x);
}
