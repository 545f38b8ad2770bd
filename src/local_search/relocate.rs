//! Segment relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each segment of 1, 2, or 3 consecutive stops to every other
//! position, either in another route (capacity checked) or later/earlier in
//! the same route. The first move with a strictly negative delta is applied
//! (first-improvement).
//!
//! # Complexity
//!
//! O(n² × k) per pass where n = total stops, k = 3 segment lengths.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::{positions_from, Deadline, Scan};
use crate::evaluation::RouteEvaluator;

/// Longest segment moved as a unit.
pub const MAX_SEGMENT_LEN: usize = 3;

/// Scans for the first improving relocation and applies it.
///
/// `loads[r]` must hold the current load of `routes[r]`; it is kept in sync.
///
/// # Examples
///
/// ```
/// use fleet_routing::distance::DistanceMatrix;
/// use fleet_routing::evaluation::RouteEvaluator;
/// use fleet_routing::local_search::{relocate_pass, Deadline, Scan};
///
/// // 0 —1— 1 —1— 2; serving 2 before 1 doubles back
/// let dm = DistanceMatrix::from_data(3, vec![0, 1, 2, 1, 0, 1, 2, 1, 0]).unwrap();
/// let demands = vec![0, 1, 1];
/// let evaluator = RouteEvaluator::new(&dm, &demands, false);
///
/// let mut routes = vec![vec![2, 1]];
/// let mut loads = vec![2];
/// let scan = relocate_pass(&evaluator, &[5], &mut routes, &mut loads, &Deadline::unbounded());
/// assert_eq!(scan, Scan::Improved(-1));
/// assert_eq!(routes, vec![vec![1, 2]]);
/// ```
pub fn relocate_pass(
    evaluator: &RouteEvaluator<'_>,
    capacities: &[u32],
    routes: &mut [Vec<usize>],
    loads: &mut [u64],
    deadline: &Deadline,
) -> Scan {
    relocate_from(evaluator, capacities, routes, loads, deadline, &mut 0)
}

/// Like [`relocate_pass`], but scans source positions starting at `cursor`
/// (wrapping around) and leaves `cursor` on the position that improved.
pub(super) fn relocate_from(
    evaluator: &RouteEvaluator<'_>,
    capacities: &[u32],
    routes: &mut [Vec<usize>],
    loads: &mut [u64],
    deadline: &Deadline,
    cursor: &mut usize,
) -> Scan {
    for (flat, from, pos) in positions_from(routes, *cursor) {
        if deadline.expired() {
            return Scan::Expired;
        }
        let max_len = MAX_SEGMENT_LEN.min(routes[from].len() - pos);
        for seg_len in 1..=max_len {
            if let Some((to, at, delta)) =
                find_relocation(evaluator, capacities, routes, loads, from, pos, seg_len)
            {
                apply(evaluator, routes, loads, from, pos, seg_len, to, at);
                *cursor = flat;
                return Scan::Improved(delta);
            }
        }
    }
    Scan::Exhausted
}

/// First improving destination for `routes[from][pos..pos + seg_len]`.
///
/// Returns `(to_route, insert_at, delta)`; for an intra-route move,
/// `insert_at` indexes the route with the segment already removed.
fn find_relocation(
    evaluator: &RouteEvaluator<'_>,
    capacities: &[u32],
    routes: &[Vec<usize>],
    loads: &[u64],
    from: usize,
    pos: usize,
    seg_len: usize,
) -> Option<(usize, usize, i64)> {
    let source = &routes[from];
    let segment = &source[pos..pos + seg_len];
    let seg_load: u64 = segment.iter().map(|&s| evaluator.demand(s)).sum();
    let removal = removal_delta(evaluator, source, pos, seg_len);

    for (to, target) in routes.iter().enumerate() {
        if to == from {
            if let Some((at, delta)) = intra_relocation(evaluator, source, pos, seg_len) {
                return Some((to, at, delta));
            }
            continue;
        }
        if loads[to] + seg_load > u64::from(capacities[to]) {
            continue;
        }
        for at in 0..=target.len() {
            let delta = removal + insertion_delta(evaluator, target, at, segment);
            if delta < 0 {
                return Some((to, at, delta));
            }
        }
    }
    None
}

/// Distance change from cutting `route[pos..pos + len]` out of its route.
fn removal_delta(evaluator: &RouteEvaluator<'_>, route: &[usize], pos: usize, len: usize) -> i64 {
    let d = evaluator.distances();
    let prev = if pos == 0 { 0 } else { route[pos - 1] };
    let next = route.get(pos + len).copied();
    let first = route[pos];
    let last = route[pos + len - 1];

    // Old: prev → first … last → next
    // New: prev → next
    evaluator.arc(prev, next) - d.get(prev, first) - evaluator.arc(last, next)
}

/// Distance change from splicing `segment` into `route` before index `at`.
fn insertion_delta(
    evaluator: &RouteEvaluator<'_>,
    route: &[usize],
    at: usize,
    segment: &[usize],
) -> i64 {
    let prev = if at == 0 { 0 } else { route[at - 1] };
    let next = route.get(at).copied();
    splice_delta(evaluator, prev, next, segment)
}

/// Old: prev → next. New: prev → first … last → next.
fn splice_delta(
    evaluator: &RouteEvaluator<'_>,
    prev: usize,
    next: Option<usize>,
    segment: &[usize],
) -> i64 {
    let first = segment[0];
    let last = segment[segment.len() - 1];
    evaluator.distances().get(prev, first) + evaluator.arc(last, next) - evaluator.arc(prev, next)
}

/// First improving reinsertion point for a segment within its own route.
fn intra_relocation(
    evaluator: &RouteEvaluator<'_>,
    route: &[usize],
    pos: usize,
    seg_len: usize,
) -> Option<(usize, i64)> {
    if route.len() <= seg_len {
        return None;
    }
    let removal = removal_delta(evaluator, route, pos, seg_len);
    (0..=route.len() - seg_len)
        .filter(|&at| at != pos)
        .find_map(|at| {
            let delta = removal + reinsertion_delta(evaluator, route, pos, seg_len, at);
            (delta < 0).then_some((at, delta))
        })
}

/// Splice cost of putting `route[pos..pos + seg_len]` back before index `at`
/// of the route with that segment cut out. O(1).
fn reinsertion_delta(
    evaluator: &RouteEvaluator<'_>,
    route: &[usize],
    pos: usize,
    seg_len: usize,
    at: usize,
) -> i64 {
    let rest_len = route.len() - seg_len;
    let rest = |i: usize| if i < pos { route[i] } else { route[i + seg_len] };
    let prev = if at == 0 { 0 } else { rest(at - 1) };
    let next = (at < rest_len).then(|| rest(at));
    splice_delta(evaluator, prev, next, &route[pos..pos + seg_len])
}

#[allow(clippy::too_many_arguments)]
fn apply(
    evaluator: &RouteEvaluator<'_>,
    routes: &mut [Vec<usize>],
    loads: &mut [u64],
    from: usize,
    pos: usize,
    seg_len: usize,
    to: usize,
    at: usize,
) {
    let segment: Vec<usize> = routes[from].drain(pos..pos + seg_len).collect();
    if from != to {
        let seg_load: u64 = segment.iter().map(|&s| evaluator.demand(s)).sum();
        loads[from] -= seg_load;
        loads[to] += seg_load;
    }
    routes[to].splice(at..at, segment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Coordinate;

    fn line(n: usize) -> DistanceMatrix {
        let mut dm = DistanceMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                dm.set(i, j, (i as i64 - j as i64).abs());
            }
        }
        dm
    }

    #[test]
    fn test_removal_delta() {
        let dm = line(4);
        let demands = vec![0; 4];
        let eval = RouteEvaluator::new(&dm, &demands, false);
        // [1, 3, 2]: removing 3 (pos 1) → [1, 2]
        // old 1→3→2 = 2 + 1, new 1→2 = 1
        assert_eq!(removal_delta(&eval, &[1, 3, 2], 1, 1), -2);
        // removing the tail of an open route drops its leg
        assert_eq!(removal_delta(&eval, &[1, 2], 1, 1), -1);
    }

    #[test]
    fn test_insertion_delta() {
        let dm = line(4);
        let demands = vec![0; 4];
        let eval = RouteEvaluator::new(&dm, &demands, false);
        // [1, 3] + 2 before index 1 → [1, 2, 3]: old 1→3 = 2, new 1→2→3 = 2
        assert_eq!(insertion_delta(&eval, &[1, 3], 1, &[2]), 0);
        // appending to an empty route costs depot → stop
        assert_eq!(insertion_delta(&eval, &[], 0, &[3]), 3);
    }

    #[test]
    fn test_intra_delta_matches_full_recompute() {
        let coords: Vec<Coordinate> = [
            (0.0, 0.0),
            (0.3, 0.1),
            (0.1, 0.5),
            (0.6, 0.2),
            (0.2, 0.9),
            (0.8, 0.7),
            (0.5, 0.4),
            (0.9, 0.1),
        ]
        .into_iter()
        .map(Coordinate::from)
        .collect();
        let dm = DistanceMatrix::from_coordinates(&coords);
        let demands = vec![0; coords.len()];
        let route = vec![5, 2, 7, 1, 6, 3, 4];

        for closed in [false, true] {
            let eval = RouteEvaluator::new(&dm, &demands, closed);
            let before = eval.route_distance(&route);
            for seg_len in 1..=MAX_SEGMENT_LEN {
                for pos in 0..=route.len() - seg_len {
                    let removal = removal_delta(&eval, &route, pos, seg_len);
                    let mut rest = route.clone();
                    let segment: Vec<usize> = rest.drain(pos..pos + seg_len).collect();
                    for at in 0..=rest.len() {
                        let mut moved = rest.clone();
                        moved.splice(at..at, segment.iter().copied());
                        let expected = eval.route_distance(&moved) - before;
                        let got = removal + reinsertion_delta(&eval, &route, pos, seg_len, at);
                        assert_eq!(got, expected, "closed={closed} pos={pos} len={seg_len} at={at}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_intra_relocation_fixes_order() {
        let dm = line(4);
        let demands = vec![0, 1, 1, 1];
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let mut routes = vec![vec![3, 1, 2]];
        let mut loads = vec![3];
        let before = eval.total_distance(&routes);
        let scan = relocate_pass(&eval, &[10], &mut routes, &mut loads, &Deadline::unbounded());
        let Scan::Improved(delta) = scan else {
            panic!("expected an improvement, got {scan:?}");
        };
        assert_eq!(eval.total_distance(&routes), before + delta);
        assert_eq!(loads, vec![3]);
    }

    #[test]
    fn test_inter_relocation_moves_stop() {
        // node 2 sits next to node 1 but rides with far-away node 3
        let dm = DistanceMatrix::from_data(
            4,
            vec![
                0, 10, 11, 50, //
                10, 0, 1, 60, //
                11, 1, 0, 59, //
                50, 60, 59, 0,
            ],
        )
        .expect("valid");
        let demands = vec![0, 1, 1, 1];
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let mut routes = vec![vec![1], vec![2, 3]];
        let mut loads = vec![1, 2];
        // vehicle 1 is full, so node 1 cannot join it
        let scan = relocate_pass(&eval, &[5, 2], &mut routes, &mut loads, &Deadline::unbounded());
        // 0→2→1 = 12 and 0→3 = 50, down from 10 + 70
        assert_eq!(scan, Scan::Improved(-18));
        assert_eq!(routes, vec![vec![2, 1], vec![3]]);
        assert_eq!(loads, vec![2, 1]);
    }

    #[test]
    fn test_relocation_respects_capacity() {
        let dm = DistanceMatrix::from_data(
            4,
            vec![
                0, 10, 11, 50, //
                10, 0, 1, 60, //
                11, 1, 0, 59, //
                50, 60, 59, 0,
            ],
        )
        .expect("valid");
        let demands = vec![0, 1, 1, 1];
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let mut routes = vec![vec![1], vec![2, 3]];
        let mut loads = vec![1, 2];
        // both vehicles are full; the only improving moves break capacity
        let scan = relocate_pass(&eval, &[1, 2], &mut routes, &mut loads, &Deadline::unbounded());
        assert_eq!(scan, Scan::Exhausted);
        assert_eq!(routes, vec![vec![1], vec![2, 3]]);
        assert_eq!(loads, vec![1, 2]);
    }

    #[test]
    fn test_optimal_route_exhausted() {
        let dm = line(4);
        let demands = vec![0, 1, 1, 1];
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let mut routes = vec![vec![1, 2, 3]];
        let mut loads = vec![3];
        let scan = relocate_pass(&eval, &[10], &mut routes, &mut loads, &Deadline::unbounded());
        assert_eq!(scan, Scan::Exhausted);
        assert_eq!(routes, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_expired_deadline_stops_scan() {
        let dm = line(4);
        let demands = vec![0, 1, 1, 1];
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let mut routes = vec![vec![3, 1, 2]];
        let mut loads = vec![3];
        let expired = Deadline::start(std::time::Duration::ZERO);
        let scan = relocate_pass(&eval, &[10], &mut routes, &mut loads, &expired);
        assert_eq!(scan, Scan::Expired);
        assert_eq!(routes, vec![vec![3, 1, 2]]);
    }
}
