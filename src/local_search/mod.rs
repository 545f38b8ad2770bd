//! Local search for improving capacitated routes.
//!
//! - [`relocate_pass`] — Move a segment of 1–3 stops within or between routes
//! - [`exchange_pass`] — Swap two stops within or between routes
//! - [`LocalSearch`] — First-improvement driver bounded by a [`Deadline`]
//!
//! All deltas are exact integer meters, so an accepted move never increases
//! the total distance.

mod deadline;
mod exchange;
mod relocate;

pub use deadline::Deadline;
pub use exchange::exchange_pass;
pub use relocate::{relocate_pass, MAX_SEGMENT_LEN};

use exchange::exchange_from;
use relocate::relocate_from;

use crate::evaluation::RouteEvaluator;

/// Outcome of one operator scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// A move was applied; carries its (negative) distance delta.
    Improved(i64),
    /// No improving move exists for this operator.
    Exhausted,
    /// The deadline expired mid-scan; nothing was applied.
    Expired,
}

/// Result of a local-search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Total distance after the last accepted move.
    pub total_distance: i64,
    /// Number of accepted moves.
    pub accepted_moves: usize,
    /// `true` if the deadline cut the search short.
    pub timed_out: bool,
}

/// Every stop position as `(flat index, route, position)`, starting at flat
/// index `cursor` and wrapping around.
fn positions_from(routes: &[Vec<usize>], cursor: usize) -> Vec<(usize, usize, usize)> {
    let flat: Vec<(usize, usize)> = routes
        .iter()
        .enumerate()
        .flat_map(|(r, route)| (0..route.len()).map(move |p| (r, p)))
        .collect();
    let start = if flat.is_empty() { 0 } else { cursor % flat.len() };
    flat[start..]
        .iter()
        .chain(&flat[..start])
        .enumerate()
        .map(|(k, &(r, p))| ((start + k) % flat.len(), r, p))
        .collect()
}

/// First-improvement local search over relocate and exchange moves.
///
/// # Examples
///
/// ```
/// use fleet_routing::distance::DistanceMatrix;
/// use fleet_routing::evaluation::RouteEvaluator;
/// use fleet_routing::local_search::{Deadline, LocalSearch};
///
/// let dm = DistanceMatrix::from_data(4, vec![
///     0, 1, 2, 3,
///     1, 0, 1, 2,
///     2, 1, 0, 1,
///     3, 2, 1, 0,
/// ]).unwrap();
/// let demands = vec![0, 1, 1, 1];
/// let evaluator = RouteEvaluator::new(&dm, &demands, false);
///
/// let mut routes = vec![vec![2, 3, 1]];
/// let outcome = LocalSearch::new(evaluator, &[5]).run(&mut routes, &Deadline::unbounded(), |_| {});
/// assert_eq!(routes, vec![vec![1, 2, 3]]);
/// assert_eq!(outcome.total_distance, 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocalSearch<'a> {
    evaluator: RouteEvaluator<'a>,
    capacities: &'a [u32],
}

impl<'a> LocalSearch<'a> {
    /// Creates a search over routes aligned with `capacities`.
    pub fn new(evaluator: RouteEvaluator<'a>, capacities: &'a [u32]) -> Self {
        Self {
            evaluator,
            capacities,
        }
    }

    /// Improves `routes` in place until no move helps or `deadline` expires.
    ///
    /// `on_accept` receives the running total after every accepted move. Each
/// operator resumes scanning where its last improvement was found, so the
/// search stops only after a full sweep of both operators finds nothing.
    pub fn run(
        &self,
        routes: &mut [Vec<usize>],
        deadline: &Deadline,
        mut on_accept: impl FnMut(i64),
    ) -> SearchOutcome {
        let mut loads: Vec<u64> = routes
            .iter()
            .map(|r| self.evaluator.route_load(r))
            .collect();
        let mut total = self.evaluator.total_distance(routes);
        let mut accepted_moves = 0;
        let mut timed_out = false;
        let mut relocate_cursor = 0;
        let mut exchange_cursor = 0;

        loop {
            let mut scan = relocate_from(
                &self.evaluator,
                self.capacities,
                routes,
                &mut loads,
                deadline,
                &mut relocate_cursor,
            );
            if scan == Scan::Exhausted {
                scan = exchange_from(
                    &self.evaluator,
                    self.capacities,
                    routes,
                    &mut loads,
                    deadline,
                    &mut exchange_cursor,
                );
            }
            match scan {
                Scan::Improved(delta) => {
                    total += delta;
                    accepted_moves += 1;
                    log::trace!("local_search.accept: move={accepted_moves} delta={delta} total={total}");
                    on_accept(total);
                }
                Scan::Exhausted => break,
                Scan::Expired => {
                    timed_out = true;
                    break;
                }
            }
        }

        log::debug!(
            "local_search: done accepted={accepted_moves} total={total} timed_out={timed_out}"
        );
        SearchOutcome {
            total_distance: total,
            accepted_moves,
            timed_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Coordinate;
    use std::time::Duration;

    fn grid_problem() -> (DistanceMatrix, Vec<u32>) {
        let mut coords = vec![Coordinate::new(0.0, 0.0)];
        for i in 0..5 {
            for j in 0..4 {
                coords.push(Coordinate::new(i as f64 * 0.05 - 0.1, j as f64 * 0.07 - 0.1));
            }
        }
        let dm = DistanceMatrix::from_coordinates(&coords);
        let demands = std::iter::once(0)
            .chain((1..coords.len()).map(|i| 1 + (i % 3) as u32))
            .collect();
        (dm, demands)
    }

    #[test]
    fn test_run_is_monotone_and_consistent() {
        let (dm, demands) = grid_problem();
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let capacities = [25, 25, 25];
        // deliberately poor start: round-robin assignment
        let mut routes: Vec<Vec<usize>> = vec![Vec::new(); 3];
        for node in 1..dm.size() {
            routes[node % 3].push(node);
        }
        let initial = eval.total_distance(&routes);

        let mut history = vec![initial];
        let outcome = LocalSearch::new(eval, &capacities).run(
            &mut routes,
            &Deadline::unbounded(),
            |t| history.push(t),
        );

        assert!(history.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(outcome.total_distance, eval.total_distance(&routes));
        assert_eq!(outcome.accepted_moves, history.len() - 1);
        assert!(!outcome.timed_out);
        assert!(outcome.total_distance < initial);
        assert!(eval.validate(&routes, &capacities, true).is_empty());
    }

    #[test]
    fn test_run_respects_expired_deadline() {
        let (dm, demands) = grid_problem();
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let mut routes: Vec<Vec<usize>> = vec![(1..dm.size()).rev().collect()];
        let before = routes.clone();
        let outcome = LocalSearch::new(eval, &[100]).run(
            &mut routes,
            &Deadline::start(Duration::ZERO),
            |_| {},
        );
        assert!(outcome.timed_out);
        assert_eq!(outcome.accepted_moves, 0);
        assert_eq!(routes, before);
    }

    #[test]
    fn test_run_stops_near_budget() {
        let mut coords = vec![Coordinate::new(0.0, 0.0)];
        for i in 0..300 {
            // scattered, so a round-robin start leaves plenty to improve
            let lat = ((i * 37) % 101) as f64 * 0.002 - 0.1;
            let lon = ((i * 53) % 97) as f64 * 0.002 - 0.1;
            coords.push(Coordinate::new(lat, lon));
        }
        let dm = DistanceMatrix::from_coordinates(&coords);
        let demands = vec![1; coords.len()];
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let mut routes: Vec<Vec<usize>> = vec![Vec::new(); 4];
        for node in 1..dm.size() {
            routes[node % 4].push(node);
        }

        let budget = Duration::from_millis(50);
        let deadline = Deadline::start(budget);
        let outcome = LocalSearch::new(eval, &[100, 100, 100, 100]).run(&mut routes, &deadline, |_| {});

        assert!(deadline.elapsed() < budget + Duration::from_secs(1));
        assert_eq!(outcome.total_distance, eval.total_distance(&routes));
        assert!(eval.validate(&routes, &[100, 100, 100, 100], true).is_empty());
    }

    #[test]
    fn test_positions_wrap_from_cursor() {
        let routes = vec![vec![7, 8], vec![], vec![9]];
        assert_eq!(
            positions_from(&routes, 1),
            vec![(1, 0, 1), (2, 2, 0), (0, 0, 0)]
        );
        assert_eq!(positions_from(&routes, 3), positions_from(&routes, 0));
        assert!(positions_from(&[Vec::new()], 5).is_empty());
    }

    #[test]
    fn test_run_empty_routes() {
        let (dm, demands) = grid_problem();
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let mut routes: Vec<Vec<usize>> = vec![Vec::new(), Vec::new()];
        let outcome = LocalSearch::new(eval, &[1, 1]).run(&mut routes, &Deadline::unbounded(), |_| {});
        assert_eq!(outcome.total_distance, 0);
        assert_eq!(outcome.accepted_moves, 0);
    }
}
