//! Route evaluator that computes distance, load, and feasibility.

use crate::distance::DistanceMatrix;
use crate::models::Route;

/// A constraint violation found while validating a set of routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Route load exceeds its vehicle's capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Summed demand on the route.
        load: u64,
        /// Vehicle capacity.
        capacity: u64,
    },
    /// The depot appears among a route's stops.
    DepotInRoute {
        /// Route index in the solution.
        route_index: usize,
    },
    /// A stop index does not name an order node.
    UnknownNode {
        /// Offending node index.
        node: usize,
    },
    /// An order node is visited more than once.
    DuplicateVisit {
        /// Order node visited twice.
        node: usize,
    },
    /// An order node is never visited.
    MissingOrder {
        /// Order node left out.
        node: usize,
    },
}

/// Evaluates routes given as stop sequences (node indices, depot excluded).
///
/// Distances are integer meters summed leg by leg, starting at the depot.
/// The closing leg back to the depot is counted only when the evaluator is
/// built with `return_to_depot = true`.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Coordinate;
/// use fleet_routing::distance::DistanceMatrix;
/// use fleet_routing::evaluation::RouteEvaluator;
///
/// let coords = vec![
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.0, 1.0),
///     Coordinate::new(0.0, 2.0),
/// ];
/// let dm = DistanceMatrix::from_coordinates(&coords);
/// let demands = vec![0, 1, 1];
///
/// let evaluator = RouteEvaluator::new(&dm, &demands, false);
/// assert_eq!(evaluator.route_distance(&[1, 2]), 222_388);
/// assert_eq!(evaluator.route_load(&[1, 2]), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteEvaluator<'a> {
    distances: &'a DistanceMatrix,
    demands: &'a [u32],
    return_to_depot: bool,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator.
    ///
    /// `demands` is indexed by node; `demands[0]` (the depot) is ignored.
    pub fn new(distances: &'a DistanceMatrix, demands: &'a [u32], return_to_depot: bool) -> Self {
        Self {
            distances,
            demands,
            return_to_depot,
        }
    }

    /// The underlying distance matrix.
    pub fn distances(&self) -> &'a DistanceMatrix {
        self.distances
    }

    /// Whether the closing leg is counted.
    pub fn return_to_depot(&self) -> bool {
        self.return_to_depot
    }

    /// Demand of a single node.
    pub fn demand(&self, node: usize) -> u64 {
        u64::from(self.demands[node])
    }

    /// Cost of the arc `from → next`, where `None` means "route ends here".
    pub fn arc(&self, from: usize, next: Option<usize>) -> i64 {
        match next {
            Some(to) => self.distances.get(from, to),
            None if self.return_to_depot => self.distances.get(from, 0),
            None => 0,
        }
    }

    /// Distance of a route visiting `stops` in order.
    pub fn route_distance(&self, stops: &[usize]) -> i64 {
        self.sequence_distance(stops.iter().copied())
    }

    /// Distance of a route given as any stop sequence.
    pub fn sequence_distance(&self, stops: impl IntoIterator<Item = usize>) -> i64 {
        let mut prev = 0;
        let mut total = 0;
        for stop in stops {
            total += self.distances.get(prev, stop);
            prev = stop;
        }
        if prev != 0 {
            total += self.arc(prev, None);
        }
        total
    }

    /// Summed demand of `stops`.
    pub fn route_load(&self, stops: &[usize]) -> u64 {
        stops.iter().map(|&s| self.demand(s)).sum()
    }

    /// Builds a [`Route`] from a stop sequence.
    pub fn build_route(&self, vehicle_id: Option<String>, stops: &[usize]) -> Route {
        Route::new(
            vehicle_id,
            stops,
            self.route_load(stops),
            self.route_distance(stops),
        )
    }

    /// Total distance over several routes.
    pub fn total_distance(&self, routes: &[Vec<usize>]) -> i64 {
        routes.iter().map(|r| self.route_distance(r)).sum()
    }

    /// Checks `routes` (one per capacity) against capacity and coverage.
    ///
    /// With `require_all = true`, every order node `1..n` must appear exactly
    /// once; otherwise only duplicates are reported.
    pub fn validate(
        &self,
        routes: &[Vec<usize>],
        capacities: &[u32],
        require_all: bool,
    ) -> Vec<Violation> {
        let n = self.distances.size();
        let mut violations = Vec::new();
        let mut seen = vec![false; n];

        for (idx, stops) in routes.iter().enumerate() {
            let mut load = 0u64;
            for &node in stops {
                if node == 0 {
                    violations.push(Violation::DepotInRoute { route_index: idx });
                    continue;
                }
                if node >= n {
                    violations.push(Violation::UnknownNode { node });
                    continue;
                }
                if seen[node] {
                    violations.push(Violation::DuplicateVisit { node });
                }
                seen[node] = true;
                load += self.demand(node);
            }
            let capacity = capacities.get(idx).copied().map_or(0, u64::from);
            if load > capacity {
                violations.push(Violation::CapacityExceeded {
                    route_index: idx,
                    load,
                    capacity,
                });
            }
        }

        if require_all {
            violations.extend(
                (1..n)
                    .filter(|&node| !seen[node])
                    .map(|node| Violation::MissingOrder { node }),
            );
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 —3— 1 —4— 2, with 0—2 = 5
    fn setup() -> (DistanceMatrix, Vec<u32>) {
        let dm = DistanceMatrix::from_data(3, vec![0, 3, 5, 3, 0, 4, 5, 4, 0]).expect("valid");
        (dm, vec![0, 10, 20])
    }

    #[test]
    fn test_route_distance_open() {
        let (dm, demands) = setup();
        let eval = RouteEvaluator::new(&dm, &demands, false);
        assert_eq!(eval.route_distance(&[]), 0);
        assert_eq!(eval.route_distance(&[1]), 3);
        assert_eq!(eval.route_distance(&[1, 2]), 7);
        assert_eq!(eval.route_distance(&[2, 1]), 9);
    }

    #[test]
    fn test_route_distance_closed() {
        let (dm, demands) = setup();
        let eval = RouteEvaluator::new(&dm, &demands, true);
        assert_eq!(eval.route_distance(&[]), 0);
        assert_eq!(eval.route_distance(&[1]), 6);
        assert_eq!(eval.route_distance(&[1, 2]), 12);
    }

    #[test]
    fn test_arc() {
        let (dm, demands) = setup();
        let open = RouteEvaluator::new(&dm, &demands, false);
        let closed = RouteEvaluator::new(&dm, &demands, true);
        assert_eq!(open.arc(1, Some(2)), 4);
        assert_eq!(open.arc(2, None), 0);
        assert_eq!(closed.arc(2, None), 5);
    }

    #[test]
    fn test_build_route() {
        let (dm, demands) = setup();
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let route = eval.build_route(Some("v".into()), &[1, 2]);
        assert_eq!(route.nodes(), &[0, 1, 2]);
        assert_eq!(route.load(), 30);
        assert_eq!(route.distance(), 7);
    }

    #[test]
    fn test_validate_ok() {
        let (dm, demands) = setup();
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let v = eval.validate(&[vec![1], vec![2]], &[10, 20], true);
        assert!(v.is_empty());
    }

    #[test]
    fn test_validate_capacity() {
        let (dm, demands) = setup();
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let v = eval.validate(&[vec![1, 2], vec![]], &[25, 25], true);
        assert_eq!(
            v,
            vec![Violation::CapacityExceeded {
                route_index: 0,
                load: 30,
                capacity: 25,
            }]
        );
    }

    #[test]
    fn test_validate_coverage() {
        let (dm, demands) = setup();
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let v = eval.validate(&[vec![1, 1, 0]], &[100], true);
        assert!(v.contains(&Violation::DuplicateVisit { node: 1 }));
        assert!(v.contains(&Violation::DepotInRoute { route_index: 0 }));
        assert!(v.contains(&Violation::MissingOrder { node: 2 }));

        let partial = eval.validate(&[vec![1]], &[100], false);
        assert!(partial.is_empty());
    }

    #[test]
    fn test_validate_unknown_node() {
        let (dm, demands) = setup();
        let eval = RouteEvaluator::new(&dm, &demands, false);
        let v = eval.validate(&[vec![7]], &[100], false);
        assert_eq!(v, vec![Violation::UnknownNode { node: 7 }]);
    }
}
