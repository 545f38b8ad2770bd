//! Nearest-neighbor route construction.
//!
//! Builds a single visiting order greedily: starting from the depot, always
//! move to the nearest unvisited stop. No post-construction improvement is
//! applied.
//!
//! # Complexity
//!
//! O(n²) where n = number of stops.

use crate::distance::DistanceMatrix;
use crate::models::Coordinate;

/// Returns the nearest-neighbor visiting order over every node of `distances`.
///
/// Starts at node 0 and repeatedly moves to the nearest unvisited node,
/// lowest index on ties. The result always begins with 0 and contains each
/// node exactly once.
///
/// # Examples
///
/// ```
/// use fleet_routing::distance::DistanceMatrix;
/// use fleet_routing::constructive::nearest_neighbor_order;
///
/// // 0 is closer to 2 than to 1
/// let dm = DistanceMatrix::from_data(3, vec![0, 9, 1, 9, 0, 8, 1, 8, 0]).unwrap();
/// assert_eq!(nearest_neighbor_order(&dm), vec![0, 2, 1]);
/// ```
pub fn nearest_neighbor_order(distances: &DistanceMatrix) -> Vec<usize> {
    let n = distances.size();
    if n == 0 {
        return Vec::new();
    }

    let mut unvisited: Vec<usize> = (1..n).collect();
    let mut order = Vec::with_capacity(n);
    order.push(0);
    let mut current = 0;

    while let Some(next) = distances.nearest_neighbor(current, &unvisited) {
        unvisited.retain(|&c| c != next);
        order.push(next);
        current = next;
    }

    order
}

/// Greedy nearest-neighbor routing over a local stop set.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Coordinate;
/// use fleet_routing::constructive::RouteConstructor;
///
/// let depot = Coordinate::new(0.0, 0.0);
/// let stops = [Coordinate::new(0.0, 2.0), Coordinate::new(0.0, 1.0)];
/// // local indices: 0 = depot, 1 = (0,2), 2 = (0,1)
/// assert_eq!(RouteConstructor::construct(depot, &stops), vec![0, 2, 1]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteConstructor;

impl RouteConstructor {
    /// Visiting order over `[depot] ++ stops`, as local indices (0 = depot).
    pub fn construct(depot: Coordinate, stops: &[Coordinate]) -> Vec<usize> {
        let distances = Self::local_matrix(depot, stops);
        nearest_neighbor_order(&distances)
    }

    /// Distance matrix over `[depot] ++ stops`.
    pub fn local_matrix(depot: Coordinate, stops: &[Coordinate]) -> DistanceMatrix {
        let mut coords = Vec::with_capacity(stops.len() + 1);
        coords.push(depot);
        coords.extend_from_slice(stops);
        DistanceMatrix::from_coordinates(&coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nn_line() {
        let stops = [
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 2.0),
            Coordinate::new(0.0, 3.0),
        ];
        let order = RouteConstructor::construct(Coordinate::new(0.0, 0.0), &stops);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_nn_chooses_nearest() {
        let stops = [Coordinate::new(0.0, 10.0), Coordinate::new(0.0, 1.0)];
        let order = RouteConstructor::construct(Coordinate::new(0.0, 0.0), &stops);
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_nn_tie_lowest_index() {
        // both stops 1° from the depot
        let stops = [Coordinate::new(0.0, -1.0), Coordinate::new(0.0, 1.0)];
        let order = RouteConstructor::construct(Coordinate::new(0.0, 0.0), &stops);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_nn_depot_only() {
        let order = RouteConstructor::construct(Coordinate::new(0.0, 0.0), &[]);
        assert_eq!(order, vec![0]);
    }

    #[test]
    fn test_nn_empty_matrix() {
        assert!(nearest_neighbor_order(&DistanceMatrix::new(0)).is_empty());
    }

    #[test]
    fn test_nn_visits_each_once() {
        let stops: Vec<Coordinate> = (0..12)
            .map(|i| Coordinate::new((i % 4) as f64 * 0.1, (i / 4) as f64 * 0.1))
            .collect();
        let mut order = RouteConstructor::construct(Coordinate::new(0.05, 0.05), &stops);
        assert_eq!(order[0], 0);
        order.sort_unstable();
        assert_eq!(order, (0..=12).collect::<Vec<_>>());
    }
}
