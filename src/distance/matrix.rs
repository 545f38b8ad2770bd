//! Dense integer-meter distance matrix.

use super::distance_km;
use crate::models::Coordinate;

/// A dense n×n distance matrix in meters, stored in row-major order.
///
/// Built from coordinates with the haversine metric, so it is symmetric with
/// a zero diagonal. Each entry is the great-circle distance truncated toward
/// zero to whole meters.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Coordinate;
/// use fleet_routing::distance::DistanceMatrix;
///
/// let coords = vec![
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.0, 1.0),
///     Coordinate::new(0.0, 2.0),
/// ];
/// let dm = DistanceMatrix::from_coordinates(&coords);
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(0, 1), 111_194);
/// assert_eq!(dm.get(1, 1), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Computes the haversine meter matrix for the given coordinates.
    ///
    /// The diagonal is left at zero without evaluating the formula.
    pub fn from_coordinates(coords: &[Coordinate]) -> Self {
        let n = coords.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let meters = (distance_km(coords[i], coords[j]) * 1000.0).trunc() as i64;
                dm.set(i, j, meters);
                dm.set(j, i, meters);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<i64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: i64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `get(i, j) == get(j, i)` for all pairs.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Returns the nearest of `candidates` to `from`, lowest index on ties.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by_key(|&c| (self.get(from, c), c))
    }

    /// Sum of consecutive legs along `nodes`; no closing leg.
    pub fn path_distance(&self, nodes: &[usize]) -> i64 {
        nodes.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Row-major view of the rows, for callers that want `Vec<Vec<i64>>`.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.data.chunks(self.size.max(1)).map(<[i64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_coords() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 2.0),
        ]
    }

    #[test]
    fn test_from_coordinates() {
        let dm = DistanceMatrix::from_coordinates(&sample_coords());
        assert_eq!(dm.size(), 3);
        // 111194.93 m truncated
        assert_eq!(dm.get(0, 1), 111_194);
        assert_eq!(dm.get(1, 2), 111_194);
        // 222389.85 m truncated
        assert_eq!(dm.get(0, 2), 222_389);
        assert_eq!(dm.get(0, 0), 0);
    }

    #[test]
    fn test_truncates_per_leg() {
        let dm = DistanceMatrix::from_coordinates(&sample_coords());
        // 0→1→2 summed per leg loses a meter against the direct truncation
        assert_eq!(dm.path_distance(&[0, 1, 2]), 222_388);
    }

    #[test]
    fn test_symmetric() {
        let coords = vec![
            Coordinate::new(12.97, 77.59),
            Coordinate::new(12.98, 77.58),
            Coordinate::new(12.96, 77.60),
            Coordinate::new(12.99, 77.57),
        ];
        let dm = DistanceMatrix::from_coordinates(&coords);
        assert!(dm.is_symmetric());
        for i in 0..dm.size() {
            assert_eq!(dm.get(i, i), 0);
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(DistanceMatrix::from_coordinates(&[]).size(), 0);
        let dm = DistanceMatrix::from_coordinates(&[Coordinate::new(5.0, 5.0)]);
        assert_eq!(dm.get(0, 0), 0);
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0, 5, 5, 0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5);
        assert_eq!(dm.get(1, 0), 5);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0, 1, 2]).is_none());
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42);
        assert_eq!(dm.get(0, 1), 42);
        assert_eq!(dm.get(1, 0), 0);
        assert!(!dm.is_symmetric());
    }

    #[test]
    fn test_nearest_neighbor_ties_lowest_index() {
        let dm = DistanceMatrix::from_data(3, vec![0, 7, 7, 7, 0, 1, 7, 1, 0]).expect("valid");
        assert_eq!(dm.nearest_neighbor(0, &[2, 1]), Some(1));
        assert_eq!(dm.nearest_neighbor(1, &[0, 2]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn test_to_rows() {
        let dm = DistanceMatrix::from_data(2, vec![0, 3, 4, 0]).expect("valid");
        assert_eq!(dm.to_rows(), vec![vec![0, 3], vec![4, 0]]);
    }
}
