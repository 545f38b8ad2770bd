//! Lloyd's k-means over order locations.
//!
//! # Algorithm
//!
//! 1. Seed k centroids with k-means++ from a fixed-seed RNG.
//! 2. Assign every point to its nearest centroid (planar Euclidean distance
//!    over `(lat, lon)`, lowest centroid index on ties).
//! 3. Move each centroid to the mean of its points; an empty cluster keeps
//!    its previous centroid.
//! 4. Repeat 2–3 until no assignment changes or the iteration cap is hit.
//!
//! # Complexity
//!
//! O(I × n × k) where I = iterations.
//!
//! # Reference
//!
//! Lloyd, S. (1982). "Least squares quantization in PCM", *IEEE Transactions
//! on Information Theory* 28(2), 129-137. Arthur, D. & Vassilvitskii, S.
//! (2007). "k-means++: The Advantages of Careful Seeding", *SODA*, 1027-1035.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ClusterConfig;
use crate::models::Coordinate;

/// A partition of point indices into clusters.
///
/// `members(c)` lists the indices in cluster `c` in ascending order. Every
/// input index appears in exactly one cluster; clusters may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clusters {
    groups: Vec<Vec<usize>>,
}

impl Clusters {
    /// Wraps raw groups, sorting each one.
    pub fn from_groups(mut groups: Vec<Vec<usize>>) -> Self {
        for g in &mut groups {
            g.sort_unstable();
        }
        Self { groups }
    }

    /// Number of clusters (including empty ones).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no clusters.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Point indices in cluster `id`.
    pub fn members(&self, id: usize) -> &[usize] {
        &self.groups[id]
    }

    /// Iterates `(cluster id, members)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.groups.iter().enumerate().map(|(i, g)| (i, g.as_slice()))
    }

    /// Cluster id of every point, indexed by point.
    pub fn labels(&self) -> Vec<usize> {
        let n = self.groups.iter().map(Vec::len).sum();
        let mut labels = vec![0; n];
        for (id, group) in self.iter() {
            for &p in group {
                labels[p] = id;
            }
        }
        labels
    }
}

/// Partitions points into spatially coherent groups.
///
/// # Examples
///
/// ```
/// use fleet_routing::clustering::ClusterAssigner;
/// use fleet_routing::models::Coordinate;
///
/// let points = vec![
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.0, 0.1),
///     Coordinate::new(10.0, 10.0),
///     Coordinate::new(10.0, 10.1),
/// ];
/// let clusters = ClusterAssigner::default().assign(&points, 2);
/// let labels = clusters.labels();
/// assert_eq!(labels[0], labels[1]);
/// assert_eq!(labels[2], labels[3]);
/// assert_ne!(labels[0], labels[2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClusterAssigner {
    config: ClusterConfig,
}

impl ClusterAssigner {
    /// Creates an assigner with the given configuration.
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }

    /// Partitions `points` into `k` clusters.
    ///
    /// If `k == 0` or `k >= points.len()`, returns a single cluster holding
    /// every index.
    pub fn assign(&self, points: &[Coordinate], k: usize) -> Clusters {
        let m = points.len();
        if k == 0 || k >= m {
            log::debug!("cluster: degenerate k={k} points={m}, single cluster");
            return Clusters::from_groups(vec![(0..m).collect()]);
        }

        let mut centroids = self.seed_centroids(points, k);
        let mut labels = vec![usize::MAX; m];
        let mut iterations = 0;

        for _ in 0..self.config.max_iterations().max(1) {
            iterations += 1;
            let mut changed = false;
            for (p, point) in points.iter().enumerate() {
                let nearest = nearest_centroid(point, &centroids);
                if labels[p] != nearest {
                    labels[p] = nearest;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
            update_centroids(points, &labels, &mut centroids);
        }

        log::debug!("cluster: k={k} points={m} iterations={iterations}");

        let mut groups = vec![Vec::new(); k];
        for (p, &label) in labels.iter().enumerate() {
            groups[label].push(p);
        }
        Clusters::from_groups(groups)
    }

    /// k-means++ seeding.
    fn seed_centroids(&self, points: &[Coordinate], k: usize) -> Vec<Coordinate> {
        let mut rng = StdRng::seed_from_u64(self.config.seed());
        let mut centroids = Vec::with_capacity(k);
        centroids.push(points[rng.random_range(0..points.len())]);

        let mut nearest_sq: Vec<f64> = points
            .iter()
            .map(|p| p.planar_distance_sq(&centroids[0]))
            .collect();

        while centroids.len() < k {
            let total: f64 = nearest_sq.iter().sum();
            let pick = if total > 0.0 {
                weighted_pick(&nearest_sq, rng.random::<f64>() * total)
            } else {
                // every point coincides with a centroid
                rng.random_range(0..points.len())
            };

            let centroid = points[pick];
            centroids.push(centroid);
            for (w, p) in nearest_sq.iter_mut().zip(points) {
                *w = w.min(p.planar_distance_sq(&centroid));
            }
        }

        centroids
    }
}

/// Index whose cumulative weight first exceeds `target`.
///
/// Zero-weight points (already centroids) are never picked; rounding that
/// carries `target` past the end lands on the last positive weight.
fn weighted_pick(weights: &[f64], mut target: f64) -> usize {
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            if target < w {
                return i;
            }
            last_positive = i;
        }
        target -= w;
    }
    last_positive
}

/// Index of the closest centroid, lowest index on ties.
fn nearest_centroid(point: &Coordinate, centroids: &[Coordinate]) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = point.planar_distance_sq(c);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

fn update_centroids(points: &[Coordinate], labels: &[usize], centroids: &mut [Coordinate]) {
    let k = centroids.len();
    let mut sums = vec![(0.0f64, 0.0f64, 0usize); k];
    for (p, &label) in points.iter().zip(labels) {
        let s = &mut sums[label];
        s.0 += p.latitude();
        s.1 += p.longitude();
        s.2 += 1;
    }
    for (c, (lat, lon, count)) in centroids.iter_mut().zip(sums) {
        if count > 0 {
            *c = Coordinate::new(lat / count as f64, lon / count as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Vec<Coordinate> {
        vec![
            Coordinate::new(12.97, 77.59),
            Coordinate::new(12.98, 77.58),
            Coordinate::new(12.96, 77.60),
            Coordinate::new(28.61, 77.20),
            Coordinate::new(28.62, 77.21),
            Coordinate::new(28.60, 77.19),
        ]
    }

    #[test]
    fn test_degenerate_k() {
        let points = two_blobs();
        let assigner = ClusterAssigner::default();
        for k in [0, 6, 10] {
            let clusters = assigner.assign(&points, k);
            assert_eq!(clusters.len(), 1);
            assert_eq!(clusters.members(0), &[0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_separates_blobs() {
        let clusters = ClusterAssigner::default().assign(&two_blobs(), 2);
        assert_eq!(clusters.len(), 2);
        let mut groups: Vec<Vec<usize>> = clusters.iter().map(|(_, g)| g.to_vec()).collect();
        groups.sort();
        assert_eq!(groups, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_partition_covers_every_point_once() {
        let points: Vec<Coordinate> = (0..40)
            .map(|i| Coordinate::new((i * 7 % 13) as f64 * 0.01, (i * 5 % 11) as f64 * 0.01))
            .collect();
        let clusters = ClusterAssigner::default().assign(&points, 5);
        assert_eq!(clusters.len(), 5);
        let mut all: Vec<usize> = clusters.iter().flat_map(|(_, g)| g.to_vec()).collect();
        all.sort_unstable();
        assert_eq!(all, (0..40).collect::<Vec<_>>());
        for (_, g) in clusters.iter() {
            assert!(g.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_deterministic() {
        let points: Vec<Coordinate> = (0..30)
            .map(|i| Coordinate::new((i % 6) as f64, (i / 6) as f64))
            .collect();
        let a = ClusterAssigner::default().assign(&points, 4);
        let b = ClusterAssigner::default().assign(&points, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_points() {
        let points = vec![Coordinate::new(1.0, 1.0); 5];
        let clusters = ClusterAssigner::default().assign(&points, 3);
        assert_eq!(clusters.len(), 3);
        // identical points all fall to the lowest centroid
        assert_eq!(clusters.members(0), &[0, 1, 2, 3, 4]);
        assert!(clusters.members(1).is_empty());
        assert!(clusters.members(2).is_empty());
    }

    #[test]
    fn test_weighted_pick_skips_existing_centroids() {
        let weights = [0.0, 2.0, 0.0, 3.0, 0.0];
        assert_eq!(weighted_pick(&weights, 0.0), 1);
        assert_eq!(weighted_pick(&weights, 1.9), 1);
        assert_eq!(weighted_pick(&weights, 2.5), 3);
        // leftover past the total must not land on the trailing zero weight
        assert_eq!(weighted_pick(&weights, 5.0 + 1e-9), 3);
    }

    #[test]
    fn test_seeding_yields_distinct_centroids() {
        let mut points = vec![Coordinate::new(0.0, 0.0); 4];
        points.extend([Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)]);
        points.extend(vec![Coordinate::new(0.0, 0.0); 3]);
        let centroids = ClusterAssigner::default().seed_centroids(&points, 3);
        for (i, a) in centroids.iter().enumerate() {
            for b in &centroids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_labels() {
        let clusters = Clusters::from_groups(vec![vec![2, 0], vec![1]]);
        assert_eq!(clusters.members(0), &[0, 2]);
        assert_eq!(clusters.labels(), vec![0, 1, 0]);
    }

    #[test]
    fn test_iteration_cap_still_partitions() {
        let assigner = ClusterAssigner::new(ClusterConfig::default().with_max_iterations(1));
        let clusters = assigner.assign(&two_blobs(), 2);
        assert_eq!(clusters.iter().map(|(_, g)| g.len()).sum::<usize>(), 6);
    }
}
