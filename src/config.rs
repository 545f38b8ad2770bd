//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default local-search budget, in milliseconds.
pub const DEFAULT_TIME_LIMIT_MS: u64 = 15_000;

/// Default k-means seed.
pub const DEFAULT_CLUSTER_SEED: u64 = 0;

/// Default cap on Lloyd iterations.
pub const DEFAULT_CLUSTER_ITERATIONS: usize = 300;

/// Parameters of the capacitated router.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_routing::SolverConfig;
///
/// let config = SolverConfig::default().with_time_limit(Duration::from_secs(2));
/// assert_eq!(config.time_limit(), Duration::from_secs(2));
/// assert!(!config.return_to_depot());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    time_limit_ms: u64,
    return_to_depot: bool,
}

impl SolverConfig {
    /// Sets the wall-clock budget for local search.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = limit.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    /// Sets the budget in whole seconds.
    pub fn with_time_limit_secs(self, secs: u64) -> Self {
        self.with_time_limit(Duration::from_secs(secs))
    }

    /// Includes the closing leg back to the depot in route distances.
    pub fn with_return_to_depot(mut self, enabled: bool) -> Self {
        self.return_to_depot = enabled;
        self
    }

    /// Local-search budget.
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    /// Whether route distances count the return leg.
    pub fn return_to_depot(&self) -> bool {
        self.return_to_depot
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            return_to_depot: false,
        }
    }
}

/// Parameters of the k-means cluster assigner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    seed: u64,
    max_iterations: usize,
}

impl ClusterConfig {
    /// Sets the seed used for centroid initialization.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the Lloyd iteration cap (at least 1).
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max.max(1);
        self
    }

    /// Initialization seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_CLUSTER_SEED,
            max_iterations: DEFAULT_CLUSTER_ITERATIONS,
        }
    }
}
