//! Wall-clock budget for local search.

use std::time::{Duration, Instant};

/// A monotonic deadline started at construction.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_routing::local_search::Deadline;
///
/// let deadline = Deadline::start(Duration::from_secs(60));
/// assert!(!deadline.expired());
/// assert!(Deadline::start(Duration::ZERO).expired());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    /// Starts a deadline `budget` from now.
    pub fn start(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    /// A deadline that never expires.
    pub fn unbounded() -> Self {
        Self::start(Duration::MAX)
    }

    /// Returns `true` once the budget is spent.
    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.budget
    }

    /// Time since the deadline was started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Configured budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }
}
