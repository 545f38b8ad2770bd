//! Input errors raised by the solve entry points.
//!
//! Every variant describes malformed input that is rejected before any
//! computation starts. Infeasibility and time-budget cutoffs are not errors;
//! they are reported through [`Solution`](crate::models::Solution) fields.

use thiserror::Error;

/// Convenience alias for results returned by this crate.
pub type RoutingResult<T> = Result<T, RoutingError>;

/// An invalid-input condition detected while validating a solve request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// The vehicle list is empty.
    #[error("invalid input: at least one vehicle required")]
    NoVehicles,
    /// The order list is empty.
    #[error("invalid input: at least one order required")]
    NoOrders,
    /// A coordinate is non-finite or outside [-90, 90] × [-180, 180].
    #[error("invalid input: {input} has malformed coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Which input carried the coordinate (`"depot"`, `"order o1"`, ...).
        input: String,
        /// Supplied latitude.
        latitude: f64,
        /// Supplied longitude.
        longitude: f64,
    },
    /// Two vehicles or two orders share an id.
    #[error("invalid input: duplicate {kind} id '{id}'")]
    DuplicateId {
        /// `"vehicle"` or `"order"`.
        kind: &'static str,
        /// The repeated id.
        id: String,
    },
    /// An order with zero demand.
    #[error("invalid input: order '{order_id}' has zero demand")]
    ZeroDemand {
        /// Offending order id.
        order_id: String,
    },
    /// A caller-supplied distance matrix does not cover depot + orders.
    #[error("invalid input: distance matrix is {actual}x{actual}, expected {expected}x{expected}")]
    MatrixSizeMismatch {
        /// Required side length (orders + 1).
        expected: usize,
        /// Side length supplied.
        actual: usize,
    },
}

impl RoutingError {
    /// All variants are input rejections.
    pub fn is_invalid_input(&self) -> bool {
        true
    }
}
