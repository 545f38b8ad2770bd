//! Domain model types for capacitated vehicle routing.
//!
//! Provides geographic coordinates, vehicles with capacities, delivery
//! orders with demands, routes as node-index sequences, solutions, and the
//! scenario bundle forwarded by a service layer.

mod coordinate;
mod order;
mod route;
mod scenario;
mod solution;
mod vehicle;

pub use coordinate::Coordinate;
pub use order::Order;
pub use route::Route;
pub use scenario::Scenario;
pub use solution::{SearchStats, Solution, SolverKind};
pub use vehicle::Vehicle;
