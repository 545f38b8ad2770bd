//! # fleet-routing
//!
//! Capacitated vehicle routing engine for single-depot delivery fleets.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Coordinate, Vehicle, Order, Route, Solution, Scenario)
//! - [`distance`] — Haversine distance and integer-meter distance matrix
//! - [`evaluation`] — Route distance, load, and solution validation
//! - [`clustering`] — Lloyd's k-means over order locations
//! - [`constructive`] — Nearest-neighbor walk and path-cheapest-arc construction
//! - [`local_search`] — Relocate and exchange improvement under a deadline
//! - [`solver`] — Capacitated router and hybrid cluster optimizer
//!
//! ## Entry points
//!
//! ```
//! use fleet_routing::models::{Coordinate, Order, Vehicle};
//!
//! let depot = Coordinate::new(0.0, 0.0);
//! let vehicles = vec![Vehicle::new("v1", depot, 5)];
//! let orders = vec![
//!     Order::new("o1", Coordinate::new(0.0, 1.0), 1),
//!     Order::new("o2", Coordinate::new(0.0, 2.0), 1),
//! ];
//!
//! let solution = fleet_routing::solve_capacitated(depot, &vehicles, &orders, 1).unwrap();
//! assert!(solution.feasible());
//! assert_eq!(solution.routes()[0].nodes(), &[0, 1, 2]);
//! ```

pub mod clustering;
pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod solver;

pub use config::{ClusterConfig, SolverConfig};
pub use distance::{build_distance_matrix, distance_km, DistanceMatrix};
pub use error::{RoutingError, RoutingResult};
pub use solver::{optimize_hybrid, solve_capacitated, CapacitatedRouter, HybridOptimizer};
