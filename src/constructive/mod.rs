//! Constructive heuristics for building initial routes.
//!
//! - [`nearest_neighbor_order`] — Greedy nearest-neighbor walk over one stop set, O(n²)
//! - [`path_cheapest_arc`] — Capacity-aware cheapest-append across a fleet, O(V·n²)
//! - [`first_fit_decreasing`] — Capacity-first packing fallback, O(n² + n·V)

mod cheapest_arc;
mod first_fit;
mod nearest_neighbor;

pub use cheapest_arc::{path_cheapest_arc, Construction};
pub use first_fit::first_fit_decreasing;
pub use nearest_neighbor::{nearest_neighbor_order, RouteConstructor};
