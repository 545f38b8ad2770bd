//! Route distance, load, and solution validation.

mod evaluator;

pub use evaluator::{RouteEvaluator, Violation};
