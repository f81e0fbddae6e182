//! Geometry and cost oracle.
//!
//! Provides a dense Euclidean distance matrix plus route and solution
//! cost computation.

mod cost;
mod matrix;

pub use cost::{route_cost, solution_cost};
pub use matrix::DistanceMatrix;
