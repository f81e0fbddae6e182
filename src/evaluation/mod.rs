//! Feasibility and consistency checking for backhaul routing solutions.

mod evaluator;

pub use evaluator::{RouteEvaluator, COST_TOLERANCE};
