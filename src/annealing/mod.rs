//! Simulated annealing controller and best-solution tracking.
//!
//! - [`SaConfig`]: cooling schedule, neighborhood weights and move limits
//! - [`SaRunner`]: the annealing loop
//! - [`SaResult`]: best solution found plus run statistics

mod config;
mod runner;

pub use config::{SaConfig, SaConfigError};
pub use runner::SaRunner;

use crate::models::Solution;

/// Outcome of an annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// Cheapest solution seen.
    pub best: Solution,
    pub best_cost: f64,
    /// Cost of the solution the run started from.
    pub initial_cost: f64,
    /// Temperature steps performed.
    pub iterations: usize,
    pub final_temperature: f64,
    /// Candidates that replaced the current solution.
    pub accepted: usize,
    /// Times the best solution was replaced.
    pub improved: usize,
    /// Candidates abandoned because a move found nothing feasible.
    pub failed_neighbors: usize,
    /// Candidates that reached the acceptance test.
    pub evaluated: usize,
}
