//! Error types for end-to-end solving.

use thiserror::Error;

use crate::annealing::SaConfigError;

/// Failure of a [`solve`](crate::solver::solve) run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("invalid annealing configuration: {0}")]
    Config(#[from] SaConfigError),

    /// The constructive builder could not place every customer and the
    /// coverage policy is [`CoveragePolicy::Fail`](crate::config::CoveragePolicy::Fail).
    #[error("{count} customer(s) could not be placed: {ids:?}")]
    Unplaced { count: usize, ids: Vec<i64> },
}

pub type Result<T> = std::result::Result<T, SolveError>;
