//! Simulated annealing parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::local_search::{MoveConfig, Neighborhood};

/// Rejected annealing parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaConfigError {
    #[error("cooling rate must lie in (0, 1), got {0}")]
    CoolingRate(f64),

    #[error("{name} must be finite and positive, got {value}")]
    Temperature { name: &'static str, value: f64 },

    #[error("neighborhood weights must be finite, non-negative and not all zero")]
    Neighborhood,

    #[error("moves per neighbor must be at least 1")]
    MovesPerNeighbor,
}

/// Configuration for [`SaRunner`](super::SaRunner).
///
/// The scalar parameters deserialize from the `[annealing]` table of a run
/// configuration. The neighborhood and move limits are filled in from
/// their own tables by [`RunConfig`](crate::config::RunConfig).
///
/// # Examples
///
/// ```
/// use u_backhaul::annealing::SaConfig;
/// use u_backhaul::local_search::Neighborhood;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(1000.0)
///     .with_cooling_rate(0.9)
///     .with_neighborhood(Neighborhood::with_weights(1.0, 1.0));
///
/// assert_eq!(config.max_iterations, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SaConfig {
    /// Starting temperature (T0).
    pub initial_temperature: f64,

    /// Geometric cooling factor applied after every temperature step.
    pub cooling_rate: f64,

    /// The run stops once the temperature is no longer above this value.
    pub min_temperature: f64,

    /// Candidate solutions generated at each temperature.
    pub iterations_per_temperature: usize,

    /// Maximum number of temperature steps.
    pub max_iterations: usize,

    /// Moves chained to build one candidate from the current solution.
    pub moves_per_neighbor: usize,

    #[serde(skip)]
    pub neighborhood: Neighborhood,

    #[serde(skip)]
    pub moves: MoveConfig,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 50_000.0,
            cooling_rate: 0.98,
            min_temperature: 10.0,
            iterations_per_temperature: 500,
            max_iterations: 500,
            moves_per_neighbor: 5,
            neighborhood: Neighborhood::default(),
            moves: MoveConfig::default(),
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, alpha: f64) -> Self {
        self.cooling_rate = alpha;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_moves_per_neighbor(mut self, n: usize) -> Self {
        self.moves_per_neighbor = n;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_moves(mut self, moves: MoveConfig) -> Self {
        self.moves = moves;
        self
    }

    /// Checks that the parameters describe a terminating schedule.
    pub fn validate(&self) -> Result<(), SaConfigError> {
        let temperatures = [
            ("initial temperature", self.initial_temperature),
            ("min temperature", self.min_temperature),
        ];
        for (name, value) in temperatures {
            if !value.is_finite() || value <= 0.0 {
                return Err(SaConfigError::Temperature { name, value });
            }
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(SaConfigError::CoolingRate(self.cooling_rate));
        }
        if !self.neighborhood.is_valid() {
            return Err(SaConfigError::Neighborhood);
        }
        if self.moves_per_neighbor == 0 {
            return Err(SaConfigError::MovesPerNeighbor);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SaConfig::default();
        assert_eq!(c.initial_temperature, 50_000.0);
        assert_eq!(c.cooling_rate, 0.98);
        assert_eq!(c.min_temperature, 10.0);
        assert_eq!(c.iterations_per_temperature, 500);
        assert_eq!(c.max_iterations, 500);
        assert_eq!(c.moves_per_neighbor, 5);
        assert_eq!(c.moves.max_attempts, 1000);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = SaConfig::default();
        assert_eq!(
            base.clone().with_cooling_rate(1.0).validate(),
            Err(SaConfigError::CoolingRate(1.0))
        );
        assert!(base.clone().with_cooling_rate(0.0).validate().is_err());
        assert!(base.clone().with_cooling_rate(f64::NAN).validate().is_err());
        assert!(matches!(
            base.clone().with_initial_temperature(-1.0).validate(),
            Err(SaConfigError::Temperature { .. })
        ));
        assert!(base.clone().with_min_temperature(f64::INFINITY).validate().is_err());
        assert_eq!(
            base.clone()
                .with_neighborhood(Neighborhood::with_weights(0.0, 0.0))
                .validate(),
            Err(SaConfigError::Neighborhood)
        );
        assert_eq!(
            base.with_moves_per_neighbor(0).validate(),
            Err(SaConfigError::MovesPerNeighbor)
        );
    }

    #[test]
    fn test_deserialize_partial_table() {
        let c: SaConfig = toml::from_str("cooling_rate = 0.5\nmax_iterations = 3").expect("valid");
        assert_eq!(c.cooling_rate, 0.5);
        assert_eq!(c.max_iterations, 3);
        assert_eq!(c.initial_temperature, 50_000.0);
    }

    #[test]
    fn test_deserialize_rejects_unknown_key() {
        assert!(toml::from_str::<SaConfig>("cooling_rat = 0.5").is_err());
        assert!(toml::from_str::<SaConfig>("seed = 7").is_err());
    }
}
