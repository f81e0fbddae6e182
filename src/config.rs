//! Run configuration.
//!
//! A run is described by a TOML document; every key is optional:
//!
//! ```toml
//! seed = 42
//! coverage = "warn"        # fail | warn | exclude
//!
//! [annealing]
//! initial_temperature = 50000.0
//! cooling_rate = 0.98
//! min_temperature = 10.0
//! iterations_per_temperature = 500
//! max_iterations = 500
//! moves_per_neighbor = 5
//!
//! [neighborhood]
//! swap = 1.0
//! relocate = 0.0
//!
//! [moves]
//! max_attempts = 1000
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::annealing::{SaConfig, SaConfigError};
use crate::local_search::{MoveConfig, Neighborhood};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] SaConfigError),
}

/// What a run does when the constructive builder leaves customers unplaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// Abort the run.
    Fail,
    /// Log a warning and continue with the placed customers.
    #[default]
    Warn,
    /// Continue silently with the placed customers.
    Exclude,
}

impl fmt::Display for CoveragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fail => "fail",
            Self::Warn => "warn",
            Self::Exclude => "exclude",
        };
        f.write_str(name)
    }
}

impl FromStr for CoveragePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "warn" => Ok(Self::Warn),
            "exclude" => Ok(Self::Exclude),
            other => Err(format!(
                "unknown coverage policy '{other}', expected fail, warn or exclude"
            )),
        }
    }
}

/// Full configuration of one solver run.
///
/// # Examples
///
/// ```
/// use u_backhaul::config::{CoveragePolicy, RunConfig};
///
/// let config = RunConfig::from_toml_str(
///     r#"
///     seed = 7
///     coverage = "exclude"
///
///     [annealing]
///     max_iterations = 10
///
///     [neighborhood]
///     swap = 0.5
///     relocate = 0.5
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.coverage, CoveragePolicy::Exclude);
///
/// let sa = config.annealing_config();
/// assert_eq!(sa.max_iterations, 10);
/// assert_eq!(sa.cooling_rate, 0.98);
/// assert_eq!(sa.neighborhood.relocate, 0.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Seed for the run's random stream. `None` leaves the choice to the caller.
    pub seed: Option<u64>,

    pub coverage: CoveragePolicy,

    pub annealing: SaConfig,

    pub neighborhood: Neighborhood,

    pub moves: MoveConfig,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_coverage(mut self, coverage: CoveragePolicy) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_annealing(mut self, annealing: SaConfig) -> Self {
        self.annealing = annealing;
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

    /// Annealing parameters with the neighborhood and move limits merged in.
    pub fn annealing_config(&self) -> SaConfig {
        self.annealing
            .clone()
            .with_neighborhood(self.neighborhood)
            .with_moves(self.moves)
    }

    pub fn validate(&self) -> Result<(), SaConfigError> {
        self.annealing_config().validate()
    }
}
