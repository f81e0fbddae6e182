//! End-to-end solving: construction, coverage policy, annealing.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::annealing::{SaResult, SaRunner};
use crate::config::{CoveragePolicy, RunConfig};
use crate::constructive::round_robin;
use crate::error::{Result, SolveError};
use crate::models::{Instance, Solution};

/// Seed used when the configuration does not name one.
pub const DEFAULT_SEED: u64 = 0;

/// Outcome of [`solve`].
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Seed the run's random stream was built from.
    pub seed: u64,
    pub annealing: SaResult,
}

impl SolveReport {
    /// Best solution found.
    pub fn solution(&self) -> &Solution {
        &self.annealing.best
    }

    /// Cost of the constructed solution before annealing.
    pub fn initial_cost(&self) -> f64 {
        self.annealing.initial_cost
    }
}

/// Builds an initial solution and improves it by simulated annealing.
///
/// One [`ChaCha8Rng`] seeded from `config.seed` (or [`DEFAULT_SEED`]) drives
/// the whole run, so equal configurations give equal results.
///
/// # Examples
///
/// ```
/// use u_backhaul::config::RunConfig;
/// use u_backhaul::annealing::SaConfig;
/// use u_backhaul::models::{Fleet, Instance, Node};
/// use u_backhaul::solver::solve;
///
/// let inst = Instance::new(
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::linehaul(1, 2.0, 0.0, 4),
///         Node::linehaul(2, -2.0, 0.0, 4),
///         Node::backhaul(3, 2.0, 1.0, 4),
///         Node::backhaul(4, -2.0, 1.0, 4),
///     ],
///     Fleet::new(2, 8),
/// )
/// .unwrap();
///
/// let config = RunConfig::new()
///     .with_seed(5)
///     .with_annealing(SaConfig::default().with_max_iterations(5));
/// let report = solve(&inst, &config).unwrap();
/// assert_eq!(report.seed, 5);
/// assert_eq!(report.solution().num_served(), 4);
/// assert!(report.solution().total_cost() <= report.initial_cost());
/// ```
pub fn solve(instance: &Instance, config: &RunConfig) -> Result<SolveReport> {
    let sa_config = config.annealing_config();
    sa_config.validate()?;

    let seed = config.seed.unwrap_or(DEFAULT_SEED);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let initial = round_robin(instance, &mut rng);
    info!(
        cost = initial.total_cost(),
        served = initial.num_served(),
        routes = initial.num_used_routes(),
        "initial solution built"
    );
    apply_coverage_policy(&initial, instance, config.coverage)?;

    let annealing = SaRunner::run(initial, instance, &sa_config, &mut rng)?;
    Ok(SolveReport { seed, annealing })
}

fn apply_coverage_policy(
    solution: &Solution,
    instance: &Instance,
    policy: CoveragePolicy,
) -> Result<()> {
    if solution.num_unassigned() == 0 {
        return Ok(());
    }

    let ids: Vec<i64> = solution
        .unassigned()
        .iter()
        .map(|&idx| instance.node(idx).id())
        .collect();
    let count = ids.len();

    match policy {
        CoveragePolicy::Fail => return Err(SolveError::Unplaced { count, ids }),
        CoveragePolicy::Warn => {
            warn!(count, ?ids, "customers could not be placed and are left out")
        }
        CoveragePolicy::Exclude => debug!(count, ?ids, "excluding unplaced customers"),
    }
    Ok(())
}
