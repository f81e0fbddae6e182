//! Simulated annealing over swap and relocate moves.
//!
//! # Algorithm
//!
//! Starting at `T0`, each temperature step builds
//! [`SaConfig::iterations_per_temperature`] candidates. A candidate is a copy
//! of the current solution with [`SaConfig::moves_per_neighbor`] moves chained
//! on it, each move kind drawn from the neighborhood weights. A candidate is
//! abandoned as soon as one of its moves fails. Otherwise it replaces the
//! current solution if it is cheaper, or with Metropolis probability
//! `exp(-delta / T)`. After every acceptance the best solution is replaced
//! if the current one is strictly cheaper.
//!
//! The temperature cools geometrically until it reaches the minimum or the
//! step budget runs out.
//!
//! # Complexity
//!
//! O(S × I × k × (n + a)) where S = temperature steps, I = iterations per
//! temperature, k = moves per neighbor, n = customers (candidate copy) and
//! a = attempts spent by a move.

use rand::Rng;
use tracing::{debug, info};

use super::config::SaConfigError;
use super::{SaConfig, SaResult};
use crate::models::{Instance, Solution};

/// Simulated annealing driver.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_backhaul::annealing::{SaConfig, SaRunner};
/// use u_backhaul::constructive::round_robin;
/// use u_backhaul::models::{Fleet, Instance, Node};
///
/// let inst = Instance::new(
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::linehaul(1, 5.0, 0.0, 3),
///         Node::linehaul(2, -5.0, 0.0, 3),
///         Node::linehaul(3, 5.0, 1.0, 3),
///         Node::linehaul(4, -5.0, 1.0, 3),
///     ],
///     Fleet::new(2, 6),
/// )
/// .unwrap();
///
/// let mut rng = ChaCha8Rng::seed_from_u64(17);
/// let initial = round_robin(&inst, &mut rng);
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_max_iterations(20)
///     .with_iterations_per_temperature(50)
///     .with_moves_per_neighbor(1);
///
/// let result = SaRunner::run(initial, &inst, &config, &mut rng).unwrap();
/// assert!(result.best_cost <= result.initial_cost);
/// assert_eq!(result.iterations, 20);
/// ```
pub struct SaRunner;

impl SaRunner {
    /// Runs simulated annealing from `initial`.
    pub fn run<R: Rng>(
        initial: Solution,
        instance: &Instance,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult, SaConfigError> {
        Self::run_with_observer(initial, instance, config, rng, |_, _| {})
    }

    /// Runs simulated annealing, calling `on_best(step, cost)` every time the
    /// best solution is replaced.
    pub fn run_with_observer<R, F>(
        initial: Solution,
        instance: &Instance,
        config: &SaConfig,
        rng: &mut R,
        mut on_best: F,
    ) -> Result<SaResult, SaConfigError>
    where
        R: Rng,
        F: FnMut(usize, f64),
    {
        config.validate()?;
        let sampler = config
            .neighborhood
            .sampler()
            .ok_or(SaConfigError::Neighborhood)?;

        let initial_cost = initial.total_cost();
        let mut current = initial.clone();
        let mut best = initial;
        let mut temperature = config.initial_temperature;
        let mut step = 0;

        let mut accepted = 0;
        let mut improved = 0;
        let mut failed_neighbors = 0;
        let mut evaluated = 0;

        while step < config.max_iterations && temperature > config.min_temperature {
            let mut step_accepted = 0;

            for _ in 0..config.iterations_per_temperature {
                let mut candidate = current.clone();
                let built = (0..config.moves_per_neighbor)
                    .all(|_| sampler.apply(&mut candidate, instance, &config.moves, rng));
                if !built {
                    failed_neighbors += 1;
                    continue;
                }
                evaluated += 1;

                let delta = candidate.total_cost() - current.total_cost();
                if !accept(delta, temperature, rng) {
                    continue;
                }
                current = candidate;
                accepted += 1;
                step_accepted += 1;

                if current.total_cost() < best.total_cost() {
                    best = current.clone();
                    improved += 1;
                    on_best(step, best.total_cost());
                }
            }

            debug!(
                step,
                temperature,
                current = current.total_cost(),
                best = best.total_cost(),
                accepted = step_accepted,
                "temperature step"
            );

            temperature *= config.cooling_rate;
            step += 1;
        }

        info!(
            initial_cost,
            best_cost = best.total_cost(),
            steps = step,
            accepted,
            improved,
            failed_neighbors,
            "simulated annealing finished"
        );

        Ok(SaResult {
            best_cost: best.total_cost(),
            best,
            initial_cost,
            iterations: step,
            final_temperature: temperature,
            accepted,
            improved,
            failed_neighbors,
            evaluated,
        })
    }
}

/// Metropolis acceptance: improvements always, otherwise with
/// probability `exp(-delta / T)`.
fn accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta < 0.0 {
        return true;
    }
    rng.random::<f64>() < (-delta / temperature).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::round_robin;
    use crate::evaluation::RouteEvaluator;
    use crate::local_search::Neighborhood;
    use crate::models::{Fleet, Node};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn instance() -> Instance {
        let mut nodes = vec![Node::depot(0, 50.0, 50.0)];
        for i in 0..8 {
            let angle = i as f64 * std::f64::consts::PI / 4.0;
            nodes.push(Node::linehaul(
                i + 1,
                50.0 + 30.0 * angle.cos(),
                50.0 + 30.0 * angle.sin(),
                3 + (i as i32 % 3),
            ));
        }
        for i in 0..6 {
            let angle = i as f64 * std::f64::consts::PI / 3.0 + 0.3;
            nodes.push(Node::backhaul(
                i + 9,
                50.0 + 20.0 * angle.cos(),
                50.0 + 20.0 * angle.sin(),
                2 + (i as i32 % 4),
            ));
        }
        Instance::new(nodes, Fleet::new(3, 15)).expect("valid")
    }

    fn quick_config() -> SaConfig {
        SaConfig::default()
            .with_initial_temperature(200.0)
            .with_cooling_rate(0.9)
            .with_min_temperature(1.0)
            .with_max_iterations(30)
            .with_iterations_per_temperature(40)
            .with_moves_per_neighbor(2)
            .with_neighborhood(Neighborhood::with_weights(1.0, 1.0))
    }

    #[test]
    fn test_zero_iterations_returns_initial() {
        let inst = instance();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let initial = round_robin(&inst, &mut rng);
        let config = quick_config().with_max_iterations(0);

        let result = SaRunner::run(initial.clone(), &inst, &config, &mut rng).expect("valid");
        assert_eq!(result.best, initial);
        assert_eq!(result.best_cost, initial.total_cost());
        assert_eq!(result.iterations, 0);
        assert_eq!(result.evaluated, 0);
        assert_eq!(result.final_temperature, 200.0);
    }

    #[test]
    fn test_best_is_monotone_and_valid() {
        let inst = instance();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let initial = round_robin(&inst, &mut rng);
        let initial_cost = initial.total_cost();

        let mut history = Vec::new();
        let result = SaRunner::run_with_observer(initial, &inst, &quick_config(), &mut rng, |_, c| {
            history.push(c)
        })
        .expect("valid");

        assert!(history.windows(2).all(|w| w[1] < w[0]));
        assert!(history.iter().all(|&c| c < initial_cost));
        assert_eq!(history.len(), result.improved);
        assert!(result.best_cost <= initial_cost);
        if let Some(&last) = history.last() {
            assert_eq!(last, result.best_cost);
        }

        let eval = RouteEvaluator::new(&inst);
        assert!(
            eval.is_valid(&result.best),
            "{:?}",
            eval.evaluate_solution(&result.best)
        );
        assert_eq!(result.best.num_served(), inst.num_customers());
    }

    #[test]
    fn test_schedule_stops_at_min_temperature() {
        let inst = instance();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let initial = round_robin(&inst, &mut rng);
        // 100 * 0.5^k > 10 holds for k = 0..=3.
        let config = quick_config()
            .with_initial_temperature(100.0)
            .with_cooling_rate(0.5)
            .with_min_temperature(10.0)
            .with_max_iterations(100);

        let result = SaRunner::run(initial, &inst, &config, &mut rng).expect("valid");
        assert_eq!(result.iterations, 4);
        assert!((result.final_temperature - 6.25).abs() < 1e-9);
    }

    #[test]
    fn test_counters_add_up() {
        let inst = instance();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let initial = round_robin(&inst, &mut rng);
        let config = quick_config();
        let result = SaRunner::run(initial, &inst, &config, &mut rng).expect("valid");

        let candidates = result.iterations * config.iterations_per_temperature;
        assert_eq!(result.evaluated + result.failed_neighbors, candidates);
        assert!(result.accepted <= result.evaluated);
        assert!(result.improved <= result.accepted);
    }

    #[test]
    fn test_single_route_never_moves() {
        let inst = Instance::new(
            vec![
                Node::depot(0, 0.0, 0.0),
                Node::linehaul(1, 1.0, 0.0, 1),
                Node::linehaul(2, 0.0, 1.0, 1),
            ],
            Fleet::new(1, 10),
        )
        .expect("valid");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let initial = round_robin(&inst, &mut rng);
        let result =
            SaRunner::run(initial.clone(), &inst, &quick_config(), &mut rng).expect("valid");
        assert_eq!(result.best, initial);
        assert_eq!(result.evaluated, 0);
        assert_eq!(result.accepted, 0);
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let inst = instance();
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let initial = round_robin(&inst, &mut rng);
            SaRunner::run(initial, &inst, &quick_config(), &mut rng).expect("valid")
        };
        let (a, b) = (run(9), run(9));
        assert_eq!(a.best, b.best);
        assert_eq!(a.accepted, b.accepted);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let inst = instance();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let initial = round_robin(&inst, &mut rng);
        let config = quick_config().with_cooling_rate(1.5);
        assert!(SaRunner::run(initial, &inst, &config, &mut rng).is_err());
    }

    #[test]
    fn test_accept() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(accept(-1.0, 1e-12, &mut rng));
        assert!(!accept(1e6, 1.0, &mut rng));
        let hits = (0..2000).filter(|_| accept(1.0, 1.0, &mut rng)).count();
        // exp(-1) ≈ 0.368
        assert!(hits > 600 && hits < 870);
    }
}
