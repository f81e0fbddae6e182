//! Move kinds and the weighted neighborhood that selects among them.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{relocate, swap};
use crate::models::{Instance, Solution};

/// Limits shared by every move.
///
/// # Examples
///
/// ```
/// use u_backhaul::local_search::MoveConfig;
///
/// let config = MoveConfig::default().with_max_attempts(50);
/// assert_eq!(config.max_attempts, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoveConfig {
    /// Random draws a move may make before reporting failure.
    pub max_attempts: usize,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self { max_attempts: 1000 }
    }
}

impl MoveConfig {
    /// Sets the maximum number of draws per move.
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }
}

/// A neighborhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Exchange two same-kind customers across two routes.
    Swap,
    /// Move one customer to another route.
    Relocate,
}

impl MoveKind {
    /// Applies this move to `solution`, returning `false` if no feasible
    /// move was found. A failed move leaves the solution untouched.
    pub fn apply<R: Rng>(
        self,
        solution: &mut Solution,
        instance: &Instance,
        config: &MoveConfig,
        rng: &mut R,
    ) -> bool {
        match self {
            Self::Swap => swap(solution, instance, config, rng),
            Self::Relocate => relocate(solution, instance, config, rng),
        }
    }
}

/// Relative weights of the move kinds used to build candidate solutions.
///
/// # Examples
///
/// ```
/// use u_backhaul::local_search::{MoveKind, Neighborhood};
///
/// let n = Neighborhood::default();
/// assert_eq!(n.weights(), vec![(MoveKind::Swap, 1.0), (MoveKind::Relocate, 0.0)]);
/// assert!(n.sampler().is_some());
///
/// assert!(Neighborhood::with_weights(0.0, 0.0).sampler().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Neighborhood {
    /// Weight of [`MoveKind::Swap`].
    pub swap: f64,
    /// Weight of [`MoveKind::Relocate`].
    pub relocate: f64,
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self::swap_only()
    }
}

impl Neighborhood {
    /// Only swap moves.
    pub fn swap_only() -> Self {
        Self::with_weights(1.0, 0.0)
    }

    /// Only relocate moves.
    pub fn relocate_only() -> Self {
        Self::with_weights(0.0, 1.0)
    }

    pub fn with_weights(swap: f64, relocate: f64) -> Self {
        Self { swap, relocate }
    }

    /// Move kinds paired with their weights.
    pub fn weights(&self) -> Vec<(MoveKind, f64)> {
        vec![(MoveKind::Swap, self.swap), (MoveKind::Relocate, self.relocate)]
    }

    /// Returns `true` if weights are finite, non-negative, and not all zero.
    pub fn is_valid(&self) -> bool {
        let weights = self.weights();
        weights.iter().all(|(_, w)| w.is_finite() && *w >= 0.0)
            && weights.iter().any(|(_, w)| *w > 0.0)
    }

    /// Builds a sampler, or `None` if the weights are invalid.
    pub fn sampler(&self) -> Option<MoveSampler> {
        if !self.is_valid() {
            return None;
        }
        let (kinds, weights): (Vec<MoveKind>, Vec<f64>) = self.weights().into_iter().unzip();
        let index = WeightedIndex::new(weights).ok()?;
        Some(MoveSampler { kinds, index })
    }
}

/// Draws move kinds according to a [`Neighborhood`]'s weights.
#[derive(Debug, Clone)]
pub struct MoveSampler {
    kinds: Vec<MoveKind>,
    index: WeightedIndex<f64>,
}

impl MoveSampler {
    /// Draws a move kind.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> MoveKind {
        self.kinds[self.index.sample(rng)]
    }

    /// Draws a move kind and applies it.
    pub fn apply<R: Rng>(
        &self,
        solution: &mut Solution,
        instance: &Instance,
        config: &MoveConfig,
        rng: &mut R,
    ) -> bool {
        self.choose(rng).apply(solution, instance, config, rng)
    }
}

/// Draws two distinct route indices out of `n >= 2`.
pub(crate) fn distinct_routes<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    debug_assert!(n >= 2);
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_distinct_routes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for n in 2..6 {
            for _ in 0..200 {
                let (a, b) = distinct_routes(n, &mut rng);
                assert_ne!(a, b);
                assert!(a < n && b < n);
            }
        }
    }

    #[test]
    fn test_sampler_respects_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let only_relocate = Neighborhood::relocate_only().sampler().expect("valid");
        for _ in 0..100 {
            assert_eq!(only_relocate.choose(&mut rng), MoveKind::Relocate);
        }
        let only_swap = Neighborhood::swap_only().sampler().expect("valid");
        for _ in 0..100 {
            assert_eq!(only_swap.choose(&mut rng), MoveKind::Swap);
        }
    }

    #[test]
    fn test_sampler_mixes() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let sampler = Neighborhood::with_weights(1.0, 1.0).sampler().expect("valid");
        let swaps = (0..1000)
            .filter(|_| sampler.choose(&mut rng) == MoveKind::Swap)
            .count();
        assert!(swaps > 300 && swaps < 700);
    }

    #[test]
    fn test_invalid_weights() {
        assert!(!Neighborhood::with_weights(-1.0, 2.0).is_valid());
        assert!(!Neighborhood::with_weights(f64::NAN, 1.0).is_valid());
        assert!(!Neighborhood::with_weights(0.0, 0.0).is_valid());
        assert!(Neighborhood::with_weights(0.0, 0.5).is_valid());
    }

    #[test]
    fn test_move_config_default() {
        assert_eq!(MoveConfig::default().max_attempts, 1000);
    }
}
