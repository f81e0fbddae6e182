//! Route and solution cost.

use super::DistanceMatrix;
use crate::models::{Instance, Solution};

/// Sums distances over consecutive pairs of a node path.
///
/// Returns 0 for paths with fewer than two nodes.
///
/// # Examples
///
/// ```
/// use u_backhaul::distance::{route_cost, DistanceMatrix};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 2.0, 3.0],
///     vec![2.0, 0.0, 4.0],
///     vec![3.0, 4.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(route_cost(&dm, [0, 1, 2, 0]), 9.0);
/// assert_eq!(route_cost(&dm, [1]), 0.0);
/// ```
pub fn route_cost(distances: &DistanceMatrix, path: impl IntoIterator<Item = usize>) -> f64 {
    let mut path = path.into_iter();
    let Some(mut prev) = path.next() else {
        return 0.0;
    };
    let mut cost = 0.0;
    for node in path {
        cost += distances.get(prev, node);
        prev = node;
    }
    cost
}

/// Re-costs every route from its node sequence and stores the sum as the
/// solution total.
///
/// Moves re-cost only the routes they touch; this full pass is for
/// construction and verification.
pub fn solution_cost(solution: &mut Solution, instance: &Instance) -> f64 {
    for route in solution.routes_mut() {
        route.recompute_cost(instance);
    }
    solution.resum_cost()
}
