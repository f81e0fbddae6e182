//! Inter-route customer relocation.
//!
//! # Algorithm
//!
//! Draws distinct source and destination routes and a random customer of the
//! source. The move is validated against the current loads before anything
//! changes; only a feasible move is committed:
//!
//! - the destination's total load plus the moved demand stays within capacity;
//! - a backhaul only enters a destination that already carries a linehaul;
//! - the source keeps a linehaul if it still carries backhauls.
//!
//! Linehauls are inserted right after the depot head and backhauls right
//! before the trailing depot, so deliveries stay ahead of pickups.
//! Infeasible draws are retried up to [`MoveConfig::max_attempts`] times.

use rand::Rng;

use super::neighborhood::distinct_routes;
use super::MoveConfig;
use crate::models::{Instance, NodeKind, Route, Solution};

/// A validated relocation.
#[derive(Debug, Clone, Copy)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
}

/// Moves one random customer to another route.
///
/// Returns `false`, leaving the solution untouched, when fewer than two
/// routes exist or no feasible relocation is drawn within the attempt budget.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_backhaul::models::{Fleet, Instance, Node, Route, Solution};
/// use u_backhaul::local_search::{relocate, MoveConfig};
///
/// let inst = Instance::new(
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::linehaul(1, 1.0, 0.0, 5),
///         Node::linehaul(2, 0.0, 1.0, 5),
///     ],
///     Fleet::new(2, 10),
/// )
/// .unwrap();
/// let mut sol = Solution::new();
/// sol.add_route(Route::from_customers(vec![1, 2], &inst));
/// sol.add_route(Route::new());
/// sol.resum_cost();
///
/// let mut rng = ChaCha8Rng::seed_from_u64(3);
/// assert!(relocate(&mut sol, &inst, &MoveConfig::default(), &mut rng));
/// assert_eq!(sol.route(0).len(), 1);
/// assert_eq!(sol.route(1).len(), 1);
/// ```
pub fn relocate<R: Rng>(
    solution: &mut Solution,
    instance: &Instance,
    config: &MoveConfig,
    rng: &mut R,
) -> bool {
    let num_routes = solution.num_routes();
    if num_routes < 2 {
        return false;
    }

    for _ in 0..config.max_attempts {
        let (from, to) = distinct_routes(num_routes, rng);
        let source = solution.route(from);
        if source.is_empty() {
            continue;
        }
        let from_pos = rng.random_range(0..source.len());

        if let Some(mv) = validate(solution, instance, from, from_pos, to) {
            apply(solution, instance, mv);
            return true;
        }
    }

    false
}

/// Checks a relocation against the current routes without mutating them.
fn validate(
    solution: &Solution,
    instance: &Instance,
    from: usize,
    from_pos: usize,
    to: usize,
) -> Option<RelocateMove> {
    let source = solution.route(from);
    let dest = solution.route(to);
    let node = instance.node(source.customers()[from_pos]);

    if !instance.fleet().fits(dest.used(), node.demand()) {
        return None;
    }

    match node.kind() {
        NodeKind::Backhaul => {
            let (dest_linehauls, _) = dest.kind_counts(instance);
            if dest_linehauls == 0 {
                return None;
            }
        }
        NodeKind::Linehaul => {
            if leaves_backhaul_only(source, instance) {
                return None;
            }
        }
        NodeKind::Depot => return None,
    }

    Some(RelocateMove {
        from_route: from,
        from_pos,
        to_route: to,
        to_pos: dest.insertion_position(node.kind()),
    })
}

/// `true` if removing one linehaul would leave backhauls without deliveries.
fn leaves_backhaul_only(source: &Route, instance: &Instance) -> bool {
    let (linehauls, backhauls) = source.kind_counts(instance);
    linehauls == 1 && backhauls > 0
}

fn apply(solution: &mut Solution, instance: &Instance, mv: RelocateMove) {
    let (source, dest) = solution.route_pair_mut(mv.from_route, mv.to_route);

    let customer = source.customers()[mv.from_pos];
    let node = instance.node(customer);
    source.remove(mv.from_pos, node);
    dest.insert(mv.to_pos, customer, node);

    source.recompute_cost(instance);
    dest.recompute_cost(instance);

    solution.resum_cost();
}
