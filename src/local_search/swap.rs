//! Inter-route swap of same-kind customers.
//!
//! # Algorithm
//!
//! Draws a focus kind (linehaul or backhaul) and two distinct routes. Within
//! each route only positions holding a customer of the focus kind are
//! candidates. Candidates are shuffled, and the first pair whose exchange
//! keeps both routes' delivered and picked loads within capacity is applied.
//! Draws without candidates or without a feasible pair are retried up to
//! [`MoveConfig::max_attempts`] times.
//!
//! Exchanging same-kind customers keeps each route's kind layout, so the
//! precedence rule is preserved without any check.

use rand::seq::SliceRandom;
use rand::Rng;

use super::neighborhood::distinct_routes;
use super::MoveConfig;
use crate::models::{Instance, NodeKind, Route, Solution};

/// A feasible exchange: positions in both routes and their new loads.
#[derive(Debug, Clone, Copy)]
struct SwapMove {
    first_pos: usize,
    second_pos: usize,
    first_loads: (i64, i64),
    second_loads: (i64, i64),
}

/// Applies one random capacity-feasible swap.
///
/// Returns `false`, leaving the solution untouched, when fewer than two
/// routes exist or no feasible pair is found within the attempt budget.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_backhaul::models::{Fleet, Instance, Node, Route, Solution};
/// use u_backhaul::local_search::{swap, MoveConfig};
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
/// sol.add_route(Route::from_customers(vec![1], &inst));
/// sol.add_route(Route::from_customers(vec![2], &inst));
/// sol.resum_cost();
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// assert!(swap(&mut sol, &inst, &MoveConfig::default(), &mut rng));
/// assert_eq!(sol.route(0).customers(), &[2]);
/// assert_eq!(sol.route(1).customers(), &[1]);
/// ```
pub fn swap<R: Rng>(
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
        let kind = if rng.random_bool(0.5) {
            NodeKind::Linehaul
        } else {
            NodeKind::Backhaul
        };
        let (r1, r2) = distinct_routes(num_routes, rng);

        let mut first = solution.route(r1).positions_of_kind(kind, instance);
        let mut second = solution.route(r2).positions_of_kind(kind, instance);
        if first.is_empty() || second.is_empty() {
            continue;
        }
        first.shuffle(rng);
        second.shuffle(rng);

        let found = find_feasible(
            solution.route(r1),
            solution.route(r2),
            &first,
            &second,
            kind,
            instance,
        );
        if let Some(mv) = found {
            apply(solution, instance, r1, r2, mv);
            return true;
        }
    }

    false
}

/// First candidate pair, in the given order, that keeps both routes within
/// capacity after the exchange.
fn find_feasible(
    route1: &Route,
    route2: &Route,
    first: &[usize],
    second: &[usize],
    kind: NodeKind,
    instance: &Instance,
) -> Option<SwapMove> {
    let capacity = i64::from(instance.capacity());

    for &i in first {
        let d1 = i64::from(instance.node(route1.customers()[i]).demand());
        for &j in second {
            let d2 = i64::from(instance.node(route2.customers()[j]).demand());

            let (mut del1, mut pick1) = (route1.delivered(), route1.picked());
            let (mut del2, mut pick2) = (route2.delivered(), route2.picked());
            match kind {
                NodeKind::Linehaul => {
                    del1 = del1 - d1 + d2;
                    del2 = del2 - d2 + d1;
                }
                _ => {
                    pick1 = pick1 - d1 + d2;
                    pick2 = pick2 - d2 + d1;
                }
            }

            if del1 <= capacity && del2 <= capacity && pick1 <= capacity && pick2 <= capacity {
                return Some(SwapMove {
                    first_pos: i,
                    second_pos: j,
                    first_loads: (del1, pick1),
                    second_loads: (del2, pick2),
                });
            }
        }
    }

    None
}

fn apply(solution: &mut Solution, instance: &Instance, r1: usize, r2: usize, mv: SwapMove) {
    let (route1, route2) = solution.route_pair_mut(r1, r2);

    let moved = route1.customers()[mv.first_pos];
    let other = route2.replace(mv.second_pos, moved);
    route1.replace(mv.first_pos, other);

    route1.set_loads(mv.first_loads.0, mv.first_loads.1);
    route2.set_loads(mv.second_loads.0, mv.second_loads.1);
    route1.recompute_cost(instance);
    route2.recompute_cost(instance);

    solution.resum_cost();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{Fleet, Node};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn instance(capacity: i32) -> Instance {
        Instance::new(
            vec![
                Node::depot(0, 0.0, 0.0),
                Node::linehaul(1, 10.0, 0.0, 4),
                Node::linehaul(2, 0.0, 10.0, 8),
                Node::linehaul(3, -10.0, 0.0, 3),
                Node::backhaul(4, 10.0, 5.0, 5),
                Node::backhaul(5, 5.0, 10.0, 2),
            ],
            Fleet::new(2, capacity),
        )
        .expect("valid")
    }

    fn solution(inst: &Instance, routes: Vec<Vec<usize>>) -> Solution {
        let mut sol = Solution::new();
        for r in routes {
            sol.add_route(Route::from_customers(r, inst));
        }
        sol.resum_cost();
        sol
    }

    fn sorted_customers(sol: &Solution) -> Vec<usize> {
        let mut all: Vec<usize> = sol.served().collect();
        all.sort_unstable();
        all
    }

    #[test]
    fn test_swap_keeps_invariants() {
        let inst = instance(20);
        let mut sol = solution(&inst, vec![vec![1, 3, 4], vec![2, 5]]);
        let before = sorted_customers(&sol);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let eval = RouteEvaluator::new(&inst);

        for _ in 0..50 {
            let counts: Vec<_> = sol.routes().iter().map(|r| r.kind_counts(&inst)).collect();
            assert!(swap(&mut sol, &inst, &MoveConfig::default(), &mut rng));
            let after: Vec<_> = sol.routes().iter().map(|r| r.kind_counts(&inst)).collect();
            assert_eq!(counts, after);
            assert_eq!(sorted_customers(&sol), before);
            assert!(eval.is_valid(&sol), "{:?}", eval.evaluate_solution(&sol));
        }
    }

    #[test]
    fn test_swap_fails_without_same_kind_candidates() {
        // Every customer is on route 0.
        let inst = instance(20);
        let mut sol = solution(&inst, vec![vec![1, 2, 3, 4, 5], vec![]]);
        let before = sol.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let config = MoveConfig::default().with_max_attempts(100);
        assert!(!swap(&mut sol, &inst, &config, &mut rng));
        assert_eq!(sol, before);
    }

    #[test]
    fn test_swap_fails_when_capacity_blocks_every_pair() {
        // Moving linehaul 2 (demand 8) onto route 0 (delivered 7) always
        // overflows capacity 10.
        let inst = instance(10);
        let mut sol = solution(&inst, vec![vec![1, 3], vec![2]]);
        let before = sol.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = MoveConfig::default().with_max_attempts(200);
        assert!(!swap(&mut sol, &inst, &config, &mut rng));
        assert_eq!(sol, before);
    }

    #[test]
    fn test_swap_single_route() {
        let inst = instance(20);
        let mut sol = solution(&inst, vec![vec![1, 2]]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(!swap(&mut sol, &inst, &MoveConfig::default(), &mut rng));
    }

    #[test]
    fn test_swap_recomputes_costs() {
        let inst = instance(20);
        let mut sol = solution(&inst, vec![vec![1], vec![3]]);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert!(swap(&mut sol, &inst, &MoveConfig::default(), &mut rng));
        assert_eq!(sol.route(0).customers(), &[3]);
        assert_eq!(sol.route(0).delivered(), 3);
        assert_eq!(sol.route(1).delivered(), 4);
        assert!((sol.total_cost() - 40.0).abs() < 1e-9);
        let eval = RouteEvaluator::new(&inst);
        for (idx, route) in sol.routes().iter().enumerate() {
            assert!(eval.evaluate_route(idx, route).is_empty());
        }
    }

    #[test]
    fn test_find_feasible_order() {
        let inst = instance(20);
        let r1 = Route::from_customers(vec![1, 3], &inst);
        let r2 = Route::from_customers(vec![2], &inst);
        let mv = find_feasible(&r1, &r2, &[1, 0], &[0], NodeKind::Linehaul, &inst)
            .expect("feasible");
        assert_eq!(mv.first_pos, 1);
        assert_eq!(mv.second_pos, 0);
        // route 1: 4 + 8 = 12, route 2: 3
        assert_eq!(mv.first_loads, (12, 0));
        assert_eq!(mv.second_loads, (3, 0));
    }

    #[test]
    fn test_find_feasible_with_loads_near_i32_max() {
        let inst = Instance::new(
            vec![
                Node::depot(0, 0.0, 0.0),
                Node::linehaul(1, 1.0, 0.0, 2_000_000_000),
                Node::linehaul(2, 2.0, 0.0, 2_000_000_000),
                Node::linehaul(3, 3.0, 0.0, 2_000_000_000),
            ],
            Fleet::new(2, 2_000_000_000),
        )
        .expect("valid");
        let r1 = Route::from_customers(vec![1], &inst);
        let r2 = Route::from_customers(vec![2], &inst);
        let mv = find_feasible(&r1, &r2, &[0], &[0], NodeKind::Linehaul, &inst)
            .expect("feasible");
        assert_eq!(mv.first_loads, (2_000_000_000, 0));
        assert_eq!(mv.second_loads, (2_000_000_000, 0));

        // Route 2 delivers 4e9, so every exchange leaves it over capacity.
        let r2 = Route::from_customers(vec![2, 3], &inst);
        assert_eq!(r2.delivered(), 4_000_000_000);
        assert!(find_feasible(&r1, &r2, &[0], &[0, 1], NodeKind::Linehaul, &inst).is_none());
    }
}
