//! Round-robin constructive heuristic for backhaul routing.
//!
//! # Algorithm
//!
//! Linehauls and backhauls are shuffled independently. Every vehicle first
//! receives one linehaul, then repeated sweeps over the fleet hand out the
//! next linehaul to the first vehicle whose delivered load can absorb it.
//! Backhauls are dealt the same way afterwards, appended before the trailing
//! depot, and only to routes that already deliver something. A sweep
//! that places nothing ends the phase.
//!
//! Deliveries are always placed before pickups, so every route satisfies the
//! precedence rule by construction. Customers left over when a phase stalls
//! are recorded in [`Solution::unassigned`].
//!
//! # Complexity
//!
//! O(n × m) where n = customers, m = vehicles.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::distance::solution_cost;
use crate::models::{Instance, NodeKind, Solution};

/// Builds an initial solution by round-robin dealing.
///
/// The supplied RNG drives the shuffles, so a seeded generator gives a
/// reproducible construction.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_backhaul::models::{Fleet, Instance, Node};
/// use u_backhaul::constructive::round_robin;
///
/// let inst = Instance::new(
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::linehaul(1, 1.0, 0.0, 10),
///         Node::linehaul(2, 2.0, 0.0, 10),
///         Node::backhaul(3, 0.0, 1.0, 10),
///     ],
///     Fleet::new(2, 30),
/// )
/// .unwrap();
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let solution = round_robin(&inst, &mut rng);
/// assert_eq!(solution.num_routes(), 2);
/// assert_eq!(solution.num_served(), 3);
/// assert_eq!(solution.num_unassigned(), 0);
/// ```
pub fn round_robin<R: Rng>(instance: &Instance, rng: &mut R) -> Solution {
    let vehicles = instance.num_vehicles();
    let fleet = *instance.fleet();

    let mut linehauls = instance.indices_of_kind(NodeKind::Linehaul);
    let mut backhauls = instance.indices_of_kind(NodeKind::Backhaul);
    linehauls.shuffle(rng);
    backhauls.shuffle(rng);

    let mut solution = Solution::with_vehicles(vehicles);
    let mut next_linehaul = 0;
    let mut next_backhaul = 0;

    // One linehaul per vehicle.
    for route in solution.routes_mut() {
        let Some(&c) = linehauls.get(next_linehaul) else {
            break;
        };
        let node = instance.node(c);
        if !fleet.fits(0, node.demand()) {
            break;
        }
        route.push(c, node);
        next_linehaul += 1;
    }

    // Remaining linehauls, sweep by sweep.
    let mut assigned = true;
    while assigned && next_linehaul < linehauls.len() {
        assigned = false;
        for route in solution.routes_mut() {
            let Some(&c) = linehauls.get(next_linehaul) else {
                break;
            };
            let node = instance.node(c);
            if fleet.fits(route.delivered(), node.demand()) {
                route.push(c, node);
                next_linehaul += 1;
                assigned = true;
            }
        }
    }

    // Backhauls go after every delivery, on routes that deliver.
    let mut assigned = true;
    while assigned && next_backhaul < backhauls.len() {
        assigned = false;
        for route in solution.routes_mut() {
            let Some(&c) = backhauls.get(next_backhaul) else {
                break;
            };
            let node = instance.node(c);
            if route.delivered() > 0 && fleet.fits(route.picked(), node.demand()) {
                route.push(c, node);
                next_backhaul += 1;
                assigned = true;
            }
        }
    }

    for &c in linehauls[next_linehaul..]
        .iter()
        .chain(&backhauls[next_backhaul..])
    {
        solution.add_unassigned(c);
    }

    let cost = solution_cost(&mut solution, instance);
    debug!(
        served = solution.num_served(),
        unassigned = solution.num_unassigned(),
        cost,
        "round-robin construction finished"
    );
    solution
}
