//! Route and solution invariant checking.

use crate::distance::route_cost;
use crate::models::{Instance, NodeKind, Route, Solution, Violation, ViolationType};

/// Absolute tolerance used when comparing cached and recomputed costs.
pub const COST_TOLERANCE: f64 = 1e-9;

/// Checks routes and solutions against the backhaul routing invariants:
/// precedence, per-kind capacity, no backhaul-only routes, cached loads and
/// costs, and coverage.
///
/// # Examples
///
/// ```
/// use u_backhaul::models::{Fleet, Instance, Node, Route, Solution};
/// use u_backhaul::evaluation::RouteEvaluator;
///
/// let inst = Instance::new(
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::linehaul(1, 3.0, 4.0, 10),
///         Node::backhaul(2, 6.0, 8.0, 20),
///     ],
///     Fleet::new(1, 50),
/// )
/// .unwrap();
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::from_customers(vec![1, 2], &inst));
/// sol.resum_cost();
///
/// let evaluator = RouteEvaluator::new(&inst);
/// assert!(evaluator.evaluate_solution(&sol).is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a Instance,
    tolerance: f64,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator with [`COST_TOLERANCE`].
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            tolerance: COST_TOLERANCE,
        }
    }

    /// Overrides the cost comparison tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Checks a single route, tagging violations with `route_index`.
    pub fn evaluate_route(&self, route_index: usize, route: &Route) -> Vec<Violation> {
        let mut violations = Vec::new();
        let capacity = self.instance.capacity();

        let mut delivered: i64 = 0;
        let mut picked: i64 = 0;
        let mut seen_backhaul = false;
        let mut precedence_reported = false;

        for (pos, &c) in route.customers().iter().enumerate() {
            let node = self.instance.node(c);
            match node.kind() {
                NodeKind::Linehaul => {
                    delivered += i64::from(node.demand());
                    if seen_backhaul && !precedence_reported {
                        violations.push(Violation::new(ViolationType::PrecedenceViolated {
                            route_index,
                            position: pos,
                        }));
                        precedence_reported = true;
                    }
                }
                NodeKind::Backhaul => {
                    picked += i64::from(node.demand());
                    seen_backhaul = true;
                }
                NodeKind::Depot => {}
            }
        }

        if delivered > i64::from(capacity) {
            violations.push(Violation::new(ViolationType::DeliveredOverCapacity {
                route_index,
                load: delivered,
                capacity,
            }));
        }
        if picked > i64::from(capacity) {
            violations.push(Violation::new(ViolationType::PickedOverCapacity {
                route_index,
                load: picked,
                capacity,
            }));
        }
        if seen_backhaul && delivered == 0 {
            let (linehauls, _) = route.kind_counts(self.instance);
            if linehauls == 0 {
                violations.push(Violation::new(ViolationType::BackhaulOnlyRoute {
                    route_index,
                }));
            }
        }
        if (route.delivered(), route.picked()) != (delivered, picked) {
            violations.push(Violation::new(ViolationType::LoadMismatch {
                route_index,
                cached: (route.delivered(), route.picked()),
                actual: (delivered, picked),
            }));
        }

        let actual = route_cost(self.instance.distances(), route.path(self.instance.depot()));
        if (actual - route.cost()).abs() > self.tolerance {
            violations.push(Violation::new(ViolationType::RouteCostMismatch {
                route_index,
                cached: route.cost(),
                actual,
            }));
        }

        violations
    }

    /// Checks every route plus the solution-level invariants.
    pub fn evaluate_solution(&self, solution: &Solution) -> Vec<Violation> {
        let mut all_violations = Vec::new();

        for (idx, route) in solution.routes().iter().enumerate() {
            all_violations.append(&mut self.evaluate_route(idx, route));
        }

        let sum: f64 = solution.routes().iter().map(|r| r.cost()).sum();
        if (sum - solution.total_cost()).abs() > self.tolerance {
            all_violations.push(Violation::new(ViolationType::TotalCostMismatch {
                cached: solution.total_cost(),
                actual: sum,
            }));
        }

        all_violations.append(&mut self.coverage_violations(solution));
        all_violations
    }

    /// Returns `true` if the solution has no violations.
    pub fn is_valid(&self, solution: &Solution) -> bool {
        self.evaluate_solution(solution).is_empty()
    }

    /// Every customer must be routed exactly once or listed as unassigned
    /// exactly once, and there must be one route per vehicle.
    fn coverage_violations(&self, solution: &Solution) -> Vec<Violation> {
        let mut violations = Vec::new();
        let vehicles = self.instance.num_vehicles();
        if solution.num_routes() != vehicles {
            violations.push(Violation::new(ViolationType::RouteCountMismatch {
                routes: solution.num_routes(),
                vehicles,
            }));
        }

        let mut seen = vec![0usize; self.instance.nodes().len()];
        for c in solution.served().chain(solution.unassigned().iter().copied()) {
            seen[c] += 1;
        }
        for (idx, node) in self.instance.nodes().iter().enumerate() {
            if !node.kind().is_customer() {
                continue;
            }
            match seen[idx] {
                0 => violations.push(Violation::new(ViolationType::CustomerMissing {
                    customer: idx,
                })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::CustomerDuplicated {
                    customer: idx,
                })),
            }
        }
        violations
    }
}
