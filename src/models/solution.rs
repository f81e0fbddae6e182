//! Solution and violation types.

use super::Route;

/// A type of invariant violation in a route or solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// A backhaul precedes a linehaul on the same route.
    PrecedenceViolated {
        /// Route index in the solution.
        route_index: usize,
        /// Position of the first linehaul found after a backhaul.
        position: usize,
    },
    /// Delivered load exceeds vehicle capacity.
    DeliveredOverCapacity {
        /// Route index.
        route_index: usize,
        /// Delivered load.
        load: i64,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Collected load exceeds vehicle capacity.
    PickedOverCapacity {
        /// Route index.
        route_index: usize,
        /// Collected load.
        load: i64,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A route carries backhauls but no linehauls.
    BackhaulOnlyRoute {
        /// Route index.
        route_index: usize,
    },
    /// Cached loads differ from the loads implied by the node sequence.
    LoadMismatch {
        /// Route index.
        route_index: usize,
        /// Cached `(delivered, picked)`.
        cached: (i64, i64),
        /// Recomputed `(delivered, picked)`.
        actual: (i64, i64),
    },
    /// Cached route cost differs from the recomputed cost.
    RouteCostMismatch {
        /// Route index.
        route_index: usize,
        /// Cached cost.
        cached: f64,
        /// Recomputed cost.
        actual: f64,
    },
    /// Solution total differs from the sum of route costs.
    TotalCostMismatch {
        /// Cached total.
        cached: f64,
        /// Sum of route costs.
        actual: f64,
    },
    /// A customer is neither routed nor marked unassigned.
    CustomerMissing {
        /// Node index.
        customer: usize,
    },
    /// A customer appears more than once (routes and unassigned combined).
    CustomerDuplicated {
        /// Node index.
        customer: usize,
    },
    /// Route count differs from the fleet size.
    RouteCountMismatch {
        /// Routes in the solution.
        routes: usize,
        /// Vehicles in the fleet.
        vehicles: usize,
    },
}

/// An invariant violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete solution: one route per vehicle plus unassigned customers.
///
/// # Examples
///
/// ```
/// use u_backhaul::models::Solution;
///
/// let mut sol = Solution::with_vehicles(3);
/// sol.add_unassigned(4);
/// assert_eq!(sol.num_routes(), 3);
/// assert_eq!(sol.num_served(), 0);
/// assert_eq!(sol.unassigned(), &[4]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<usize>,
    total_cost: f64,
}

impl Solution {
    /// Creates a solution with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solution with `vehicles` empty routes.
    pub fn with_vehicles(vehicles: usize) -> Self {
        Self {
            routes: vec![Route::new(); vehicles],
            ..Self::default()
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a customer as unassigned.
    pub fn add_unassigned(&mut self, customer: usize) {
        self.unassigned.push(customer);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// Route at index `idx`.
    pub fn route(&self, idx: usize) -> &Route {
        &self.routes[idx]
    }

    /// Mutable references to two distinct routes.
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or either index is out of range.
    pub fn route_pair_mut(&mut self, a: usize, b: usize) -> (&mut Route, &mut Route) {
        assert_ne!(a, b, "route_pair_mut requires two distinct routes");
        if a < b {
            let (left, right) = self.routes.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.routes.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of routes that serve at least one customer.
    pub fn num_used_routes(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Indices of customers the builder could not place.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    pub fn num_unassigned(&self) -> usize {
        self.unassigned.len()
    }

    /// Cached total cost.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }

    /// Re-sums the cached route costs into the total without re-costing
    /// any route.
    pub fn resum_cost(&mut self) -> f64 {
        self.total_cost = self.routes.iter().map(|r| r.cost()).sum();
        self.total_cost
    }

    /// Number of customers placed on routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Routed customer indices, route by route.
    pub fn served(&self) -> impl Iterator<Item = usize> + '_ {
        self.routes.iter().flat_map(|r| r.customers().iter().copied())
    }
}
