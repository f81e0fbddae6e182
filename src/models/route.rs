//! Route type.

use super::{Instance, Node, NodeKind};
use crate::distance::route_cost;

/// An ordered sequence of customers served by one vehicle.
///
/// The depot is implicit at both ends: [`Route::path`] yields
/// `depot, customers..., depot`. An empty route is an unused vehicle.
///
/// Loads and cost are cached. Mutators that take a [`Node`] keep the load
/// fields in sync; the cost is refreshed with [`Route::recompute_cost`]
/// or [`Route::refresh`].
///
/// # Examples
///
/// ```
/// use u_backhaul::models::{Fleet, Instance, Node, Route};
///
/// let inst = Instance::new(
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::linehaul(1, 3.0, 0.0, 10),
///         Node::backhaul(2, 3.0, 4.0, 5),
///     ],
///     Fleet::new(1, 20),
/// )
/// .unwrap();
///
/// let mut route = Route::new();
/// route.push(1, inst.node(1));
/// route.push(2, inst.node(2));
/// route.recompute_cost(&inst);
///
/// assert_eq!(route.delivered(), 10);
/// assert_eq!(route.picked(), 5);
/// assert_eq!(route.used(), 15);
/// assert!((route.cost() - 12.0).abs() < 1e-10);
/// assert_eq!(route.path(inst.depot()).collect::<Vec<_>>(), vec![0, 1, 2, 0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    customers: Vec<usize>,
    delivered: i64,
    picked: i64,
    cost: f64,
}

impl Route {
    /// Creates an empty (depot-only) route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a route from customer indices, computing loads and cost.
    pub fn from_customers(customers: Vec<usize>, instance: &Instance) -> Self {
        let mut route = Self {
            customers,
            ..Self::default()
        };
        route.refresh(instance);
        route
    }

    /// Customer indices in visit order (depot excluded).
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Full node path including the depot at both ends.
    pub fn path(&self, depot: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(depot)
            .chain(self.customers.iter().copied())
            .chain(std::iter::once(depot))
    }

    /// Number of customers on the route.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Sum of linehaul demands.
    pub fn delivered(&self) -> i64 {
        self.delivered
    }

    /// Sum of backhaul demands.
    pub fn picked(&self) -> i64 {
        self.picked
    }

    /// `delivered + picked`.
    pub fn used(&self) -> i64 {
        self.delivered + self.picked
    }

    /// Cached travel cost of the full path.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Appends a customer before the trailing depot.
    pub fn push(&mut self, idx: usize, node: &Node) {
        self.customers.push(idx);
        self.add_load(node.kind(), i64::from(node.demand()));
    }

    /// Inserts a customer at position `pos` of the customer list.
    pub fn insert(&mut self, pos: usize, idx: usize, node: &Node) {
        self.customers.insert(pos, idx);
        self.add_load(node.kind(), i64::from(node.demand()));
    }

    /// Removes and returns the customer at `pos`.
    pub fn remove(&mut self, pos: usize, node: &Node) -> usize {
        let idx = self.customers.remove(pos);
        self.add_load(node.kind(), -i64::from(node.demand()));
        idx
    }

    /// Replaces the customer at `pos`, returning the previous one.
    ///
    /// Loads are not touched; callers set them with [`Route::set_loads`].
    pub fn replace(&mut self, pos: usize, idx: usize) -> usize {
        std::mem::replace(&mut self.customers[pos], idx)
    }

    pub fn set_loads(&mut self, delivered: i64, picked: i64) {
        self.delivered = delivered;
        self.picked = picked;
    }

    /// Recomputes the cached cost from the node sequence.
    pub fn recompute_cost(&mut self, instance: &Instance) -> f64 {
        self.cost = route_cost(instance.distances(), self.path(instance.depot()));
        self.cost
    }

    /// Recomputes loads and cost from the node sequence.
    pub fn refresh(&mut self, instance: &Instance) {
        let (delivered, picked) = self
            .customers
            .iter()
            .map(|&c| instance.node(c))
            .fold((0, 0), |(d, p), n| match n.kind() {
                NodeKind::Linehaul => (d + i64::from(n.demand()), p),
                NodeKind::Backhaul => (d, p + i64::from(n.demand())),
                NodeKind::Depot => (d, p),
            });
        self.set_loads(delivered, picked);
        self.recompute_cost(instance);
    }

    /// Positions of customers of the given kind.
    pub fn positions_of_kind(&self, kind: NodeKind, instance: &Instance) -> Vec<usize> {
        self.customers
            .iter()
            .enumerate()
            .filter(|(_, c)| instance.node(**c).kind() == kind)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Number of linehaul and backhaul customers on the route.
    pub fn kind_counts(&self, instance: &Instance) -> (usize, usize) {
        self.customers
            .iter()
            .fold((0, 0), |(l, b), &c| match instance.node(c).kind() {
                NodeKind::Linehaul => (l + 1, b),
                NodeKind::Backhaul => (l, b + 1),
                NodeKind::Depot => (l, b),
            })
    }

    /// Insertion position that keeps deliveries before pickups.
    ///
    /// Linehauls go right after the depot head. Backhauls go after the tail
    /// block of backhauls, right before the trailing depot.
    pub fn insertion_position(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::Linehaul => 0,
            NodeKind::Backhaul | NodeKind::Depot => self.customers.len(),
        }
    }

    fn add_load(&mut self, kind: NodeKind, amount: i64) {
        match kind {
            NodeKind::Linehaul => self.delivered += amount,
            NodeKind::Backhaul => self.picked += amount,
            NodeKind::Depot => {}
        }
    }
}
