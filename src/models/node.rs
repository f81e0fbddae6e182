//! Node and node kind types.

use serde::{Deserialize, Serialize};

/// The role a node plays in a backhaul routing instance.
///
/// The numeric codes match the instance file format: 0 = depot,
/// 1 = linehaul, 2 = backhaul.
///
/// # Examples
///
/// ```
/// use u_backhaul::models::NodeKind;
///
/// assert_eq!(NodeKind::from_code(1), Some(NodeKind::Linehaul));
/// assert_eq!(NodeKind::Backhaul.code(), 2);
/// assert!(NodeKind::from_code(7).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The single depot every route starts and ends at.
    Depot,
    /// A customer receiving a delivery from the depot.
    Linehaul,
    /// A customer whose goods are picked up and returned to the depot.
    Backhaul,
}

impl NodeKind {
    /// Parses a wire code (0, 1, 2).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Depot),
            1 => Some(Self::Linehaul),
            2 => Some(Self::Backhaul),
            _ => None,
        }
    }

    /// Wire code of this kind.
    pub fn code(self) -> u8 {
        match self {
            Self::Depot => 0,
            Self::Linehaul => 1,
            Self::Backhaul => 2,
        }
    }

    /// Returns `true` for linehaul and backhaul nodes.
    pub fn is_customer(self) -> bool {
        !matches!(self, Self::Depot)
    }
}

/// A depot or customer location.
///
/// The `id` is the external identifier from the instance file; solvers
/// address nodes by their index in [`Instance::nodes`](super::Instance::nodes).
///
/// # Examples
///
/// ```
/// use u_backhaul::models::{Node, NodeKind};
///
/// let depot = Node::depot(0, 0.0, 0.0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Node::new(7, NodeKind::Linehaul, 3.0, 4.0, 12);
/// assert_eq!(c.id(), 7);
/// assert!((depot.distance_to(&c) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: i64,
    kind: NodeKind,
    x: f64,
    y: f64,
    demand: i32,
}

impl Node {
    /// Creates a node. The demand of a depot is forced to zero.
    pub fn new(id: i64, kind: NodeKind, x: f64, y: f64, demand: i32) -> Self {
        let demand = if kind == NodeKind::Depot { 0 } else { demand };
        Self {
            id,
            kind,
            x,
            y,
            demand,
        }
    }

    /// Creates a depot at the given coordinates.
    pub fn depot(id: i64, x: f64, y: f64) -> Self {
        Self::new(id, NodeKind::Depot, x, y, 0)
    }

    /// Creates a linehaul customer.
    pub fn linehaul(id: i64, x: f64, y: f64, demand: i32) -> Self {
        Self::new(id, NodeKind::Linehaul, x, y, demand)
    }

    /// Creates a backhaul customer.
    pub fn backhaul(id: i64, x: f64, y: f64, demand: i32) -> Self {
        Self::new(id, NodeKind::Backhaul, x, y, demand)
    }

    /// External node id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Depot, linehaul or backhaul.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Horizontal coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Units delivered (linehaul) or collected (backhaul).
    pub fn demand(&self) -> i32 {
        self.demand
    }

    pub fn is_linehaul(&self) -> bool {
        self.kind == NodeKind::Linehaul
    }

    pub fn is_backhaul(&self) -> bool {
        self.kind == NodeKind::Backhaul
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        for kind in [NodeKind::Depot, NodeKind::Linehaul, NodeKind::Backhaul] {
            assert_eq!(NodeKind::from_code(kind.code() as i64), Some(kind));
        }
        assert!(NodeKind::from_code(-1).is_none());
        assert!(NodeKind::from_code(3).is_none());
    }

    #[test]
    fn test_kind_is_customer() {
        assert!(!NodeKind::Depot.is_customer());
        assert!(NodeKind::Linehaul.is_customer());
        assert!(NodeKind::Backhaul.is_customer());
    }

    #[test]
    fn test_depot_demand_is_zero() {
        let d = Node::new(0, NodeKind::Depot, 1.0, 1.0, 40);
        assert_eq!(d.demand(), 0);
    }

    #[test]
    fn test_constructors() {
        let l = Node::linehaul(3, 1.0, 2.0, 5);
        assert!(l.is_linehaul());
        assert!(!l.is_backhaul());
        assert_eq!(l.x(), 1.0);
        assert_eq!(l.y(), 2.0);

        let b = Node::backhaul(4, 0.0, 0.0, 9);
        assert!(b.is_backhaul());
        assert_eq!(b.demand(), 9);
        assert_eq!(b.kind(), NodeKind::Backhaul);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Node::linehaul(1, 1.0, 2.0, 0);
        let b = Node::backhaul(2, 4.0, 6.0, 0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }
}
