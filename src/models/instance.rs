//! Static problem definition.

use std::collections::HashMap;

use thiserror::Error;

use super::{Fleet, Node, NodeKind};
use crate::distance::DistanceMatrix;

/// A structural problem with an instance definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    /// No node of kind depot was given.
    #[error("instance has no depot")]
    MissingDepot,
    /// More than one depot was given.
    #[error("instance has more than one depot (ids {first} and {second})")]
    MultipleDepots {
        /// First depot id seen.
        first: i64,
        /// Second depot id seen.
        second: i64,
    },
    /// Two nodes share an id.
    #[error("duplicate node id {0}")]
    DuplicateId(i64),
    /// A customer's demand is negative.
    #[error("node {id} has negative demand {demand}")]
    NegativeDemand {
        /// Node id.
        id: i64,
        /// Offending demand.
        demand: i32,
    },
    /// The vehicle capacity is negative.
    #[error("vehicle capacity {0} is negative")]
    NegativeCapacity(i32),
}

/// A vehicle routing with backhauls instance.
///
/// Holds every node, an id → index lookup, the fleet, and a precomputed
/// Euclidean distance matrix. Solvers address nodes by index.
///
/// # Examples
///
/// ```
/// use u_backhaul::models::{Fleet, Instance, Node};
///
/// let instance = Instance::new(
///     vec![
///         Node::depot(0, 0.0, 0.0),
///         Node::linehaul(1, 3.0, 4.0, 10),
///         Node::backhaul(2, 0.0, 8.0, 5),
///     ],
///     Fleet::new(2, 50),
/// )
/// .unwrap();
///
/// assert_eq!(instance.depot(), 0);
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.index_of(2), Some(2));
/// assert!((instance.distance(0, 1) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    nodes: Vec<Node>,
    index: HashMap<i64, usize>,
    fleet: Fleet,
    depot: usize,
    distances: DistanceMatrix,
}

impl Instance {
    /// Builds an instance, checking there is exactly one depot and that ids
    /// are unique.
    pub fn new(nodes: Vec<Node>, fleet: Fleet) -> Result<Self, InstanceError> {
        if fleet.capacity() < 0 {
            return Err(InstanceError::NegativeCapacity(fleet.capacity()));
        }

        let mut index = HashMap::with_capacity(nodes.len());
        let mut depot: Option<usize> = None;

        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id(), i).is_some() {
                return Err(InstanceError::DuplicateId(node.id()));
            }
            if node.demand() < 0 {
                return Err(InstanceError::NegativeDemand {
                    id: node.id(),
                    demand: node.demand(),
                });
            }
            if node.kind() == NodeKind::Depot {
                if let Some(d) = depot {
                    return Err(InstanceError::MultipleDepots {
                        first: nodes[d].id(),
                        second: node.id(),
                    });
                }
                depot = Some(i);
            }
        }

        let depot = depot.ok_or(InstanceError::MissingDepot)?;
        let distances = DistanceMatrix::from_nodes(&nodes);

        Ok(Self {
            nodes,
            index,
            fleet,
            depot,
            distances,
        })
    }

    /// All nodes, depot included, in input order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// Index of the node with external id `id`.
    pub fn index_of(&self, id: i64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Vehicle count and per-vehicle capacity.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Capacity of each vehicle.
    pub fn capacity(&self) -> i32 {
        self.fleet.capacity()
    }

    /// Number of available vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.fleet.vehicles()
    }

    /// Index of the depot.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Precomputed node-to-node distances.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance between the nodes at indices `from` and `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Indices of all customers of the given kind, in input order.
    pub fn indices_of_kind(&self, kind: NodeKind) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind() == kind)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of customers (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 1
    }
}
