//! Dense distance matrix.

use crate::models::Node;

/// Square matrix of pairwise distances, row-major.
///
/// Indexed by node position in [`Instance::nodes`](crate::models::Instance::nodes).
/// Built once per instance; lookups are a single index computation.
///
/// # Examples
///
/// ```
/// use u_backhaul::models::Node;
/// use u_backhaul::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::depot(0, 0.0, 0.0),
///     Node::linehaul(1, 3.0, 4.0, 10),
///     Node::backhaul(2, 6.0, 8.0, 20),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert!((dm.get(2, 0) - 10.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    /// Euclidean distances between every pair of nodes.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let cells = nodes
            .iter()
            .flat_map(|a| nodes.iter().map(move |b| a.distance_to(b)))
            .collect();
        Self {
            size: nodes.len(),
            cells,
        }
    }

    /// Builds a matrix from explicit rows.
    ///
    /// Returns `None` unless every row has one entry per row.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.cells[from * self.size + to]
    }

    /// Distances from node `from` to every node.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.cells[from * self.size..(from + 1) * self.size]
    }

    /// Number of nodes covered.
    pub fn size(&self) -> usize {
        self.size
    }
}
