//! Graph and distance provider.
//!
//! The genetic engine never computes distances itself. It asks a [`Graph`]
//! for the node set and for the length of closed routes.
//!
//! Nodes are identified by dense indices `0..size()`. Permutation operators
//! rely on this to index lookup tables by node id.

use thiserror::Error;

/// Node identifier: a dense index into the graph.
pub type NodeId = usize;

/// Errors raised when building a [`MatrixGraph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// The distance matrix has no rows.
    #[error("distance matrix must contain at least one node")]
    Empty,

    /// A row length differs from the number of rows.
    #[error("distance matrix must be square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// An entry is negative, NaN or infinite.
    #[error("invalid distance {value} between nodes {from} and {to}")]
    InvalidDistance { from: NodeId, to: NodeId, value: f64 },

    /// The number of labels differs from the number of nodes.
    #[error("expected {expected} labels, got {len}")]
    LabelCount { len: usize, expected: usize },
}

/// A complete graph over dense node ids.
///
/// # Examples
///
/// ```
/// use tsp_genetic::graph::{Graph, MatrixGraph};
///
/// let graph = MatrixGraph::from_points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
/// assert_eq!(graph.nodes(), vec![0, 1, 2]);
/// assert_eq!(graph.route_distance(&[0, 1, 2, 0]), 12.0);
/// ```
pub trait Graph {
    /// Number of nodes.
    fn size(&self) -> usize;

    /// Distance of the directed edge `from -> to`.
    fn distance(&self, from: NodeId, to: NodeId) -> f64;

    /// All nodes, in ascending order.
    fn nodes(&self) -> Vec<NodeId> {
        (0..self.size()).collect()
    }

    /// Total distance of a closed route (first node repeated at the end).
    ///
    /// Routes with fewer than two entries have zero length.
    fn route_distance(&self, closed: &[NodeId]) -> f64 {
        closed.windows(2).map(|w| self.distance(w[0], w[1])).sum()
    }
}

/// Dense distance-matrix graph.
#[derive(Debug, Clone)]
pub struct MatrixGraph {
    distances: Vec<Vec<f64>>,
    labels: Option<Vec<String>>,
}

impl MatrixGraph {
    /// Builds a graph from a square matrix of non-negative, finite distances.
    pub fn from_matrix(distances: Vec<Vec<f64>>) -> Result<Self, GraphError> {
        let n = distances.len();
        if n == 0 {
            return Err(GraphError::Empty);
        }
        for (row, line) in distances.iter().enumerate() {
            if line.len() != n {
                return Err(GraphError::NotSquare {
                    row,
                    len: line.len(),
                    expected: n,
                });
            }
            if let Some((col, &value)) = line
                .iter()
                .enumerate()
                .find(|(_, d)| !d.is_finite() || **d < 0.0)
            {
                return Err(GraphError::InvalidDistance {
                    from: row,
                    to: col,
                    value,
                });
            }
        }
        Ok(Self {
            distances,
            labels: None,
        })
    }

    /// Builds a Euclidean graph from planar coordinates.
    ///
    /// # Panics
    /// Panics if `points` is empty.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        assert!(!points.is_empty(), "points must not be empty");
        let distances = points
            .iter()
            .map(|&(ax, ay)| {
                points
                    .iter()
                    .map(|&(bx, by)| (ax - bx).hypot(ay - by))
                    .collect()
            })
            .collect();
        Self {
            distances,
            labels: None,
        }
    }

    /// Attaches a display label to every node.
    pub fn with_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<Self, GraphError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.distances.len() {
            return Err(GraphError::LabelCount {
                len: labels.len(),
                expected: self.distances.len(),
            });
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Label of a node, if labels were attached.
    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(node))
            .map(String::as_str)
    }
}

impl Graph for MatrixGraph {
    fn size(&self) -> usize {
        self.distances.len()
    }

    fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        self.distances[from][to]
    }
}
