//! Ordered node sequences following network edges

use crate::network::Network;
use petgraph::graph::NodeIndex;

/// A directed path of distinct nodes, never empty
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    nodes: Vec<NodeIndex>,
}

impl Path {
    /// Path through `nodes` in order; `None` if there are none
    pub fn from_nodes(nodes: Vec<NodeIndex>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Path { nodes })
        }
    }

    /// Callers guarantee `nodes` is non-empty
    pub(crate) fn new(nodes: Vec<NodeIndex>) -> Self {
        debug_assert!(!nodes.is_empty(), "a path needs at least one node");
        Path { nodes }
    }

    /// A single-node path
    pub fn single(node: NodeIndex) -> Self {
        Path { nodes: vec![node] }
    }

    /// Nodes in order
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// First node
    pub fn head(&self) -> NodeIndex {
        self.nodes[0]
    }

    /// Last node
    pub fn last(&self) -> NodeIndex {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if a node lies on the path
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.nodes.contains(&node)
    }

    /// Position of a node on the path
    pub fn position(&self, node: NodeIndex) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    /// Consecutive `(from, to)` pairs
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    /// True if the path ends in a network leaf
    pub fn is_leaf_ending(&self, network: &Network) -> bool {
        network.is_leaf(self.last())
    }

    /// True if every consecutive pair is a network edge
    pub fn follows(&self, network: &Network) -> bool {
        self.edges().all(|(u, v)| network.has_edge(u, v))
    }

    /// Node labels in order
    pub fn labels<'n>(&self, network: &'n Network) -> Vec<&'n str> {
        self.nodes.iter().map(|&n| network.label(n)).collect()
    }
}
