//! Rooted trees embedded in a network
//!
//! A [`RootedTree`] is a frozen parent table indexed by network node: each
//! present node other than the root has exactly one parent, and every tree
//! edge is a network edge.

use crate::network::Network;
use crate::{Result, TreespaceError};
use petgraph::graph::NodeIndex;

/// A rooted tree over a subset of network nodes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootedTree {
    root: NodeIndex,
    parent: Vec<Option<NodeIndex>>,
    present: Vec<bool>,
}

impl RootedTree {
    pub(crate) fn from_parts(root: NodeIndex, parent: Vec<Option<NodeIndex>>, present: Vec<bool>) -> Self {
        RootedTree { root, parent, present }
    }

    /// The root node
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Check if a node belongs to the tree
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.present.get(node.index()).copied().unwrap_or(false)
    }

    /// Parent of a node (None for the root and for absent nodes)
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.parent.get(node.index()).copied().flatten()
    }

    /// Nodes of the tree in index order
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.present
            .iter()
            .enumerate()
            .filter(|(_, present)| **present)
            .map(|(i, _)| NodeIndex::new(i))
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }

    /// `(parent, child)` edges ordered by child index
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.nodes().filter_map(move |v| self.parent(v).map(|u| (u, v)))
    }

    /// Children of a node in index order
    pub fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.edges()
            .filter(|&(u, _)| u == node)
            .map(|(_, v)| v)
            .collect()
    }

    /// Nodes without children, in index order
    pub fn leaves(&self) -> Vec<NodeIndex> {
        let mut has_child = vec![false; self.present.len()];
        for (u, _) in self.edges() {
            has_child[u.index()] = true;
        }
        self.nodes().filter(|n| !has_child[n.index()]).collect()
    }

    /// Check whether the tree contains every network node
    pub fn is_spanning(&self) -> bool {
        self.present.iter().all(|&p| p)
    }

    /// Edges as label pairs
    pub fn edge_labels(&self, network: &Network) -> Vec<(String, String)> {
        self.edges()
            .map(|(u, v)| (network.label(u).to_string(), network.label(v).to_string()))
            .collect()
    }

    /// Check that this is a rooted tree of network edges hanging from the
    /// network root
    pub fn validate_structure(&self, network: &Network) -> Result<()> {
        if self.present.len() != network.node_count() {
            return invalid(format!(
                "table covers {} nodes, network has {}",
                self.present.len(),
                network.node_count()
            ));
        }
        if self.root != network.root() || !self.contains(self.root) {
            return invalid("tree is not rooted at the network root".to_string());
        }
        if self.parent(self.root).is_some() {
            return invalid("root has a parent".to_string());
        }

        for v in network.nodes() {
            match (self.contains(v), self.parent(v)) {
                (false, Some(_)) => {
                    return invalid(format!("absent node {} has a parent", network.label(v)))
                }
                (true, None) if v != self.root => {
                    return invalid(format!("node {} has no parent", network.label(v)))
                }
                (true, Some(u)) => {
                    if !self.contains(u) {
                        return invalid(format!("parent of {} is not in the tree", network.label(v)));
                    }
                    if !network.has_edge(u, v) {
                        return invalid(format!(
                            "{} -> {} is not a network edge",
                            network.label(u),
                            network.label(v)
                        ));
                    }
                }
                _ => {}
            }
        }

        // Parent chains must end at the root
        for v in self.nodes() {
            let mut current = v;
            let mut steps = 0;
            while let Some(u) = self.parent(current) {
                current = u;
                steps += 1;
                if steps > self.present.len() {
                    return invalid(format!("cycle above {}", network.label(v)));
                }
            }
            if current != self.root {
                return invalid(format!("{} is not reachable from the root", network.label(v)));
            }
        }

        Ok(())
    }

    /// Structural check plus: the leaf set equals the network leaf set
    pub fn validate(&self, network: &Network) -> Result<()> {
        self.validate_structure(network)?;
        let leaves = self.leaves();
        if leaves != network.leaves() {
            return invalid(format!(
                "leaf set {:?} differs from network leaves {:?}",
                label_list(network, &leaves),
                label_list(network, network.leaves())
            ));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> Result<()> {
    Err(TreespaceError::InvalidTree(reason))
}

fn label_list<'n>(network: &'n Network, nodes: &[NodeIndex]) -> Vec<&'n str> {
    nodes.iter().map(|&n| network.label(n)).collect()
}
