//! Rooted spanning tree assembled from a disjoint path cover

use super::Path;
use crate::network::Network;
use crate::tree::RootedTree;
use petgraph::graph::NodeIndex;
use tracing::trace;

/// A rooted spanning tree of the network plus its non-leaf tips
#[derive(Clone, Debug)]
pub struct SpanningTree {
    tree: RootedTree,
    omnian_leaves: Vec<NodeIndex>,
}

impl SpanningTree {
    /// Keep every path intact and hang each path that lacks the root under
    /// the lowest-indexed network parent of its head.
    ///
    /// The choice of parent is arbitrary; the result is a diagnostic
    /// structure, not part of any tree cover.
    pub fn build(network: &Network, paths: &[Path]) -> Self {
        let n = network.node_count();
        let root = network.root();
        let mut parent = vec![None; n];
        let mut present = vec![false; n];

        for path in paths {
            for &v in path.nodes() {
                present[v.index()] = true;
            }
            for (u, v) in path.edges() {
                parent[v.index()] = Some(u);
            }
            if !path.contains(root) {
                if let Some(&p) = network.predecessors(path.head()).first() {
                    trace!(parent = network.label(p), head = network.label(path.head()), "joining path");
                    parent[path.head().index()] = Some(p);
                    present[p.index()] = true;
                }
            }
        }

        let tree = RootedTree::from_parts(root, parent, present);
        let omnian_leaves = tree
            .leaves()
            .into_iter()
            .filter(|&v| !network.is_leaf(v))
            .collect();
        SpanningTree { tree, omnian_leaves }
    }

    /// The spanning tree
    pub fn tree(&self) -> &RootedTree {
        &self.tree
    }

    /// Consume into the tree
    pub fn into_tree(self) -> RootedTree {
        self.tree
    }

    /// Tree leaves that are not network leaves
    ///
    /// These are where new leaves would be attached to turn the network
    /// into a tree-based one.
    pub fn omnian_leaves(&self) -> &[NodeIndex] {
        &self.omnian_leaves
    }

    /// The network with a new leaf hung under every omnian tip
    ///
    /// The spanning tree plus those leaves is a base tree of the result,
    /// so the returned network is tree-based.
    pub fn tree_based_network(&self, network: &Network) -> Network {
        network.with_new_leaves(&self.omnian_leaves)
    }
}

#[cfg(test)]
mod tests {
    use crate::decompose::PathDecomposer;
    use crate::network::Network;

    #[test]
    fn test_spans_every_node() {
        let net = Network::from_edges([
            ("R", "A"),
            ("R", "B"),
            ("A", "X"),
            ("B", "X"),
            ("A", "L1"),
            ("B", "L2"),
            ("X", "L3"),
        ])
        .unwrap();
        let spanning = PathDecomposer::new().decompose(&net).spanning_tree(&net);
        assert!(spanning.tree().is_spanning());
        assert!(spanning.tree().validate_structure(&net).is_ok());
        assert_eq!(spanning.tree().edges().count(), net.node_count() - 1);
        assert!(spanning.omnian_leaves().is_empty());
    }

    #[test]
    fn test_non_tree_based_has_omnian_tip() {
        let net = Network::from_edges([
            ("R", "O1"),
            ("R", "O2"),
            ("O1", "X"),
            ("O2", "X"),
            ("X", "L"),
        ])
        .unwrap();
        let decomposition = PathDecomposer::new().decompose(&net);
        let spanning = decomposition.spanning_tree(&net);
        assert!(spanning.tree().validate_structure(&net).is_ok());
        assert_eq!(spanning.omnian_leaves().len(), 1);
        assert!(spanning.omnian_leaves().len() <= decomposition.missing_leaves());
    }

    #[test]
    fn test_tree_based_network_closes_the_gap() {
        let net = Network::from_edges([
            ("R", "O1"),
            ("R", "O2"),
            ("O1", "X"),
            ("O2", "X"),
            ("X", "L"),
        ])
        .unwrap();
        let spanning = PathDecomposer::new().decompose(&net).spanning_tree(&net);
        let tip = spanning.omnian_leaves()[0];

        let based = spanning.tree_based_network(&net);
        assert_eq!(based.leaves().len(), net.leaves().len() + 1);
        assert_eq!(based.node_count(), net.node_count() + 1);
        let new_leaf = based.node("new-leaf-0").unwrap();
        assert_eq!(based.predecessors(new_leaf), &[tip]);

        let decomposition = PathDecomposer::new().decompose(&based);
        assert_eq!(decomposition.missing_leaves(), 0);
        assert!(decomposition.is_tree_based());
    }
}
