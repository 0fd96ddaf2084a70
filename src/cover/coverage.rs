//! Per-node usage counts across the trees of a cover

use crate::network::Network;
use crate::tree::RootedTree;
use petgraph::graph::NodeIndex;
use std::collections::BTreeMap;

/// How many accepted trees each network node appears in
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    counts: Vec<u32>,
}

impl Coverage {
    /// All counts zero
    pub fn new(node_count: usize) -> Self {
        Coverage { counts: vec![0; node_count] }
    }

    /// All counts zero, sized for a network
    pub fn for_network(network: &Network) -> Self {
        Self::new(network.node_count())
    }

    /// Usage count of a node
    pub fn count(&self, node: NodeIndex) -> u32 {
        self.counts[node.index()]
    }

    /// True if no accepted tree uses the node yet
    pub fn is_untouched(&self, node: NodeIndex) -> bool {
        self.counts[node.index()] == 0
    }

    /// Number of untouched nodes in a slice
    pub fn untouched_in(&self, nodes: &[NodeIndex]) -> usize {
        nodes.iter().filter(|&&n| self.is_untouched(n)).count()
    }

    /// Number of untouched nodes a tree would cover
    pub fn fresh_in(&self, tree: &RootedTree) -> usize {
        tree.nodes().filter(|&n| self.is_untouched(n)).count()
    }

    /// Count one more use for every node of an accepted tree; returns how
    /// many nodes were covered for the first time
    pub fn record(&mut self, tree: &RootedTree) -> usize {
        let mut fresh = 0;
        for n in tree.nodes() {
            let count = &mut self.counts[n.index()];
            if *count == 0 {
                fresh += 1;
            }
            *count += 1;
        }
        fresh
    }

    /// True once every node has been used at least once
    pub fn is_complete(&self) -> bool {
        self.counts.iter().all(|&c| c > 0)
    }

    /// Untouched nodes in index order
    pub fn uncovered(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == 0)
            .map(|(i, _)| NodeIndex::new(i))
    }

    /// Number of nodes used at least once
    pub fn covered_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Number of tracked nodes
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no nodes are tracked
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counts keyed by node label
    pub fn by_label(&self, network: &Network) -> BTreeMap<String, u32> {
        network
            .nodes()
            .map(|n| (network.label(n).to_string(), self.count(n)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_complete() {
        let net = Network::from_edges([("R", "L1"), ("R", "L2")]).unwrap();
        let n = net.node_count();
        let mut coverage = Coverage::for_network(&net);
        assert!(!coverage.is_complete());
        assert_eq!(coverage.uncovered().count(), 3);

        let l1 = net.node("L1").unwrap();
        let mut parent = vec![None; n];
        let mut present = vec![false; n];
        present[net.root().index()] = true;
        present[l1.index()] = true;
        parent[l1.index()] = Some(net.root());
        let partial = RootedTree::from_parts(net.root(), parent, present);

        assert_eq!(coverage.fresh_in(&partial), 2);
        assert_eq!(coverage.record(&partial), 2);
        assert_eq!(coverage.record(&partial), 0);
        assert_eq!(coverage.count(l1), 2);
        assert_eq!(coverage.covered_count(), 2);
        assert_eq!(coverage.uncovered().collect::<Vec<_>>(), vec![net.node("L2").unwrap()]);
        assert_eq!(coverage.untouched_in(&[l1, net.node("L2").unwrap()]), 1);
        assert_eq!(coverage.by_label(&net)["R"], 2);
    }
}
