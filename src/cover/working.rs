//! Mutable tree under construction
//!
//! During splicing the working tree is a forest of disjoint paths
//! ("fragments"), each hanging from a head with no parent. `repair` then
//! joins the fragments under the network root and trims tips that are not
//! network leaves, after which the tree can be frozen.

use super::Coverage;
use crate::decompose::Path;
use crate::network::Network;
use crate::tree::RootedTree;
use petgraph::graph::NodeIndex;
use tracing::trace;

#[derive(Clone, Debug)]
pub(crate) struct WorkingTree {
    parent: Vec<Option<NodeIndex>>,
    present: Vec<bool>,
}

impl WorkingTree {
    pub fn new(node_count: usize) -> Self {
        WorkingTree {
            parent: vec![None; node_count],
            present: vec![false; node_count],
        }
    }

    /// Forest made of the given paths; single-node paths become isolated nodes
    pub fn from_paths<'p>(node_count: usize, paths: impl IntoIterator<Item = &'p Path>) -> Self {
        let mut tree = Self::new(node_count);
        for path in paths {
            tree.insert_chain(path.nodes());
        }
        tree
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.present[node.index()]
    }

    pub fn insert(&mut self, node: NodeIndex, parent: Option<NodeIndex>) {
        self.present[node.index()] = true;
        self.parent[node.index()] = parent;
    }

    /// Insert nodes as a chain; the first one becomes a head
    pub fn insert_chain(&mut self, nodes: &[NodeIndex]) {
        let mut parent = None;
        for &n in nodes {
            self.insert(n, parent);
            parent = Some(n);
        }
    }

    pub fn remove(&mut self, node: NodeIndex) {
        self.present[node.index()] = false;
        self.parent[node.index()] = None;
    }

    pub fn set_parent(&mut self, node: NodeIndex, parent: Option<NodeIndex>) {
        self.parent[node.index()] = parent;
    }

    /// Present nodes without a parent, in index order
    pub fn heads(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.present.len())
            .filter(move |&i| self.present[i] && self.parent[i].is_none())
            .map(NodeIndex::new)
    }

    /// True if some network parent of `node` is already in the tree
    pub fn has_parent_candidate(&self, network: &Network, node: NodeIndex) -> bool {
        network.predecessors(node).iter().any(|&p| self.contains(p))
    }

    fn child_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.present.len()];
        for i in 0..self.present.len() {
            if let (true, Some(p)) = (self.present[i], self.parent[i]) {
                counts[p.index()] += 1;
            }
        }
        counts
    }

    /// Fragments as head-to-tip paths, ordered by head
    ///
    /// Only meaningful while the tree is a path forest, i.e. before `repair`.
    pub fn fragments(&self) -> Vec<Path> {
        let mut child = vec![None; self.present.len()];
        for i in 0..self.present.len() {
            if let (true, Some(p)) = (self.present[i], self.parent[i]) {
                child[p.index()] = Some(NodeIndex::new(i));
            }
        }

        self.heads()
            .map(|head| {
                let mut nodes = vec![head];
                let mut current = head;
                while let Some(next) = child[current.index()] {
                    nodes.push(next);
                    current = next;
                }
                Path::new(nodes)
            })
            .collect()
    }

    /// Replace `fragment[..junction]` by `segment`, so the fragment becomes
    /// `segment ++ fragment[junction..]`
    pub fn splice(&mut self, fragment: &Path, junction: usize, segment: &[NodeIndex]) {
        for &n in &fragment.nodes()[..junction] {
            self.remove(n);
        }
        self.insert_chain(segment);
        self.set_parent(fragment.nodes()[junction], segment.last().copied());
    }

    /// Hang every head other than the root under a network parent: one
    /// already in the tree if possible (lowest index first), otherwise the
    /// least covered parent, which then becomes a head itself.
    ///
    /// Acyclicity of the network means no attachment can close a cycle, and
    /// every chain of new heads ends at the root or at a present node.
    pub fn attach_heads(&mut self, network: &Network, coverage: &Coverage) {
        loop {
            let heads: Vec<NodeIndex> = self
                .heads()
                .filter(|&h| network.in_degree(h) > 0)
                .collect();
            if heads.is_empty() {
                break;
            }

            for head in heads {
                let parents = network.predecessors(head);
                let parent = parents
                    .iter()
                    .copied()
                    .find(|&p| self.contains(p))
                    .or_else(|| {
                        parents
                            .iter()
                            .copied()
                            .min_by_key(|&p| (coverage.count(p), p.index()))
                    });
                if let Some(parent) = parent {
                    if !self.contains(parent) {
                        self.insert(parent, None);
                    }
                    trace!(parent = network.label(parent), head = network.label(head), "attaching head");
                    self.set_parent(head, Some(parent));
                }
            }
        }
    }

    /// Delete tips that are not network leaves until none remain
    pub fn prune_spurious_leaves(&mut self, network: &Network) {
        loop {
            let counts = self.child_counts();
            let spurious: Vec<NodeIndex> = (0..self.present.len())
                .map(NodeIndex::new)
                .filter(|&n| {
                    self.contains(n)
                        && counts[n.index()] == 0
                        && !network.is_leaf(n)
                        && !network.is_root(n)
                })
                .collect();
            if spurious.is_empty() {
                break;
            }
            for n in spurious {
                trace!(node = network.label(n), "pruning spurious leaf");
                self.remove(n);
            }
        }
    }

    pub fn repair(&mut self, network: &Network, coverage: &Coverage) {
        self.attach_heads(network, coverage);
        self.prune_spurious_leaves(network);
    }

    pub fn freeze(self, root: NodeIndex) -> RootedTree {
        RootedTree::from_parts(root, self.parent, self.present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net() -> Network {
        Network::from_edges([
            ("R", "A"),
            ("R", "B"),
            ("A", "X"),
            ("B", "X"),
            ("X", "L1"),
            ("B", "L2"),
        ])
        .unwrap()
    }

    fn path(network: &Network, labels: &[&str]) -> Path {
        Path::new(labels.iter().map(|l| network.node(l).unwrap()).collect())
    }

    #[test]
    fn test_fragments_follow_chains() {
        let network = net();
        let work = WorkingTree::from_paths(
            network.node_count(),
            &[path(&network, &["A", "X", "L1"]), path(&network, &["L2"])],
        );
        let fragments: Vec<Vec<&str>> = work.fragments().iter().map(|p| p.labels(&network)).collect();
        assert_eq!(fragments, vec![vec!["A", "X", "L1"], vec!["L2"]]);
    }

    #[test]
    fn test_splice_replaces_prefix() {
        let network = net();
        let fragment = path(&network, &["A", "X", "L1"]);
        let mut work = WorkingTree::from_paths(network.node_count(), [&fragment]);
        let segment = path(&network, &["R", "B"]);
        work.splice(&fragment, 1, segment.nodes());

        let fragments: Vec<Vec<&str>> = work.fragments().iter().map(|p| p.labels(&network)).collect();
        assert_eq!(fragments, vec![vec!["R", "B", "X", "L1"]]);
        assert!(!work.contains(network.node("A").unwrap()));
    }

    #[test]
    fn test_repair_builds_valid_tree() {
        let network = net();
        let coverage = Coverage::for_network(&network);
        let mut work = WorkingTree::from_paths(
            network.node_count(),
            &[path(&network, &["X", "L1"]), path(&network, &["L2"])],
        );
        work.repair(&network, &coverage);
        let tree = work.freeze(network.root());
        assert!(tree.validate(&network).is_ok());
    }

    #[test]
    fn test_prune_cascades() {
        let network = net();
        let mut work = WorkingTree::new(network.node_count());
        // R -> A -> X is a dead end without L1; R -> B -> L2 is kept
        work.insert_chain(path(&network, &["R", "A", "X"]).nodes());
        work.insert(network.node("B").unwrap(), network.node("R"));
        work.insert(network.node("L2").unwrap(), network.node("B"));
        work.prune_spurious_leaves(&network);

        let tree = work.freeze(network.root());
        let labels: Vec<&str> = tree.nodes().map(|n| network.label(n)).collect();
        assert_eq!(labels, vec!["R", "B", "L2"]);
    }
}
