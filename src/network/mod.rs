//! Rooted phylogenetic network stored as an arena of indexed nodes

mod parse;

use crate::{Result, TreespaceError};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// A rooted phylogenetic network
///
/// - Exactly one node has in-degree 0 (the root)
/// - The graph is acyclic
/// - Parent and child lists are sorted by node index, so every traversal
///   that walks them is deterministic
#[derive(Clone, Debug)]
pub struct Network {
    graph: DiGraph<String, ()>,
    root: NodeIndex,
    leaves: Vec<NodeIndex>,
    parents: Vec<Vec<NodeIndex>>,
    children: Vec<Vec<NodeIndex>>,
    labels: HashMap<String, NodeIndex>,
}

impl Network {
    /// Build a network from `(source, target)` label pairs
    ///
    /// Nodes are indexed in order of first appearance; repeated edges are
    /// collapsed into one.
    pub fn from_edges<I, S>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut graph = DiGraph::new();
        let mut labels = HashMap::new();

        for (source, target) in edges {
            let s = intern(&mut graph, &mut labels, source.as_ref());
            let t = intern(&mut graph, &mut labels, target.as_ref());
            graph.update_edge(s, t, ());
        }

        Self::from_graph(graph)
    }

    /// Validate a prebuilt graph and wrap it as a network
    ///
    /// Labels must be unique. Parallel edges are collapsed into one.
    pub fn from_graph(mut graph: DiGraph<String, ()>) -> Result<Self> {
        if graph.node_count() == 0 {
            return Err(TreespaceError::EmptyNetwork);
        }

        let mut labels = HashMap::with_capacity(graph.node_count());
        for n in graph.node_indices() {
            if labels.insert(graph[n].clone(), n).is_some() {
                return Err(TreespaceError::DuplicateLabel(graph[n].clone()));
            }
        }

        let mut seen = HashSet::new();
        graph.retain_edges(|g, e| g.edge_endpoints(e).map_or(false, |ends| seen.insert(ends)));

        let roots: Vec<NodeIndex> = graph
            .node_indices()
            .filter(|&n| graph.neighbors_directed(n, Direction::Incoming).next().is_none())
            .collect();
        let root = match roots.as_slice() {
            [] => return Err(TreespaceError::NoRoot),
            [root] => *root,
            _ => {
                return Err(TreespaceError::MultipleRoots(
                    roots.iter().map(|&n| graph[n].clone()).collect(),
                ))
            }
        };

        if is_cyclic_directed(&graph) {
            return Err(TreespaceError::Cyclic);
        }

        let parents = adjacency(&graph, Direction::Incoming);
        let children = adjacency(&graph, Direction::Outgoing);
        let leaves = graph
            .node_indices()
            .filter(|n| children[n.index()].is_empty())
            .collect();

        Ok(Network { graph, root, leaves, parents, children, labels })
    }

    /// The unique node of in-degree 0
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Nodes of out-degree 0, sorted by index
    pub fn leaves(&self) -> &[NodeIndex] {
        &self.leaves
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate over all nodes in index order
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Iterate over all edges, grouped by source in index order
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.nodes()
            .flat_map(move |u| self.children[u.index()].iter().map(move |&v| (u, v)))
    }

    /// Parents of a node, sorted by index
    pub fn predecessors(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.parents[node.index()]
    }

    /// Children of a node, sorted by index
    pub fn successors(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.children[node.index()]
    }

    /// Number of parents
    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.parents[node.index()].len()
    }

    /// Number of children
    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.children[node.index()].len()
    }

    /// Check whether `(source, target)` is an edge
    pub fn has_edge(&self, source: NodeIndex, target: NodeIndex) -> bool {
        self.children[source.index()].binary_search(&target).is_ok()
    }

    /// Check whether a node is the root
    pub fn is_root(&self, node: NodeIndex) -> bool {
        node == self.root
    }

    /// Check whether a node is a leaf
    pub fn is_leaf(&self, node: NodeIndex) -> bool {
        self.children[node.index()].is_empty()
    }

    /// In-degree at least 2 and out-degree exactly 1
    pub fn is_reticulation(&self, node: NodeIndex) -> bool {
        self.in_degree(node) >= 2 && self.out_degree(node) == 1
    }

    /// A non-leaf whose children are all reticulations
    pub fn is_omnian(&self, node: NodeIndex) -> bool {
        !self.is_leaf(node)
            && self.successors(node).iter().all(|&c| self.is_reticulation(c))
    }

    /// All reticulation nodes in index order
    pub fn reticulations(&self) -> Vec<NodeIndex> {
        self.nodes().filter(|&n| self.is_reticulation(n)).collect()
    }

    /// All omnian nodes in index order
    pub fn omnians(&self) -> Vec<NodeIndex> {
        self.nodes().filter(|&n| self.is_omnian(n)).collect()
    }

    /// Label of a node
    pub fn label(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    /// Look a node up by label
    pub fn node(&self, label: &str) -> Option<NodeIndex> {
        self.labels.get(label).copied()
    }

    /// Underlying petgraph graph
    pub fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// Copy of the network with one fresh leaf under each of `tips`
    ///
    /// New leaves are labelled `new-leaf-{k}`, skipping labels already taken.
    /// Existing node indices are unchanged.
    pub(crate) fn with_new_leaves(&self, tips: &[NodeIndex]) -> Network {
        let mut extended = self.clone();
        let mut k = 0;

        for &tip in tips {
            let label = loop {
                let candidate = format!("new-leaf-{k}");
                k += 1;
                if !extended.labels.contains_key(&candidate) {
                    break candidate;
                }
            };

            let leaf = extended.graph.add_node(label.clone());
            extended.graph.add_edge(tip, leaf, ());
            extended.labels.insert(label, leaf);
            extended.parents.push(vec![tip]);
            extended.children.push(Vec::new());
            // The new leaf has the highest index so far, keeping lists sorted
            extended.children[tip.index()].push(leaf);
            extended.leaves.retain(|&l| l != tip);
            extended.leaves.push(leaf);
        }

        extended
    }
}

fn intern(
    graph: &mut DiGraph<String, ()>,
    labels: &mut HashMap<String, NodeIndex>,
    label: &str,
) -> NodeIndex {
    if let Some(&idx) = labels.get(label) {
        return idx;
    }
    let idx = graph.add_node(label.to_string());
    labels.insert(label.to_string(), idx);
    idx
}

fn adjacency(graph: &DiGraph<String, ()>, dir: Direction) -> Vec<Vec<NodeIndex>> {
    graph
        .node_indices()
        .map(|n| {
            let mut adj: Vec<NodeIndex> = graph.neighbors_directed(n, dir).collect();
            adj.sort();
            adj.dedup();
            adj
        })
        .collect()
}
