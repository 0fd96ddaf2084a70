//! Vertex-disjoint path decomposition of a network
//!
//! Every network node gets a source copy and a sink copy in a bipartite
//! graph, and every network edge `(u, v)` joins the source copy of `u` to the
//! sink copy of `v`. A maximum matching of that graph picks at most one
//! successor and one predecessor per node; chaining the matched pairs from the
//! nodes whose sink copy stayed unmatched yields paths that partition the
//! network. Source copies left unmatched, leaves excepted, count the leaves
//! that would have to be added to make the network tree-based.

mod path;
mod spanning;

pub use path::Path;
pub use spanning::SpanningTree;

use crate::matching::{maximum_matching, BipartiteMatcher, HopcroftKarp, Side};
use crate::network::Network;
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, instrument};

/// Node of the decomposition's bipartite graph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BipartiteNode {
    /// Network node this copy stands for
    pub origin: NodeIndex,
    /// `Left` for the source copy, `Right` for the sink copy
    pub side: Side,
}

/// Build the bipartite graph of a network
///
/// The source copy of network node `i` is node `2i`, its sink copy `2i + 1`.
pub fn bipartite_graph(network: &Network) -> UnGraph<BipartiteNode, ()> {
    let mut graph = UnGraph::with_capacity(2 * network.node_count(), network.edge_count());
    for origin in network.nodes() {
        graph.add_node(BipartiteNode { origin, side: Side::Left });
        graph.add_node(BipartiteNode { origin, side: Side::Right });
    }
    for (u, v) in network.edges() {
        graph.add_edge(source_copy(u), sink_copy(v), ());
    }
    graph
}

fn source_copy(node: NodeIndex) -> NodeIndex {
    NodeIndex::new(2 * node.index())
}

fn sink_copy(node: NodeIndex) -> NodeIndex {
    NodeIndex::new(2 * node.index() + 1)
}

/// Result of a path decomposition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathDecomposition {
    paths: Vec<Path>,
    missing_leaves: usize,
}

impl PathDecomposition {
    /// Wrap an externally built path cover
    ///
    /// The missing-leaf count is the number of paths that do not end in a
    /// leaf, which is what the matching construction reports as well.
    pub fn from_paths(network: &Network, paths: Vec<Path>) -> Self {
        let missing_leaves = paths.iter().filter(|p| !p.is_leaf_ending(network)).count();
        PathDecomposition { paths, missing_leaves }
    }

    /// The disjoint paths, ordered by head index
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Consume into the path list
    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }

    /// Leaves needed to make the network tree-based
    pub fn missing_leaves(&self) -> usize {
        self.missing_leaves
    }

    /// True if no leaves are missing
    pub fn is_tree_based(&self) -> bool {
        self.missing_leaves == 0
    }

    /// Paths ending in a network leaf
    pub fn leaf_paths<'a>(&'a self, network: &'a Network) -> impl Iterator<Item = &'a Path> + 'a {
        self.paths.iter().filter(move |p| p.is_leaf_ending(network))
    }

    /// Paths ending in a non-leaf
    pub fn omnian_paths<'a>(&'a self, network: &'a Network) -> impl Iterator<Item = &'a Path> + 'a {
        self.paths.iter().filter(move |p| !p.is_leaf_ending(network))
    }

    /// Join the paths into one rooted spanning tree
    pub fn spanning_tree(&self, network: &Network) -> SpanningTree {
        SpanningTree::build(network, &self.paths)
    }
}

/// Builds vertex-disjoint path covers from maximum matchings
#[derive(Clone, Debug, Default)]
pub struct PathDecomposer<M = HopcroftKarp> {
    matcher: M,
}

impl PathDecomposer {
    /// Decomposer backed by Hopcroft–Karp
    pub fn new() -> Self {
        PathDecomposer { matcher: HopcroftKarp }
    }
}

impl<M: BipartiteMatcher> PathDecomposer<M> {
    /// Decomposer backed by a custom matching strategy
    pub fn with_matcher(matcher: M) -> Self {
        PathDecomposer { matcher }
    }

    /// Partition the network into maximal vertex-disjoint paths
    #[instrument(level = "debug", skip_all, fields(nodes = network.node_count()))]
    pub fn decompose(&self, network: &Network) -> PathDecomposition {
        let graph = bipartite_graph(network);
        let matching = maximum_matching(&graph, |_, node| node.side, &self.matcher);

        let n = network.node_count();
        let mut successor: Vec<Option<NodeIndex>> = vec![None; n];
        let mut has_predecessor = vec![false; n];
        for (a, b) in matching.iter() {
            let (from, to) = (graph[a], graph[b]);
            if from.side == Side::Left {
                successor[from.origin.index()] = Some(to.origin);
                has_predecessor[to.origin.index()] = true;
            }
        }

        let missing_leaves = network
            .nodes()
            .filter(|&v| successor[v.index()].is_none() && !network.is_leaf(v))
            .count();

        // Each traversal consumes the pairs it walks
        let paths: Vec<Path> = network
            .nodes()
            .filter(|v| !has_predecessor[v.index()])
            .map(|start| {
                let mut nodes = vec![start];
                let mut current = start;
                while let Some(next) = successor[current.index()].take() {
                    nodes.push(next);
                    current = next;
                }
                Path::new(nodes)
            })
            .collect();

        debug!(
            paths = paths.len(),
            matched = matching.len(),
            missing_leaves,
            "decomposed network"
        );
        PathDecomposition { paths, missing_leaves }
    }
}
