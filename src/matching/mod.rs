//! Maximum matching on undirected bipartite graphs
//!
//! The graph is split into connected components and each component is handed
//! to a [`BipartiteMatcher`]; the per-component results are unioned. Isolated
//! nodes and components without side-0 nodes simply contribute no pairs.

mod augmenting;
mod hopcroft_karp;

pub use augmenting::AugmentingPath;
pub use hopcroft_karp::HopcroftKarp;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// Partition label of a bipartite node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Side 0: the side matchers search from
    Left,
    /// Side 1
    Right,
}

/// A matching, stored from both sides
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Matching {
    mate: HashMap<NodeIndex, NodeIndex>,
}

impl Matching {
    /// Create an empty matching
    pub fn new() -> Self {
        Matching { mate: HashMap::new() }
    }

    /// Record `a` and `b` as partners
    pub fn insert(&mut self, a: NodeIndex, b: NodeIndex) {
        self.mate.insert(a, b);
        self.mate.insert(b, a);
    }

    /// Partner of a node, if matched
    pub fn partner(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.mate.get(&node).copied()
    }

    /// Check whether a node is matched
    pub fn is_matched(&self, node: NodeIndex) -> bool {
        self.mate.contains_key(&node)
    }

    /// Number of matched pairs
    pub fn len(&self) -> usize {
        self.mate.len() / 2
    }

    /// Check if nothing is matched
    pub fn is_empty(&self) -> bool {
        self.mate.is_empty()
    }

    /// Iterate over every entry; each pair appears once from each side
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.mate.iter().map(|(&a, &b)| (a, b))
    }
}

/// Strategy that finds a maximum matching inside one connected component
pub trait BipartiteMatcher {
    /// Match a connected component whose side-0 nodes are `left`
    ///
    /// Returns `(left, right)` pairs. Edges are assumed to join opposite sides.
    fn match_component<N, E>(
        &self,
        graph: &UnGraph<N, E>,
        left: &[NodeIndex],
    ) -> Vec<(NodeIndex, NodeIndex)>;
}

/// One left node on an explicit augmenting-path search stack
pub(crate) struct Frame {
    node: NodeIndex,
    /// Right neighbors not tried yet, next one last
    pending: Vec<NodeIndex>,
    /// Right neighbor the search went through
    via: Option<NodeIndex>,
}

impl Frame {
    pub(crate) fn new<N, E>(graph: &UnGraph<N, E>, node: NodeIndex) -> Self {
        let mut pending: Vec<NodeIndex> = graph.neighbors(node).collect();
        pending.reverse();
        Frame { node, pending, via: None }
    }

    pub(crate) fn node(&self) -> NodeIndex {
        self.node
    }

    /// Take the next neighbor to try and remember it as the way out
    pub(crate) fn advance(&mut self) -> Option<NodeIndex> {
        self.via = self.pending.pop();
        self.via
    }
}

/// Flip the alternating path held by `stack`: every left node takes the
/// right node it was left through
pub(crate) fn flip_path(mate: &mut HashMap<NodeIndex, NodeIndex>, stack: &[Frame]) {
    for frame in stack {
        if let Some(v) = frame.via {
            mate.insert(frame.node, v);
            mate.insert(v, frame.node);
        }
    }
}

/// Maximum matching of a whole bipartite graph, one component at a time
pub fn maximum_matching<N, E, M, F>(graph: &UnGraph<N, E>, side: F, matcher: &M) -> Matching
where
    M: BipartiteMatcher,
    F: Fn(NodeIndex, &N) -> Side,
{
    let mut components = UnionFind::new(graph.node_count());
    for edge in graph.edge_references() {
        components.union(edge.source().index(), edge.target().index());
    }

    let mut left_by_component: BTreeMap<usize, Vec<NodeIndex>> = BTreeMap::new();
    for n in graph.node_indices() {
        if side(n, &graph[n]) == Side::Left {
            left_by_component
                .entry(components.find(n.index()))
                .or_default()
                .push(n);
        }
    }

    let mut matching = Matching::new();
    for (component, left) in left_by_component {
        let pairs = matcher.match_component(graph, &left);
        trace!(component, left = left.len(), matched = pairs.len(), "matched component");
        for (u, v) in pairs {
            matching.insert(u, v);
        }
    }
    matching
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left nodes are named with a leading `l`
    fn bipartite(left: &[&str], right: &[&str], edges: &[(&str, &str)]) -> UnGraph<String, ()> {
        let mut graph = UnGraph::new_undirected();
        let mut ids = HashMap::new();
        for name in left.iter().chain(right) {
            ids.insert(name.to_string(), graph.add_node(name.to_string()));
        }
        for (a, b) in edges {
            graph.add_edge(ids[*a], ids[*b], ());
        }
        graph
    }

    fn side(_: NodeIndex, name: &String) -> Side {
        if name.starts_with('l') {
            Side::Left
        } else {
            Side::Right
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph: UnGraph<String, ()> = UnGraph::new_undirected();
        let matching = maximum_matching(&graph, side, &HopcroftKarp);
        assert!(matching.is_empty());
    }

    #[test]
    fn test_isolated_nodes() {
        let graph = bipartite(&["la"], &["rx"], &[]);
        let matching = maximum_matching(&graph, side, &HopcroftKarp);
        assert_eq!(matching.len(), 0);
    }

    #[test]
    fn test_greedy_trap() {
        // Matching la-rx first would strand lb
        let graph = bipartite(&["la", "lb"], &["rx", "ry"], &[("la", "rx"), ("la", "ry"), ("lb", "rx")]);
        for matching in [
            maximum_matching(&graph, side, &HopcroftKarp),
            maximum_matching(&graph, side, &AugmentingPath),
        ] {
            assert_eq!(matching.len(), 2);
            let lb = graph.node_indices().find(|&n| graph[n] == "lb").unwrap();
            let rx = graph.node_indices().find(|&n| graph[n] == "rx").unwrap();
            assert_eq!(matching.partner(lb), Some(rx));
            assert_eq!(matching.partner(rx), Some(lb));
        }
    }

    #[test]
    fn test_components_are_unioned() {
        let graph = bipartite(&["la", "lb"], &["rx", "ry"], &[("la", "rx"), ("lb", "ry")]);
        let matching = maximum_matching(&graph, side, &HopcroftKarp);
        assert_eq!(matching.len(), 2);
        assert_eq!(matching.iter().count(), 4);
    }

    #[test]
    fn test_matchers_agree() {
        let graph = bipartite(
            &["la", "lb", "lc", "ld"],
            &["rw", "rx", "ry", "rz"],
            &[
                ("la", "rw"),
                ("la", "rx"),
                ("lb", "rw"),
                ("lc", "rx"),
                ("lc", "ry"),
                ("ld", "ry"),
                ("ld", "rz"),
                ("lb", "rz"),
            ],
        );
        let hk = maximum_matching(&graph, side, &HopcroftKarp);
        let kuhn = maximum_matching(&graph, side, &AugmentingPath);
        assert_eq!(hk.len(), 4);
        assert_eq!(hk.len(), kuhn.len());
    }

    /// `l[i]` sees `r[i + 1]` before `r[i]`, so the last left node can only be
    /// matched through an alternating path across the whole graph
    fn staircase(n: usize) -> (UnGraph<(), ()>, Vec<NodeIndex>) {
        let mut graph = UnGraph::new_undirected();
        let l: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
        let r: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
        for i in 0..n {
            graph.add_edge(l[i], r[i], ());
            if i + 1 < n {
                graph.add_edge(l[i], r[i + 1], ());
            }
        }
        (graph, l)
    }

    #[test]
    fn test_very_long_augmenting_path() {
        let (graph, left) = staircase(50_000);
        assert_eq!(HopcroftKarp.match_component(&graph, &left).len(), 50_000);
        assert_eq!(AugmentingPath.match_component(&graph, &left).len(), 50_000);
    }
}
