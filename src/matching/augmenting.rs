//! Simple augmenting-path matcher (Kuhn), one DFS per left node

use super::{flip_path, BipartiteMatcher, Frame};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, HashSet};

/// Kuhn's augmenting-path matching
///
/// Slower than [`super::HopcroftKarp`] on large graphs but easy to audit.
#[derive(Clone, Copy, Debug, Default)]
pub struct AugmentingPath;

impl BipartiteMatcher for AugmentingPath {
    fn match_component<N, E>(
        &self,
        graph: &UnGraph<N, E>,
        left: &[NodeIndex],
    ) -> Vec<(NodeIndex, NodeIndex)> {
        let mut mate = HashMap::new();
        for &u in left {
            let mut visited = HashSet::new();
            try_augment(graph, u, &mut mate, &mut visited);
        }
        left.iter()
            .filter_map(|&u| mate.get(&u).map(|&v| (u, v)))
            .collect()
    }
}

/// Search for an augmenting path from `root`, flipping it if found
fn try_augment<N, E>(
    graph: &UnGraph<N, E>,
    root: NodeIndex,
    mate: &mut HashMap<NodeIndex, NodeIndex>,
    visited: &mut HashSet<NodeIndex>,
) -> bool {
    let mut stack = vec![Frame::new(graph, root)];
    while let Some(top) = stack.last_mut() {
        let Some(v) = top.advance() else {
            stack.pop();
            continue;
        };
        if !visited.insert(v) {
            continue;
        }
        match mate.get(&v).copied() {
            None => {
                flip_path(mate, &stack);
                return true;
            }
            Some(w) => stack.push(Frame::new(graph, w)),
        }
    }
    false
}
