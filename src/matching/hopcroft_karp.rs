//! Hopcroft–Karp: phases of layered BFS followed by DFS augmentation

use super::{flip_path, BipartiteMatcher, Frame};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, VecDeque};

/// Hopcroft–Karp maximum matching
#[derive(Clone, Copy, Debug, Default)]
pub struct HopcroftKarp;

impl BipartiteMatcher for HopcroftKarp {
    fn match_component<N, E>(
        &self,
        graph: &UnGraph<N, E>,
        left: &[NodeIndex],
    ) -> Vec<(NodeIndex, NodeIndex)> {
        let mut state = Phase {
            graph,
            left,
            mate: HashMap::new(),
            layer: HashMap::new(),
        };

        while state.build_layers() {
            let mut augmented = false;
            for &u in left {
                if !state.mate.contains_key(&u) && state.augment(u) {
                    augmented = true;
                }
            }
            if !augmented {
                break;
            }
        }

        left.iter()
            .filter_map(|&u| state.mate.get(&u).map(|&v| (u, v)))
            .collect()
    }
}

struct Phase<'g, N, E> {
    graph: &'g UnGraph<N, E>,
    left: &'g [NodeIndex],
    mate: HashMap<NodeIndex, NodeIndex>,
    /// BFS layer of left nodes; absent means unreached
    layer: HashMap<NodeIndex, usize>,
}

impl<N, E> Phase<'_, N, E> {
    /// Layer the left side from the free left nodes; true if a free right
    /// node is reachable by an alternating path
    fn build_layers(&mut self) -> bool {
        let mut queue = VecDeque::new();
        self.layer.clear();
        for &u in self.left {
            if !self.mate.contains_key(&u) {
                self.layer.insert(u, 0);
                queue.push_back(u);
            }
        }

        let mut found_free = false;
        while let Some(u) = queue.pop_front() {
            let depth = self.layer[&u];
            for v in self.graph.neighbors(u) {
                match self.mate.get(&v) {
                    None => found_free = true,
                    Some(&w) => {
                        if !self.layer.contains_key(&w) {
                            self.layer.insert(w, depth + 1);
                            queue.push_back(w);
                        }
                    }
                }
            }
        }
        found_free
    }

    /// Depth-first search along the layers from a free left node, with an
    /// explicit stack so path length is not bounded by the call stack
    fn augment(&mut self, root: NodeIndex) -> bool {
        if !self.layer.contains_key(&root) {
            return false;
        }

        let mut stack = vec![Frame::new(self.graph, root)];
        while let Some(top) = stack.last_mut() {
            let u = top.node();
            let Some(v) = top.advance() else {
                // Dead end for the rest of this phase
                self.layer.remove(&u);
                stack.pop();
                continue;
            };

            match self.mate.get(&v).copied() {
                None => {
                    flip_path(&mut self.mate, &stack);
                    return true;
                }
                Some(w) => {
                    let depth = self.layer[&u];
                    if self.layer.get(&w) == Some(&(depth + 1)) {
                        stack.push(Frame::new(self.graph, w));
                    }
                }
            }
        }
        false
    }
}
