//! Greedy tree cover construction
//!
//! Leaf-ending paths of the decomposition form a base forest. Each tree starts
//! from a copy of that forest and, round by round, splices prefixes of
//! omnian-ending paths onto fragment heads whenever doing so uses more
//! untouched nodes than it drops. The result is then repaired into a rooted
//! tree with exactly the network's leaves, and coverage is updated. Trees are
//! produced until every node has been used.

use super::working::WorkingTree;
use super::{Coverage, CoverConfig, TreeCover};
use crate::decompose::{Path, PathDecomposer, PathDecomposition};
use crate::network::Network;
use crate::tree::RootedTree;
use petgraph::graph::NodeIndex;
use tracing::{debug, instrument, trace, warn};

/// A candidate replacement of a fragment prefix by an omnian-path prefix
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Splice {
    /// Index into the engine's omnian paths
    path: usize,
    /// Last position of the omnian path that is kept
    cut: usize,
    /// Position on the fragment entered by the edge from `cut`; everything
    /// before it is dropped
    junction: usize,
    /// Untouched nodes gained from the omnian path
    gain: usize,
    /// Untouched nodes dropped from the fragment
    loss: usize,
}

impl Splice {
    fn score(&self) -> isize {
        self.gain as isize - self.loss as isize
    }

    /// Higher score wins, then higher gain; earlier candidates win ties
    fn beats(&self, other: &Splice) -> bool {
        (self.score(), self.gain) > (other.score(), other.gain)
    }
}

/// Builds a list of rooted trees that together use every network node
pub struct TreeCoverEngine<'n> {
    network: &'n Network,
    config: CoverConfig,
    base: WorkingTree,
    omnian_paths: Vec<Path>,
    coverage: Coverage,
}

impl<'n> TreeCoverEngine<'n> {
    /// Split the decomposition into the base forest (leaf-ending paths) and
    /// the splice candidates (omnian-ending paths)
    pub fn new(network: &'n Network, decomposition: &PathDecomposition, config: CoverConfig) -> Self {
        let base = WorkingTree::from_paths(network.node_count(), decomposition.leaf_paths(network));
        let omnian_paths: Vec<Path> = decomposition.omnian_paths(network).cloned().collect();
        debug!(
            leaf_paths = decomposition.paths().len() - omnian_paths.len(),
            omnian_paths = omnian_paths.len(),
            "initialized tree cover engine"
        );

        TreeCoverEngine {
            network,
            config,
            base,
            omnian_paths,
            coverage: Coverage::for_network(network),
        }
    }

    /// Usage counts so far
    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    /// Paths that do not end in a leaf
    pub fn omnian_paths(&self) -> &[Path] {
        &self.omnian_paths
    }

    /// Fragments of the base forest
    pub fn base_fragments(&self) -> Vec<Path> {
        self.base.fragments()
    }

    /// Build, repair and record one tree
    ///
    /// If the spliced tree would not use any untouched node while some remain,
    /// a tree routed through the lowest-indexed untouched node is built
    /// instead, so every call makes progress.
    #[instrument(level = "debug", skip(self), fields(covered = self.coverage.covered_count()))]
    pub fn build_one_tree(&mut self) -> RootedTree {
        let mut work = self.base.clone();
        let mut spliced = vec![false; self.omnian_paths.len()];
        let mut round = 0;

        while self.needs_more_work(&work) {
            if round == self.config.max_rounds {
                warn!(rounds = round, "splicing did not converge, repairing partial tree");
                break;
            }
            let splices = self.splice_round(&mut work, &mut spliced);
            round += 1;
            if splices == 0 {
                debug!(round, "no improving splice left");
                break;
            }
        }

        work.repair(self.network, &self.coverage);
        let mut tree = work.freeze(self.network.root());

        if self.coverage.fresh_in(&tree) == 0 {
            if let Some(target) = self.coverage.uncovered().next() {
                debug!(target = self.network.label(target), "spliced tree adds nothing, routing through untouched node");
                tree = self.targeted_tree(target).freeze(self.network.root());
            }
        }

        debug_assert!(tree.validate(self.network).is_ok());
        let fresh = self.coverage.record(&tree);
        debug!(nodes = tree.node_count(), fresh, "accepted tree");
        tree
    }

    /// Produce trees until every node is covered or the tree cap is hit
    pub fn enumerate(mut self) -> TreeCover {
        let cap = self.config.tree_cap(self.network);
        let mut trees = Vec::new();

        while !self.coverage.is_complete() {
            if trees.len() >= cap {
                warn!(
                    cap,
                    uncovered = self.coverage.len() - self.coverage.covered_count(),
                    "tree cap reached before full coverage"
                );
                break;
            }
            trees.push(self.build_one_tree());
        }

        TreeCover::new(trees, self.coverage)
    }

    /// True while the root is missing or some head could not simply be hung
    /// under a node already in the tree
    fn needs_more_work(&self, work: &WorkingTree) -> bool {
        let root = self.network.root();
        !work.contains(root)
            || work
                .heads()
                .any(|h| h != root && !work.has_parent_candidate(self.network, h))
    }

    /// One pass over the leaf-ending fragments; returns the number of splices
    fn splice_round(&self, work: &mut WorkingTree, spliced: &mut [bool]) -> usize {
        let root = self.network.root();
        let mut count = 0;

        for fragment in work.fragments() {
            if !fragment.is_leaf_ending(self.network) || fragment.contains(root) {
                continue;
            }
            // Repair can hang this one cheaply
            if work.has_parent_candidate(self.network, fragment.head()) {
                continue;
            }

            let Some(best) = self.best_splice(&fragment, spliced) else {
                continue;
            };
            if best.score() <= 0 {
                trace!(head = self.network.label(fragment.head()), score = best.score(), "no improving splice");
                continue;
            }

            let segment = &self.omnian_paths[best.path].nodes()[..=best.cut];
            debug_assert!(segment.iter().all(|&n| !work.contains(n)));
            debug!(
                from = self.network.label(segment[best.cut]),
                into = self.network.label(fragment.nodes()[best.junction]),
                gain = best.gain,
                loss = best.loss,
                "splicing omnian path"
            );
            work.splice(&fragment, best.junction, segment);
            spliced[best.path] = true;
            count += 1;
        }

        count
    }

    /// Best candidate edge from an unused omnian path into the fragment
    fn best_splice(&self, fragment: &Path, spliced: &[bool]) -> Option<Splice> {
        let mut best: Option<Splice> = None;

        for (path, omnian) in self.omnian_paths.iter().enumerate() {
            if spliced[path] {
                continue;
            }
            for (cut, &o) in omnian.nodes().iter().enumerate() {
                for &x in self.network.successors(o) {
                    let Some(junction) = fragment.position(x) else {
                        continue;
                    };
                    let candidate = Splice {
                        path,
                        cut,
                        junction,
                        gain: self.coverage.untouched_in(&omnian.nodes()[..=cut]),
                        loss: self.coverage.untouched_in(&fragment.nodes()[..junction]),
                    };
                    if best.map_or(true, |b| candidate.beats(&b)) {
                        best = Some(candidate);
                    }
                }
            }
        }

        best
    }

    /// Tree through `target`: a route down to a leaf along the least covered
    /// children, every network leaf added, then repaired
    fn targeted_tree(&self, target: NodeIndex) -> WorkingTree {
        let mut route = vec![target];
        let mut current = target;
        while let Some(&next) = self
            .network
            .successors(current)
            .iter()
            .min_by_key(|&&c| (self.coverage.count(c), c.index()))
        {
            route.push(next);
            current = next;
        }

        let mut work = WorkingTree::new(self.network.node_count());
        work.insert_chain(&route);
        for &leaf in self.network.leaves() {
            if !work.contains(leaf) {
                work.insert(leaf, None);
            }
        }
        work.repair(self.network, &self.coverage);
        work
    }
}

/// Decompose a network and cover it with trees using the default settings
pub fn enum_tree_cover(network: &Network) -> TreeCover {
    enum_tree_cover_with(network, CoverConfig::default())
}

/// Decompose a network and cover it with trees
pub fn enum_tree_cover_with(network: &Network, config: CoverConfig) -> TreeCover {
    let decomposition = PathDecomposer::new().decompose(network);
    trace!(
        omnian_tips = decomposition.spanning_tree(network).omnian_leaves().len(),
        "spanning tree of the decomposition"
    );
    TreeCoverEngine::new(network, &decomposition, config).enumerate()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three omnians A, B, C over two reticulations X, Y
    fn three_omnians() -> Network {
        Network::from_edges([
            ("R", "A"),
            ("R", "B"),
            ("R", "C"),
            ("A", "X"),
            ("A", "Y"),
            ("B", "X"),
            ("B", "Y"),
            ("C", "X"),
            ("C", "Y"),
            ("X", "L1"),
            ("Y", "L2"),
        ])
        .unwrap()
    }

    fn path(network: &Network, labels: &[&str]) -> Path {
        Path::new(labels.iter().map(|l| network.node(l).unwrap()).collect())
    }

    fn fixed_decomposition(network: &Network) -> PathDecomposition {
        PathDecomposition::from_paths(
            network,
            vec![
                path(network, &["R", "C"]),
                path(network, &["A", "X", "L1"]),
                path(network, &["B", "Y", "L2"]),
            ],
        )
    }

    fn labels(network: &Network, tree: &RootedTree) -> Vec<String> {
        tree.nodes().map(|n| network.label(n).to_string()).collect()
    }

    #[test]
    fn test_initialize_partitions_paths() {
        let net = three_omnians();
        let engine = TreeCoverEngine::new(&net, &fixed_decomposition(&net), CoverConfig::default());
        assert_eq!(engine.omnian_paths(), &[path(&net, &["R", "C"])]);
        assert_eq!(
            engine.base_fragments(),
            vec![path(&net, &["A", "X", "L1"]), path(&net, &["B", "Y", "L2"])]
        );
    }

    #[test]
    fn test_best_splice_prefers_gain_on_tie() {
        let net = three_omnians();
        let engine = TreeCoverEngine::new(&net, &fixed_decomposition(&net), CoverConfig::default());
        let fragment = path(&net, &["A", "X", "L1"]);
        let best = engine.best_splice(&fragment, &[false]).unwrap();
        // R -> A scores 1 - 0, C -> X scores 2 - 1; the latter uses more nodes
        assert_eq!(best, Splice { path: 0, cut: 1, junction: 1, gain: 2, loss: 1 });
        assert!(engine.best_splice(&fragment, &[true]).is_none());
    }

    #[test]
    fn test_first_tree_splices_omnian() {
        let net = three_omnians();
        let mut engine = TreeCoverEngine::new(&net, &fixed_decomposition(&net), CoverConfig::default());
        let tree = engine.build_one_tree();
        assert!(tree.validate(&net).is_ok());
        assert_eq!(labels(&net, &tree), vec!["R", "B", "C", "X", "Y", "L1", "L2"]);

        let second = engine.build_one_tree();
        assert!(second.validate(&net).is_ok());
        assert!(second.contains(net.node("A").unwrap()));
        assert!(engine.coverage().is_complete());
    }

    #[test]
    fn test_enumerate_stops_at_full_coverage() {
        let net = three_omnians();
        let cover = TreeCoverEngine::new(&net, &fixed_decomposition(&net), CoverConfig::default()).enumerate();
        assert_eq!(cover.len(), 2);
        assert!(cover.is_complete());
    }

    #[test]
    fn test_targeted_fallback_without_splicing() {
        let net = three_omnians();
        let config = CoverConfig::default().with_max_rounds(0);
        let cover = TreeCoverEngine::new(&net, &fixed_decomposition(&net), config).enumerate();

        assert!(cover.is_complete());
        assert_eq!(cover.len(), 2);
        let c = net.node("C").unwrap();
        assert!(!cover.trees()[0].contains(c));
        assert!(cover.trees()[1].contains(c));
        for tree in cover.trees() {
            assert!(tree.validate(&net).is_ok());
        }
    }

    #[test]
    fn test_tree_cap_reports_incomplete() {
        let net = three_omnians();
        let config = CoverConfig::default().with_max_trees(1);
        let cover = TreeCoverEngine::new(&net, &fixed_decomposition(&net), config).enumerate();
        assert_eq!(cover.len(), 1);
        assert!(!cover.is_complete());
        match cover.into_trees(&net) {
            Err(crate::TreespaceError::CoverageIncomplete(missing)) => assert_eq!(missing, vec!["A"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_enum_tree_cover_on_chain() {
        let net = Network::from_edges([("R", "A"), ("A", "L")]).unwrap();
        let cover = enum_tree_cover(&net);
        assert_eq!(cover.len(), 1);
        assert!(cover.trees()[0].is_spanning());
    }
}
