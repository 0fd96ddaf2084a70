//! Tree covers of rooted phylogenetic networks

mod config;
mod coverage;
mod engine;
mod report;
mod working;

pub use config::CoverConfig;
pub use coverage::Coverage;
pub use engine::{enum_tree_cover, enum_tree_cover_with, TreeCoverEngine};
pub use report::CoverReport;

use crate::decompose::PathDecomposition;
use crate::network::Network;
use crate::render::Renderer;
use crate::tree::RootedTree;
use crate::{Result, TreespaceError};
use petgraph::graph::NodeIndex;

/// Trees produced by the engine together with the final coverage
#[derive(Clone, Debug)]
pub struct TreeCover {
    trees: Vec<RootedTree>,
    coverage: Coverage,
}

impl TreeCover {
    pub(crate) fn new(trees: Vec<RootedTree>, coverage: Coverage) -> Self {
        TreeCover { trees, coverage }
    }

    /// The trees, in the order they were built
    pub fn trees(&self) -> &[RootedTree] {
        &self.trees
    }

    /// Number of trees
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// True if no tree was built
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Usage count of every node
    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    /// True if every node is used by some tree
    pub fn is_complete(&self) -> bool {
        self.coverage.is_complete()
    }

    /// Labels of the nodes no tree uses
    pub fn uncovered_labels(&self, network: &Network) -> Vec<String> {
        self.coverage
            .uncovered()
            .map(|n| network.label(n).to_string())
            .collect()
    }

    /// The trees, or an error naming the nodes left uncovered
    pub fn into_trees(self, network: &Network) -> Result<Vec<RootedTree>> {
        if self.is_complete() {
            Ok(self.trees)
        } else {
            Err(TreespaceError::CoverageIncomplete(self.uncovered_labels(network)))
        }
    }

    /// Summarize the cover for reporting
    pub fn report(&self, network: &Network, decomposition: &PathDecomposition) -> CoverReport {
        CoverReport::new(network, decomposition, self)
    }

    /// Render every tree highlighted on top of the network
    pub fn render_all<R: Renderer>(&self, name: &str, network: &Network, renderer: &mut R) {
        for (i, tree) in self.trees.iter().enumerate() {
            let edges: Vec<(NodeIndex, NodeIndex)> = tree.edges().collect();
            renderer.render(&format!("{name}-tree-{i}"), network, &edges);
        }
    }
}
