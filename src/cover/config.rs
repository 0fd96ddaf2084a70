//! Tree cover engine configuration

use crate::network::Network;
use serde::{Deserialize, Serialize};

/// Safety bounds for the tree cover engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    /// Splice rounds per tree before giving up on convergence
    pub max_rounds: usize,
    /// Trees to produce before reporting incomplete coverage;
    /// `None` means the network's node count
    pub max_trees: Option<usize>,
}

impl Default for CoverConfig {
    fn default() -> Self {
        CoverConfig {
            max_rounds: 4,
            max_trees: None,
        }
    }
}

impl CoverConfig {
    /// Set the splice round cap
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the tree cap
    pub fn with_max_trees(mut self, trees: usize) -> Self {
        self.max_trees = Some(trees);
        self
    }

    /// Effective tree cap for a network
    pub fn tree_cap(&self, network: &Network) -> usize {
        self.max_trees.unwrap_or_else(|| network.node_count())
    }
}
