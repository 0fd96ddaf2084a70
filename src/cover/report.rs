//! Serializable summary of a decomposition and its tree cover

use super::TreeCover;
use crate::decompose::PathDecomposition;
use crate::network::Network;
use serde::Serialize;
use std::collections::BTreeMap;

/// Metrics of one analyzed network
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CoverReport {
    /// Number of nodes
    pub nodes: usize,
    /// Number of edges
    pub edges: usize,
    /// Number of leaves
    pub leaves: usize,
    /// Number of reticulations
    pub reticulations: usize,
    /// Number of omnians
    pub omnians: usize,
    /// Leaves to add for the network to become tree-based
    pub missing_leaves: usize,
    /// Whether no leaves are missing
    pub tree_based: bool,
    /// Number of trees in the cover
    pub tree_count: usize,
    /// Whether every node is covered
    pub complete: bool,
    /// Edges of every tree as label pairs
    pub trees: Vec<Vec<(String, String)>>,
    /// Usage count per node label
    pub coverage: BTreeMap<String, u32>,
}

impl CoverReport {
    /// Collect the metrics
    pub fn new(network: &Network, decomposition: &PathDecomposition, cover: &TreeCover) -> Self {
        CoverReport {
            nodes: network.node_count(),
            edges: network.edge_count(),
            leaves: network.leaves().len(),
            reticulations: network.reticulations().len(),
            omnians: network.omnians().len(),
            missing_leaves: decomposition.missing_leaves(),
            tree_based: decomposition.is_tree_based(),
            tree_count: cover.len(),
            complete: cover.is_complete(),
            trees: cover.trees().iter().map(|t| t.edge_labels(network)).collect(),
            coverage: cover.coverage().by_label(network),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
