//! # Treespace: tree covers of rooted phylogenetic networks
//!
//! This library decomposes a rooted phylogenetic network (a DAG with a single
//! root, a fixed leaf set and reticulation nodes) into a small collection of
//! rooted trees that share the network's root and leaves and jointly use
//! every network node at least once.
//!
//! ## Features
//!
//! - **Network**: validated rooted DAG with arena-style node indices
//! - **Matching**: maximum bipartite matching, one component at a time
//! - **Decomposition**: vertex-disjoint path cover and rooted spanning tree
//! - **Tree cover**: greedy splice/repair engine driven by node coverage
//! - **Reporting**: serializable metrics and Graphviz rendering

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Rooted phylogenetic networks
pub mod network;

/// Maximum bipartite matching
pub mod matching;

/// Vertex-disjoint path decomposition and spanning trees
pub mod decompose;

/// Frozen rooted trees over network nodes
pub mod tree;

/// Tree cover engine and coverage tracking
pub mod cover;

/// Graph rendering
pub mod render;

// Re-export commonly used types
pub use network::Network;
pub use decompose::{Path, PathDecomposer, PathDecomposition, SpanningTree};
pub use tree::RootedTree;
pub use cover::{enum_tree_cover, Coverage, CoverConfig, CoverReport, TreeCover, TreeCoverEngine};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum TreespaceError {
    /// The network has no nodes at all
    #[error("Network has no nodes")]
    EmptyNetwork,

    /// Every node has a parent
    #[error("Network has no root: every node has an incoming edge")]
    NoRoot,

    /// More than one node has in-degree 0
    #[error("Network has multiple roots: {0:?}")]
    MultipleRoots(Vec<String>),

    /// Two nodes carry the same label
    #[error("Duplicate node label: {0}")]
    DuplicateLabel(String),

    /// The network contains a directed cycle
    #[error("Network contains a directed cycle")]
    Cyclic,

    /// A line of an edge list could not be read
    #[error("Malformed edge list at line {line}: {reason}")]
    MalformedEdgeList {
        /// One-based line number
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A tree violates one of the tree-cover invariants
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    /// The tree cap was reached before every node was used
    #[error("Coverage incomplete: nodes never used: {0:?}")]
    CoverageIncomplete(Vec<String>),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, TreespaceError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        cover::{enum_tree_cover, Coverage, CoverConfig, CoverReport, TreeCover, TreeCoverEngine},
        decompose::{Path, PathDecomposer, PathDecomposition, SpanningTree},
        matching::{BipartiteMatcher, HopcroftKarp, Matching, Side},
        network::Network,
        render::{DotRenderer, Renderer},
        tree::RootedTree,
        Result, TreespaceError,
    };
}
