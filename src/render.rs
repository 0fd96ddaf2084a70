//! Graphviz output for networks and the trees embedded in them

use crate::network::Network;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashSet;

/// Sink for rendered networks
pub trait Renderer {
    /// Render `network` under `name`, drawing the `highlight` edges emphasized
    fn render(&mut self, name: &str, network: &Network, highlight: &[(NodeIndex, NodeIndex)]);
}

/// Collects DOT documents in memory
#[derive(Clone, Debug, Default)]
pub struct DotRenderer {
    documents: Vec<(String, String)>,
}

impl DotRenderer {
    /// Create an empty renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered documents as `(name, dot)` pairs, in render order
    pub fn documents(&self) -> &[(String, String)] {
        &self.documents
    }
}

impl Renderer for DotRenderer {
    fn render(&mut self, name: &str, network: &Network, highlight: &[(NodeIndex, NodeIndex)]) {
        self.documents.push((name.to_string(), to_dot(network, highlight)));
    }
}

/// DOT text of `network`; highlighted edges are red, edges into
/// reticulations are dashed.
///
/// ```text
/// digraph {
///     0 [ label = "R" ]
///     1 [ label = "L" ]
///     0 -> 1 [ color=red, style=solid ]
/// }
/// ```
pub fn to_dot(network: &Network, highlight: &[(NodeIndex, NodeIndex)]) -> String {
    let highlight: HashSet<(NodeIndex, NodeIndex)> = highlight.iter().copied().collect();
    let config = &[Config::NodeNoLabel, Config::EdgeNoLabel];

    let edges = |_, e: EdgeReference<'_, ()>| {
        let color = match highlight.contains(&(e.source(), e.target())) {
            true => "color=red",
            false => "color=gray",
        };
        let style = match network.is_reticulation(e.target()) {
            true => "dashed",
            false => "solid",
        };
        format!("{color}, style={style} ")
    };
    let nodes = |_, (_i, label): (NodeIndex, &String)| format!("label = \"{label}\" ");

    let dot = format!("{:?}", Dot::with_attr_getters(network.graph(), config, &edges, &nodes));
    dot.replace("digraph {", "digraph {\n    rankdir=\"TB\"")
}
