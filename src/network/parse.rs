//! Plain edge-list input: one `source target` pair per line

use super::Network;
use crate::{Result, TreespaceError};

impl Network {
    /// Parse an edge list
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse_edge_list(text: &str) -> Result<Self> {
        let mut edges = Vec::new();

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(source), Some(target), None) => edges.push((source, target)),
                _ => {
                    return Err(TreespaceError::MalformedEdgeList {
                        line: i + 1,
                        reason: format!("expected `source target`, found {:?}", line),
                    })
                }
            }
        }

        Self::from_edges(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edge_list() {
        let text = "# scenario\nR A\nR L1\n\nA L2\n   A L3  \n";
        let net = Network::parse_edge_list(text).unwrap();
        assert_eq!(net.node_count(), 5);
        assert_eq!(net.leaves().len(), 3);
        assert_eq!(net.label(net.root()), "R");
    }

    #[test]
    fn test_malformed_line() {
        let err = Network::parse_edge_list("R A\nR A B\n").unwrap_err();
        match err {
            TreespaceError::MalformedEdgeList { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            Network::parse_edge_list("# nothing here\n"),
            Err(TreespaceError::EmptyNetwork)
        ));
    }
}
