#![allow(dead_code)]

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use treespace::Network;

static TEST_SETUP: Once = Once::new();

/// Install a stderr subscriber once per test binary; `RUST_LOG` overrides the level
pub fn init_test_logging() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_filter(env_filter),
        );
        if !tracing::dispatcher::has_been_set() {
            subscriber.try_init().unwrap_or_else(|e| {
                eprintln!("Error: Failed to set up logging: {}", e);
            });
        }
    });
}

pub fn network(edges: &[(&str, &str)]) -> Network {
    Network::from_edges(edges.iter().copied()).unwrap()
}

/// Root with two leaves and no reticulation
pub fn cherry() -> Network {
    network(&[("R", "L1"), ("R", "L2")])
}

/// Tree-based network with one reticulation
pub fn tree_based() -> Network {
    network(&[
        ("R", "A"),
        ("R", "B"),
        ("A", "X"),
        ("B", "X"),
        ("A", "L1"),
        ("B", "L2"),
        ("X", "L3"),
    ])
}

/// Network whose omnians C, A and B all feed the reticulations X and Y
pub fn three_omnians() -> Network {
    network(&[
        ("R", "A"),
        ("R", "B"),
        ("R", "C"),
        ("A", "X"),
        ("B", "Y"),
        ("C", "X"),
        ("C", "Y"),
        ("X", "L1"),
        ("Y", "L2"),
    ])
}
