#![allow(dead_code)]

use std::path::PathBuf;

use campuspaths_lib::{DirectedGraph, Edge};

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn script_fixture(name: &str) -> PathBuf {
    fixture_dir().join("scripts").join(name)
}

/// Build a graph of string nodes from `(origin, destination, weight)` triples.
pub fn string_graph(nodes: &[&str], edges: &[(&str, &str, u32)]) -> DirectedGraph<String, u32> {
    let mut graph = DirectedGraph::new();
    for node in nodes {
        graph.add_node(node.to_string()).expect("fresh node");
    }
    for (origin, destination, weight) in edges {
        graph
            .add_edge(
                &origin.to_string(),
                Edge::new(destination.to_string(), *weight),
            )
            .expect("valid edge");
    }
    graph
}
