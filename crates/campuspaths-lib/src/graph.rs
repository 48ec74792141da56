use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use crate::error::{Error, Result};

/// Outgoing edge within a [`DirectedGraph`].
///
/// An edge does not know its origin; the origin is implied by the outgoing
/// set it is stored in. Two edges are equal when both their destination and
/// payload are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<T, E> {
    destination: T,
    payload: E,
}

impl<T, E> Edge<T, E> {
    /// Create an edge pointing at `destination` and carrying `payload`.
    pub fn new(destination: T, payload: E) -> Self {
        Self {
            destination,
            payload,
        }
    }

    /// Node this edge points to.
    pub fn destination(&self) -> &T {
        &self.destination
    }

    /// Data attached to this edge, e.g. a distance.
    pub fn payload(&self) -> &E {
        &self.payload
    }
}

/// Directed multigraph with hashable nodes and payload-carrying edges.
///
/// A pair of nodes may be linked by several edges as long as their payloads
/// differ. The graph only grows: nodes and edges can be added but never
/// removed.
#[derive(Debug, Clone)]
pub struct DirectedGraph<T, E> {
    adjacency: HashMap<T, HashSet<Edge<T, E>>>,
}

impl<T, E> Default for DirectedGraph<T, E> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }
}

impl<T, E> DirectedGraph<T, E>
where
    T: Eq + Hash + Clone + fmt::Debug,
    E: Eq + Hash + fmt::Debug,
{
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `node` with no outgoing edges.
    ///
    /// Returns [`Error::DuplicateNode`] and leaves the graph untouched when the
    /// node is already present.
    pub fn add_node(&mut self, node: T) -> Result<()> {
        match self.adjacency.entry(node) {
            Entry::Occupied(entry) => Err(Error::DuplicateNode {
                node: format!("{:?}", entry.key()),
            }),
            Entry::Vacant(entry) => {
                entry.insert(HashSet::new());
                Ok(())
            }
        }
    }

    /// Add `edge` to the outgoing set of `origin`.
    ///
    /// Both `origin` and the edge destination must already be nodes of the
    /// graph, and the `(origin, destination, payload)` triple must be new.
    pub fn add_edge(&mut self, origin: &T, edge: Edge<T, E>) -> Result<()> {
        if !self.adjacency.contains_key(&edge.destination) {
            return Err(Error::UnknownNode {
                node: format!("{:?}", edge.destination),
            });
        }

        let Some(outgoing) = self.adjacency.get_mut(origin) else {
            return Err(Error::UnknownNode {
                node: format!("{:?}", origin),
            });
        };

        if outgoing.contains(&edge) {
            return Err(Error::DuplicateEdge {
                origin: format!("{:?}", origin),
                destination: format!("{:?}", edge.destination),
                payload: format!("{:?}", edge.payload),
            });
        }

        outgoing.insert(edge);
        debug_assert!(self
            .adjacency
            .get(origin)
            .is_some_and(|edges| edges.iter().all(|e| self.adjacency.contains_key(&e.destination))));
        Ok(())
    }

    /// Whether `node` has been added to the graph.
    pub fn contains_node(&self, node: &T) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Read-only view over every node in the graph, in no particular order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.adjacency.keys()
    }

    /// Outgoing edges of `node`.
    ///
    /// `None` means the node is unknown; a known node without edges yields an
    /// empty set.
    pub fn outgoing_edges(&self, node: &T) -> Option<&HashSet<Edge<T, E>>> {
        self.adjacency.get(node)
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashSet::len).sum()
    }

    /// Audit the whole graph: every edge destination must be a known node.
    ///
    /// Walks every edge, so it is meant for tests and diagnostics rather than
    /// hot paths.
    pub fn check_invariants(&self) -> Result<()> {
        for edges in self.adjacency.values() {
            for edge in edges {
                if !self.adjacency.contains_key(&edge.destination) {
                    return Err(Error::UnknownNode {
                        node: format!("{:?}", edge.destination),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(nodes: &[&'static str]) -> DirectedGraph<&'static str, u32> {
        let mut graph = DirectedGraph::new();
        for node in nodes {
            graph.add_node(*node).expect("fresh node");
        }
        graph
    }

    #[test]
    fn new_graph_is_empty() {
        let graph: DirectedGraph<&str, u32> = DirectedGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.nodes().len(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut graph = graph_with(&["A"]);
        let error = graph.add_node("A").expect_err("duplicate node");
        assert!(matches!(error, Error::DuplicateNode { .. }));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn outgoing_edges_distinguishes_unknown_and_empty() {
        let graph = graph_with(&["A"]);
        assert!(graph.outgoing_edges(&"Z").is_none());
        let edges = graph.outgoing_edges(&"A").expect("known node");
        assert!(edges.is_empty());
    }

    #[test]
    fn parallel_edges_with_distinct_payloads_coexist() {
        let mut graph = graph_with(&["A", "B"]);
        graph.add_edge(&"A", Edge::new("B", 3)).unwrap();
        graph.add_edge(&"A", Edge::new("B", 7)).unwrap();

        let edges = graph.outgoing_edges(&"A").unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges.contains(&Edge::new("B", 3)));
        assert!(edges.contains(&Edge::new("B", 7)));
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let mut graph = graph_with(&["A", "B"]);
        graph.add_edge(&"A", Edge::new("B", 3)).unwrap();
        let error = graph
            .add_edge(&"A", Edge::new("B", 3))
            .expect_err("duplicate edge");
        assert!(matches!(error, Error::DuplicateEdge { .. }));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn edge_endpoints_must_exist() {
        let mut graph = graph_with(&["A"]);
        assert!(matches!(
            graph.add_edge(&"A", Edge::new("B", 1)),
            Err(Error::UnknownNode { .. })
        ));
        assert!(matches!(
            graph.add_edge(&"Q", Edge::new("A", 1)),
            Err(Error::UnknownNode { .. })
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn self_loops_are_allowed() {
        let mut graph = graph_with(&["A"]);
        graph.add_edge(&"A", Edge::new("A", 5)).unwrap();
        assert_eq!(graph.outgoing_edges(&"A").unwrap().len(), 1);
        graph.check_invariants().unwrap();
    }

    #[test]
    fn edge_equality_ignores_origin() {
        let mut graph = graph_with(&["A", "B", "C"]);
        graph.add_edge(&"A", Edge::new("C", 1)).unwrap();
        graph.add_edge(&"B", Edge::new("C", 1)).unwrap();

        let from_a = graph.outgoing_edges(&"A").unwrap().iter().next().unwrap();
        let from_b = graph.outgoing_edges(&"B").unwrap().iter().next().unwrap();
        assert_eq!(from_a, from_b);
        assert_eq!(from_a.destination(), &"C");
        assert_eq!(from_a.payload(), &1);
    }
}
