use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use std::hash::Hash;

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::graph::DirectedGraph;
use crate::path::Path;

/// Edge payloads that can be read as a non-negative traversal cost.
pub trait EdgeWeight {
    fn weight(&self) -> f64;
}

impl EdgeWeight for f64 {
    fn weight(&self) -> f64 {
        *self
    }
}

impl EdgeWeight for f32 {
    fn weight(&self) -> f64 {
        f64::from(*self)
    }
}

impl EdgeWeight for u32 {
    fn weight(&self) -> f64 {
        f64::from(*self)
    }
}

impl EdgeWeight for u64 {
    fn weight(&self) -> f64 {
        *self as f64
    }
}

impl EdgeWeight for OrderedFloat<f64> {
    fn weight(&self) -> f64 {
        self.0
    }
}

/// Find the cheapest path from `start` to `dest` with Dijkstra's algorithm.
///
/// The search keeps whole candidate paths in the priority queue, so the
/// winning route needs no reconstruction. A node is settled the first time a
/// path ending there is popped; later, more expensive paths to it are
/// discarded.
///
/// Returns `None` when `dest` cannot be reached, and a zero-segment path when
/// `start == dest`.
///
/// Every edge weight must be non-negative. This is not checked; negative
/// weights make the result meaningless.
///
/// # Panics
///
/// Panics if `start` or `dest` is not a node of `graph`.
pub fn dijkstra<T, E>(graph: &DirectedGraph<T, E>, start: &T, dest: &T) -> Option<Path<T>>
where
    T: Eq + Hash + Clone + fmt::Debug,
    E: Eq + Hash + fmt::Debug + EdgeWeight,
{
    assert!(
        graph.contains_node(start),
        "start node {start:?} is not in the graph"
    );
    assert!(
        graph.contains_node(dest),
        "destination node {dest:?} is not in the graph"
    );

    let mut settled: HashSet<T> = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut pushed: u64 = 0;

    queue.push(QueueEntry::new(Path::new(start.clone()), pushed));

    while let Some(QueueEntry { path, .. }) = queue.pop() {
        if path.end() == dest {
            debug!(
                settled = settled.len(),
                pushed,
                segments = path.len(),
                cost = path.cost(),
                "dijkstra reached destination"
            );
            return Some(path);
        }

        if !settled.insert(path.end().clone()) {
            continue;
        }

        let Some(edges) = graph.outgoing_edges(path.end()) else {
            continue;
        };

        for edge in edges {
            if settled.contains(edge.destination()) {
                continue;
            }
            pushed += 1;
            let next = path.extend(edge.destination().clone(), edge.payload().weight());
            queue.push(QueueEntry::new(next, pushed));
        }
    }

    debug!(
        settled = settled.len(),
        pushed, "dijkstra exhausted the frontier without reaching destination"
    );
    None
}

/// Candidate path ordered so that `BinaryHeap` pops the cheapest first.
///
/// Equal costs fall back to insertion order.
#[derive(Debug)]
struct QueueEntry<T> {
    path: Path<T>,
    sequence: u64,
}

impl<T> QueueEntry<T> {
    fn new(path: Path<T>, sequence: u64) -> Self {
        Self { path, sequence }
    }
}

impl<T> PartialEq for QueueEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for QueueEntry<T> {}

impl<T> Ord for QueueEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .path
            .cost()
            .total_cmp(&self.path.cost())
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for QueueEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
