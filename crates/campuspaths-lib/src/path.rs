use std::slice;

use serde::Serialize;

/// One traversed edge of a [`Path`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment<T> {
    start: T,
    end: T,
    cost: f64,
}

impl<T> Segment<T> {
    /// Node the segment leaves from.
    pub fn start(&self) -> &T {
        &self.start
    }

    /// Node the segment arrives at.
    pub fn end(&self) -> &T {
        &self.end
    }

    /// Cost of this segment alone.
    pub fn cost(&self) -> f64 {
        self.cost
    }
}

/// Immutable, append-only route through a graph.
///
/// A path starts at a single node with no segments and zero cost. Each call
/// to [`Path::extend`] produces a new path with one more segment; the original
/// value is left untouched so it can keep competing with its extensions during
/// a search.
#[derive(Debug, Clone, Serialize)]
pub struct Path<T> {
    start: T,
    cost: f64,
    #[serde(rename = "path")]
    segments: Vec<Segment<T>>,
}

impl<T: Clone> Path<T> {
    /// Create a path that sits on `start` without moving.
    pub fn new(start: T) -> Self {
        Self {
            start,
            cost: 0.0,
            segments: Vec::new(),
        }
    }

    /// Return a new path that continues from [`Path::end`] to `next` at
    /// `edge_cost`.
    ///
    /// `edge_cost` must be non-negative.
    #[must_use]
    pub fn extend(&self, next: T, edge_cost: f64) -> Self {
        debug_assert!(edge_cost >= 0.0, "edge cost must be non-negative");

        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(Segment {
            start: self.end().clone(),
            end: next,
            cost: edge_cost,
        });

        Self {
            start: self.start.clone(),
            cost: self.cost + edge_cost,
            segments,
        }
    }
}

impl<T> Path<T> {
    /// Node the path begins at.
    pub fn start(&self) -> &T {
        &self.start
    }

    /// Node most recently extended to, or the start node for a singleton.
    pub fn end(&self) -> &T {
        self.segments
            .last()
            .map(|segment| &segment.end)
            .unwrap_or(&self.start)
    }

    /// Accumulated cost of every segment.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for a path that never left its start node.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }

    /// Iterate over the segments in traversal order.
    pub fn iter(&self) -> slice::Iter<'_, Segment<T>> {
        self.segments.iter()
    }
}

// Exact comparison on purpose: segment costs are sums of caller-supplied
// weights, so equal routes produce bit-identical costs.
impl<T: PartialEq> PartialEq for Path<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.segments == other.segments
    }
}

impl<'a, T> IntoIterator for &'a Path<T> {
    type Item = &'a Segment<T>;
    type IntoIter = slice::Iter<'a, Segment<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_has_no_segments() {
        let path = Path::new("A");
        assert!(path.is_empty());
        assert_eq!(path.cost(), 0.0);
        assert_eq!(path.start(), &"A");
        assert_eq!(path.end(), &"A");
        assert_eq!(path.iter().count(), 0);
    }

    #[test]
    fn extend_leaves_original_untouched() {
        let base = Path::new("A");
        let longer = base.extend("B", 2.5);

        assert!(base.is_empty());
        assert_eq!(base.end(), &"A");
        assert_eq!(longer.len(), 1);
        assert_eq!(longer.end(), &"B");
        assert_eq!(longer.cost(), 2.5);
    }

    #[test]
    fn segments_are_contiguous_and_costs_add_up() {
        let path = Path::new("A").extend("B", 1.0).extend("C", 2.0).extend("D", 4.5);

        let segments: Vec<_> = path
            .iter()
            .map(|segment| (*segment.start(), *segment.end(), segment.cost()))
            .collect();
        assert_eq!(
            segments,
            vec![("A", "B", 1.0), ("B", "C", 2.0), ("C", "D", 4.5)]
        );
        assert_eq!(path.cost(), 7.5);
        assert_eq!(
            path.cost(),
            path.iter().map(Segment::cost).sum::<f64>()
        );
    }

    #[test]
    fn iteration_is_replayable() {
        let path = Path::new(1).extend(2, 1.0).extend(3, 1.0);
        let first: Vec<_> = (&path).into_iter().cloned().collect();
        let second: Vec<_> = path.segments().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn equality_compares_segments_and_start() {
        let a = Path::new("A").extend("B", 1.0);
        let b = Path::new("A").extend("B", 1.0);
        let cheaper = Path::new("A").extend("B", 0.5);

        assert_eq!(a, b);
        assert_ne!(a, cheaper);
        assert_ne!(Path::new("A"), Path::new("B"));
    }

    #[test]
    fn serializes_with_segment_list() {
        let path = Path::new("A").extend("B", 2.0);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "start": "A",
                "cost": 2.0,
                "path": [{"start": "A", "end": "B", "cost": 2.0}]
            })
        );
    }
}
