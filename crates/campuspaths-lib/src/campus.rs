use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path as FsPath;

use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dataset::{load_buildings, load_paths, BuildingRecord, CampusDataPaths, PathRecord};
use crate::error::{Error, Result};
use crate::graph::{DirectedGraph, Edge};
use crate::path::Path;
use crate::pathfinder::dijkstra;

/// Minimum Jaro-Winkler similarity for a building to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Maximum number of suggestions attached to an unknown-building error.
const MAX_SUGGESTIONS: usize = 3;

/// Distance payload stored on campus edges.
pub type Distance = OrderedFloat<f64>;

/// Graph of walkable campus segments keyed by their endpoints.
pub type CampusGraph = DirectedGraph<Point, Distance>;

/// Location on the campus map.
///
/// Coordinates compare exactly; `-0.0` and `0.0` are the same point.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.x) == OrderedFloat(other.x) && OrderedFloat(self.y) == OrderedFloat(other.y)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.x).hash(state);
        OrderedFloat(self.y).hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.0}, {:.0})", self.x, self.y)
    }
}

/// Building with a short and a long name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building {
    pub short_name: String,
    pub long_name: String,
    pub location: Point,
}

/// In-memory campus: named buildings plus the graph of walkable segments.
///
/// Built once and then only read, so it can be shared across threads behind
/// an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct CampusMap {
    graph: CampusGraph,
    buildings: BTreeMap<String, Building>,
}

impl CampusMap {
    /// Load both campus data files from `data_dir`.
    pub fn load(data_dir: &FsPath) -> Result<Self> {
        let files = CampusDataPaths::in_dir(data_dir);
        files.ensure_exists()?;
        info!(dir = %data_dir.display(), "loading campus data");

        let buildings = load_buildings(&files.buildings)?;
        let paths = load_paths(&files.paths)?;
        Self::from_records(buildings, paths)
    }

    /// Build the campus from already decoded records.
    ///
    /// Every path adds its endpoints (once) and one directed edge. Buildings
    /// that no path touches still become nodes so they remain valid query
    /// endpoints.
    pub fn from_records(buildings: Vec<BuildingRecord>, paths: Vec<PathRecord>) -> Result<Self> {
        let mut graph = CampusGraph::new();
        let mut skipped = 0usize;

        for record in &paths {
            if !record.distance.is_finite() || record.distance < 0.0 {
                warn!(distance = record.distance, "skipping path with invalid distance");
                skipped += 1;
                continue;
            }

            let start = Point::new(record.x1, record.y1);
            let end = Point::new(record.x2, record.y2);
            ensure_node(&mut graph, start)?;
            ensure_node(&mut graph, end)?;

            match graph.add_edge(&start, Edge::new(end, OrderedFloat(record.distance))) {
                Ok(()) => {}
                Err(Error::DuplicateEdge { .. }) => {
                    warn!(%start, %end, distance = record.distance, "skipping duplicate path");
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        let mut by_name = BTreeMap::new();
        for record in buildings {
            let location = Point::new(record.x, record.y);
            if !graph.contains_node(&location) {
                warn!(
                    building = %record.short_name,
                    %location,
                    "building is not connected to any path"
                );
                graph.add_node(location)?;
            }

            if by_name.contains_key(&record.short_name) {
                return Err(Error::DuplicateBuilding {
                    name: record.short_name,
                });
            }

            by_name.insert(
                record.short_name.clone(),
                Building {
                    short_name: record.short_name,
                    long_name: record.long_name,
                    location,
                },
            );
        }

        debug!(
            buildings = by_name.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            skipped,
            "campus graph built"
        );

        Ok(Self {
            graph,
            buildings: by_name,
        })
    }

    /// True iff `short_name` names a building on this campus.
    pub fn short_name_exists(&self, short_name: &str) -> bool {
        self.buildings.contains_key(short_name)
    }

    /// Look up a building by short name.
    pub fn building(&self, short_name: &str) -> Option<&Building> {
        self.buildings.get(short_name)
    }

    /// Long name for a short name, or [`Error::UnknownBuilding`] with
    /// suggestions.
    pub fn long_name_for_short(&self, short_name: &str) -> Result<&str> {
        self.require_building(short_name)
            .map(|building| building.long_name.as_str())
    }

    /// Short name to long name for every building, sorted by short name.
    pub fn building_names(&self) -> BTreeMap<&str, &str> {
        self.buildings
            .values()
            .map(|b| (b.short_name.as_str(), b.long_name.as_str()))
            .collect()
    }

    /// Buildings in short-name order.
    pub fn buildings(&self) -> impl Iterator<Item = &Building> + '_ {
        self.buildings.values()
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    /// Read-only access to the underlying graph.
    pub fn graph(&self) -> &CampusGraph {
        &self.graph
    }

    /// Shortest walking path between two buildings.
    ///
    /// Unknown short names are errors; `Ok(None)` means both buildings exist
    /// but no route connects them.
    pub fn find_shortest_path(&self, start: &str, dest: &str) -> Result<Option<Path<Point>>> {
        let from = self.require_building(start)?;
        let to = self.require_building(dest)?;

        let path = dijkstra(&self.graph, &from.location, &to.location);
        match &path {
            Some(found) => debug!(
                from = start,
                to = dest,
                segments = found.len(),
                cost = found.cost(),
                "shortest path found"
            ),
            None => debug!(from = start, to = dest, "no path between buildings"),
        }
        Ok(path)
    }

    fn require_building(&self, short_name: &str) -> Result<&Building> {
        self.buildings
            .get(short_name)
            .ok_or_else(|| Error::UnknownBuilding {
                name: short_name.to_string(),
                suggestions: self.fuzzy_building_matches(short_name, MAX_SUGGESTIONS),
            })
    }

    /// Closest short names to `name`, best match first.
    pub fn fuzzy_building_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .buildings
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

fn ensure_node(graph: &mut CampusGraph, point: Point) -> Result<()> {
    if graph.contains_node(&point) {
        Ok(())
    } else {
        graph.add_node(point)
    }
}
