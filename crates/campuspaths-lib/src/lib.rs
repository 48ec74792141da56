//! Campus paths library entry points.
//!
//! This crate exposes a generic directed multigraph, an immutable path type,
//! Dijkstra's shortest-path search over that graph, and the campus model that
//! loads building and path data into a graph keyed by map coordinates.
//! Higher-level consumers (CLI, HTTP service) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod campus;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod path;
pub mod pathfinder;
pub mod script;

pub use campus::{Building, CampusGraph, CampusMap, Distance, Point};
pub use dataset::{
    default_data_dir, resolve_data_dir, BuildingRecord, CampusDataPaths, PathRecord,
    DATA_DIR_ENV,
};
pub use error::{Error, Result};
pub use graph::{DirectedGraph, Edge};
pub use path::{Path, Segment};
pub use pathfinder::{dijkstra, EdgeWeight};
pub use script::{run_script, ScriptRunner};
