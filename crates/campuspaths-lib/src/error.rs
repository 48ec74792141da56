use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the campus paths library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node is inserted into a graph that already contains it.
    #[error("graph already contains node {node}")]
    DuplicateNode { node: String },

    /// Raised when an edge with the same origin, destination, and payload
    /// already exists.
    #[error("graph already contains edge {origin} -> {destination} ({payload})")]
    DuplicateEdge {
        origin: String,
        destination: String,
        payload: String,
    },

    /// Raised when a graph operation references a node that was never added.
    #[error("unknown node {node}")]
    UnknownNode { node: String },

    /// Raised when a building short name could not be found on the campus map.
    #[error("unknown building: {name}{}", format_suggestions(.suggestions))]
    UnknownBuilding {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when two building records share a short name.
    #[error("duplicate building short name encountered: {name}")]
    DuplicateBuilding { name: String },

    /// Raised when a campus data file contains a malformed record.
    #[error("invalid campus data in {path}: {message}")]
    CampusData { path: PathBuf, message: String },

    /// Campus data directory could not be found at the resolved path.
    #[error("campus data not found at {path}")]
    DataNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for campus data")]
    ProjectDirsUnavailable,

    /// Raised when a graph script references a graph that was never created.
    #[error("unknown graph: {name}")]
    UnknownGraph { name: String },

    /// Raised when a graph script command has the wrong shape.
    #[error("{message}")]
    ScriptCommand { message: String },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
