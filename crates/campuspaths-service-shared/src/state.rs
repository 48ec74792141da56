//! Application state for the HTTP service.
//!
//! The campus map is loaded once at startup and shared read-only by every
//! handler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use campuspaths_lib::{CampusDataPaths, CampusMap, Error as LibError};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// One of the campus data files is missing.
    DataNotFound(PathBuf),

    /// The campus data files exist but could not be loaded.
    CampusLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataNotFound(path) => write!(f, "campus data not found: {}", path.display()),
            Self::CampusLoad(e) => write!(f, "failed to load campus: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CampusLoad(e) => Some(e),
            Self::DataNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::DataNotFound { path } => Self::DataNotFound(path),
            other => Self::CampusLoad(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cloning is cheap; the campus lives behind an `Arc`.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use campuspaths_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let campus = state.campus();
///     // ... query the campus
/// }
///
/// let state = AppState::load("path/to/campus-data").unwrap();
/// let app = Router::new()
///     .route("/buildings", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    campus: CampusMap,
}

impl AppState {
    /// Load the campus from the two data files inside `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let data_dir = data_dir.as_ref();
        CampusDataPaths::in_dir(data_dir).ensure_exists()?;

        tracing::info!(path = %data_dir.display(), "loading campus");
        let campus = CampusMap::load(data_dir)?;
        tracing::info!(
            buildings = campus.building_count(),
            nodes = campus.graph().node_count(),
            edges = campus.graph().edge_count(),
            "campus loaded successfully"
        );

        Ok(Self::from_campus(campus))
    }

    /// Wrap an already built campus.
    pub fn from_campus(campus: CampusMap) -> Self {
        Self {
            inner: Arc::new(AppStateInner { campus }),
        }
    }

    /// Access the loaded campus.
    pub fn campus(&self) -> &CampusMap {
        &self.inner.campus
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("building_count", &self.inner.campus.building_count())
            .field("node_count", &self.inner.campus.graph().node_count())
            .finish()
    }
}
