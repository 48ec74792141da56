//! Fixtures for handler tests: the small campus under `docs/fixtures`.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::state::AppState;

/// Directory holding the fixture campus data files.
pub const TEST_FIXTURE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures");

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared state loaded from the fixture campus, cached after the first call.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let dir = fixture_dir();
            AppState::load(&dir)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", dir, e))
        })
        .clone()
}

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_DIR)
}

/// Short names in the fixture campus.
pub mod fixture_buildings {
    /// Mary Gates Hall at (0, 0).
    pub const MGH: &str = "MGH";

    /// Allen Center at (100, 0), 140 from MGH through the hub.
    pub const CSE: &str = "CSE";

    /// Suzzallo Library at (100, 100), reachable one way from CSE for 40.
    pub const SUZ: &str = "SUZ";

    /// Kane Hall at (0, 100).
    pub const KNE: &str = "KNE";

    /// Observatory with no paths at all.
    pub const ISO: &str = "ISO";
}
