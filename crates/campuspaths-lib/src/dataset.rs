//! Campus data files and their on-disk location.
//!
//! The campus ships as two tab-separated files with a header row:
//!
//! - `campus_buildings.tsv`: `shortName  longName  x  y`
//! - `campus_paths.tsv`: `x1  y1  x2  y2  distance`
//!
//! Lines starting with `#` are ignored.

use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// File name of the building table inside a data directory.
pub const BUILDINGS_FILENAME: &str = "campus_buildings.tsv";

/// File name of the path table inside a data directory.
pub const PATHS_FILENAME: &str = "campus_paths.tsv";

/// Environment variable overriding the campus data directory.
pub const DATA_DIR_ENV: &str = "CAMPUSPATHS_DATA_DIR";

/// One row of `campus_buildings.tsv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuildingRecord {
    #[serde(rename = "shortName")]
    pub short_name: String,
    #[serde(rename = "longName")]
    pub long_name: String,
    pub x: f64,
    pub y: f64,
}

/// One row of `campus_paths.tsv`: a walkable segment from `(x1, y1)` to
/// `(x2, y2)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PathRecord {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub distance: f64,
}

/// Locations of both campus data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusDataPaths {
    pub buildings: PathBuf,
    pub paths: PathBuf,
}

impl CampusDataPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            buildings: dir.join(BUILDINGS_FILENAME),
            paths: dir.join(PATHS_FILENAME),
        }
    }

    /// Fail with [`Error::DataNotFound`] unless both files exist.
    pub fn ensure_exists(&self) -> Result<()> {
        for path in [&self.buildings, &self.paths] {
            if !path.is_file() {
                return Err(Error::DataNotFound { path: path.clone() });
            }
        }
        Ok(())
    }
}

/// Resolve the default data directory using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("edu", "campuspaths", "campuspaths")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Pick the data directory: an explicit path wins, then
/// `CAMPUSPATHS_DATA_DIR`, then the platform default.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(value) = env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    default_data_dir()
}

/// Load every building row from a file.
pub fn load_buildings(path: &Path) -> Result<Vec<BuildingRecord>> {
    let file = fs::File::open(path).map_err(|_| Error::DataNotFound {
        path: path.to_path_buf(),
    })?;
    read_buildings(file, path)
}

/// Load every path row from a file.
pub fn load_paths(path: &Path) -> Result<Vec<PathRecord>> {
    let file = fs::File::open(path).map_err(|_| Error::DataNotFound {
        path: path.to_path_buf(),
    })?;
    read_paths(file, path)
}

/// Parse building rows from any reader. `source` is only used in error messages.
pub fn read_buildings<R: Read>(reader: R, source: &Path) -> Result<Vec<BuildingRecord>> {
    let buildings: Vec<BuildingRecord> = read_records(reader, source, |record: &BuildingRecord, line| {
        if record.short_name.is_empty() {
            return Err(format!("line {line}: empty building short name"));
        }
        if !record.x.is_finite() || !record.y.is_finite() {
            return Err(format!(
                "line {line}: building '{}' has non-finite coordinates",
                record.short_name
            ));
        }
        Ok(())
    })?;
    debug!(count = buildings.len(), source = %source.display(), "parsed building records");
    Ok(buildings)
}

/// Parse path rows from any reader. `source` is only used in error messages.
pub fn read_paths<R: Read>(reader: R, source: &Path) -> Result<Vec<PathRecord>> {
    let paths: Vec<PathRecord> = read_records(reader, source, |record: &PathRecord, line| {
        let coordinates = [record.x1, record.y1, record.x2, record.y2];
        if coordinates.iter().any(|value| !value.is_finite()) {
            return Err(format!("line {line}: non-finite coordinate"));
        }
        if !record.distance.is_finite() || record.distance < 0.0 {
            return Err(format!(
                "line {line}: distance must be a non-negative number, got {}",
                record.distance
            ));
        }
        Ok(())
    })?;
    debug!(count = paths.len(), source = %source.display(), "parsed path records");
    Ok(paths)
}

fn read_records<R, T, F>(reader: R, source: &Path, validate: F) -> Result<Vec<T>>
where
    R: Read,
    T: DeserializeOwned,
    F: Fn(&T, u64) -> std::result::Result<(), String>,
{
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(reader);

    let headers: StringRecord = reader
        .headers()
        .map_err(|err| data_error(source, format!("failed to read header row: {err}")))?
        .clone();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|err| data_error(source, err.to_string()))?;
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();
        let record: T = row
            .deserialize(Some(&headers))
            .map_err(|err| data_error(source, format!("line {line}: {err}")))?;
        validate(&record, line).map_err(|message| data_error(source, message))?;
        records.push(record);
    }
    Ok(records)
}

fn data_error(source: &Path, message: String) -> Error {
    Error::CampusData {
        path: source.to_path_buf(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> PathBuf {
        PathBuf::from("inline.tsv")
    }

    #[test]
    fn parses_building_rows() {
        let data = "shortName\tlongName\tx\ty\n\
                    # comment rows are skipped\n\
                    MGH\tMary Gates Hall\t0\t0\n\
                    CSE\tAllen Center\t100.5\t-2\n";
        let buildings = read_buildings(data.as_bytes(), &source()).unwrap();
        assert_eq!(buildings.len(), 2);
        assert_eq!(buildings[0].short_name, "MGH");
        assert_eq!(buildings[0].long_name, "Mary Gates Hall");
        assert_eq!(buildings[1].x, 100.5);
        assert_eq!(buildings[1].y, -2.0);
    }

    #[test]
    fn parses_path_rows() {
        let data = "x1\ty1\tx2\ty2\tdistance\n0\t0\t50\t50\t70.25\n";
        let paths = read_paths(data.as_bytes(), &source()).unwrap();
        assert_eq!(
            paths,
            vec![PathRecord {
                x1: 0.0,
                y1: 0.0,
                x2: 50.0,
                y2: 50.0,
                distance: 70.25,
            }]
        );
    }

    #[test]
    fn negative_distance_reports_line() {
        let data = "x1\ty1\tx2\ty2\tdistance\n0\t0\t1\t1\t1\n0\t0\t2\t2\t-3\n";
        let error = read_paths(data.as_bytes(), &source()).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("inline.tsv"), "{message}");
        assert!(message.contains("line 3"), "{message}");
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let data = "shortName\tlongName\tx\ty\nMGH\tMary Gates Hall\tabc\t0\n";
        let error = read_buildings(data.as_bytes(), &source()).unwrap_err();
        assert!(matches!(error, Error::CampusData { .. }));
        assert!(error.to_string().contains("line 2"));
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let data = "x1\ty1\tx2\ty2\tdistance\n0\t0\t1\n";
        let error = read_paths(data.as_bytes(), &source()).unwrap_err();
        assert!(matches!(error, Error::CampusData { .. }));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let dir = PathBuf::from("/tmp/campus");
        assert_eq!(resolve_data_dir(Some(&dir)).unwrap(), dir);
    }

    #[test]
    fn missing_files_are_reported() {
        let temp = tempfile::tempdir().unwrap();
        let paths = CampusDataPaths::in_dir(temp.path());
        let error = paths.ensure_exists().unwrap_err();
        assert!(matches!(error, Error::DataNotFound { .. }));
        assert!(matches!(
            load_buildings(&paths.buildings),
            Err(Error::DataNotFound { .. })
        ));
    }
}
