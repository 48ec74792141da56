//! `route` command: shortest walking route between two buildings.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use campuspaths_cli::output::{write_route, OutputFormat, RouteView};
use campuspaths_lib::{resolve_data_dir, CampusMap};

/// Resolve the data directory and load the campus from it.
pub fn load_campus(data_dir: Option<&Path>) -> Result<CampusMap> {
    let dir = resolve_data_dir(data_dir).context("failed to resolve the campus data directory")?;
    CampusMap::load(&dir)
        .with_context(|| format!("failed to load campus data from {}", dir.display()))
}

pub fn handle_route(
    data_dir: Option<&Path>,
    format: OutputFormat,
    from: &str,
    to: &str,
) -> Result<()> {
    let campus = load_campus(data_dir)?;

    let Some(path) = campus.find_shortest_path(from, to)? else {
        bail!("no walking route exists from {from} to {to}");
    };

    // Both names resolved above, so these lookups cannot fail.
    let route = RouteView {
        origin: campus.long_name_for_short(from)?,
        destination: campus.long_name_for_short(to)?,
        path: &path,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_route(&mut out, format, &route).context("failed to write route")?;
    out.flush()?;
    Ok(())
}
