//! `buildings` command: list every building on the campus.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use campuspaths_cli::output::{write_buildings, OutputFormat};

use super::route::load_campus;

pub fn handle_buildings(data_dir: Option<&Path>, format: OutputFormat) -> Result<()> {
    let campus = load_campus(data_dir)?;
    let names = campus.building_names();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_buildings(&mut out, format, &names).context("failed to write building list")?;
    out.flush()?;
    Ok(())
}
