//! `script` command: run a graph script from a file or stdin.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use campuspaths_lib::ScriptRunner;

pub fn handle_script(file: Option<&Path>) -> Result<()> {
    let stdout = io::stdout();
    let mut runner = ScriptRunner::new(stdout.lock());

    match file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            runner
                .run(BufReader::new(file))
                .with_context(|| format!("failed to run script {}", path.display()))?;
        }
        None => {
            let stdin = io::stdin();
            runner
                .run(stdin.lock())
                .context("failed to run script from stdin")?;
        }
    }
    Ok(())
}
