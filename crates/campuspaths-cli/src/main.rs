use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use campuspaths_cli::output::OutputFormat;

mod commands;

use commands::buildings::handle_buildings;
use commands::route::handle_route;
use commands::script::handle_script;

#[derive(Parser, Debug)]
#[command(author, version, about = "Campus building lookups and walking routes")]
struct Cli {
    /// Override the campus data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every building as `short: long`, sorted by short name.
    Buildings,
    /// Compute the shortest walking route between two buildings.
    Route {
        /// Short name of the starting building.
        #[arg(long = "from")]
        from: String,
        /// Short name of the destination building.
        #[arg(long = "to")]
        to: String,
    },
    /// Run a graph script and print its transcript.
    Script {
        /// Script file; reads stdin when omitted.
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Buildings => handle_buildings(cli.data_dir.as_deref(), cli.format),
        Command::Route { from, to } => {
            handle_route(cli.data_dir.as_deref(), cli.format, &from, &to)
        }
        Command::Script { file } => handle_script(file.as_deref()),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
