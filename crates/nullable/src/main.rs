//! nullable: inspect how values cross the storage boundary.
//!
//! - `coerce`: read a source literal into a destination shape, the way a
//!   nullable column is read
//! - `project`: read, then produce the payload a write would send
//! - `shapes`: list the destination shapes and their aliases

use anyhow::Result;
use clap::{Parser, Subcommand};
use nullable_logging::init_logging;
use std::process::ExitCode;
use tracing::debug;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "nullable",
    version,
    about = "Coerce and project values across the storage boundary"
)]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true, env = "NULLABLE_VERBOSE")]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true, env = "NULLABLE_JSON")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read a source value into a destination shape
    Coerce {
        /// Destination shape (e.g. int32, uint8, text, *float64, option<bytes>)
        shape: String,

        /// Source literal (e.g. null, int:-5, uint:7, real:1.5, text:42, bytes:fffe,
        /// ts:2024-01-01T00:00:00Z)
        source: String,
    },

    /// Read a source value, then produce its write payload
    Project {
        /// Destination shape the value is read into first
        shape: String,

        /// Source literal
        source: String,
    },

    /// List accepted destination shapes
    Shapes,
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Coerce { .. } => "coerce",
        Commands::Project { .. } => "project",
        Commands::Shapes => "shapes",
    }
}

fn run_command(cli: &Cli) -> Result<()> {
    debug!(command = command_name(&cli.command), json = cli.json, "running command");
    match &cli.command {
        Commands::Coerce { shape, source } => cli::convert::run_coerce(shape, source, cli.json),
        Commands::Project { shape, source } => cli::convert::run_project(shape, source, cli.json),
        Commands::Shapes => cli::convert::run_shapes(cli.json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli::config::log_config(cli.verbose, cli.json)) {
        eprintln!("Warning: {:#}", err);
    }

    match run_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if cli.json {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::from(1)
        }
    }
}
