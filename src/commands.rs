//! CLI command definitions
//!
//! Defines the clap commands for the catalog CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run catalog cases and report every outcome
    Run {
        /// Only run cases whose name contains this text (repeatable)
        #[arg(long, short)]
        filter: Vec<String>,

        /// Run the cases listed in a YAML suite file instead of the catalog
        #[arg(long, conflicts_with = "filter")]
        suite: Option<PathBuf>,

        /// Fail any case running longer than this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in cases
    #[command(alias = "ls")]
    List {
        /// Only list cases whose name contains this text (repeatable)
        #[arg(long, short)]
        filter: Vec<String>,

        /// Output names as a JSON array
        #[arg(long)]
        json: bool,
    },
}
