//! Feature catalog CLI
//!
//! Runs a catalog of independent feature demonstrations, isolating each
//! failure, and reports every outcome.

use std::path::PathBuf;

use catalog::common::{config::Config, logging, paths, Result};
use catalog::{cli, commands::Commands};
use clap::Parser;

#[derive(Parser)]
#[command(name = "catalog", about = "Run feature demonstrations and report every outcome")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.then(paths::default_log_path).flatten());
    let log_guard = logging::init_cli(cli.verbose, log_file.as_deref());

    if let Err(e) = cli::dispatch(cli.command, &config) {
        eprintln!("Error: {e}");
        // Flush buffered file logs before exiting
        drop(log_guard);
        std::process::exit(e.exit_code());
    }
}
