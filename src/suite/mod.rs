//! Suite files
//!
//! A suite is a YAML file naming which catalog cases to run, in which order,
//! and with which retry, timeout and timing wrappers.

mod config;
mod loader;

pub use config::*;
pub use loader::{build_runner, load_suite, parse_suite};
