//! Suite file configuration types
//!
//! Defines the data structures for deserializing YAML suite files.

use serde::Deserialize;

/// A suite loaded from a YAML file
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Suite {
    /// Name of the suite
    pub name: String,
    /// Optional description of what the suite covers
    pub description: Option<String>,
    /// Timeout applied to every case in the suite, in milliseconds
    pub timeout_ms: Option<u64>,
    /// Catalog cases to run, in order
    pub cases: Vec<SuiteCase>,
}

/// One catalog case selected by a suite
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct SuiteCase {
    /// Exact catalog case name
    pub name: String,
    /// Attempts before the case is recorded as failed
    pub retry: Option<u32>,
    /// Timeout for each attempt, in milliseconds
    pub timeout_ms: Option<u64>,
    /// Log how long the case took
    #[serde(default)]
    pub timed: bool,
}
