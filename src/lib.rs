//! Feature catalog - a harness for independent feature demonstrations
//!
//! Registers named cases, runs them sequentially with each failure contained
//! at its own boundary, and aggregates the outcomes into a report.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod common;
pub mod harness;
pub mod suite;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use harness::{CaseOutcome, CaseRunner, CaseStatus, FeatureCase, RunReport};
