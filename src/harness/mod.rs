//! Case harness
//!
//! Registers named feature cases, runs them sequentially with per-case
//! failure isolation, and aggregates the outcomes into a [`RunReport`].

mod case;
mod report;
mod runner;
pub mod wrap;

pub use case::{Action, CaseResult, FeatureCase};
pub use report::{CaseFailure, CaseOutcome, CaseStatus, RunReport};
pub use runner::{CaseRunner, RunOptions};
