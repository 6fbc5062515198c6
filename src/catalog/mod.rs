//! Built-in feature demonstrations
//!
//! Every entry is an independent [`FeatureCase`] returning a JSON value that
//! describes what it demonstrated.

mod concurrency;
mod functions;
mod people;
mod text;

pub use concurrency::{fetch_data, gather_data, Fetched, Override};
pub use functions::{
    classify, fibonacci, fibonacci_memo, find_max, process_data, FibonacciSeq, NumberRange,
    Sample,
};
pub use people::{Container, Employee, Person, Priority, Status, ValidationError};
pub use text::{find_emails, merge_config, word_count, Point};

use crate::common::config::CatalogConfig;
use crate::common::Result;
use crate::harness::{CaseRunner, FeatureCase};

/// All built-in cases, in catalog order
pub fn builtin_cases(config: &CatalogConfig) -> Vec<FeatureCase> {
    let mut cases = people::cases();
    cases.extend(functions::cases(config));
    cases.extend(text::cases());
    cases.extend(concurrency::cases());
    cases
}

/// Look up a single built-in case by exact name
pub fn find(config: &CatalogConfig, name: &str) -> Option<FeatureCase> {
    builtin_cases(config).into_iter().find(|c| c.name() == name)
}

/// Whether `name` is selected by any of `filters` (substring match)
///
/// No filters selects everything.
pub fn matches_filters(name: &str, filters: &[String]) -> bool {
    filters.is_empty() || filters.iter().any(|f| name.contains(f.as_str()))
}

/// Register the built-in cases selected by `filters`, returning how many
pub fn register_builtin(
    runner: &mut CaseRunner,
    config: &CatalogConfig,
    filters: &[String],
) -> Result<usize> {
    let mut registered = 0;
    for case in builtin_cases(config) {
        if matches_filters(case.name(), filters) {
            runner.register_case(case)?;
            registered += 1;
        }
    }
    tracing::debug!("Registered {} built-in cases", registered);
    Ok(registered)
}
