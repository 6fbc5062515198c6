//! Suite loading
//!
//! Turns a YAML suite file into a ready-to-run [`CaseRunner`] built from
//! catalog cases.

use std::path::Path;
use std::time::Duration;

use crate::catalog;
use crate::common::config::CatalogConfig;
use crate::common::{Error, Result};
use crate::harness::{wrap, CaseRunner, FeatureCase, RunOptions};

use super::config::{Suite, SuiteCase};

/// Load and parse a suite file
pub fn load_suite(path: &Path) -> Result<Suite> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
    parse_suite(&content, path)
}

/// Parse suite YAML; `origin` is only used in error messages
pub fn parse_suite(content: &str, origin: &Path) -> Result<Suite> {
    let suite: Suite =
        serde_yaml::from_str(content).map_err(|e| Error::suite_parse(origin, e))?;

    if suite.cases.is_empty() {
        return Err(Error::suite_parse(origin, "suite lists no cases"));
    }
    Ok(suite)
}

/// Build a runner holding the suite's cases in suite order
///
/// A suite-level `timeout_ms` replaces the timeout in `options`.
pub fn build_runner(
    suite: &Suite,
    catalog_config: &CatalogConfig,
    mut options: RunOptions,
) -> Result<CaseRunner> {
    if let Some(ms) = suite.timeout_ms {
        options.case_timeout = Some(Duration::from_millis(ms));
    }

    let mut runner = CaseRunner::with_options(options);
    for entry in &suite.cases {
        let case = catalog::find(catalog_config, &entry.name)
            .ok_or_else(|| Error::UnknownCase(entry.name.clone()))?;
        runner.register_case(apply_wrappers(case, entry))?;
    }

    tracing::debug!("Suite '{}' prepared {} cases", suite.name, runner.len());
    Ok(runner)
}

/// Timeout innermost so it bounds each attempt, timing outermost so it
/// covers all of them
fn apply_wrappers(case: FeatureCase, entry: &SuiteCase) -> FeatureCase {
    let mut case = case;
    if let Some(ms) = entry.timeout_ms {
        case = case.wrap(|a| wrap::timeout(Duration::from_millis(ms), a));
    }
    if let Some(attempts) = entry.retry {
        case = case.wrap(|a| wrap::retry(attempts, a));
    }
    if entry.timed {
        let label = entry.name.clone();
        case = case.wrap(|a| wrap::timed(label, a));
    }
    case
}
