//! Sequential case runner
//!
//! Executes registered cases one at a time, in registration order. Every case
//! runs behind its own isolation boundary: a returned error or a panic becomes
//! a failed [`CaseOutcome`] and the run moves on to the next case.

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::common::{Error, Result};

use super::case::FeatureCase;
use super::report::{CaseFailure, CaseOutcome, RunReport};
use super::wrap;

/// Execution options applied to every case
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Fail any case that runs longer than this
    pub case_timeout: Option<Duration>,
}

/// Owns an ordered sequence of cases and runs them
#[derive(Debug, Default)]
pub struct CaseRunner {
    cases: Vec<FeatureCase>,
    options: RunOptions,
}

impl CaseRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RunOptions) -> Self {
        Self {
            cases: Vec::new(),
            options,
        }
    }

    /// Register a closure under `name`
    pub fn register<F, T>(&mut self, name: impl Into<String>, action: F) -> Result<()>
    where
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
        T: Serialize,
    {
        self.register_case(FeatureCase::new(name, action))
    }

    /// Append a case, rejecting blank or already registered names
    ///
    /// On error the runner is left exactly as it was.
    pub fn register_case(&mut self, case: FeatureCase) -> Result<()> {
        if case.name().trim().is_empty() {
            return Err(Error::InvalidName(case.name().to_string()));
        }
        if self.contains(case.name()) {
            return Err(Error::DuplicateName(case.name().to_string()));
        }

        tracing::debug!("Registered case '{}'", case.name());
        self.cases.push(case);
        Ok(())
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Registered cases in registration order
    pub fn cases(&self) -> &[FeatureCase] {
        &self.cases
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cases.iter().any(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(FeatureCase::name)
    }

    /// Run every case and collect the outcomes
    pub fn run_all(&self) -> RunReport {
        self.run_with(|_, _| {})
    }

    /// Run every case, calling `observer` with each outcome as it is recorded
    pub fn run_with<F>(&self, mut observer: F) -> RunReport
    where
        F: FnMut(usize, &CaseOutcome),
    {
        tracing::info!("Running {} cases", self.cases.len());
        let mut report = RunReport::with_capacity(self.cases.len());

        for (index, case) in self.cases.iter().enumerate() {
            let outcome = self.run_case(case);
            observer(index, &outcome);
            report.record(outcome);
        }

        tracing::info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            "Run complete"
        );
        report
    }

    fn run_case(&self, case: &FeatureCase) -> CaseOutcome {
        let span = tracing::info_span!("case", name = %case.name());
        let _enter = span.enter();

        let action = match self.options.case_timeout {
            Some(limit) => wrap::timeout(limit, case.action()),
            None => case.action(),
        };

        let start = Instant::now();
        let result = panic::catch_unwind(AssertUnwindSafe(|| action()));
        let elapsed = start.elapsed();

        let outcome = match result {
            Ok(Ok(value)) => CaseOutcome::passed(case.name(), value, elapsed),
            Ok(Err(e)) => CaseOutcome::failed(case.name(), CaseFailure::from_error(&e), elapsed),
            Err(payload) => {
                CaseOutcome::failed(case.name(), CaseFailure::from_panic(payload), elapsed)
            }
        };

        match &outcome.error {
            None => tracing::debug!("Passed in {} ms", outcome.duration_ms),
            Some(failure) => tracing::warn!("Failed in {} ms: {}", outcome.duration_ms, failure),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::CaseStatus;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn abc_runner() -> CaseRunner {
        let mut runner = CaseRunner::new();
        runner.register("A", || Ok(1)).unwrap();
        runner
            .register("B", || -> anyhow::Result<i32> { anyhow::bail!("boom") })
            .unwrap();
        runner.register("C", || Ok(3)).unwrap();
        runner
    }

    #[test]
    fn test_failure_is_contained() {
        let report = abc_runner().run_all();

        assert_eq!(report.total(), 3);
        assert_eq!(report.passed_count(), 2);
        assert_eq!(report.failed_count(), 1);

        let outcomes = report.outcomes();
        assert_eq!(outcomes[0].name, "A");
        assert_eq!(outcomes[0].status, CaseStatus::Passed);
        assert_eq!(outcomes[0].value, Some(json!(1)));

        assert_eq!(outcomes[1].name, "B");
        assert_eq!(outcomes[1].status, CaseStatus::Failed);
        assert_eq!(outcomes[1].value, None);
        assert_eq!(outcomes[1].error_message().as_deref(), Some("boom"));

        assert_eq!(outcomes[2].name, "C");
        assert_eq!(outcomes[2].status, CaseStatus::Passed);
        assert_eq!(outcomes[2].value, Some(json!(3)));
    }

    #[test]
    fn test_empty_run() {
        let report = CaseRunner::new().run_all();
        assert_eq!(report.total(), 0);
        assert_eq!(report.passed_count(), 0);
        assert_eq!(report.failed_count(), 0);
        assert!(report.outcomes().is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut runner = CaseRunner::new();
        runner.register("A", || Ok("first")).unwrap();

        let err = runner.register("A", || Ok("second")).unwrap_err();
        assert!(matches!(err, Error::DuplicateName(ref name) if name == "A"));
        assert_eq!(runner.len(), 1);

        let report = runner.run_all();
        assert_eq!(report.outcomes()[0].value, Some(json!("first")));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut runner = CaseRunner::new();
        let err = runner.register("  ", || Ok(())).unwrap_err();
        assert!(matches!(err, Error::InvalidName(_)));
        assert!(runner.is_empty());
    }

    #[test]
    fn test_panic_is_contained() {
        let ran_after = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran_after);

        let mut runner = CaseRunner::new();
        runner
            .register("explodes", || -> anyhow::Result<()> { panic!("kaboom") })
            .unwrap();
        runner
            .register("after", move || {
                flag.store(true, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();

        let report = runner.run_all();
        assert!(ran_after.load(Ordering::SeqCst));
        assert_eq!(
            report.outcomes()[0].error,
            Some(CaseFailure::Panic("kaboom".to_string()))
        );
        assert!(report.outcomes()[1].is_passed());
    }

    #[test]
    fn test_case_timeout_option() {
        let mut runner = CaseRunner::with_options(RunOptions {
            case_timeout: Some(Duration::from_millis(20)),
        });
        runner
            .register("sleepy", || {
                std::thread::sleep(Duration::from_millis(500));
                Ok(())
            })
            .unwrap();
        runner.register("quick", || Ok(true)).unwrap();

        let report = runner.run_all();
        assert_eq!(report.outcomes()[0].error, Some(CaseFailure::TimedOut(20)));
        assert!(report.outcomes()[1].is_passed());
    }

    #[test]
    fn test_outcomes_follow_registration_order() {
        let mut runner = CaseRunner::new();
        for name in ["zeta", "alpha", "mid"] {
            runner.register(name, move || Ok(name)).unwrap();
        }
        assert_eq!(runner.names().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);

        let mut seen = Vec::new();
        let report = runner.run_with(|index, outcome| seen.push((index, outcome.name.clone())));

        let names: Vec<_> = report.outcomes().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(
            seen,
            [(0, "zeta".to_string()), (1, "alpha".to_string()), (2, "mid".to_string())]
        );
    }

    #[test]
    fn test_runner_can_run_twice() {
        let runner = abc_runner();
        let first = runner.run_all();
        let second = runner.run_all();
        assert_eq!(first.total(), second.total());
        assert_eq!(first.failed_count(), second.failed_count());
    }
}
