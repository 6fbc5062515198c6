//! Case outcomes and the run report

use std::any::Any;
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::wrap::TimedOut;

/// Whether a case passed or failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Failed,
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseStatus::Passed => write!(f, "passed"),
            CaseStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Why a case failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum CaseFailure {
    /// The action returned an error
    Error(String),
    /// The action panicked
    Panic(String),
    /// The action did not finish within the limit (milliseconds)
    TimedOut(u64),
}

const NO_MESSAGE: &str = "case failed without a message";

impl CaseFailure {
    /// Classify an error returned by an action
    pub fn from_error(error: &anyhow::Error) -> Self {
        if let Some(TimedOut(limit)) = error.downcast_ref::<TimedOut>() {
            return CaseFailure::TimedOut(limit.as_millis() as u64);
        }
        CaseFailure::Error(non_empty(format!("{:#}", error)))
    }

    /// Classify a panic payload caught at the isolation boundary
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        CaseFailure::Panic(non_empty(message))
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        NO_MESSAGE.to_string()
    } else {
        message
    }
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseFailure::Error(message) => write!(f, "{}", message),
            CaseFailure::Panic(message) => write!(f, "panicked: {}", message),
            CaseFailure::TimedOut(ms) => write!(f, "timed out after {} ms", ms),
        }
    }
}

/// Recorded result of executing one case
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CaseFailure>,
    pub duration_ms: u64,
}

impl CaseOutcome {
    pub fn passed(name: &str, value: Value, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            status: CaseStatus::Passed,
            value: Some(value),
            error: None,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn failed(name: &str, failure: CaseFailure, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            status: CaseStatus::Failed,
            value: None,
            error: Some(failure),
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }

    /// Rendered failure description, if the case failed
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Aggregate of all outcomes from one run
///
/// Only the runner appends to a report; everyone else sees it read-only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    total: usize,
    passed: usize,
    failed: usize,
    outcomes: Vec<CaseOutcome>,
}

impl RunReport {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, outcome: CaseOutcome) {
        match outcome.status {
            CaseStatus::Passed => self.passed += 1,
            CaseStatus::Failed => self.failed += 1,
        }
        self.total += 1;
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn passed_count(&self) -> usize {
        self.passed
    }

    pub fn failed_count(&self) -> usize {
        self.failed
    }

    /// Outcomes in registration order
    pub fn outcomes(&self) -> &[CaseOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.is_passed())
    }

    pub fn get(&self, name: &str) -> Option<&CaseOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.outcomes.iter().map(|o| o.duration_ms).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_counts_consistent() {
        let mut report = RunReport::with_capacity(3);
        report.record(CaseOutcome::passed("a", json!(1), Duration::ZERO));
        report.record(CaseOutcome::failed(
            "b",
            CaseFailure::Error("boom".into()),
            Duration::from_millis(3),
        ));
        report.record(CaseOutcome::passed("c", json!(3), Duration::from_millis(2)));

        assert_eq!(report.total(), 3);
        assert_eq!(report.passed_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.passed_count() + report.failed_count(), report.total());
        assert_eq!(report.total_duration_ms(), 5);
        assert!(!report.is_success());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.get("b").unwrap().error_message().as_deref(), Some("boom"));
    }

    #[test]
    fn test_empty_failure_message_replaced() {
        let failure = CaseFailure::from_error(&anyhow::anyhow!(""));
        assert_eq!(failure.to_string(), NO_MESSAGE);
    }

    #[test]
    fn test_error_chain_is_rendered() {
        let error = anyhow::anyhow!("disk full").context("saving report");
        let failure = CaseFailure::from_error(&error);
        assert_eq!(failure, CaseFailure::Error("saving report: disk full".into()));
    }

    #[test]
    fn test_timed_out_is_classified() {
        let error = anyhow::Error::new(TimedOut(Duration::from_millis(20)));
        assert_eq!(CaseFailure::from_error(&error), CaseFailure::TimedOut(20));
    }

    #[test]
    fn test_panic_payloads() {
        let failure = CaseFailure::from_panic(Box::new("static message"));
        assert_eq!(failure.to_string(), "panicked: static message");

        let failure = CaseFailure::from_panic(Box::new(String::from("owned")));
        assert_eq!(failure, CaseFailure::Panic("owned".into()));

        let failure = CaseFailure::from_panic(Box::new(7_u8));
        assert_eq!(failure, CaseFailure::Panic("non-string panic payload".into()));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut report = RunReport::default();
        report.record(CaseOutcome::failed(
            "slow",
            CaseFailure::TimedOut(10),
            Duration::from_millis(10),
        ));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["outcomes"][0]["status"], "failed");
        assert_eq!(
            value["outcomes"][0]["error"],
            json!({"kind": "timed_out", "detail": 10})
        );
        assert!(value["outcomes"][0].get("value").is_none());
    }
}
