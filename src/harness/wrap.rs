//! Composable action wrappers
//!
//! Each wrapper takes an [`Action`] and returns a new one, so they stack in
//! any order: `timed(name, retry(3, timeout(limit, action)))`.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use super::case::{Action, CaseResult};

/// Returned by [`timeout`] when the wrapped action runs past its limit
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("timed out after {} ms", .0.as_millis())]
pub struct TimedOut(pub Duration);

/// Log how long each invocation of `action` takes
pub fn timed(label: impl Into<String>, action: Action) -> Action {
    let label = label.into();
    Arc::new(move || -> CaseResult {
        let start = Instant::now();
        let result = action();
        let elapsed = start.elapsed();
        tracing::info!(
            case = %label,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            ok = result.is_ok(),
            "{} took {:.4} seconds",
            label,
            elapsed.as_secs_f64()
        );
        result
    })
}

/// Re-invoke `action` until it succeeds or `max_attempts` is reached
///
/// The last error is returned unchanged. Panics are not retried.
pub fn retry(max_attempts: u32, action: Action) -> Action {
    let max_attempts = max_attempts.max(1);
    Arc::new(move || -> CaseResult {
        let mut attempt = 1;
        loop {
            match action() {
                Ok(value) => return Ok(value),
                Err(e) if attempt < max_attempts => {
                    tracing::warn!("Attempt {} of {} failed: {:#}", attempt, max_attempts, e);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    })
}

/// Fail with [`TimedOut`] if `action` does not finish within `limit`
///
/// The action runs on its own worker thread. A worker that overruns is
/// abandoned; its eventual result is discarded. A panic on the worker is
/// re-raised on the calling thread.
pub fn timeout(limit: Duration, action: Action) -> Action {
    Arc::new(move || -> CaseResult {
        let (tx, rx) = mpsc::channel();
        let worker = Arc::clone(&action);

        thread::Builder::new()
            .name("case-worker".to_string())
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| worker()));
                let _ = tx.send(result);
            })?;

        match rx.recv_timeout(limit) {
            Ok(Ok(result)) => result,
            Ok(Err(payload)) => panic::resume_unwind(payload),
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    "Case exceeded {} ms, abandoning worker thread",
                    limit.as_millis()
                );
                Err(TimedOut(limit).into())
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(anyhow::anyhow!("case worker exited without a result"))
            }
        }
    })
}
