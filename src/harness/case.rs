//! Feature cases
//!
//! A [`FeatureCase`] pairs a unique name with a zero-argument action. The
//! action may return any serializable value; it is stored as JSON so that
//! heterogeneous cases can share one report.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

/// What an action produces when invoked
pub type CaseResult = anyhow::Result<Value>;

/// A shared zero-argument operation
///
/// `Send + Sync` so that an action can be moved onto a worker thread when a
/// timeout applies.
pub type Action = Arc<dyn Fn() -> CaseResult + Send + Sync>;

/// One named, independently runnable unit of work
#[derive(Clone)]
pub struct FeatureCase {
    name: String,
    action: Action,
}

impl FeatureCase {
    /// Create a case from any closure returning a serializable value
    pub fn new<F, T>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
        T: Serialize,
    {
        let action: Action = Arc::new(move || -> CaseResult {
            let value = action()?;
            Ok(serde_json::to_value(value)?)
        });
        Self::from_action(name, action)
    }

    /// Create a case from an already type-erased action
    pub fn from_action(name: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A handle to the case's action
    pub fn action(&self) -> Action {
        Arc::clone(&self.action)
    }

    /// Build a new case with the same name whose action is wrapped
    ///
    /// ```
    /// use catalog::harness::{wrap, FeatureCase};
    ///
    /// let case = FeatureCase::new("answer", || Ok(42)).wrap(|a| wrap::retry(3, a));
    /// assert_eq!(case.name(), "answer");
    /// ```
    pub fn wrap<W>(&self, wrapper: W) -> Self
    where
        W: FnOnce(Action) -> Action,
    {
        Self {
            name: self.name.clone(),
            action: wrapper(self.action()),
        }
    }

    /// Invoke the action directly, without any isolation
    pub fn invoke(&self) -> CaseResult {
        (self.action)()
    }
}

impl fmt::Debug for FeatureCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureCase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
