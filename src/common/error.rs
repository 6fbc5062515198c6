//! Error types for the feature catalog
//!
//! Registration and configuration problems surface here. Failures raised by
//! a case while it runs never do: those are contained in a
//! [`CaseFailure`](crate::harness::CaseFailure) inside the run report.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the feature catalog
#[derive(Error, Debug)]
pub enum Error {
    // === Registration Errors ===
    #[error("A case named '{0}' is already registered")]
    DuplicateName(String),

    #[error("Invalid case name '{0}': names must not be blank")]
    InvalidName(String),

    #[error("Unknown case '{0}'. Use 'catalog list' to see available cases")]
    UnknownCase(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid suite file '{path}': {error}")]
    SuiteParse { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Run Errors ===
    #[error("{failed} of {total} cases failed")]
    RunFailed { failed: usize, total: usize },
}

impl Error {
    /// Create a file read error
    pub fn file_read(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a suite parse error
    pub fn suite_parse(path: &std::path::Path, error: impl ToString) -> Self {
        Self::SuiteParse {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Process exit code for this error
    ///
    /// Failed cases exit with 1, everything that prevented a run exits with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::RunFailed { .. } => 1,
            _ => 2,
        }
    }
}
