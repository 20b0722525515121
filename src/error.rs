//! Error types for the oa-simcheck crate.
//!
//! A comparison failure is not an error: it is the `Fail` status of
//! [`crate::validate::ValidationResult`]. Everything here aborts the run.

use std::path::PathBuf;

/// Harness error types.
#[derive(Debug, thiserror::Error)]
pub enum SimcheckError {
    /// Mutually exclusive or incomplete options, detected before any I/O.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error with context.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The executable could not be located or launched.
    #[error("failed to launch {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// External builder/searcher exited non-zero.
    #[error("{command} exited with {}: {stderr}", describe_exit(.code))]
    ProcessFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Unexpected character in search output.
    #[error("unexpected character {found:?} in search output at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        found: char,
    },

    /// Comparator input without a single 0/1 character.
    #[error("{path}: no 0/1 data found")]
    NoBits { path: PathBuf },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimcheckError {
    /// Wrap an [`std::io::Error`] with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "signal".to_owned(),
    }
}

/// Convenience result type for oa-simcheck operations.
pub type SimcheckResult<T> = Result<T, SimcheckError>;
