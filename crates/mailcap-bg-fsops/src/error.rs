//! # Design
//!
//! - Provide structured, constant-message errors for scratch-file staging.
//! - Capture operation context (paths, fields, inputs) to make failures reproducible in tests.
//! - Preserve source errors without interpolating context into error messages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for scratch-file operations.
pub type FsOpsResult<T> = Result<T, FsOpsError>;

/// Errors produced while staging or removing scratch files.
#[derive(Debug, Error)]
pub enum FsOpsError {
    /// IO failures while interacting with the filesystem.
    #[error("fsops io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Input validation failures.
    #[error("fsops invalid input")]
    InvalidInput {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
}

impl FsOpsError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Operation label for IO failures, `None` for validation failures.
    #[cfg(test)]
    pub(crate) const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Io { operation, .. } => Some(*operation),
            Self::InvalidInput { .. } => None,
        }
    }
}
