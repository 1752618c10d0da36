//! Error types for the workbook builder.
//!
//! Library crates use [`WorkbookError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all workbook operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error (unreadable source, unwritable artifact).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A structural assumption about the source text does not hold
    /// (e.g. a day number outside the workbook's range).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Unparseable value in an otherwise recognized heading.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Rendering the output artifact failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WorkbookError>;

impl WorkbookError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a recoverable per-page issue rather than a
    /// pipeline failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Parse { .. })
    }
}
