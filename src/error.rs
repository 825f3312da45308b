//! Error types for toolprobe operations.
//!
//! This module defines [`ToolprobeError`], the error type for failures that
//! stop a command outright, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Scan-time failures (a missing tool, a broken binary, an unreachable
//!   release page) are *values* recorded in the inventory, not errors.
//!   See [`ProbeFailure`](crate::discovery::ProbeFailure) and
//!   [`UpstreamError`](crate::upstream::UpstreamError).
//! - `ToolprobeError` covers configuration problems and report I/O.
//! - Use `anyhow::Error` (via `ToolprobeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for toolprobe operations.
#[derive(Debug, Error)]
pub enum ToolprobeError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// An upgrade command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The report could not be written.
    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for toolprobe operations.
pub type Result<T> = std::result::Result<T, ToolprobeError>;
