//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from runtime errors to exit codes and user-facing messages.

use axcheck_runtime::{SessionError, SnapshotError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument error not caught by clap.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error reading the device dump.
    #[error("IO error: {0}")]
    Io(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The device dump could not be parsed.
    #[error("Invalid device dump: {0}")]
    Dump(String),

    /// A query completed with an error response.
    #[error("Query failed: {0}")]
    Query(String),

    /// The session went away before replying.
    #[error("{0}")]
    Session(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Query(_) | Self::Session(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Dump(_) => 65,     // EX_DATAERR
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<SnapshotError> for CliError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Io { .. } => Self::Io(err.to_string()),
            SnapshotError::Parse(parse_err) => Self::Dump(parse_err.to_string()),
        }
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        Self::Session(err.to_string())
    }
}

/// Exit code for an arbitrary handler error.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
