//! Native platform faults and their normalization.
//!
//! Ports report failures as [`PlatformFault`], which mirrors the loosely typed
//! exceptions raised by the host platform. Services never inspect a fault
//! directly; they convert it to a [`QueryError`] first, which has exactly
//! three outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of a native failure raised by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FaultKind {
    /// Invalid argument, raised for unknown package names by installer APIs.
    IllegalArgument,
    /// Explicit "name not found" from the package registry.
    NameNotFound,
    /// Caller lacks the permission to run the query.
    Security,
    /// The system service died or the binder call failed.
    Remote,
    /// Anything else.
    Other,
}

impl FaultKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IllegalArgument => "IllegalArgument",
            Self::NameNotFound => "NameNotFound",
            Self::Security => "Security",
            Self::Remote => "Remote",
            Self::Other => "Other",
        }
    }
}

/// A failure reported by a platform port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFault {
    pub kind: FaultKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PlatformFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// A fault carrying no message.
    pub const fn bare(kind: FaultKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    pub fn security(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Security, message)
    }

    pub fn not_found(package_name: &str) -> Self {
        Self::new(FaultKind::NameNotFound, package_name)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Other, message)
    }
}

impl fmt::Display for PlatformFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => f.write_str(self.kind.as_str()),
        }
    }
}

impl std::error::Error for PlatformFault {}

/// Normalized outcome of a failed query.
///
/// Every [`PlatformFault`] maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The referenced package does not exist.
    #[error("package not found")]
    NotFound,

    /// The caller lacks rights to run the query.
    #[error("permission denied")]
    PermissionDenied,

    /// Any other failure, with a diagnostic message.
    #[error("{0}")]
    Unexpected(String),
}

impl From<&PlatformFault> for QueryError {
    fn from(fault: &PlatformFault) -> Self {
        match fault.kind {
            FaultKind::IllegalArgument | FaultKind::NameNotFound => Self::NotFound,
            FaultKind::Security => Self::PermissionDenied,
            FaultKind::Remote | FaultKind::Other => Self::Unexpected(fault.to_string()),
        }
    }
}

impl From<PlatformFault> for QueryError {
    fn from(fault: PlatformFault) -> Self {
        Self::from(&fault)
    }
}
