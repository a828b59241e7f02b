//! Named requests and their responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::contracts::channels::{
    ACCESSIBILITY_CHANNEL, ERROR_CODE, GET_ALL_INSTALLED_APPS,
    GET_DETAILED_ACCESSIBILITY_SERVICES, GET_ENABLED_ACCESSIBILITY_SERVICES,
    INSTALLED_APPS_CHANNEL, IS_ACCESSIBILITY_ENABLED,
};

/// Request channel, grouping the queries by pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Accessibility,
    InstalledApps,
}

impl Channel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accessibility => ACCESSIBILITY_CHANNEL,
            Self::InstalledApps => INSTALLED_APPS_CHANNEL,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ACCESSIBILITY_CHANNEL => Ok(Self::Accessibility),
            INSTALLED_APPS_CHANNEL => Ok(Self::InstalledApps),
            other => Err(format!("unknown channel '{other}'")),
        }
    }
}

/// A recognized query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryRequest {
    IsAccessibilityEnabled,
    GetEnabledAccessibilityServices,
    GetDetailedAccessibilityServices,
    GetAllInstalledApps,
}

impl QueryRequest {
    pub const ALL: [Self; 4] = [
        Self::IsAccessibilityEnabled,
        Self::GetEnabledAccessibilityServices,
        Self::GetDetailedAccessibilityServices,
        Self::GetAllInstalledApps,
    ];

    /// Method name on the wire.
    pub const fn method(self) -> &'static str {
        match self {
            Self::IsAccessibilityEnabled => IS_ACCESSIBILITY_ENABLED,
            Self::GetEnabledAccessibilityServices => GET_ENABLED_ACCESSIBILITY_SERVICES,
            Self::GetDetailedAccessibilityServices => GET_DETAILED_ACCESSIBILITY_SERVICES,
            Self::GetAllInstalledApps => GET_ALL_INSTALLED_APPS,
        }
    }

    /// Channel the request is served on.
    pub const fn channel(self) -> Channel {
        match self {
            Self::GetAllInstalledApps => Channel::InstalledApps,
            _ => Channel::Accessibility,
        }
    }

    /// Cheap requests are answered on the caller's thread.
    pub const fn is_inline(self) -> bool {
        matches!(self, Self::IsAccessibilityEnabled)
    }

    /// Look up a request by method name, on any channel.
    pub fn from_method(method: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|request| request.method() == method)
    }

    /// Look up a request by method name, only if it belongs to `channel`.
    pub fn route(channel: Channel, method: &str) -> Option<Self> {
        Self::from_method(method).filter(|request| request.channel() == channel)
    }
}

impl fmt::Display for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum QueryResponse {
    /// The query succeeded.
    Success { value: Value },
    /// The query failed as a whole.
    Error { code: String, message: String },
    /// The method name is not served on this channel.
    NotImplemented,
}

impl QueryResponse {
    pub const fn success(value: Value) -> Self {
        Self::Success { value }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            code: ERROR_CODE.to_string(),
            message: message.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The success payload, if any.
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Success { value } => Some(value),
            _ => None,
        }
    }
}
