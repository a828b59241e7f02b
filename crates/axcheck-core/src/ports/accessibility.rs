//! Accessibility registry port.
//!
//! The registry is the authoritative list of enabled accessibility services
//! held by the platform's accessibility manager.

use serde::{Deserialize, Serialize};

use super::PlatformFault;
use crate::domain::{FeedbackTypes, ServiceFlags};

/// One entry of the enabled-service registry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnabledServiceInfo {
    /// Package owning the service component.
    pub package_name: String,
    /// Fully qualified class name of the service component.
    pub service_name: String,
    /// Label declared in the service's manifest entry, if any.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub flags: ServiceFlags,
    #[serde(default)]
    pub settings_activity_name: Option<String>,
}

/// Port for reading the enabled-service registry.
#[cfg_attr(test, mockall::automock)]
pub trait AccessibilityRegistryPort: Send + Sync {
    /// List enabled services whose feedback type intersects `feedback`.
    ///
    /// Order is the registry's own order.
    fn enabled_services(
        &self,
        feedback: FeedbackTypes,
    ) -> Result<Vec<EnabledServiceInfo>, PlatformFault>;

    /// Resolve the human-readable label for a service.
    ///
    /// `Ok(None)` means label resolution is unsupported for this entry.
    fn service_label(&self, service: &EnabledServiceInfo) -> Result<Option<String>, PlatformFault>;
}
