//! Snapshot records returned by the introspection services.
//!
//! Field names on the wire are fixed by the presentation layer; see
//! [`crate::contracts::keyed`] for the keyed-mapping conversion.

use serde::{Deserialize, Serialize};

/// Description used when a service declares none.
pub const DEFAULT_SERVICE_DESCRIPTION: &str = "No description";

/// Version name used when a package declares none.
pub const UNKNOWN_VERSION_NAME: &str = "Unknown";

/// Ordered bare service identifiers from the enabled-services setting.
pub type ServiceNameList = Vec<String>;

/// Detailed view of one enabled accessibility service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub package_name: String,
    pub service_name: String,
    #[serde(rename = "serviceLabel")]
    pub label: String,
    pub description: String,
    pub can_retrieve_window_content: bool,
    pub can_request_touch_exploration: bool,
    #[serde(rename = "canRequestEnhancedWebAccessibility")]
    pub can_request_enhanced_web_access: bool,
    pub settings_activity_name: String,
}

/// Attribution of one installed package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    pub package_name: String,
    pub app_name: String,
    pub version_name: String,
    pub version_code: i64,
    /// A real installer package id or one of the [`InstallerSentinel`] strings.
    pub installer_package_name: String,
    pub is_system_app: bool,
    #[serde(rename = "installTime")]
    pub install_time_epoch_millis: i64,
}

/// In-band values for `installer_package_name` when no real installer is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerSentinel {
    Unknown,
    PackageNotFound,
    PermissionDenied,
}

impl InstallerSentinel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::PackageNotFound => "Package Not Found",
            Self::PermissionDenied => "Permission Denied",
        }
    }
}

/// Prefix of the sentinel produced for unexpected installer lookup faults.
pub const INSTALLER_ERROR_PREFIX: &str = "Error: ";

impl AppRecord {
    /// Whether the installer field holds a sentinel rather than a package id.
    pub fn has_installer_sentinel(&self) -> bool {
        let installer = self.installer_package_name.as_str();
        installer == InstallerSentinel::Unknown.as_str()
            || installer == InstallerSentinel::PackageNotFound.as_str()
            || installer == InstallerSentinel::PermissionDenied.as_str()
            || installer.starts_with(INSTALLER_ERROR_PREFIX)
    }
}
