//! Package registry port and its transfer types.

use serde::{Deserialize, Serialize};

use super::PlatformFault;
use crate::domain::{ApplicationFlags, PackageInfoFlags};

/// Form of the "list installed packages" call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageQuery {
    /// Plain integer flags, accepted by every platform version.
    Legacy { flags: u32 },
    /// Flag object, required on the newest platforms.
    WithFlags(PackageInfoFlags),
}

/// Application-level metadata of a package.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    pub package_name: String,
    #[serde(default)]
    pub flags: ApplicationFlags,
    /// Label stored in the manifest without resource lookup.
    #[serde(default)]
    pub non_localized_label: Option<String>,
}

/// Package-level metadata returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub package_name: String,
    #[serde(default)]
    pub version_name: Option<String>,
    /// Legacy 32-bit version code.
    #[serde(default)]
    pub version_code: i32,
    /// Upper 32 bits of the native 64-bit version code.
    #[serde(default)]
    pub version_code_major: i32,
    #[serde(default)]
    pub first_install_time: i64,
    /// Absent for defunct or partially removed packages.
    #[serde(default)]
    pub application_info: Option<ApplicationInfo>,
}

impl PackageInfo {
    /// Native 64-bit version code: major in the high word, legacy code in the low word.
    pub const fn long_version_code(&self) -> i64 {
        ((self.version_code_major as i64) << 32) | (self.version_code as u32 as i64)
    }

    /// Legacy version code widened to 64 bits.
    pub const fn widened_version_code(&self) -> i64 {
        self.version_code as i64
    }
}

/// Provenance of an installed package.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallSourceInfo {
    /// Package that performed the install.
    #[serde(default)]
    pub installing_package_name: Option<String>,
    /// Package that asked for the install.
    #[serde(default)]
    pub initiating_package_name: Option<String>,
    /// Package the APK was originally downloaded by.
    #[serde(default)]
    pub originating_package_name: Option<String>,
}

/// Port for reading the package registry.
#[cfg_attr(test, mockall::automock)]
pub trait PackageRegistryPort: Send + Sync {
    /// List every installed package.
    fn installed_packages(&self, query: PackageQuery) -> Result<Vec<PackageInfo>, PlatformFault>;

    /// Resolve the display label of an application.
    fn application_label(&self, app: &ApplicationInfo) -> Result<String, PlatformFault>;

    /// Legacy single-value installer lookup.
    fn installer_package_name(&self, package_name: &str) -> Result<Option<String>, PlatformFault>;

    /// Install-source provenance lookup.
    fn install_source_info(&self, package_name: &str) -> Result<InstallSourceInfo, PlatformFault>;
}
