//! Device snapshot adapter.
//!
//! A device dump is a JSON capture of everything the platform ports read:
//! API level, secure settings, the accessibility registry and the package
//! registry, including the faults each call raised at capture time.
//! [`SnapshotPlatform`] replays a dump through the core ports so the whole
//! query pipeline can run off-device.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use axcheck_core::ports::{
    AccessibilityRegistryPort, ApplicationInfo, EnabledServiceInfo, FaultKind, InstallSourceInfo,
    PackageInfo, PackageQuery, PackageRegistryPort, PlatformFault, PlatformInfoPort,
    SecureSettingsPort,
};
use axcheck_core::{ApplicationFlags, FeedbackTypes};

/// Errors raised while loading a device dump.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The dump file could not be read.
    #[error("Failed to read device dump {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dump is not valid JSON or does not match the expected shape.
    #[error("Invalid device dump: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One accessibility registry entry as captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpedService {
    #[serde(flatten)]
    pub info: EnabledServiceInfo,
    /// Label returned by the label subsystem, when it resolved one.
    #[serde(default)]
    pub resolved_label: Option<String>,
    #[serde(default)]
    pub label_fault: Option<PlatformFault>,
}

/// Application info as captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpedApplication {
    #[serde(default)]
    pub flags: ApplicationFlags,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub label_fault: Option<PlatformFault>,
}

/// One package registry entry as captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpedPackage {
    pub package_name: String,
    #[serde(default)]
    pub version_name: Option<String>,
    #[serde(default)]
    pub version_code: i32,
    #[serde(default)]
    pub version_code_major: i32,
    #[serde(default)]
    pub first_install_time: i64,
    #[serde(default)]
    pub application_info: Option<DumpedApplication>,
    /// Install-source provenance.
    #[serde(default)]
    pub installer: Option<InstallSourceInfo>,
    /// Value of the legacy installer API when it differs from the installing package.
    #[serde(default)]
    pub legacy_installer: Option<String>,
    /// Fault raised by both installer APIs for this package.
    #[serde(default)]
    pub installer_fault: Option<PlatformFault>,
}

/// JSON capture of one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDump {
    pub api_level: u32,
    #[serde(default)]
    pub secure_settings: BTreeMap<String, String>,
    #[serde(default)]
    pub settings_fault: Option<PlatformFault>,
    #[serde(default)]
    pub accessibility_services: Vec<DumpedService>,
    #[serde(default)]
    pub accessibility_fault: Option<PlatformFault>,
    #[serde(default)]
    pub packages: Vec<DumpedPackage>,
    #[serde(default)]
    pub packages_fault: Option<PlatformFault>,
}

/// Platform ports backed by a [`DeviceDump`].
#[derive(Debug, Clone)]
pub struct SnapshotPlatform {
    dump: DeviceDump,
    api_level: u32,
    package_index: HashMap<String, usize>,
}

impl SnapshotPlatform {
    /// Wrap a parsed dump.
    pub fn new(dump: DeviceDump) -> Self {
        let package_index = dump
            .packages
            .iter()
            .enumerate()
            .map(|(index, package)| (package.package_name.clone(), index))
            .collect();

        Self {
            api_level: dump.api_level,
            dump,
            package_index,
        }
    }

    /// Parse a dump from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Read and parse a dump file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let platform = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            api_level = platform.api_level,
            packages = platform.dump.packages.len(),
            services = platform.dump.accessibility_services.len(),
            "Loaded device dump"
        );
        Ok(platform)
    }

    /// Report a different API level than the one captured.
    #[must_use]
    pub fn with_api_level(mut self, api_level: u32) -> Self {
        self.api_level = api_level;
        self
    }

    /// The underlying dump.
    pub const fn dump(&self) -> &DeviceDump {
        &self.dump
    }

    fn package(&self, package_name: &str) -> Option<&DumpedPackage> {
        self.package_index
            .get(package_name)
            .map(|&index| &self.dump.packages[index])
    }
}

fn to_package_info(package: &DumpedPackage) -> PackageInfo {
    PackageInfo {
        package_name: package.package_name.clone(),
        version_name: package.version_name.clone(),
        version_code: package.version_code,
        version_code_major: package.version_code_major,
        first_install_time: package.first_install_time,
        application_info: package.application_info.as_ref().map(|app| ApplicationInfo {
            package_name: package.package_name.clone(),
            flags: app.flags,
            non_localized_label: app.label.clone(),
        }),
    }
}

impl PlatformInfoPort for SnapshotPlatform {
    fn api_level(&self) -> u32 {
        self.api_level
    }
}

impl AccessibilityRegistryPort for SnapshotPlatform {
    // Captured entries were already filtered by the device; the mask is not reapplied.
    fn enabled_services(
        &self,
        _feedback: FeedbackTypes,
    ) -> Result<Vec<EnabledServiceInfo>, PlatformFault> {
        if let Some(fault) = &self.dump.accessibility_fault {
            return Err(fault.clone());
        }
        Ok(self
            .dump
            .accessibility_services
            .iter()
            .map(|service| service.info.clone())
            .collect())
    }

    fn service_label(&self, service: &EnabledServiceInfo) -> Result<Option<String>, PlatformFault> {
        let Some(captured) = self.dump.accessibility_services.iter().find(|captured| {
            captured.info.package_name == service.package_name
                && captured.info.service_name == service.service_name
        }) else {
            return Ok(None);
        };

        match &captured.label_fault {
            Some(fault) => Err(fault.clone()),
            None => Ok(captured.resolved_label.clone()),
        }
    }
}

impl SecureSettingsPort for SnapshotPlatform {
    fn get_string(&self, key: &str) -> Result<Option<String>, PlatformFault> {
        if let Some(fault) = &self.dump.settings_fault {
            return Err(fault.clone());
        }
        Ok(self.dump.secure_settings.get(key).cloned())
    }
}

impl PackageRegistryPort for SnapshotPlatform {
    fn installed_packages(&self, query: PackageQuery) -> Result<Vec<PackageInfo>, PlatformFault> {
        debug!(?query, "Listing captured packages");
        if let Some(fault) = &self.dump.packages_fault {
            return Err(fault.clone());
        }
        Ok(self.dump.packages.iter().map(to_package_info).collect())
    }

    fn application_label(&self, app: &ApplicationInfo) -> Result<String, PlatformFault> {
        let captured = self
            .package(&app.package_name)
            .and_then(|package| package.application_info.as_ref());

        match captured {
            Some(DumpedApplication {
                label_fault: Some(fault),
                ..
            }) => Err(fault.clone()),
            Some(DumpedApplication {
                label: Some(label), ..
            }) => Ok(label.clone()),
            // The platform falls back to the package name when no label resource exists.
            _ => Ok(app.package_name.clone()),
        }
    }

    fn installer_package_name(&self, package_name: &str) -> Result<Option<String>, PlatformFault> {
        let package = self.package(package_name).ok_or_else(|| {
            PlatformFault::new(
                FaultKind::IllegalArgument,
                format!("Unknown package: {package_name}"),
            )
        })?;

        if let Some(fault) = &package.installer_fault {
            return Err(fault.clone());
        }
        Ok(package.legacy_installer.clone().or_else(|| {
            package
                .installer
                .as_ref()
                .and_then(|source| source.installing_package_name.clone())
        }))
    }

    fn install_source_info(&self, package_name: &str) -> Result<InstallSourceInfo, PlatformFault> {
        let package = self
            .package(package_name)
            .ok_or_else(|| PlatformFault::not_found(package_name))?;

        if let Some(fault) = &package.installer_fault {
            return Err(fault.clone());
        }
        Ok(package.installer.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"{
        "apiLevel": 31,
        "secureSettings": {
            "enabled_accessibility_services": "com.a/com.a.Reader"
        },
        "accessibilityServices": [
            {
                "packageName": "com.a",
                "serviceName": "com.a.Reader",
                "flags": 68,
                "resolvedLabel": "Reader"
            },
            {
                "packageName": "com.b",
                "serviceName": "com.b.Broken",
                "labelFault": { "kind": "other", "message": "no resources" }
            }
        ],
        "packages": [
            {
                "packageName": "com.a",
                "versionName": "3.1",
                "versionCode": 31,
                "firstInstallTime": 5,
                "applicationInfo": { "flags": 129, "label": "A Reader" },
                "installer": { "initiatingPackageName": "com.store" }
            },
            {
                "packageName": "com.ghost"
            },
            {
                "packageName": "com.locked",
                "applicationInfo": {},
                "installerFault": { "kind": "security" }
            }
        ]
    }"#;

    fn platform() -> SnapshotPlatform {
        SnapshotPlatform::from_json(DUMP).unwrap()
    }

    #[test]
    fn test_parse_dump() {
        let platform = platform();
        assert_eq!(platform.api_level(), 31);
        assert_eq!(platform.dump().packages.len(), 3);
        assert_eq!(
            platform.with_api_level(19).api_level(),
            19,
            "override replaces captured level"
        );
    }

    #[test]
    fn test_registry_entries_and_labels() {
        let platform = platform();
        let services = platform.enabled_services(FeedbackTypes::all()).unwrap();
        assert_eq!(services.len(), 2);
        assert!(services[0].flags.can_retrieve_window_content());

        assert_eq!(
            platform.service_label(&services[0]).unwrap().as_deref(),
            Some("Reader")
        );
        assert!(platform.service_label(&services[1]).is_err());
    }

    #[test]
    fn test_package_conversion() {
        let packages = platform()
            .installed_packages(PackageQuery::Legacy { flags: 0 })
            .unwrap();
        assert_eq!(packages.len(), 3);
        let app = packages[0].application_info.as_ref().unwrap();
        assert!(app.flags.is_system_app());
        assert!(packages[1].application_info.is_none());
    }

    #[test]
    fn test_unknown_package_faults_match_platform() {
        let platform = platform();
        assert_eq!(
            platform.installer_package_name("com.nope").unwrap_err().kind,
            FaultKind::IllegalArgument
        );
        assert_eq!(
            platform.install_source_info("com.nope").unwrap_err().kind,
            FaultKind::NameNotFound
        );
    }

    #[test]
    fn test_installer_lookups() {
        let platform = platform();
        assert_eq!(
            platform
                .install_source_info("com.a")
                .unwrap()
                .initiating_package_name
                .as_deref(),
            Some("com.store")
        );
        assert_eq!(platform.installer_package_name("com.a").unwrap(), None);
        assert_eq!(
            platform.install_source_info("com.locked").unwrap_err().kind,
            FaultKind::Security
        );
    }

    #[test]
    fn test_whole_call_faults() {
        let mut dump: DeviceDump = serde_json::from_str(DUMP).unwrap();
        dump.packages_fault = Some(PlatformFault::security("denied"));
        dump.settings_fault = Some(PlatformFault::other("provider gone"));
        let platform = SnapshotPlatform::new(dump);

        assert!(
            platform
                .installed_packages(PackageQuery::Legacy { flags: 0 })
                .is_err()
        );
        assert!(platform.get_string("enabled_accessibility_services").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SnapshotPlatform::load(Path::new("/nonexistent/device.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
