//! Installed package inventory.
//!
//! # Invariant
//!
//! Packages are resolved independently. A fault while resolving one package's
//! label or installer is folded into that package's record and never removes
//! or alters a sibling. Only the top-level registry call can fail the whole
//! enumeration.

use std::sync::Arc;

use tracing::debug;

use super::strategy::{InstallerPorts, TierStrategy};
use crate::domain::{
    AppRecord, CapabilityTier, INSTALLER_ERROR_PREFIX, InstallerSentinel, UNKNOWN_VERSION_NAME,
    first_present_or,
};
use crate::ports::{
    ApplicationInfo, IntrospectionError, PackageInfo, PackageRegistryPort, PlatformFault,
    PlatformInfoPort, QueryError, SecureSettingsPort,
};

/// Service producing installed-package snapshots.
pub struct PackageInventory {
    info: Arc<dyn PlatformInfoPort>,
    packages: Arc<dyn PackageRegistryPort>,
    settings: Arc<dyn SecureSettingsPort>,
}

impl PackageInventory {
    /// Create a new package inventory.
    pub fn new(
        info: Arc<dyn PlatformInfoPort>,
        packages: Arc<dyn PackageRegistryPort>,
        settings: Arc<dyn SecureSettingsPort>,
    ) -> Self {
        Self {
            info,
            packages,
            settings,
        }
    }

    /// Tier of the device this inventory reads from.
    pub fn tier(&self) -> CapabilityTier {
        CapabilityTier::from_api_level(self.info.api_level())
    }

    /// One record per installed package that has application info.
    pub fn list_all(&self) -> Result<Vec<AppRecord>, IntrospectionError> {
        let strategy = TierStrategy::for_tier(self.tier());
        let packages = self.packages.installed_packages(strategy.package_query)?;
        let total = packages.len();

        let records: Vec<AppRecord> = packages
            .iter()
            .filter_map(|package| self.resolve(strategy, package))
            .collect();

        debug!(
            tier = %strategy.tier,
            total,
            included = records.len(),
            "Resolved installed packages"
        );
        Ok(records)
    }

    fn resolve(&self, strategy: &TierStrategy, package: &PackageInfo) -> Option<AppRecord> {
        let Some(app) = package.application_info.as_ref() else {
            debug!(package = %package.package_name, "Skipping package without application info");
            return None;
        };

        Some(AppRecord {
            package_name: package.package_name.clone(),
            app_name: self.app_name(app, &package.package_name),
            version_name: first_present_or(
                [package.version_name.as_deref()],
                UNKNOWN_VERSION_NAME,
            ),
            version_code: (strategy.version_code)(package),
            installer_package_name: self.installer(strategy, &package.package_name),
            is_system_app: app.flags.is_system_app(),
            install_time_epoch_millis: package.first_install_time,
        })
    }

    fn app_name(&self, app: &ApplicationInfo, package_name: &str) -> String {
        match self.packages.application_label(app) {
            Ok(label) if !label.is_empty() => label,
            Ok(_) => package_name.to_string(),
            Err(fault) => {
                debug!(package = %package_name, %fault, "Label lookup failed, using package name");
                package_name.to_string()
            }
        }
    }

    fn installer(&self, strategy: &TierStrategy, package_name: &str) -> String {
        let ports = InstallerPorts {
            packages: self.packages.as_ref(),
            settings: self.settings.as_ref(),
        };

        match (strategy.installer)(ports, package_name) {
            Ok(Some(installer)) => installer,
            Ok(None) => InstallerSentinel::Unknown.as_str().to_string(),
            Err(fault) => installer_sentinel(&fault),
        }
    }
}

/// In-band replacement for an installer lookup fault.
pub fn installer_sentinel(fault: &PlatformFault) -> String {
    match QueryError::from(fault) {
        QueryError::NotFound => InstallerSentinel::PackageNotFound.as_str().to_string(),
        QueryError::PermissionDenied => InstallerSentinel::PermissionDenied.as_str().to_string(),
        QueryError::Unexpected(message) => format!("{INSTALLER_ERROR_PREFIX}{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationFlags, PackageInfoFlags};
    use crate::ports::packages::MockPackageRegistryPort;
    use crate::ports::settings::MockSecureSettingsPort;
    use crate::ports::{FaultKind, InstallSourceInfo, PackageQuery};

    struct FixedLevel(u32);

    impl PlatformInfoPort for FixedLevel {
        fn api_level(&self) -> u32 {
            self.0
        }
    }

    fn package(name: &str, flags: ApplicationFlags) -> PackageInfo {
        PackageInfo {
            package_name: name.to_string(),
            version_name: Some("1.0".to_string()),
            version_code: 10,
            version_code_major: 0,
            first_install_time: 1_700_000_000_000,
            application_info: Some(ApplicationInfo {
                package_name: name.to_string(),
                flags,
                non_localized_label: None,
            }),
        }
    }

    fn inventory(
        api_level: u32,
        packages: MockPackageRegistryPort,
        settings: MockSecureSettingsPort,
    ) -> PackageInventory {
        PackageInventory::new(
            Arc::new(FixedLevel(api_level)),
            Arc::new(packages),
            Arc::new(settings),
        )
    }

    #[test]
    fn test_sentinel_mapping() {
        assert_eq!(
            installer_sentinel(&PlatformFault::new(FaultKind::IllegalArgument, "x")),
            "Package Not Found"
        );
        assert_eq!(
            installer_sentinel(&PlatformFault::not_found("x")),
            "Package Not Found"
        );
        assert_eq!(
            installer_sentinel(&PlatformFault::security("no QUERY_ALL_PACKAGES")),
            "Permission Denied"
        );
        assert_eq!(
            installer_sentinel(&PlatformFault::other("binder died")),
            "Error: binder died"
        );
    }

    #[test]
    fn test_packages_without_application_info_are_skipped() {
        let mut packages = MockPackageRegistryPort::new();
        packages.expect_installed_packages().returning(|_| {
            let mut defunct = package("com.defunct", ApplicationFlags::empty());
            defunct.application_info = None;
            Ok(vec![
                package("com.one", ApplicationFlags::empty()),
                package("com.two", ApplicationFlags::empty()),
                defunct,
                package("com.three", ApplicationFlags::empty()),
                package("com.four", ApplicationFlags::empty()),
            ])
        });
        packages
            .expect_application_label()
            .returning(|app| Ok(app.package_name.to_uppercase()));
        packages
            .expect_installer_package_name()
            .returning(|_| Ok(Some("com.android.vending".to_string())));

        let records = inventory(26, packages, MockSecureSettingsPort::new())
            .list_all()
            .unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.package_name.as_str()).collect();
        assert_eq!(names, vec!["com.one", "com.two", "com.three", "com.four"]);
        assert_eq!(records[0].app_name, "COM.ONE");
    }

    #[test]
    fn test_installer_faults_are_isolated_per_package() {
        let mut packages = MockPackageRegistryPort::new();
        packages.expect_installed_packages().returning(|_| {
            Ok(vec![
                package("com.gone", ApplicationFlags::empty()),
                package("com.locked", ApplicationFlags::empty()),
                package("com.broken", ApplicationFlags::empty()),
                package("com.fine", ApplicationFlags::empty()),
            ])
        });
        packages
            .expect_application_label()
            .returning(|_| Ok("App".to_string()));
        packages
            .expect_install_source_info()
            .returning(|name| match name {
                "com.gone" => Err(PlatformFault::not_found(name)),
                "com.locked" => Err(PlatformFault::security("denied")),
                "com.broken" => Err(PlatformFault::new(FaultKind::Remote, "dead object")),
                _ => Ok(InstallSourceInfo {
                    installing_package_name: Some("com.android.vending".to_string()),
                    ..Default::default()
                }),
            });

        let records = inventory(34, packages, MockSecureSettingsPort::new())
            .list_all()
            .unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].installer_package_name, "Package Not Found");
        assert_eq!(records[1].installer_package_name, "Permission Denied");
        assert!(records[2].installer_package_name.starts_with("Error: "));
        assert_eq!(records[2].installer_package_name, "Error: dead object");
        assert_eq!(records[3].installer_package_name, "com.android.vending");
    }

    #[test]
    fn test_is_system_app_combinations() {
        let cases = [
            ("com.user", ApplicationFlags::empty(), false),
            ("com.system", ApplicationFlags::SYSTEM, true),
            ("com.updated", ApplicationFlags::UPDATED_SYSTEM_APP, true),
            (
                "com.both",
                ApplicationFlags::SYSTEM | ApplicationFlags::UPDATED_SYSTEM_APP,
                true,
            ),
        ];

        let mut packages = MockPackageRegistryPort::new();
        packages.expect_installed_packages().returning(move |_| {
            Ok(cases
                .iter()
                .map(|(name, flags, _)| package(name, *flags))
                .collect())
        });
        packages
            .expect_application_label()
            .returning(|_| Ok("App".to_string()));
        packages
            .expect_installer_package_name()
            .returning(|_| Ok(None));

        let records = inventory(29, packages, MockSecureSettingsPort::new())
            .list_all()
            .unwrap();

        for ((name, _, expected), record) in cases.iter().zip(&records) {
            assert_eq!(record.package_name, *name);
            assert_eq!(record.is_system_app, *expected, "package {name}");
            assert_eq!(record.installer_package_name, "Unknown");
        }
    }

    #[test]
    fn test_label_failure_falls_back_to_package_name() {
        let mut packages = MockPackageRegistryPort::new();
        packages.expect_installed_packages().returning(|_| {
            Ok(vec![
                package("com.nolabel", ApplicationFlags::empty()),
                package("com.emptylabel", ApplicationFlags::empty()),
            ])
        });
        packages
            .expect_application_label()
            .returning(|app| match app.package_name.as_str() {
                "com.nolabel" => Err(PlatformFault::other("resources missing")),
                _ => Ok(String::new()),
            });
        packages
            .expect_installer_package_name()
            .returning(|_| Ok(None));

        let records = inventory(25, packages, MockSecureSettingsPort::new())
            .list_all()
            .unwrap();
        assert_eq!(records[0].app_name, "com.nolabel");
        assert_eq!(records[1].app_name, "com.emptylabel");
    }

    #[test]
    fn test_query_form_and_version_code_follow_tier() {
        let mut packages = MockPackageRegistryPort::new();
        packages
            .expect_installed_packages()
            .withf(|query| *query == PackageQuery::WithFlags(PackageInfoFlags::empty()))
            .times(1)
            .returning(|_| {
                let mut info = package("com.big", ApplicationFlags::empty());
                info.version_code = 3;
                info.version_code_major = 1;
                info.version_name = None;
                Ok(vec![info])
            });
        packages
            .expect_application_label()
            .returning(|_| Ok("Big".to_string()));
        packages
            .expect_install_source_info()
            .returning(|_| Ok(InstallSourceInfo::default()));

        let records = inventory(33, packages, MockSecureSettingsPort::new())
            .list_all()
            .unwrap();
        assert_eq!(records[0].version_code, (1_i64 << 32) | 3);
        assert_eq!(records[0].version_name, "Unknown");
        assert_eq!(records[0].installer_package_name, "Unknown");
        assert_eq!(records[0].install_time_epoch_millis, 1_700_000_000_000);
    }

    #[test]
    fn test_legacy_tier_uses_int_flags_and_widened_code() {
        let mut packages = MockPackageRegistryPort::new();
        packages
            .expect_installed_packages()
            .withf(|query| *query == PackageQuery::Legacy { flags: 0 })
            .returning(|_| {
                let mut info = package("com.old", ApplicationFlags::SYSTEM);
                info.version_code = 42;
                info.version_code_major = 9;
                Ok(vec![info])
            });
        packages
            .expect_application_label()
            .returning(|_| Ok("Old".to_string()));
        packages
            .expect_installer_package_name()
            .returning(|_| Ok(Some(String::new())));
        let mut settings = MockSecureSettingsPort::new();
        settings
            .expect_get_string()
            .times(1)
            .returning(|_| Ok(Some("1".to_string())));

        let records = inventory(16, packages, settings).list_all().unwrap();
        assert_eq!(records[0].version_code, 42);
        assert_eq!(records[0].installer_package_name, "Unknown");
        assert!(records[0].is_system_app);
    }

    #[test]
    fn test_registry_fault_aborts_enumeration() {
        let mut packages = MockPackageRegistryPort::new();
        packages
            .expect_installed_packages()
            .returning(|_| Err(PlatformFault::security("QUERY_ALL_PACKAGES not granted")));

        let err = inventory(31, packages, MockSecureSettingsPort::new())
            .list_all()
            .unwrap_err();
        assert!(matches!(
            err,
            IntrospectionError::Query(QueryError::PermissionDenied)
        ));
    }
}
