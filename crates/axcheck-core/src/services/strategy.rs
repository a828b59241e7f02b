//! Per-tier strategy table.
//!
//! Each [`CapabilityTier`] owns one [`TierStrategy`]: the package query form
//! plus the functions used to read a version code and an installer. Callers
//! compute the tier once and look the strategy up; nothing downstream
//! compares API levels.

use tracing::debug;

use crate::domain::{CapabilityTier, PackageInfoFlags, first_present};
use crate::ports::{
    INSTALL_NON_MARKET_APPS, PackageInfo, PackageQuery, PackageRegistryPort, PlatformFault,
    SecureSettingsPort,
};

/// Ports available to an installer lookup.
#[derive(Clone, Copy)]
pub struct InstallerPorts<'a> {
    pub packages: &'a dyn PackageRegistryPort,
    pub settings: &'a dyn SecureSettingsPort,
}

/// Reads a 64-bit version code from package metadata.
pub type VersionCodeStrategy = fn(&PackageInfo) -> i64;

/// Looks up the installer of a package. `Ok(None)` means no installer recorded.
pub type InstallerStrategy =
    fn(InstallerPorts<'_>, &str) -> Result<Option<String>, PlatformFault>;

/// Behavior selected for one capability tier.
pub struct TierStrategy {
    pub tier: CapabilityTier,
    pub package_query: PackageQuery,
    pub version_code: VersionCodeStrategy,
    pub installer: InstallerStrategy,
    /// Short names of the three selections, for diagnostics.
    pub describe: StrategyNames,
}

/// Human-readable names of a strategy's selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyNames {
    pub package_query: &'static str,
    pub version_code: &'static str,
    pub installer: &'static str,
}

const LEGACY_QUERY: PackageQuery = PackageQuery::Legacy { flags: 0 };
const FLAGS_QUERY: PackageQuery = PackageQuery::WithFlags(PackageInfoFlags::empty());

static STRATEGIES: [TierStrategy; 5] = [
    TierStrategy {
        tier: CapabilityTier::Legacy,
        package_query: LEGACY_QUERY,
        version_code: widened_version_code,
        installer: legacy_installer_with_probe,
        describe: StrategyNames {
            package_query: "legacy-int-flags",
            version_code: "widened-32bit",
            installer: "installer-api+settings-probe",
        },
    },
    TierStrategy {
        tier: CapabilityTier::Mid,
        package_query: LEGACY_QUERY,
        version_code: widened_version_code,
        installer: legacy_installer,
        describe: StrategyNames {
            package_query: "legacy-int-flags",
            version_code: "widened-32bit",
            installer: "installer-api",
        },
    },
    TierStrategy {
        tier: CapabilityTier::Modern,
        package_query: LEGACY_QUERY,
        version_code: native_version_code,
        installer: legacy_installer,
        describe: StrategyNames {
            package_query: "legacy-int-flags",
            version_code: "native-64bit",
            installer: "installer-api",
        },
    },
    TierStrategy {
        tier: CapabilityTier::Current,
        package_query: LEGACY_QUERY,
        version_code: native_version_code,
        installer: install_source_installer,
        describe: StrategyNames {
            package_query: "legacy-int-flags",
            version_code: "native-64bit",
            installer: "install-source",
        },
    },
    TierStrategy {
        tier: CapabilityTier::Latest,
        package_query: FLAGS_QUERY,
        version_code: native_version_code,
        installer: install_source_installer,
        describe: StrategyNames {
            package_query: "flag-object",
            version_code: "native-64bit",
            installer: "install-source",
        },
    },
];

impl TierStrategy {
    /// Look up the strategy for a tier.
    pub fn for_tier(tier: CapabilityTier) -> &'static Self {
        &STRATEGIES[tier.index()]
    }

    /// Look up the strategy for a raw API level.
    pub fn for_api_level(api_level: u32) -> &'static Self {
        Self::for_tier(CapabilityTier::from_api_level(api_level))
    }
}

fn widened_version_code(info: &PackageInfo) -> i64 {
    info.widened_version_code()
}

fn native_version_code(info: &PackageInfo) -> i64 {
    info.long_version_code()
}

fn install_source_installer(
    ports: InstallerPorts<'_>,
    package_name: &str,
) -> Result<Option<String>, PlatformFault> {
    let source = ports.packages.install_source_info(package_name)?;
    Ok(first_present([
        source.installing_package_name,
        source.initiating_package_name,
        source.originating_package_name,
    ]))
}

fn legacy_installer(
    ports: InstallerPorts<'_>,
    package_name: &str,
) -> Result<Option<String>, PlatformFault> {
    let installer = ports.packages.installer_package_name(package_name)?;
    Ok(first_present([installer]))
}

// The settings probe only mirrors the old platform's call sequence; its value
// never changes the result.
fn legacy_installer_with_probe(
    ports: InstallerPorts<'_>,
    package_name: &str,
) -> Result<Option<String>, PlatformFault> {
    let installer = legacy_installer(ports, package_name)?;
    if installer.is_none() {
        match ports.settings.get_string(INSTALL_NON_MARKET_APPS) {
            Ok(value) => debug!(package_name, ?value, "Probed non-market install setting"),
            Err(fault) => debug!(package_name, %fault, "Non-market install setting unreadable"),
        }
    }
    Ok(installer)
}
