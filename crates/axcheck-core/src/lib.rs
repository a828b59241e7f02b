#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod contracts;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AppRecord, ApplicationFlags, CapabilityTier, Channel, FeedbackTypes, InstallerSentinel,
    PackageInfoFlags, QueryRequest, QueryResponse, ServiceFlags, ServiceNameList, ServiceRecord,
};
pub use ports::{
    AccessibilityRegistryPort, ApplicationInfo, EnabledServiceInfo, FaultKind, InstallSourceInfo,
    IntrospectionError, PackageInfo, PackageQuery, PackageRegistryPort, Platform, PlatformFault,
    PlatformInfoPort, QueryError, SecureSettingsPort,
};
pub use services::{AccessibilityIntrospector, PackageInventory, QueryFacade, TierStrategy};
