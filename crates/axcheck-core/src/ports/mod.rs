//! Port definitions (trait abstractions) for the host platform.
//!
//! Ports define what the introspection services expect from the operating
//! system. They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - Ports are synchronous point-in-time reads; dispatch off the caller's
//!   thread is the runtime's job
//! - Failures are reported as [`PlatformFault`], never normalized here
//! - No port mutates platform state

pub mod accessibility;
pub mod fault;
pub mod packages;
pub mod settings;

use std::sync::Arc;
use thiserror::Error;

pub use accessibility::{AccessibilityRegistryPort, EnabledServiceInfo};
pub use fault::{FaultKind, PlatformFault, QueryError};
pub use packages::{
    ApplicationInfo, InstallSourceInfo, PackageInfo, PackageQuery, PackageRegistryPort,
};
pub use settings::{ENABLED_ACCESSIBILITY_SERVICES, INSTALL_NON_MARKET_APPS, SecureSettingsPort};

/// Port reporting the platform version of the device.
pub trait PlatformInfoPort: Send + Sync {
    /// API level of the running platform.
    fn api_level(&self) -> u32;
}

/// Container for all platform port trait objects.
///
/// Adapters build one of these at their composition root and hand it to
/// [`crate::services::QueryFacade`].
#[derive(Clone)]
pub struct Platform {
    /// Platform version source.
    pub info: Arc<dyn PlatformInfoPort>,
    /// Enabled accessibility service registry.
    pub accessibility: Arc<dyn AccessibilityRegistryPort>,
    /// Secure settings store.
    pub settings: Arc<dyn SecureSettingsPort>,
    /// Installed package registry.
    pub packages: Arc<dyn PackageRegistryPort>,
}

impl Platform {
    /// Create a new Platform container.
    pub fn new(
        info: Arc<dyn PlatformInfoPort>,
        accessibility: Arc<dyn AccessibilityRegistryPort>,
        settings: Arc<dyn SecureSettingsPort>,
        packages: Arc<dyn PackageRegistryPort>,
    ) -> Self {
        Self {
            info,
            accessibility,
            settings,
            packages,
        }
    }

    /// Build a container from one value implementing every port.
    pub fn from_device<D>(device: Arc<D>) -> Self
    where
        D: PlatformInfoPort
            + AccessibilityRegistryPort
            + SecureSettingsPort
            + PackageRegistryPort
            + 'static,
    {
        Self::new(device.clone(), device.clone(), device.clone(), device)
    }
}

/// Failure of a whole introspection operation.
///
/// Item-level faults never reach this type; they are folded into record
/// fields by the services.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    /// A top-level platform query failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A record could not be converted to its keyed form.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<PlatformFault> for IntrospectionError {
    fn from(fault: PlatformFault) -> Self {
        Self::Query(QueryError::from(fault))
    }
}

impl From<serde_json::Error> for IntrospectionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
