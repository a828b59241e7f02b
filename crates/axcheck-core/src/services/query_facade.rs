//! `QueryFacade` - the single entry surface for named queries.
//!
//! Adapters construct one facade from a [`Platform`] and send it method
//! names. The facade routes each name to an introspector and shapes the
//! result into a [`QueryResponse`].

use serde_json::Value;
use tracing::{debug, warn};

use super::{AccessibilityIntrospector, PackageInventory};
use crate::contracts::keyed::to_keyed_list;
use crate::domain::{Channel, QueryRequest, QueryResponse};
use crate::ports::{IntrospectionError, Platform};

/// Composition of the two introspectors behind one request surface.
pub struct QueryFacade {
    accessibility: AccessibilityIntrospector,
    packages: PackageInventory,
}

impl QueryFacade {
    /// Create a facade over the given platform ports.
    pub fn new(platform: Platform) -> Self {
        Self {
            accessibility: AccessibilityIntrospector::new(
                platform.accessibility,
                platform.settings.clone(),
            ),
            packages: PackageInventory::new(platform.info, platform.packages, platform.settings),
        }
    }

    /// Access the accessibility introspector.
    pub const fn accessibility(&self) -> &AccessibilityIntrospector {
        &self.accessibility
    }

    /// Access the package inventory.
    pub const fn packages(&self) -> &PackageInventory {
        &self.packages
    }

    /// Handle a method sent on a specific channel.
    ///
    /// Methods not served on `channel` are reported as not implemented.
    pub fn handle(&self, channel: Channel, method: &str) -> QueryResponse {
        QueryRequest::route(channel, method).map_or_else(
            || {
                debug!(%channel, method, "Method not implemented on channel");
                QueryResponse::NotImplemented
            },
            |request| self.execute(request),
        )
    }

    /// Handle a method name regardless of channel.
    pub fn handle_method(&self, method: &str) -> QueryResponse {
        QueryRequest::from_method(method).map_or_else(
            || {
                debug!(method, "Method not implemented");
                QueryResponse::NotImplemented
            },
            |request| self.execute(request),
        )
    }

    /// Run a recognized request to completion.
    pub fn execute(&self, request: QueryRequest) -> QueryResponse {
        match self.run(request) {
            Ok(value) => QueryResponse::success(value),
            Err(err) => {
                warn!(%request, error = %err, "Query failed");
                QueryResponse::error(err.to_string())
            }
        }
    }

    fn run(&self, request: QueryRequest) -> Result<Value, IntrospectionError> {
        match request {
            QueryRequest::IsAccessibilityEnabled => {
                Ok(Value::Bool(self.accessibility.is_enabled()))
            }
            QueryRequest::GetEnabledAccessibilityServices => {
                let names = self.accessibility.list_service_names()?;
                Ok(Value::Array(names.into_iter().map(Value::String).collect()))
            }
            QueryRequest::GetDetailedAccessibilityServices => {
                to_keyed_list(&self.accessibility.list_services_detailed()?)
            }
            QueryRequest::GetAllInstalledApps => to_keyed_list(&self.packages.list_all()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeedbackTypes;
    use crate::ports::{
        AccessibilityRegistryPort, ApplicationInfo, EnabledServiceInfo, FaultKind,
        InstallSourceInfo, PackageInfo, PackageQuery, PackageRegistryPort, PlatformFault,
        PlatformInfoPort, SecureSettingsPort,
    };
    use std::sync::Arc;

    /// Mock implementation for testing.
    #[derive(Default)]
    struct MockDevice {
        services: Vec<EnabledServiceInfo>,
        registry_fault: Option<PlatformFault>,
        enabled_setting: Option<String>,
        packages: Vec<PackageInfo>,
    }

    impl PlatformInfoPort for MockDevice {
        fn api_level(&self) -> u32 {
            34
        }
    }

    impl AccessibilityRegistryPort for MockDevice {
        fn enabled_services(
            &self,
            _feedback: FeedbackTypes,
        ) -> Result<Vec<EnabledServiceInfo>, PlatformFault> {
            self.registry_fault
                .clone()
                .map_or_else(|| Ok(self.services.clone()), Err)
        }

        fn service_label(
            &self,
            _service: &EnabledServiceInfo,
        ) -> Result<Option<String>, PlatformFault> {
            Ok(None)
        }
    }

    impl SecureSettingsPort for MockDevice {
        fn get_string(&self, _key: &str) -> Result<Option<String>, PlatformFault> {
            Ok(self.enabled_setting.clone())
        }
    }

    impl PackageRegistryPort for MockDevice {
        fn installed_packages(
            &self,
            _query: PackageQuery,
        ) -> Result<Vec<PackageInfo>, PlatformFault> {
            Ok(self.packages.clone())
        }

        fn application_label(&self, app: &ApplicationInfo) -> Result<String, PlatformFault> {
            Ok(app.non_localized_label.clone().unwrap_or_default())
        }

        fn installer_package_name(
            &self,
            _package_name: &str,
        ) -> Result<Option<String>, PlatformFault> {
            Ok(None)
        }

        fn install_source_info(
            &self,
            _package_name: &str,
        ) -> Result<InstallSourceInfo, PlatformFault> {
            Ok(InstallSourceInfo {
                installing_package_name: Some("com.android.vending".to_string()),
                ..Default::default()
            })
        }
    }

    fn facade(device: MockDevice) -> QueryFacade {
        QueryFacade::new(Platform::from_device(Arc::new(device)))
    }

    #[test]
    fn test_enabled_check_never_fails() {
        let device = MockDevice {
            registry_fault: Some(PlatformFault::bare(FaultKind::Remote)),
            ..Default::default()
        };
        let response = facade(device).handle_method("isAccessibilityEnabled");
        assert_eq!(response, QueryResponse::success(Value::Bool(false)));
    }

    #[test]
    fn test_service_names_response() {
        let device = MockDevice {
            enabled_setting: Some("com.a/com.a.Service:com.b/com.b.OtherService".to_string()),
            ..Default::default()
        };
        let response =
            facade(device).handle(Channel::Accessibility, "getEnabledAccessibilityServices");
        assert_eq!(
            response.value(),
            Some(&serde_json::json!(["Service", "OtherService"]))
        );
    }

    #[test]
    fn test_detailed_failure_is_generic_error() {
        let device = MockDevice {
            registry_fault: Some(PlatformFault::new(FaultKind::Other, "manager gone")),
            ..Default::default()
        };
        let response = facade(device).handle_method("getDetailedAccessibilityServices");
        assert_eq!(response, QueryResponse::error("manager gone"));
    }

    #[test]
    fn test_installed_apps_keyed_response() {
        let device = MockDevice {
            packages: vec![PackageInfo {
                package_name: "org.example".to_string(),
                version_name: Some("1.2".to_string()),
                version_code: 12,
                first_install_time: 99,
                application_info: Some(ApplicationInfo {
                    package_name: "org.example".to_string(),
                    non_localized_label: Some("Example".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let response = facade(device).handle(Channel::InstalledApps, "getAllInstalledApps");
        let value = response.value().unwrap();
        assert_eq!(value[0]["appName"], "Example");
        assert_eq!(value[0]["installerPackageName"], "com.android.vending");
        assert_eq!(value[0]["installTime"], 99);
    }

    #[test]
    fn test_unknown_and_misrouted_methods_not_implemented() {
        let facade = facade(MockDevice::default());
        assert_eq!(
            facade.handle_method("getBatteryLevel"),
            QueryResponse::NotImplemented
        );
        assert_eq!(
            facade.handle(Channel::Accessibility, "getAllInstalledApps"),
            QueryResponse::NotImplemented
        );
    }
}
