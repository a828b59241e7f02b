//! Accessibility introspection service.
//!
//! Two sources describe the enabled services and they are kept independent:
//!
//! - the authoritative registry, used by [`AccessibilityIntrospector::is_enabled`]
//!   and [`AccessibilityIntrospector::list_services_detailed`]
//! - the `enabled_accessibility_services` secure setting, used by
//!   [`AccessibilityIntrospector::list_service_names`]
//!
//! They can disagree on some platform versions. Both views are reported as-is.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{
    DEFAULT_SERVICE_DESCRIPTION, FeedbackTypes, ServiceNameList, ServiceRecord, first_present_or,
};
use crate::ports::{
    AccessibilityRegistryPort, ENABLED_ACCESSIBILITY_SERVICES, EnabledServiceInfo,
    IntrospectionError, QueryError, SecureSettingsPort,
};

/// Service producing enabled-accessibility-service snapshots.
pub struct AccessibilityIntrospector {
    registry: Arc<dyn AccessibilityRegistryPort>,
    settings: Arc<dyn SecureSettingsPort>,
}

impl AccessibilityIntrospector {
    /// Create a new accessibility introspector.
    pub fn new(
        registry: Arc<dyn AccessibilityRegistryPort>,
        settings: Arc<dyn SecureSettingsPort>,
    ) -> Self {
        Self { registry, settings }
    }

    /// Whether at least one accessibility service is enabled.
    ///
    /// Never fails: an unreadable registry counts as empty.
    pub fn is_enabled(&self) -> bool {
        match self.registry.enabled_services(FeedbackTypes::all()) {
            Ok(services) => !services.is_empty(),
            Err(fault) => {
                warn!(%fault, "Accessibility registry unreadable, reporting disabled");
                false
            }
        }
    }

    /// Bare names of the services listed in the enabled-services setting.
    pub fn list_service_names(&self) -> Result<ServiceNameList, IntrospectionError> {
        let raw = self.settings.get_string(ENABLED_ACCESSIBILITY_SERVICES)?;
        Ok(raw.as_deref().map(parse_service_names).unwrap_or_default())
    }

    /// One detailed record per registry entry, in registry order.
    pub fn list_services_detailed(&self) -> Result<Vec<ServiceRecord>, IntrospectionError> {
        let services = self.registry.enabled_services(FeedbackTypes::all())?;
        services
            .iter()
            .map(|service| self.to_record(service))
            .collect()
    }

    fn to_record(&self, service: &EnabledServiceInfo) -> Result<ServiceRecord, IntrospectionError> {
        if service.package_name.is_empty() || service.service_name.is_empty() {
            return Err(QueryError::Unexpected(format!(
                "registry entry without component identity: '{}/{}'",
                service.package_name, service.service_name
            ))
            .into());
        }

        Ok(ServiceRecord {
            package_name: service.package_name.clone(),
            service_name: service.service_name.clone(),
            label: self.resolve_label(service),
            description: first_present_or(
                [service.description.as_deref()],
                DEFAULT_SERVICE_DESCRIPTION,
            ),
            can_retrieve_window_content: service.flags.can_retrieve_window_content(),
            can_request_touch_exploration: service.flags.can_request_touch_exploration(),
            can_request_enhanced_web_access: service.flags.can_request_enhanced_web_access(),
            settings_activity_name: service.settings_activity_name.clone().unwrap_or_default(),
        })
    }

    fn resolve_label(&self, service: &EnabledServiceInfo) -> String {
        let resolved = self.registry.service_label(service).unwrap_or_else(|fault| {
            debug!(
                service = %service.service_name,
                %fault,
                "Label resolution failed, falling back"
            );
            None
        });

        first_present_or(
            [resolved.as_deref(), service.label.as_deref()],
            &service.service_name,
        )
    }
}

/// Split a colon-separated `package/service` list into bare service names.
///
/// Each entry keeps only the text after its last `/`. Entries that leave
/// an empty name, including empty segments and trailing slashes, are skipped.
pub fn parse_service_names(raw: &str) -> ServiceNameList {
    raw.split(':')
        .filter_map(|entry| entry.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
