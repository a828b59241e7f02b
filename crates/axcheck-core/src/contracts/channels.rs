//! Channel and method name constants.

/// Channel carrying the accessibility queries.
pub const ACCESSIBILITY_CHANNEL: &str = "accessibility_checker";

/// Channel carrying the installed-package query.
pub const INSTALLED_APPS_CHANNEL: &str = "installed_apps_checker";

pub const IS_ACCESSIBILITY_ENABLED: &str = "isAccessibilityEnabled";
pub const GET_ENABLED_ACCESSIBILITY_SERVICES: &str = "getEnabledAccessibilityServices";
pub const GET_DETAILED_ACCESSIBILITY_SERVICES: &str = "getDetailedAccessibilityServices";
pub const GET_ALL_INSTALLED_APPS: &str = "getAllInstalledApps";

/// Error code attached to every failed query response.
pub const ERROR_CODE: &str = "ERROR";
