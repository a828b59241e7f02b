//! Secure settings port.

use super::PlatformFault;

/// Colon-separated `package/service` list of enabled accessibility services.
pub const ENABLED_ACCESSIBILITY_SERVICES: &str = "enabled_accessibility_services";

/// Sideloading toggle on old platforms, probed during legacy installer lookup.
pub const INSTALL_NON_MARKET_APPS: &str = "install_non_market_apps";

/// Port for reading string values from the platform's secure settings store.
#[cfg_attr(test, mockall::automock)]
pub trait SecureSettingsPort: Send + Sync {
    /// Read a value; `Ok(None)` when the key is unset.
    fn get_string(&self, key: &str) -> Result<Option<String>, PlatformFault>;
}
