//! Platform flag words.
//!
//! Bit values match the host platform so raw flag integers read from a device
//! can be loaded without translation. Unknown bits are dropped on load.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flags declared by an accessibility service in its service info.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[repr(transparent)]
    pub struct ServiceFlags: u32 {
        const DEFAULT                            = 0x0000_0001;
        const INCLUDE_NOT_IMPORTANT_VIEWS        = 0x0000_0002;
        /// Service asks the system to enter touch exploration mode.
        const REQUEST_TOUCH_EXPLORATION_MODE     = 0x0000_0004;
        /// Service asks for enhanced web accessibility scripts.
        const REQUEST_ENHANCED_WEB_ACCESSIBILITY = 0x0000_0008;
        const REPORT_VIEW_IDS                    = 0x0000_0010;
        const REQUEST_FILTER_KEY_EVENTS          = 0x0000_0020;
        /// Service can read the content of interactive windows.
        const RETRIEVE_INTERACTIVE_WINDOWS       = 0x0000_0040;
    }
}

bitflags! {
    /// Subset of application-info flags relevant to system classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[repr(transparent)]
    pub struct ApplicationFlags: u32 {
        /// Installed in the system partition.
        const SYSTEM             = 0x0000_0001;
        /// System app that has been replaced by an update.
        const UPDATED_SYSTEM_APP = 0x0000_0080;
    }
}

bitflags! {
    /// Accessibility feedback types used to filter the enabled-service registry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[repr(transparent)]
    pub struct FeedbackTypes: u32 {
        const SPOKEN  = 0x0000_0001;
        const HAPTIC  = 0x0000_0002;
        const AUDIBLE = 0x0000_0004;
        const VISUAL  = 0x0000_0008;
        const GENERIC = 0x0000_0010;
        const BRAILLE = 0x0000_0020;
    }
}

macro_rules! serde_as_bits {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                self.bits().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bits = u32::deserialize(deserializer)?;
                Ok(Self::from_bits_truncate(bits))
            }
        }
    };
}

serde_as_bits!(ServiceFlags);
serde_as_bits!(ApplicationFlags);
serde_as_bits!(FeedbackTypes);

impl ServiceFlags {
    pub const fn can_retrieve_window_content(self) -> bool {
        self.contains(Self::RETRIEVE_INTERACTIVE_WINDOWS)
    }

    pub const fn can_request_touch_exploration(self) -> bool {
        self.contains(Self::REQUEST_TOUCH_EXPLORATION_MODE)
    }

    pub const fn can_request_enhanced_web_access(self) -> bool {
        self.contains(Self::REQUEST_ENHANCED_WEB_ACCESSIBILITY)
    }
}

impl ApplicationFlags {
    /// True for apps in the system partition and for updated system apps.
    pub const fn is_system_app(self) -> bool {
        self.intersects(Self::SYSTEM.union(Self::UPDATED_SYSTEM_APP))
    }
}

/// Extra metadata requested from a package query.
///
/// Newer platforms take a 64-bit flag object instead of a plain `int`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageInfoFlags(pub u64);

impl PackageInfoFlags {
    /// Request no extra metadata.
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }
}
