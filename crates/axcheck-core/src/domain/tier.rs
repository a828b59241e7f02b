//! Platform version gating.
//!
//! The host platform changed how packages, version codes and installer
//! provenance are queried at four API levels. `CapabilityTier` partitions the
//! API level space at exactly those breakpoints so the rest of the crate can
//! select behavior by tier instead of comparing raw numbers.
//!
//! # Invariant
//!
//! `CapabilityTier::from_api_level` is total and non-decreasing: a higher API
//! level never maps to a lower tier.

use std::fmt;

/// First API level with the split installer/initiator lookup behavior.
pub const API_MID: u32 = 21;

/// First API level exposing a native 64-bit version code.
pub const API_MODERN: u32 = 28;

/// First API level exposing install-source provenance.
pub const API_CURRENT: u32 = 30;

/// First API level using flag objects for package queries.
pub const API_LATEST: u32 = 33;

/// Discrete capability tier derived from a platform API level.
///
/// Used internally to pick a strategy; never part of a query response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityTier {
    /// Below API 21. Installer lookup falls back to a settings probe.
    Legacy,
    /// API 21 to 27.
    Mid,
    /// API 28 to 29. Native 64-bit version code.
    Modern,
    /// API 30 to 32. Install-source provenance.
    Current,
    /// API 33 and later. Flag-object package queries.
    Latest,
}

impl CapabilityTier {
    /// All tiers in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Legacy,
        Self::Mid,
        Self::Modern,
        Self::Current,
        Self::Latest,
    ];

    /// Map a platform API level to its tier.
    pub const fn from_api_level(api_level: u32) -> Self {
        match api_level {
            API_LATEST.. => Self::Latest,
            API_CURRENT.. => Self::Current,
            API_MODERN.. => Self::Modern,
            API_MID.. => Self::Mid,
            _ => Self::Legacy,
        }
    }

    /// Position of the tier in [`CapabilityTier::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable lowercase name, used in logs and CLI output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Mid => "mid",
            Self::Modern => "modern",
            Self::Current => "current",
            Self::Latest => "latest",
        }
    }

    /// Lowest API level belonging to this tier.
    pub const fn min_api_level(self) -> u32 {
        match self {
            Self::Legacy => 0,
            Self::Mid => API_MID,
            Self::Modern => API_MODERN,
            Self::Current => API_CURRENT,
            Self::Latest => API_LATEST,
        }
    }
}

impl fmt::Display for CapabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
