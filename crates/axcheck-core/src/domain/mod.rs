//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! platform or transport concerns.
//!
//! # Structure
//!
//! - `tier` - Platform version gating (`CapabilityTier`)
//! - `flags` - Platform flag words
//! - `records` - Snapshot records (`ServiceRecord`, `AppRecord`)
//! - `query` - Named requests and responses
//! - `candidates` - Ordered-candidate resolution helpers

pub mod candidates;
pub mod flags;
pub mod query;
pub mod records;
pub mod tier;

pub use candidates::{first_present, first_present_or};
pub use flags::{ApplicationFlags, FeedbackTypes, PackageInfoFlags, ServiceFlags};
pub use query::{Channel, QueryRequest, QueryResponse};
pub use records::{
    AppRecord, DEFAULT_SERVICE_DESCRIPTION, INSTALLER_ERROR_PREFIX, InstallerSentinel,
    ServiceNameList, ServiceRecord, UNKNOWN_VERSION_NAME,
};
pub use tier::CapabilityTier;
