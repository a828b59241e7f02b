//! Core services - the introspection logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They hold no state between calls; every query builds a fresh snapshot.

mod accessibility;
mod package_inventory;
mod query_facade;
pub mod strategy;

pub use accessibility::{AccessibilityIntrospector, parse_service_names};
pub use package_inventory::{PackageInventory, installer_sentinel};
pub use query_facade::QueryFacade;
pub use strategy::{InstallerPorts, StrategyNames, TierStrategy};
