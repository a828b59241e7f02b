//! Tier command handler.
//!
//! Shows which capability tier and strategy a given API level selects.
//! Needs no device.

use anyhow::Result;
use axcheck_core::{CapabilityTier, PackageQuery, TierStrategy};

/// Lines describing the strategy selected for `api_level`.
pub fn describe(api_level: u32) -> Vec<(&'static str, String)> {
    let strategy = TierStrategy::for_api_level(api_level);
    let flags = match &strategy.package_query {
        PackageQuery::Legacy { flags } => u64::from(*flags),
        PackageQuery::WithFlags(flags) => flags.0,
    };
    let query = format!("{} (flags {flags:#x})", strategy.describe.package_query);

    vec![
        ("API level", api_level.to_string()),
        ("Tier", strategy.tier.to_string()),
        ("Tier range", tier_range(strategy.tier)),
        ("Package query", query),
        ("Version code", strategy.describe.version_code.to_string()),
        ("Installer", strategy.describe.installer.to_string()),
    ]
}

fn tier_range(tier: CapabilityTier) -> String {
    let next = CapabilityTier::ALL
        .iter()
        .find(|candidate| **candidate > tier)
        .map(|candidate| candidate.min_api_level());

    match next {
        Some(end) => format!("{}..={}", tier.min_api_level(), end - 1),
        None => format!("{}+", tier.min_api_level()),
    }
}

/// Execute the tier command.
pub fn execute(api_level: u32) -> Result<()> {
    for (label, value) in describe(api_level) {
        println!("{label:<14} {value}");
    }
    Ok(())
}
