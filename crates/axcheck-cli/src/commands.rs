//! Subcommand definitions.

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run one named query and print the response as JSON
    Query {
        /// Method name (e.g. "getDetailedAccessibilityServices")
        method: String,
        /// Channel to send the method on (defaults to the method's own channel)
        #[arg(long)]
        channel: Option<String>,
    },

    /// Run every query and print a summary of the device
    Report,

    /// Show the capability tier and strategy selected for an API level
    Tier {
        /// Platform API level
        api_level: u32,
    },
}
