//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for inspecting accessibility services and
/// installed packages recorded in a device dump.
#[derive(Parser)]
#[command(name = "axcheck")]
#[command(about = "Inspect accessibility services and installed packages on a device")]
#[command(version)]
pub struct Cli {
    /// Device dump (JSON) to query
    #[arg(long = "device", env = "AXCHECK_DEVICE", global = true)]
    pub device: Option<PathBuf>,

    /// Override the API level recorded in the dump
    #[arg(long = "api-level", global = true)]
    pub api_level: Option<u32>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
