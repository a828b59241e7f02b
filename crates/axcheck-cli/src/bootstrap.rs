//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the device adapter, the facade and
//! the query session are wired together for the CLI. Command handlers
//! receive the composed [`CliContext`] and dispatch through its session.

use std::path::PathBuf;

use axcheck_runtime::{QuerySession, open_snapshot_session};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Device dump to load.
    pub device: Option<PathBuf>,
    /// API level override.
    pub api_level: Option<u32>,
}

impl CliConfig {
    /// Collect the global options from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            device: cli.device.clone(),
            api_level: cli.api_level,
        }
    }
}

/// Composed dependencies for command handlers.
pub struct CliContext {
    session: QuerySession,
    device: PathBuf,
}

impl CliContext {
    /// Access the query session.
    pub const fn session(&self) -> &QuerySession {
        &self.session
    }

    /// Path of the loaded device dump.
    pub const fn device(&self) -> &PathBuf {
        &self.device
    }
}

/// Bootstrap the CLI application.
///
/// Loads the device dump named by `config` and opens a session over it.
///
/// # Errors
///
/// Returns [`CliError::Config`] when no dump was given, or the mapped
/// [`SnapshotError`](axcheck_runtime::SnapshotError) when it cannot be loaded.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let device = config.device.ok_or_else(|| {
        CliError::Config("no device dump; pass --device or set AXCHECK_DEVICE".to_string())
    })?;

    let session = open_snapshot_session(&device, config.api_level)?;
    debug!(device = %device.display(), api_level = ?config.api_level, "Session opened");

    Ok(CliContext { session, device })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_device_is_config_error() {
        let err = bootstrap(CliConfig::default()).err().unwrap();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_unreadable_device_is_io_error() {
        let config = CliConfig {
            device: Some(PathBuf::from("/nonexistent/axcheck/device.json")),
            api_level: None,
        };
        let err = bootstrap(config).err().unwrap();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_bootstrap_opens_session() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"apiLevel": 30}}"#).unwrap();

        let ctx = bootstrap(CliConfig {
            device: Some(file.path().to_path_buf()),
            api_level: Some(21),
        })
        .unwrap();

        assert_eq!(ctx.device(), file.path());
        assert_eq!(
            ctx.session().facade().packages().tier(),
            axcheck_core::CapabilityTier::Mid
        );
    }
}
