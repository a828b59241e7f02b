#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

pub mod session;
pub mod snapshot;

use std::path::Path;
use std::sync::Arc;

use axcheck_core::{Platform, QueryFacade};

// Re-export the session and adapter entry points
pub use session::{QuerySession, SessionError};
pub use snapshot::{
    DeviceDump, DumpedApplication, DumpedPackage, DumpedService, SnapshotError, SnapshotPlatform,
};

/// Build a session over a device dump file.
///
/// `api_level` overrides the level recorded in the dump.
pub fn open_snapshot_session(
    path: &Path,
    api_level: Option<u32>,
) -> Result<QuerySession, SnapshotError> {
    let mut platform = SnapshotPlatform::load(path)?;
    if let Some(level) = api_level {
        platform = platform.with_api_level(level);
    }
    let facade = QueryFacade::new(Platform::from_device(Arc::new(platform)));
    Ok(QuerySession::new(Arc::new(facade)))
}
