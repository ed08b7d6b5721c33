//! Candidate locations for the database file.
//!
//! The store lived in the app's private data directory before the shared
//! app-group location existed; [`StorePaths`] computes both candidates so the
//! migration in [`crate::migrate`] can relocate old installs. Path
//! computation here is pure; resolving the platform roots is the only
//! fallible step, and an unresolvable root is a configuration error, not a
//! runtime condition to recover from.

use crate::error::{BinderError, Result};
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

/// Fixed database filename, identical in both locations.
pub const DB_FILENAME: &str = "binder.sqlite";

/// Directory of cached sync assets kept alongside the legacy database.
pub const ASSET_CACHE_DIRNAME: &str = "sync-assets";

/// The two candidate database locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// Pre-app-group location inside the private data directory.
    pub legacy: PathBuf,
    /// Location inside the directory shared across the app group.
    pub shared: PathBuf,
}

impl StorePaths {
    pub fn new(private_root: &Path, shared_root: &Path) -> Self {
        Self {
            legacy: private_root.join(DB_FILENAME),
            shared: shared_root.join(DB_FILENAME),
        }
    }
}

/// Write-ahead-log and shared-memory side files the engine keeps next to a
/// database in WAL mode.
pub fn sidecar_paths(db: &Path) -> [PathBuf; 2] {
    [suffixed(db, "-wal"), suffixed(db, "-shm")]
}

/// The sync-asset cache directory kept next to a database file.
pub fn asset_cache_dir(db: &Path) -> PathBuf {
    match db.parent() {
        Some(parent) => parent.join(ASSET_CACHE_DIRNAME),
        None => PathBuf::from(ASSET_CACHE_DIRNAME),
    }
}

fn suffixed(db: &Path, suffix: &str) -> PathBuf {
    let mut name = db.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Resolve the private per-app data root and the shared app-group root for
/// the given group identifier.
pub fn resolve_roots(group_id: &str) -> Result<(PathBuf, PathBuf)> {
    let proj_dirs = ProjectDirs::from("app", "binder", "binder")
        .ok_or_else(|| BinderError::Config("could not resolve the private data directory".into()))?;
    let private_root = proj_dirs.data_dir().to_path_buf();

    let base_dirs = BaseDirs::new()
        .ok_or_else(|| BinderError::Config("could not resolve the user data directory".into()))?;
    let shared_root = base_dirs.data_dir().join(group_id);

    Ok((private_root, shared_root))
}
