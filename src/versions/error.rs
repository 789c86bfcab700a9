//! Snapshot versioning error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for versioning operations.
pub type VersionResult<T> = Result<T, VersionError>;

/// Errors that can occur while saving or restoring snapshots.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The artifact to snapshot does not exist.
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    /// No record with this version number.
    #[error("Version {0} not found")]
    NotFound(u32),

    /// The record exists but its snapshot file was removed.
    #[error("Version {version} snapshot is missing: {path}")]
    SnapshotMissing { version: u32, path: PathBuf },

    /// The generated snapshot name is already taken on disk.
    #[error("Snapshot already exists: {0}")]
    AlreadyExists(PathBuf),

    /// Rollback target lies inside the versions directory.
    #[error("Refusing to overwrite snapshot storage: {0}")]
    ProtectedDestination(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
