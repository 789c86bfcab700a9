//! Snapshot versioning of generated decks.
//!
//! Each iteration of a deck is saved as an immutable, timestamped copy in a
//! versions directory so earlier iterations can be listed, compared and
//! restored.

mod error;
mod manager;
mod naming;

pub use error::{VersionError, VersionResult};
pub use manager::{Version, VersionComparison, VersionManager, BACKUP_NOTE};
pub use naming::{format_timestamp, slugify, SnapshotName, DEFAULT_NOTE, TIMESTAMP_FORMAT};
