//! Snapshot history for a generated artifact.
//!
//! Every saved snapshot is a copy of the artifact in a versions directory.
//! The directory is the only persistent state: it is scanned once when the
//! manager is opened and the in-memory list is append-only afterwards.
//! Access is assumed to be single-writer; nothing here locks the directory.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::error::{VersionError, VersionResult};
use super::naming::SnapshotName;

/// Note used for [`VersionManager::create_backup`].
pub const BACKUP_NOTE: &str = "backup";

/// One saved snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    /// Sequential version number, starting at 1
    pub number: u32,
    /// Save time as `YYYY-MM-DD_HH-MM`
    pub timestamp: String,
    /// Free-text note
    pub note: String,
    /// Location of the snapshot copy
    pub path: PathBuf,
}

impl Version {
    /// Whether the snapshot file is still on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Size of the snapshot file, 0 when it is missing.
    pub fn size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }
}

/// Result of comparing two snapshots.
///
/// A missing snapshot file is counted as size 0, so `size_change_percent`
/// is 0 whenever the first snapshot has no bytes. `v1_present`/`v2_present`
/// tell a missing file apart from an empty one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionComparison {
    pub v1: Version,
    pub v2: Version,
    pub v1_present: bool,
    pub v2_present: bool,
    pub size1: u64,
    pub size2: u64,
    /// `size2 - size1` in bytes
    pub size_diff: i64,
    /// Relative change from `size1`, in percent
    pub size_change_percent: f64,
    /// Byte-for-byte equality, when both files exist
    pub identical: Option<bool>,
}

/// Manages the snapshot history of one artifact base name.
#[derive(Debug)]
pub struct VersionManager {
    /// Directory holding the snapshot copies
    versions_dir: PathBuf,
    /// Base name shared by every snapshot file
    base_name: String,
    /// Fixed snapshot extension; `None` keeps the source's extension
    extension: Option<String>,
    /// Known versions, ascending by number
    versions: Vec<Version>,
}

impl VersionManager {
    /// Open (creating if needed) a versions directory and load the snapshots
    /// already in it.
    pub fn open(
        versions_dir: impl Into<PathBuf>,
        base_name: impl Into<String>,
        extension: Option<String>,
    ) -> VersionResult<Self> {
        let versions_dir = versions_dir.into();
        fs::create_dir_all(&versions_dir)?;

        let mut manager = Self {
            versions_dir,
            base_name: base_name.into(),
            extension: extension.map(|e| e.trim_start_matches('.').to_string()).filter(|e| !e.is_empty()),
            versions: Vec::new(),
        };
        manager.load_versions()?;
        Ok(manager)
    }

    /// Directory holding the snapshots.
    pub fn versions_dir(&self) -> &Path {
        &self.versions_dir
    }

    /// Base name of the tracked artifact.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Scan the directory for snapshot files. Names that do not parse are
    /// skipped, as are later files repeating a version number.
    fn load_versions(&mut self) -> VersionResult<()> {
        for entry in fs::read_dir(&self.versions_dir)?.filter_map(Result::ok) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            match SnapshotName::parse(file_name, &self.base_name, self.extension.as_deref()) {
                Some(name) => self.versions.push(Version {
                    number: name.version,
                    note: name.note(),
                    timestamp: name.timestamp,
                    path,
                }),
                None => {
                    tracing::debug!(file = file_name, "Skipping file that is not a snapshot");
                }
            }
        }

        self.versions.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.path.cmp(&b.path)));

        // Stray copies such as `*.pptx~` parse to an existing number when any
        // extension is accepted. The first path in sort order wins.
        self.versions.dedup_by(|later, kept| {
            let duplicate = later.number == kept.number;
            if duplicate {
                tracing::warn!(
                    version = kept.number,
                    kept = ?kept.path,
                    skipped = ?later.path,
                    "Skipping duplicate snapshot version number"
                );
            }
            duplicate
        });

        tracing::debug!(
            dir = ?self.versions_dir,
            base = %self.base_name,
            count = self.versions.len(),
            "Loaded snapshots"
        );
        Ok(())
    }

    /// Number the next snapshot will get. One past the highest known number,
    /// so numbers are not reused after snapshots are deleted.
    pub fn next_version_number(&self) -> u32 {
        self.versions.iter().map(|v| v.number).max().unwrap_or(0) + 1
    }

    /// Copy `source` into the versions directory as a new snapshot.
    pub fn save_version(&mut self, source: impl AsRef<Path>, note: &str) -> VersionResult<PathBuf> {
        self.save_version_at(source, note, Local::now().naive_local())
    }

    /// [`save_version`](Self::save_version) with an explicit save time.
    pub fn save_version_at(
        &mut self,
        source: impl AsRef<Path>,
        note: &str,
        at: NaiveDateTime,
    ) -> VersionResult<PathBuf> {
        let source = source.as_ref();
        if !source.is_file() {
            return Err(VersionError::SourceNotFound(source.to_path_buf()));
        }

        let number = self.next_version_number();
        let name = SnapshotName::new(number, at, note);
        let extension = self
            .extension
            .clone()
            .or_else(|| source.extension().and_then(|e| e.to_str()).map(str::to_string));
        let path = self.versions_dir.join(name.file_name(&self.base_name, extension.as_deref()));

        if path.exists() {
            return Err(VersionError::AlreadyExists(path));
        }

        fs::copy(source, &path)?;

        tracing::info!(version = number, path = ?path, "Saved snapshot");

        self.versions.push(Version {
            number,
            note: name.note(),
            timestamp: name.timestamp,
            path: path.clone(),
        });

        Ok(path)
    }

    /// Snapshot `source` with the note `backup`.
    pub fn create_backup(&mut self, source: impl AsRef<Path>) -> VersionResult<PathBuf> {
        self.save_version(source, BACKUP_NOTE)
    }

    /// Path of a snapshot, or of the latest one when `version` is `None`.
    ///
    /// The file is not checked; a record whose file was deleted still
    /// resolves.
    pub fn load_version(&self, version: Option<u32>) -> Option<&Path> {
        match version {
            None => self.latest_version(),
            Some(n) => self.get(n),
        }
        .map(|v| v.path.as_path())
    }

    /// Record for a version number.
    pub fn get(&self, version: u32) -> Option<&Version> {
        self.versions.iter().find(|v| v.number == version)
    }

    /// All known versions, ascending.
    pub fn list_versions(&self) -> &[Version] {
        &self.versions
    }

    /// Highest version.
    pub fn latest_version(&self) -> Option<&Version> {
        self.versions.last()
    }

    /// Compare the snapshot files of two versions.
    pub fn compare_versions(&self, v1: u32, v2: u32) -> VersionResult<VersionComparison> {
        let first = self.get(v1).ok_or(VersionError::NotFound(v1))?;
        let second = self.get(v2).ok_or(VersionError::NotFound(v2))?;

        let size1 = first.size();
        let size2 = second.size();
        let size_diff = size2 as i64 - size1 as i64;
        let size_change_percent =
            if size1 > 0 { size_diff as f64 / size1 as f64 * 100.0 } else { 0.0 };

        let v1_present = first.exists();
        let v2_present = second.exists();
        let identical = if v1_present && v2_present {
            Some(file_digest(&first.path)? == file_digest(&second.path)?)
        } else {
            None
        };

        Ok(VersionComparison {
            v1: first.clone(),
            v2: second.clone(),
            v1_present,
            v2_present,
            size1,
            size2,
            size_diff,
            size_change_percent,
            identical,
        })
    }

    /// Copy a snapshot to `destination`, reporting failures as `false`.
    pub fn rollback(&self, version: u32, destination: impl AsRef<Path>) -> bool {
        match self.try_rollback(version, destination) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(version, error = %e, "Rollback failed");
                false
            }
        }
    }

    /// Copy a snapshot to `destination`.
    ///
    /// Destinations inside the versions directory are refused, so a rollback
    /// can never truncate a snapshot.
    pub fn try_rollback(&self, version: u32, destination: impl AsRef<Path>) -> VersionResult<PathBuf> {
        let record = self.get(version).ok_or(VersionError::NotFound(version))?;
        if !record.exists() {
            return Err(VersionError::SnapshotMissing { version, path: record.path.clone() });
        }

        let destination = destination.as_ref();
        if self.is_protected(destination) {
            return Err(VersionError::ProtectedDestination(destination.to_path_buf()));
        }
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&record.path, destination)?;

        tracing::info!(version, from = ?record.path, to = ?destination, "Rolled back");
        Ok(destination.to_path_buf())
    }

    /// Whether `path` resolves into the versions directory or onto a known
    /// snapshot.
    fn is_protected(&self, path: &Path) -> bool {
        let Some(target) = resolve(path) else {
            return false;
        };
        if fs::canonicalize(&self.versions_dir).is_ok_and(|dir| target.starts_with(dir)) {
            return true;
        }
        self.versions
            .iter()
            .any(|v| fs::canonicalize(&v.path).is_ok_and(|snapshot| snapshot == target))
    }

    /// Human readable history.
    pub fn history_report(&self) -> String {
        if self.versions.is_empty() {
            return "No versions found\n".to_string();
        }

        let rule = "=".repeat(70);
        let mut out = String::new();
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Version History for '{}'", self.base_name);
        let _ = writeln!(out, "{rule}");

        for v in &self.versions {
            let _ = writeln!(out, "\nVersion {}", v.number);
            let _ = writeln!(out, "  Timestamp: {}", v.timestamp);
            let _ = writeln!(out, "  Note:      {}", v.note);
            let _ = writeln!(out, "  Path:      {}", v.path.display());
            if v.exists() {
                let size_mb = v.size() as f64 / (1024.0 * 1024.0);
                let _ = writeln!(out, "  Size:      {size_mb:.2} MB");
            } else {
                let _ = writeln!(out, "  Size:      (missing)");
            }
        }

        let _ = writeln!(out, "{rule}");
        out
    }
}

fn file_digest(path: &Path) -> io::Result<Vec<u8>> {
    let mut hasher = Sha256::new();
    let mut file = File::open(path)?;
    io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize().to_vec())
}

/// Canonical form of `path`. A path that does not exist yet resolves through
/// its nearest existing ancestor.
fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = fs::canonicalize(path) {
        return Some(resolved);
    }
    let file_name = path.file_name()?;
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    resolve(parent).map(|p| p.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::{tempdir, TempDir};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn setup() -> (TempDir, PathBuf, VersionManager) {
        let dir = tempdir().unwrap();
        let source = dir.path().join("deck.pptx");
        fs::write(&source, b"first draft").unwrap();
        let manager =
            VersionManager::open(dir.path().join("versions"), "deck", Some("pptx".into())).unwrap();
        (dir, source, manager)
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempdir().unwrap();
        let versions = dir.path().join("nested").join("versions");
        let manager = VersionManager::open(&versions, "deck", None).unwrap();
        assert!(versions.is_dir());
        assert!(manager.list_versions().is_empty());
        assert!(manager.latest_version().is_none());
        assert!(manager.load_version(None).is_none());
    }

    #[test]
    fn test_sequential_numbers() {
        let (_dir, source, mut manager) = setup();

        for note in ["initial", "Added Diagrams", ""] {
            manager.save_version(&source, note).unwrap();
        }

        let numbers: Vec<u32> = manager.list_versions().iter().map(|v| v.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(manager.latest_version().unwrap().number, 3);
    }

    #[test]
    fn test_snapshot_file_name() {
        let (_dir, source, mut manager) = setup();
        let path = manager.save_version_at(&source, "Added Diagrams", at(10, 45)).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "deck_v1_2025-01-15_10-45_added-diagrams.pptx"
        );
        assert_eq!(manager.get(1).unwrap().note, "added diagrams");
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let (_dir, source, mut manager) = setup();
        manager.save_version(&source, "initial").unwrap();
        fs::write(&source, b"second draft, longer").unwrap();

        let path = manager.load_version(Some(1)).unwrap();
        assert_eq!(fs::read(path).unwrap(), b"first draft");
    }

    #[test]
    fn test_save_missing_source() {
        let (dir, _source, mut manager) = setup();
        let err = manager.save_version(dir.path().join("nope.pptx"), "x").unwrap_err();
        assert!(matches!(err, VersionError::SourceNotFound(_)));
        assert!(manager.list_versions().is_empty());
    }

    #[test]
    fn test_load_version_lookup() {
        let (_dir, source, mut manager) = setup();
        let first = manager.save_version(&source, "one").unwrap();
        let second = manager.save_version(&source, "two").unwrap();

        assert_eq!(manager.load_version(Some(1)), Some(first.as_path()));
        assert_eq!(manager.load_version(None), Some(second.as_path()));
        assert_eq!(manager.load_version(Some(7)), None);
    }

    #[test]
    fn test_extension_follows_source_when_unset() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("plan.json");
        fs::write(&source, "{}").unwrap();
        let mut manager = VersionManager::open(dir.path().join("v"), "plan", None).unwrap();

        let path = manager.save_version(&source, "first").unwrap();
        assert_eq!(path.extension().unwrap(), "json");
    }

    #[test]
    fn test_compare_versions() {
        let (_dir, source, mut manager) = setup();
        fs::write(&source, vec![0u8; 200]).unwrap();
        manager.save_version(&source, "a").unwrap();
        fs::write(&source, vec![0u8; 250]).unwrap();
        manager.save_version(&source, "b").unwrap();

        let cmp = manager.compare_versions(1, 2).unwrap();
        assert_eq!(cmp.size1, 200);
        assert_eq!(cmp.size2, 250);
        assert_eq!(cmp.size_diff, 50);
        assert!((cmp.size_change_percent - 25.0).abs() < 1e-9);
        assert_eq!(cmp.identical, Some(false));

        let same = manager.compare_versions(2, 2).unwrap();
        assert_eq!(same.identical, Some(true));
        assert_eq!(same.size_diff, 0);
    }

    #[test]
    fn test_compare_unknown_version() {
        let (_dir, source, mut manager) = setup();
        manager.save_version(&source, "a").unwrap();
        assert!(matches!(manager.compare_versions(1, 9), Err(VersionError::NotFound(9))));
        assert!(matches!(manager.compare_versions(4, 1), Err(VersionError::NotFound(4))));
    }

    #[test]
    fn test_compare_zero_size_first() {
        let (_dir, source, mut manager) = setup();
        fs::write(&source, b"").unwrap();
        manager.save_version(&source, "empty").unwrap();
        fs::write(&source, b"content").unwrap();
        manager.save_version(&source, "full").unwrap();

        let cmp = manager.compare_versions(1, 2).unwrap();
        assert_eq!(cmp.size1, 0);
        assert_eq!(cmp.size_diff, 7);
        assert_eq!(cmp.size_change_percent, 0.0);
        assert!(cmp.v1_present);
    }

    #[test]
    fn test_compare_missing_file_counts_as_empty() {
        let (_dir, source, mut manager) = setup();
        let first = manager.save_version(&source, "a").unwrap();
        manager.save_version(&source, "b").unwrap();
        fs::remove_file(first).unwrap();

        let cmp = manager.compare_versions(1, 2).unwrap();
        assert!(!cmp.v1_present);
        assert!(cmp.v2_present);
        assert_eq!(cmp.size1, 0);
        assert_eq!(cmp.size_change_percent, 0.0);
        assert_eq!(cmp.identical, None);
    }

    #[test]
    fn test_rollback() {
        let (dir, source, mut manager) = setup();
        manager.save_version(&source, "initial").unwrap();
        fs::write(&source, b"broken edit").unwrap();

        let restored = dir.path().join("out").join("restored.pptx");
        assert!(manager.rollback(1, &restored));
        assert_eq!(fs::read(&restored).unwrap(), b"first draft");
    }

    #[test]
    fn test_rollback_refuses_snapshot_storage() {
        let (dir, source, mut manager) = setup();
        let first = manager.save_version(&source, "initial").unwrap();
        fs::write(&source, b"second draft").unwrap();
        let second = manager.save_version(&source, "next").unwrap();

        assert!(!manager.rollback(2, &first));
        assert!(!manager.rollback(1, &first));
        assert_eq!(fs::read(&first).unwrap(), b"first draft");

        let relative = dir.path().join("versions").join("..").join("versions").join("new.pptx");
        assert!(matches!(
            manager.try_rollback(1, &relative),
            Err(VersionError::ProtectedDestination(_))
        ));
        assert!(!dir.path().join("versions").join("new.pptx").exists());
        assert_eq!(fs::read(&second).unwrap(), b"second draft");

        assert!(manager.rollback(1, &source));
        assert_eq!(fs::read(&source).unwrap(), b"first draft");
    }

    #[test]
    fn test_rollback_unknown_version() {
        let (dir, _source, manager) = setup();
        assert!(!manager.rollback(3, dir.path().join("out.pptx")));
        assert!(matches!(
            manager.try_rollback(3, dir.path().join("out.pptx")),
            Err(VersionError::NotFound(3))
        ));
    }

    #[test]
    fn test_stale_record_tolerated() {
        let (dir, source, mut manager) = setup();
        let path = manager.save_version(&source, "initial").unwrap();
        fs::remove_file(&path).unwrap();

        assert!(!manager.rollback(1, dir.path().join("restored.pptx")));
        assert!(!dir.path().join("restored.pptx").exists());
        assert_eq!(manager.list_versions().len(), 1);
        assert_eq!(manager.load_version(Some(1)), Some(path.as_path()));
        assert!(matches!(
            manager.try_rollback(1, dir.path().join("restored.pptx")),
            Err(VersionError::SnapshotMissing { version: 1, .. })
        ));
    }

    #[test]
    fn test_numbers_not_reused_after_deletion() {
        let (dir, source, mut manager) = setup();
        manager.save_version(&source, "a").unwrap();
        let second = manager.save_version(&source, "b").unwrap();
        manager.save_version(&source, "c").unwrap();
        fs::remove_file(second).unwrap();

        let mut reopened =
            VersionManager::open(dir.path().join("versions"), "deck", Some("pptx".into())).unwrap();
        assert_eq!(reopened.list_versions().len(), 2);
        let path = reopened.save_version(&source, "d").unwrap();
        assert!(path.to_str().unwrap().contains("_v4_"));
    }

    #[test]
    fn test_note_matches_after_reopen() {
        let (dir, source, mut manager) = setup();
        manager.save_version(&source, "").unwrap();
        manager.save_version(&source, "Added Diagrams").unwrap();
        let saved: Vec<String> = manager.list_versions().iter().map(|v| v.note.clone()).collect();
        assert_eq!(saved, ["update", "added diagrams"]);

        let reopened =
            VersionManager::open(dir.path().join("versions"), "deck", Some("pptx".into())).unwrap();
        assert_eq!(reopened.list_versions(), manager.list_versions());
    }

    #[test]
    fn test_duplicate_numbers_keep_first() {
        let (dir, _source, _manager) = setup();
        let versions = dir.path().join("versions");
        fs::write(versions.join("deck_v1_2025-01-15_09-00_a.pptx"), "a").unwrap();
        fs::write(versions.join("deck_v1_2025-01-15_09-00_a.pptx~"), "stale").unwrap();
        fs::write(versions.join("deck_v1_2025-01-15_09-00_a.pptx.bak"), "stale").unwrap();
        fs::write(versions.join("deck_v2_2025-01-15_09-30_b.pptx"), "b").unwrap();

        let manager = VersionManager::open(&versions, "deck", None).unwrap();
        let numbers: Vec<u32> = manager.list_versions().iter().map(|v| v.number).collect();
        assert_eq!(numbers, [1, 2]);
        assert_eq!(manager.get(1).unwrap().path, versions.join("deck_v1_2025-01-15_09-00_a.pptx"));
        assert_eq!(manager.next_version_number(), 3);
    }

    #[test]
    fn test_create_backup() {
        let (_dir, source, mut manager) = setup();
        let path = manager.create_backup(&source).unwrap();
        assert!(path.to_str().unwrap().ends_with("_backup.pptx"));
        assert_eq!(manager.latest_version().unwrap().note, "backup");
    }

    #[test]
    fn test_history_report() {
        let (_dir, source, mut manager) = setup();
        assert_eq!(manager.history_report(), "No versions found\n");

        manager.save_version_at(&source, "initial", at(9, 0)).unwrap();
        let report = manager.history_report();
        assert!(report.contains("Version History for 'deck'"));
        assert!(report.contains("Version 1"));
        assert!(report.contains("Timestamp: 2025-01-15_09-00"));
        assert!(report.contains("Note:      initial"));
        assert!(report.contains("0.00 MB"));
    }
}
