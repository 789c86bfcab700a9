//! Snapshot file naming.
//!
//! Snapshots are stored as `{base}_v{n}_{YYYY-MM-DD}_{HH-MM}_{slug}.{ext}`.
//! The version number is the only ordering key read back; the timestamp is
//! zero-padded so it sorts lexicographically in chronological order.

use chrono::NaiveDateTime;

/// `strftime` format of the timestamp segment.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// Slug used when a note is blank.
pub const DEFAULT_NOTE: &str = "update";

/// Characters replaced in slugs besides whitespace.
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '.'];

/// Fields encoded in a snapshot file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotName {
    pub version: u32,
    pub timestamp: String,
    pub slug: String,
}

impl SnapshotName {
    /// Build the name for a new snapshot.
    pub fn new(version: u32, at: NaiveDateTime, note: &str) -> Self {
        Self { version, timestamp: format_timestamp(at), slug: slugify(note) }
    }

    /// File name for this snapshot.
    pub fn file_name(&self, base_name: &str, extension: Option<&str>) -> String {
        let stem = format!("{}_v{}_{}_{}", base_name, self.version, self.timestamp, self.slug);
        match extension {
            Some(ext) if !ext.is_empty() => format!("{stem}.{ext}"),
            _ => stem,
        }
    }

    /// Note text recovered from the slug.
    pub fn note(&self) -> String {
        self.slug.replace('-', " ")
    }

    /// Parse a file name produced by [`SnapshotName::file_name`].
    ///
    /// Returns `None` for names that belong to another base name, carry a
    /// different extension, or lack a `v{n}` segment or a valid
    /// `YYYY-MM-DD_HH-MM` timestamp.
    pub fn parse(file_name: &str, base_name: &str, extension: Option<&str>) -> Option<Self> {
        let stem = match extension {
            Some(ext) => file_name.strip_suffix(ext)?.strip_suffix('.')?,
            None => file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem),
        };

        let rest = stem.strip_prefix(base_name)?.strip_prefix("_v")?;
        let mut parts = rest.split('_');

        let version_token = parts.next()?;
        if version_token.is_empty() || !version_token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let version: u32 = version_token.parse().ok()?;
        if version == 0 {
            return None;
        }

        let date = parts.next()?;
        let time = parts.next()?;
        let timestamp = format!("{date}_{time}");
        // chrono accepts unpadded fields, the stored form is always padded
        if timestamp.len() != "YYYY-MM-DD_HH-MM".len()
            || NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT).is_err()
        {
            return None;
        }
        let slug = parts.collect::<Vec<_>>().join("_");

        Some(Self { version, timestamp, slug })
    }
}

/// Format a timestamp segment.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Make a note safe to embed in a file name: lower-cased, whitespace and
/// path-reserved characters replaced with hyphens.
pub fn slugify(note: &str) -> String {
    let trimmed = note.trim();
    if trimmed.is_empty() {
        return DEFAULT_NOTE.to_string();
    }

    trimmed
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || RESERVED.contains(&c) { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Added Diagrams"), "added-diagrams");
        assert_eq!(slugify("fix a/b: c"), "fix-a-b--c");
        assert_eq!(slugify("   "), "update");
        assert_eq!(slugify("日本語 メモ"), "日本語-メモ");
    }

    #[test]
    fn test_file_name() {
        let name = SnapshotName::new(2, at(10, 45), "added diagrams");
        assert_eq!(
            name.file_name("my_deck", Some("pptx")),
            "my_deck_v2_2025-01-15_10-45_added-diagrams.pptx"
        );
        assert_eq!(name.file_name("deck", None), "deck_v2_2025-01-15_10-45_added-diagrams");
    }

    #[test]
    fn test_parse_with_underscored_base() {
        let parsed = SnapshotName::parse(
            "my_deck_v12_2025-01-15_10-45_added-diagrams.pptx",
            "my_deck",
            Some("pptx"),
        )
        .unwrap();
        assert_eq!(parsed.version, 12);
        assert_eq!(parsed.timestamp, "2025-01-15_10-45");
        assert_eq!(parsed.slug, "added-diagrams");
        assert_eq!(parsed.note(), "added diagrams");
    }

    #[test]
    fn test_parse_any_extension() {
        let parsed = SnapshotName::parse("deck_v3_2025-01-15_09-00_backup.json", "deck", None).unwrap();
        assert_eq!(parsed.version, 3);
        assert_eq!(parsed.slug, "backup");
    }

    #[test]
    fn test_parse_rejects_invalid_timestamps() {
        let ext = Some("pptx");
        for name in [
            "deck_v1_2025-01-15.pptx",
            "deck_v2_final.pptx",
            "deck_v2_final_draft.pptx",
            "deck_v3_2025-13-40_99-99_x.pptx",
            "deck_v3_2025-1-5_9-5_x.pptx",
            "deck_v3_2025-02-30_10-00_x.pptx",
        ] {
            assert!(SnapshotName::parse(name, "deck", ext).is_none(), "{name}");
        }

        let parsed = SnapshotName::parse("deck_v1_2025-01-15_10-45.pptx", "deck", ext).unwrap();
        assert_eq!(parsed.timestamp, "2025-01-15_10-45");
        assert_eq!(parsed.slug, "");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let ext = Some("pptx");
        assert!(SnapshotName::parse("deck_v1.pptx", "deck", ext).is_none());
        assert!(SnapshotName::parse("deck_vX_2025-01-15_10-45_x.pptx", "deck", ext).is_none());
        assert!(SnapshotName::parse("deck_v0_2025-01-15_10-45_x.pptx", "deck", ext).is_none());
        assert!(SnapshotName::parse("deck_v_2025-01-15_10-45_x.pptx", "deck", ext).is_none());
        assert!(SnapshotName::parse("deck_final.pptx", "deck", ext).is_none());
        assert!(SnapshotName::parse("other_v1_2025-01-15_10-45_x.pptx", "deck", ext).is_none());
        assert!(SnapshotName::parse("deck_v1_2025-01-15_10-45_x.key", "deck", ext).is_none());
        assert!(SnapshotName::parse("notes.txt", "deck", ext).is_none());
    }

    #[test]
    fn test_slug_with_underscores_survives() {
        let name = SnapshotName::new(4, at(8, 5), "rename snake_case ids");
        let file = name.file_name("deck", Some("pptx"));
        assert_eq!(SnapshotName::parse(&file, "deck", Some("pptx")), Some(name));
    }

    #[test]
    fn test_timestamps_sort_chronologically() {
        let times = [at(9, 5), at(9, 50), at(10, 0), at(23, 59)];
        let formatted: Vec<String> = times.iter().map(|t| format_timestamp(*t)).collect();
        let mut sorted = formatted.clone();
        sorted.sort();
        assert_eq!(formatted, sorted);
    }
}
