//! Configuration management for Deckgen.
//!
//! Handles loading and saving configuration from TOML files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::i18n::Language;
use crate::layout::SlideGeometry;
use crate::theme::ColorScheme;

/// Name of the per-project config file.
pub const LOCAL_CONFIG_FILE: &str = ".deckgen.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Slide size, margins and gaps (inches)
    pub slide: SlideGeometry,

    /// Snapshot versioning settings
    pub versions: VersionsConfig,

    /// Deck defaults
    pub deck: DeckConfig,
}

/// Snapshot versioning settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Directory holding snapshots (`~` and `$VAR` are expanded)
    pub dir: String,

    /// Base name of snapshot files
    pub base_name: String,

    /// Fixed snapshot extension; unset keeps the source file's extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// Deck defaults used when a definition leaves them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Color scheme name (corporate, technical, academic)
    pub theme: String,

    /// Default language
    pub language: Language,

    /// Where built artifacts go
    pub output_dir: String,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self { dir: "versions".to_string(), base_name: "presentation".to_string(), extension: None }
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self { theme: "corporate".to_string(), language: Language::Ja, output_dir: "output".to_string() }
    }
}

impl VersionsConfig {
    /// Snapshot directory with `~` and environment variables expanded.
    pub fn resolved_dir(&self) -> PathBuf {
        match shellexpand::full(&self.dir) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(e) => {
                tracing::warn!(dir = %self.dir, error = %e, "Could not expand versions dir");
                PathBuf::from(&self.dir)
            }
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. `.deckgen.toml` in current directory
    /// 2. `~/.config/deckgen/config.toml`
    /// 3. Falls back to defaults
    pub fn load() -> anyhow::Result<Self> {
        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(config_path) = Self::global_config_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load from an explicit path when given, otherwise from the default
    /// locations.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        tracing::debug!(path = ?path, "Loaded configuration");
        Ok(config)
    }

    /// Reject values no layout or snapshot can be produced from.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.slide.validate().context("Invalid [slide] configuration")?;

        if self.versions.base_name.trim().is_empty() {
            anyhow::bail!("[versions] base_name cannot be empty");
        }
        if self.versions.base_name.contains(['/', '\\']) {
            anyhow::bail!("[versions] base_name cannot contain path separators");
        }
        if ColorScheme::by_name(&self.deck.theme).is_none() {
            tracing::warn!(theme = %self.deck.theme, "Unknown theme in config, corporate will be used");
        }
        Ok(())
    }

    /// Save configuration to a specific file.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("deckgen"))
    }

    /// Global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.slide.width, 10.0);
        assert_eq!(config.slide.height, 7.5);
        assert_eq!(config.versions.dir, "versions");
        assert_eq!(config.versions.base_name, "presentation");
        assert!(config.versions.extension.is_none());
        assert_eq!(config.deck.theme, "corporate");
        assert_eq!(config.deck.language, Language::Ja);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("[slide]"));
        assert!(toml_str.contains("[versions]"));
        assert!(toml_str.contains("[deck]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [slide]
            width = 13.333
            margin_left = 0.75

            [versions]
            dir = "snapshots"
            base_name = "quarterly"
            extension = "pptx"

            [deck]
            language = "en"
            theme = "technical"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.slide.width, 13.333);
        assert_eq!(config.slide.margin_left, 0.75);
        assert_eq!(config.slide.height, 7.5);
        assert_eq!(config.versions.dir, "snapshots");
        assert_eq!(config.versions.extension.as_deref(), Some("pptx"));
        assert_eq!(config.deck.language, Language::En);
        assert_eq!(config.deck.theme, "technical");
        assert_eq!(config.deck.output_dir, "output");
    }

    #[test]
    fn test_rejects_empty_content_area() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[slide]\nmargin_left = 6.0\nmargin_right = 6.0\n").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("content area is empty"));
    }

    #[test]
    fn test_rejects_bad_base_name() {
        let mut config = Config::default();
        config.versions.base_name = "a/b".to_string();
        assert!(config.validate().is_err());
        config.versions.base_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");

        let mut config = Config::default();
        config.versions.base_name = "roadmap".to_string();
        config.slide.title_height = 1.2;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_resolved_dir_expands_env() {
        let config = VersionsConfig { dir: "$HOME/decks".to_string(), ..VersionsConfig::default() };
        let resolved = config.resolved_dir();
        assert!(!resolved.to_string_lossy().contains('$'));
        assert!(resolved.ends_with("decks"));
    }
}
