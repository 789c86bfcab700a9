//! Language handling for bilingual (Japanese/English) decks.
//!
//! Detection, font tables and the [`Language`] key every lookup table in
//! the crate is indexed by.

mod detector;
mod fonts;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use detector::{
    detect_from_conversation, detect_from_text, has_japanese, is_mostly_japanese, LanguageStats,
};
pub use fonts::{FontRole, FontSelector};

/// Primary language of slide text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Japanese
    #[default]
    Ja,
    /// English
    En,
    /// Japanese and English mixed
    #[serde(alias = "ja_en")]
    Mixed,
}

impl Language {
    /// Short code used in configuration files.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
            Self::Mixed => "mixed",
        }
    }

    /// All supported languages.
    pub fn all() -> [Self; 3] {
        [Self::Ja, Self::En, Self::Mixed]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ja" | "japanese" => Ok(Self::Ja),
            "en" | "english" => Ok(Self::En),
            "mixed" | "ja_en" | "ja-en" => Ok(Self::Mixed),
            other => Err(format!("unknown language '{other}' (expected ja, en or mixed)")),
        }
    }
}
