//! Font selection tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Language;

/// Where a font is used on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    Title,
    Heading,
    Body,
    Caption,
    Monospace,
}

impl FontRole {
    /// Roles that have their own font family list. Captions use body fonts.
    pub const FAMILY_ROLES: [Self; 4] = [Self::Title, Self::Body, Self::Heading, Self::Monospace];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Heading => "heading",
            Self::Body => "body",
            Self::Caption => "caption",
            Self::Monospace => "monospace",
        }
    }
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "heading" => Ok(Self::Heading),
            "body" => Ok(Self::Body),
            "caption" => Ok(Self::Caption),
            "monospace" | "code" => Ok(Self::Monospace),
            other => Err(format!("unknown font role '{other}'")),
        }
    }
}

/// Font family lists for one language, in fallback order.
#[derive(Debug, Clone, Copy)]
pub struct FontTable {
    pub title: &'static [&'static str],
    pub body: &'static [&'static str],
    pub heading: &'static [&'static str],
    pub monospace: &'static [&'static str],
}

impl FontTable {
    fn families(&self, role: FontRole) -> &'static [&'static str] {
        match role {
            FontRole::Title => self.title,
            FontRole::Heading => self.heading,
            FontRole::Body | FontRole::Caption => self.body,
            FontRole::Monospace => self.monospace,
        }
    }
}

pub const JAPANESE_FONTS: FontTable = FontTable {
    title: &["Meiryo", "Yu Gothic", "MS Gothic", "DejaVu Sans"],
    body: &["Meiryo", "Yu Gothic", "MS PGothic", "DejaVu Sans"],
    heading: &["Meiryo Bold", "Yu Gothic", "MS Gothic", "DejaVu Sans"],
    monospace: &["MS Gothic", "Consolas", "Courier New"],
};

pub const ENGLISH_FONTS: FontTable = FontTable {
    title: &["Arial", "Calibri", "Helvetica", "DejaVu Sans"],
    body: &["Arial", "Calibri", "Verdana", "DejaVu Sans"],
    heading: &["Arial Black", "Calibri Bold", "Helvetica Bold", "DejaVu Sans"],
    monospace: &["Consolas", "Courier New", "Monaco", "monospace"],
};

pub const MIXED_FONTS: FontTable = FontTable {
    title: &["Meiryo", "Yu Gothic", "DejaVu Sans"],
    body: &["Meiryo", "Yu Gothic", "DejaVu Sans"],
    heading: &["Meiryo Bold", "Yu Gothic", "DejaVu Sans"],
    monospace: &["Consolas", "Courier New", "monospace"],
};

/// Font lookups keyed by language and role.
#[derive(Debug, Clone, Copy)]
pub struct FontSelector {
    japanese: FontTable,
    english: FontTable,
    mixed: FontTable,
}

impl Default for FontSelector {
    fn default() -> Self {
        Self { japanese: JAPANESE_FONTS, english: ENGLISH_FONTS, mixed: MIXED_FONTS }
    }
}

impl FontSelector {
    /// Table for a language.
    pub fn table(&self, language: Language) -> &FontTable {
        match language {
            Language::Ja => &self.japanese,
            Language::En => &self.english,
            Language::Mixed => &self.mixed,
        }
    }

    /// Font families for a role in priority order.
    pub fn with_fallbacks(&self, language: Language, role: FontRole) -> &'static [&'static str] {
        self.table(language).families(role)
    }

    /// A single font; `fallback_index` past the end of the list selects the
    /// last fallback.
    pub fn font_for(&self, language: Language, role: FontRole, fallback_index: usize) -> &'static str {
        let families = self.with_fallbacks(language, role);
        families[fallback_index.min(families.len() - 1)]
    }

    /// Primary font for every role.
    pub fn all_for(&self, language: Language) -> Vec<(FontRole, &'static str)> {
        FontRole::FAMILY_ROLES.iter().map(|&role| (role, self.font_for(language, role, 0))).collect()
    }

    /// Recommended point size for a role. Japanese body text and captions run
    /// one point smaller because of character density.
    pub fn recommend_size(&self, language: Language, role: FontRole) -> u32 {
        let base = match role {
            FontRole::Title => 44,
            FontRole::Heading => 28,
            FontRole::Body => 18,
            FontRole::Caption | FontRole::Monospace => 14,
        };

        if language == Language::Ja && matches!(role, FontRole::Body | FontRole::Caption) {
            return (base - 1).max(12);
        }
        base
    }
}
