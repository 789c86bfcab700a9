//! Planned deck: every element placed, styled and ready for a backend.

use std::path::PathBuf;

use serde::Serialize;

use crate::i18n::Language;
use crate::layout::{EmuRect, Rect, SlideGeometry};
use crate::theme::ColorScheme;

/// A fully placed deck.
#[derive(Debug, Clone, Serialize)]
pub struct DeckPlan {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub language: Language,
    pub theme: ColorScheme,
    pub geometry: SlideGeometry,
    pub slides: Vec<SlidePlan>,
}

impl DeckPlan {
    /// Total number of placed elements across all slides.
    pub fn element_count(&self) -> usize {
        self.slides.iter().map(|s| s.elements.len()).sum()
    }
}

/// One placed slide.
#[derive(Debug, Clone, Serialize)]
pub struct SlidePlan {
    /// 1-based position in the deck
    pub index: usize,
    pub layout: &'static str,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub elements: Vec<Element>,
}

/// A placed element.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    /// Placement in inches
    pub rect: Rect,
    /// Placement in EMU
    pub emu: EmuRect,
    #[serde(flatten)]
    pub content: ElementContent,
}

impl Element {
    pub(crate) fn new(rect: Rect, content: ElementContent) -> Self {
        Self { rect, emu: rect.to_emu(), content }
    }
}

/// What an element shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementContent {
    /// A text box
    Text {
        paragraphs: Vec<String>,
        font: &'static str,
        size_pt: u32,
        bold: bool,
        color: &'static str,
        /// Bullet indent in inches, zero for plain paragraphs
        indent: f64,
    },

    /// A picture file
    Picture { path: PathBuf },
}

impl ElementContent {
    /// Picture path, if this is a picture.
    pub fn picture_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Picture { path } => Some(path),
            Self::Text { .. } => None,
        }
    }
}
