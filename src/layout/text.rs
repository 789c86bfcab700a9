//! Language-aware text box sizing.
//!
//! Rough estimates only: a fixed average character width scaled by font size
//! and a per-language width ratio. Good enough to pick a font size that keeps
//! bullets inside the content area.

use crate::i18n::Language;

use super::units::POINTS_PER_INCH;

/// Average character width at [`BASE_FONT_SIZE`], in inches.
const BASE_CHAR_WIDTH: f64 = 0.12;

/// Font size the character width was measured at.
const BASE_FONT_SIZE: f64 = 18.0;

/// Horizontal padding added around estimated text.
const BOX_PADDING_X: f64 = 0.5;

/// Vertical padding added around estimated text.
const BOX_PADDING_Y: f64 = 0.3;

/// Per-language spacing tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Line spacing multiplier: ja, en, mixed
    pub line_spacing: [f64; 3],
    /// Character width relative to English: ja, en, mixed
    pub char_width_ratio: [f64; 3],
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self { line_spacing: [0.9, 1.0, 0.95], char_width_ratio: [1.2, 1.0, 1.1] }
    }
}

fn index(language: Language) -> usize {
    match language {
        Language::Ja => 0,
        Language::En => 1,
        Language::Mixed => 2,
    }
}

impl TextMetrics {
    /// Line spacing multiplier.
    pub fn line_spacing(&self, language: Language) -> f64 {
        self.line_spacing[index(language)]
    }

    /// Estimated single-line width of `text`, in inches.
    pub fn estimate_text_width(&self, text: &str, language: Language, font_size: u32) -> f64 {
        let char_count = text.chars().count() as f64;
        let size_factor = f64::from(font_size) / BASE_FONT_SIZE;
        char_count * BASE_CHAR_WIDTH * size_factor * self.char_width_ratio[index(language)]
    }

    /// Estimated height of `text` wrapped into `box_width`, in inches.
    pub fn estimate_text_height(
        &self,
        text: &str,
        box_width: f64,
        language: Language,
        font_size: u32,
    ) -> f64 {
        let text_width = self.estimate_text_width(text, language, font_size);
        let lines = if box_width > 0.0 { (text_width / box_width).floor() + 1.0 } else { 1.0 };
        let line_height = f64::from(font_size) / POINTS_PER_INCH * self.line_spacing(language);
        lines.max(1.0) * line_height
    }

    /// Text box size `(width, height)` for `text`, capped at `max_width`.
    pub fn text_box_size(
        &self,
        text: &str,
        language: Language,
        max_width: f64,
        font_size: u32,
    ) -> (f64, f64) {
        let width = (self.estimate_text_width(text, language, font_size) + BOX_PADDING_X).min(max_width);
        let height = self.estimate_text_height(text, width, language, font_size) + BOX_PADDING_Y;
        (width, height)
    }

    /// Largest size in `min_size..=max_size` at which all `paragraphs` fit in
    /// the box, stacked. Falls back to `min_size`.
    pub fn optimal_font_size<S: AsRef<str>>(
        &self,
        paragraphs: &[S],
        box_width: f64,
        box_height: f64,
        language: Language,
        min_size: u32,
        max_size: u32,
    ) -> u32 {
        (min_size..=max_size)
            .rev()
            .find(|&size| {
                let total: f64 = paragraphs
                    .iter()
                    .map(|p| self.estimate_text_height(p.as_ref(), box_width, language, size))
                    .sum();
                total <= box_height
            })
            .unwrap_or(min_size)
    }

    /// Bullet indent in inches.
    pub fn bullet_indent(&self, language: Language) -> f64 {
        if language == Language::Ja {
            0.3
        } else {
            0.4
        }
    }

    /// Space between paragraphs in points.
    pub fn paragraph_spacing(&self, language: Language) -> f64 {
        if language == Language::Ja {
            6.0
        } else {
            8.0
        }
    }
}
