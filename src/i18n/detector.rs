//! Japanese/English detection by character class ratios.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::Language;

static HIRAGANA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{3040}-\u{309F}]").expect("BUG: invalid HIRAGANA regex literal"));
static KATAKANA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{30A0}-\u{30FF}]").expect("BUG: invalid KATAKANA regex literal"));
static KANJI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{4E00}-\u{9FFF}]").expect("BUG: invalid KANJI regex literal"));
static JAPANESE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{3040}-\u{309F}\u{30A0}-\u{30FF}\u{4E00}-\u{9FFF}]")
        .expect("BUG: invalid JAPANESE regex literal")
});
static LATIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]").expect("BUG: invalid LATIN regex literal"));

/// Japanese ratio above which text counts as Japanese.
const JAPANESE_THRESHOLD: f64 = 0.3;

/// Latin ratio above which Japanese text counts as mixed.
const LATIN_THRESHOLD: f64 = 0.2;

/// Character class counts for a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageStats {
    pub hiragana: usize,
    pub katakana: usize,
    pub kanji: usize,
    pub japanese_total: usize,
    pub latin: usize,
    pub total_chars: usize,
    pub japanese_ratio: f64,
    pub latin_ratio: f64,
    pub detected_language: Language,
}

impl LanguageStats {
    /// Count character classes in `text`.
    pub fn of(text: &str) -> Self {
        let hiragana = HIRAGANA.find_iter(text).count();
        let katakana = KATAKANA.find_iter(text).count();
        let kanji = KANJI.find_iter(text).count();
        let latin = LATIN.find_iter(text).count();

        let japanese_total = hiragana + katakana + kanji;
        let total_chars = japanese_total + latin;
        let ratio = |n: usize| if total_chars > 0 { n as f64 / total_chars as f64 } else { 0.0 };

        Self {
            hiragana,
            katakana,
            kanji,
            japanese_total,
            latin,
            total_chars,
            japanese_ratio: ratio(japanese_total),
            latin_ratio: ratio(latin),
            detected_language: detect_from_text(text),
        }
    }
}

/// Classify text as Japanese, English or mixed.
///
/// Empty text and text without letters default to English.
pub fn detect_from_text(text: &str) -> Language {
    let japanese = JAPANESE.find_iter(text).count();
    let latin = LATIN.find_iter(text).count();
    let total = japanese + latin;

    if total == 0 {
        return Language::En;
    }

    let japanese_ratio = japanese as f64 / total as f64;
    let latin_ratio = latin as f64 / total as f64;

    if japanese_ratio > JAPANESE_THRESHOLD {
        if latin_ratio > LATIN_THRESHOLD {
            Language::Mixed
        } else {
            Language::Ja
        }
    } else {
        Language::En
    }
}

/// Primary language over a whole conversation.
pub fn detect_from_conversation<S: AsRef<str>>(messages: &[S]) -> Language {
    if messages.is_empty() {
        return Language::En;
    }
    let combined = messages.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
    detect_from_text(&combined)
}

/// Whether the text contains any Japanese character.
pub fn has_japanese(text: &str) -> bool {
    JAPANESE.is_match(text)
}

/// Whether Japanese characters make up at least `threshold` of the
/// non-whitespace characters.
pub fn is_mostly_japanese(text: &str, threshold: f64) -> bool {
    let total = text.chars().filter(|c| *c != ' ' && *c != '\n').count();
    if total == 0 {
        return false;
    }
    let japanese = JAPANESE.find_iter(text).count();
    japanese as f64 / total as f64 >= threshold
}
