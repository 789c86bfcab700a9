//! Deck definition schema.
//!
//! Defines the YAML structure for deck definition files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// A deck definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckDefinition {
    /// Deck-wide metadata
    #[serde(default)]
    pub presentation: PresentationMeta,

    /// Slides in order
    #[serde(default)]
    pub slides: Vec<SlideDefinition>,
}

/// Deck metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationMeta {
    pub title: String,
    pub author: String,
    pub subject: String,

    /// Text language; detected from slide text when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// Color scheme name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// One slide, tagged by its `layout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SlideDefinition {
    /// Opening slide with a large centered title
    Title {
        title: String,
        #[serde(default)]
        subtitle: String,
        #[serde(default)]
        notes: String,
    },

    /// Title plus bullet points
    Text {
        title: String,
        #[serde(default)]
        bullets: Vec<String>,
        #[serde(default)]
        notes: String,
    },

    /// Title plus a single picture
    Image(VisualSlide),

    /// Title plus an architecture or network diagram
    Diagram(VisualSlide),

    /// Title plus a chart
    Chart(VisualSlide),

    /// Title plus two side-by-side blocks
    TwoColumn {
        title: String,
        left: Block,
        right: Block,
        #[serde(default)]
        notes: String,
    },

    /// Title plus a `rows x cols` grid filled row by row
    Grid {
        title: String,
        rows: usize,
        cols: usize,
        #[serde(default)]
        items: Vec<Block>,
        #[serde(default)]
        notes: String,
    },
}

impl SlideDefinition {
    /// Layout tag as written in YAML.
    pub fn layout_name(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::Text { .. } => "text",
            Self::Image(_) => "image",
            Self::Diagram(_) => "diagram",
            Self::Chart(_) => "chart",
            Self::TwoColumn { .. } => "two_column",
            Self::Grid { .. } => "grid",
        }
    }

    /// Slide title.
    pub fn title(&self) -> &str {
        match self {
            Self::Title { title, .. }
            | Self::Text { title, .. }
            | Self::TwoColumn { title, .. }
            | Self::Grid { title, .. } => title,
            Self::Image(v) | Self::Diagram(v) | Self::Chart(v) => &v.title,
        }
    }

    /// Speaker notes, empty when none.
    pub fn notes(&self) -> &str {
        match self {
            Self::Title { notes, .. }
            | Self::Text { notes, .. }
            | Self::TwoColumn { notes, .. }
            | Self::Grid { notes, .. } => notes,
            Self::Image(v) | Self::Diagram(v) | Self::Chart(v) => &v.notes,
        }
    }

    /// All visible text on the slide, for language detection.
    pub fn text_fragments(&self) -> Vec<&str> {
        let mut out = vec![self.title()];
        match self {
            Self::Title { subtitle, .. } => out.push(subtitle),
            Self::Text { bullets, .. } => out.extend(bullets.iter().map(String::as_str)),
            Self::TwoColumn { left, right, .. } => {
                out.extend(left.text_fragments());
                out.extend(right.text_fragments());
            }
            Self::Grid { items, .. } => out.extend(items.iter().flat_map(Block::text_fragments)),
            Self::Image(_) | Self::Diagram(_) | Self::Chart(_) => {}
        }
        out
    }
}

/// A slide showing one visual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualSlide {
    pub title: String,
    pub content: Visual,
    #[serde(default)]
    pub notes: String,
}

/// A picture: an existing file or a request for an asset renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Visual {
    /// Existing image file with optional intrinsic size in inches
    File {
        path: PathBuf,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
    },

    /// Asset to be produced by a diagram or chart renderer
    Generate { generate: AssetRequest },
}

/// Parameters handed to an asset renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRequest {
    /// Renderer-specific asset kind, e.g. `three_layer` or `line`
    pub name: String,

    /// Renderer-specific parameters
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Content of a column or grid cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Block {
    /// A paragraph
    Text(String),

    /// A bullet list
    Bullets(Vec<String>),

    /// A picture
    Visual(Visual),
}

impl Block {
    fn text_fragments(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => vec![text.as_str()],
            Self::Bullets(items) => items.iter().map(String::as_str).collect(),
            Self::Visual(_) => Vec::new(),
        }
    }
}
