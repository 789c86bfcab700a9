//! Turns a [`DeckDefinition`] into a [`DeckPlan`].
//!
//! Every rectangle comes from the [`LayoutEngine`]; fonts come from the
//! language font tables and colors from the theme. Generated visuals are
//! delegated to an [`AssetRenderer`].

use std::path::PathBuf;

use crate::core::Config;
use crate::i18n::{detect_from_text, FontRole, FontSelector, Language, LanguageStats};
use crate::layout::{LayoutEngine, LayoutError, Rect, TextMetrics};
use crate::theme::ColorScheme;

use super::error::{DeckError, DeckResult};
use super::plan::{DeckPlan, Element, ElementContent, SlidePlan};
use super::render::{AssetKind, AssetRenderer};
use super::schema::{Block, DeckDefinition, SlideDefinition, Visual};

/// Smallest body size the planner shrinks text to.
const MIN_BODY_SIZE: u32 = 12;

/// Share of the content area given to the title on a title slide.
const TITLE_SLIDE_SPLIT: f64 = 0.6;

/// Deck-wide fallbacks used when a definition leaves them unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerDefaults {
    pub language: Language,
    pub theme: String,
}

impl Default for PlannerDefaults {
    fn default() -> Self {
        Self { language: Language::default(), theme: "corporate".to_string() }
    }
}

/// Plans slide placement.
#[derive(Debug, Clone)]
pub struct DeckPlanner {
    engine: LayoutEngine,
    fonts: FontSelector,
    metrics: TextMetrics,
    defaults: PlannerDefaults,
}

impl Default for DeckPlanner {
    fn default() -> Self {
        Self::new(LayoutEngine::default())
    }
}

/// Resolved per-deck styling shared by every slide.
struct Style {
    language: Language,
    theme: ColorScheme,
}

impl DeckPlanner {
    /// Planner over an existing layout engine with default fonts and metrics.
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            fonts: FontSelector::default(),
            metrics: TextMetrics::default(),
            defaults: PlannerDefaults::default(),
        }
    }

    /// Planner configured from the `[slide]` and `[deck]` sections.
    pub fn from_config(config: &Config) -> Result<Self, LayoutError> {
        let engine = LayoutEngine::new(config.slide)?;
        Ok(Self::new(engine).with_defaults(PlannerDefaults {
            language: config.deck.language,
            theme: config.deck.theme.clone(),
        }))
    }

    /// Replace the deck-wide fallbacks.
    #[must_use]
    pub fn with_defaults(mut self, defaults: PlannerDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replace the text metrics tables.
    #[must_use]
    pub fn with_metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The layout engine used for placement.
    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Deck language: the declared one, otherwise detected from the slide
    /// text, otherwise the configured default when the text has no letters.
    pub fn resolve_language(&self, definition: &DeckDefinition) -> Language {
        if let Some(language) = definition.presentation.language {
            return language;
        }

        let text = definition
            .slides
            .iter()
            .flat_map(SlideDefinition::text_fragments)
            .chain([definition.presentation.title.as_str()])
            .collect::<Vec<_>>()
            .join(" ");

        if LanguageStats::of(&text).total_chars == 0 {
            return self.defaults.language;
        }
        let detected = detect_from_text(&text);
        tracing::debug!(language = %detected, "Detected deck language");
        detected
    }

    /// Place every slide of `definition`.
    ///
    /// `assets` renders visuals declared as asset requests; a deck with such
    /// a request and no renderer fails with [`DeckError::NoAssetRenderer`].
    pub fn plan(
        &self,
        definition: &DeckDefinition,
        assets: Option<&dyn AssetRenderer>,
    ) -> DeckResult<DeckPlan> {
        let meta = &definition.presentation;
        let theme_name = meta.theme.as_deref().unwrap_or(&self.defaults.theme);
        let style = Style {
            language: self.resolve_language(definition),
            theme: ColorScheme::by_name_or_default(theme_name),
        };

        let slides = definition
            .slides
            .iter()
            .enumerate()
            .map(|(i, slide)| self.plan_slide(i + 1, slide, &style, assets))
            .collect::<DeckResult<Vec<_>>>()?;

        tracing::debug!(
            slides = slides.len(),
            language = %style.language,
            theme = style.theme.name,
            "Planned deck"
        );

        Ok(DeckPlan {
            title: meta.title.clone(),
            author: meta.author.clone(),
            subject: meta.subject.clone(),
            language: style.language,
            theme: style.theme,
            geometry: *self.engine.geometry(),
            slides,
        })
    }

    fn plan_slide(
        &self,
        index: usize,
        slide: &SlideDefinition,
        style: &Style,
        assets: Option<&dyn AssetRenderer>,
    ) -> DeckResult<SlidePlan> {
        let content = self.engine.content_area();
        let mut elements = Vec::new();

        match slide {
            SlideDefinition::Title { title, subtitle, .. } => {
                let title_height = content.height * TITLE_SLIDE_SPLIT;
                let title_rect = Rect::new(content.left, content.top, content.width, title_height);
                let subtitle_rect = Rect::new(
                    content.left,
                    content.top + title_height,
                    content.width,
                    content.height - title_height,
                );

                elements.push(self.text_element(
                    title_rect,
                    vec![title.clone()],
                    FontRole::Title,
                    self.fonts.recommend_size(style.language, FontRole::Title),
                    true,
                    style.theme.primary,
                    style.language,
                ));
                if !subtitle.trim().is_empty() {
                    elements.push(self.text_element(
                        subtitle_rect,
                        vec![subtitle.clone()],
                        FontRole::Body,
                        self.fonts.recommend_size(style.language, FontRole::Heading),
                        false,
                        style.theme.secondary,
                        style.language,
                    ));
                }
            }

            SlideDefinition::Text { title, bullets, .. } => {
                elements.push(self.heading(title, style));
                if !bullets.is_empty() {
                    elements.push(self.body(content, bullets.clone(), true, style));
                }
            }

            SlideDefinition::Image(v) | SlideDefinition::Diagram(v) | SlideDefinition::Chart(v) => {
                let kind = match slide {
                    SlideDefinition::Diagram(_) => AssetKind::Diagram,
                    SlideDefinition::Chart(_) => AssetKind::Chart,
                    _ => AssetKind::Image,
                };
                elements.push(self.heading(&v.title, style));
                elements.push(self.picture(index, content, &v.content, kind, assets)?);
            }

            SlideDefinition::TwoColumn { title, left, right, .. } => {
                let (left_rect, right_rect) = self.engine.two_column_layout();
                elements.push(self.heading(title, style));
                elements.push(self.block(index, left_rect, left, style, assets)?);
                elements.push(self.block(index, right_rect, right, style, assets)?);
            }

            SlideDefinition::Grid { title, rows, cols, items, .. } => {
                let cells = self.engine.grid_layout(*rows, *cols)?;
                elements.push(self.heading(title, style));
                for (cell, item) in cells.into_iter().flatten().zip(items) {
                    elements.push(self.block(index, cell, item, style, assets)?);
                }
            }
        }

        Ok(SlidePlan {
            index,
            layout: slide.layout_name(),
            notes: slide.notes().to_string(),
            elements,
        })
    }

    fn heading(&self, title: &str, style: &Style) -> Element {
        self.text_element(
            self.engine.title_area(),
            vec![title.to_string()],
            FontRole::Title,
            self.fonts.recommend_size(style.language, FontRole::Heading),
            true,
            style.theme.primary,
            style.language,
        )
    }

    /// Body text shrunk until it fits `rect`.
    fn body(&self, rect: Rect, paragraphs: Vec<String>, bulleted: bool, style: &Style) -> Element {
        let indent = if bulleted { self.metrics.bullet_indent(style.language) } else { 0.0 };
        let max_size = self.fonts.recommend_size(style.language, FontRole::Body);
        let size = self.metrics.optimal_font_size(
            &paragraphs,
            (rect.width - indent).max(0.0),
            rect.height,
            style.language,
            MIN_BODY_SIZE.min(max_size),
            max_size,
        );

        let mut element = self.text_element(
            rect,
            paragraphs,
            FontRole::Body,
            size,
            false,
            style.theme.text,
            style.language,
        );
        if let ElementContent::Text { indent: slot, .. } = &mut element.content {
            *slot = indent;
        }
        element
    }

    #[allow(clippy::too_many_arguments)]
    fn text_element(
        &self,
        rect: Rect,
        paragraphs: Vec<String>,
        role: FontRole,
        size_pt: u32,
        bold: bool,
        color: &'static str,
        language: Language,
    ) -> Element {
        Element::new(
            rect,
            ElementContent::Text {
                paragraphs,
                font: self.fonts.font_for(language, role, 0),
                size_pt,
                bold,
                color,
                indent: 0.0,
            },
        )
    }

    fn block(
        &self,
        index: usize,
        rect: Rect,
        block: &Block,
        style: &Style,
        assets: Option<&dyn AssetRenderer>,
    ) -> DeckResult<Element> {
        Ok(match block {
            Block::Text(text) => self.body(rect, vec![text.clone()], false, style),
            Block::Bullets(items) => self.body(rect, items.clone(), true, style),
            Block::Visual(visual) => self.picture(index, rect, visual, AssetKind::Image, assets)?,
        })
    }

    /// Picture fitted into `rect`. Files without an intrinsic size fill it.
    fn picture(
        &self,
        index: usize,
        rect: Rect,
        visual: &Visual,
        kind: AssetKind,
        assets: Option<&dyn AssetRenderer>,
    ) -> DeckResult<Element> {
        let (path, placed): (PathBuf, Rect) = match visual {
            Visual::File { path, width: Some(w), height: Some(h) } => (path.clone(), rect.fit(*w, *h)),
            Visual::File { path, .. } => (path.clone(), rect),
            Visual::Generate { generate } => {
                let renderer = assets.ok_or(DeckError::NoAssetRenderer { slide: index })?;
                let asset = renderer.render_asset(kind, generate)?;
                tracing::debug!(
                    slide = index,
                    %kind,
                    asset = %generate.name,
                    path = %asset.path.display(),
                    "Rendered asset"
                );
                let placed = rect.fit(asset.width, asset.height);
                (asset.path, placed)
            }
        };

        Ok(Element::new(placed, ElementContent::Picture { path }))
    }
}
