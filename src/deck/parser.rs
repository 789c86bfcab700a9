//! Deck definition parser.
//!
//! Parses YAML deck files into [`DeckDefinition`] structs.

use std::path::Path;

use super::error::{DeckError, DeckResult};
use super::schema::{Block, DeckDefinition, SlideDefinition, Visual};

/// Parse a deck definition from a file.
pub fn parse_definition(path: &Path) -> DeckResult<DeckDefinition> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| DeckError::Read { path: path.to_path_buf(), source })?;
    parse_definition_str(&content)
}

/// Parse a deck definition from a string.
pub fn parse_definition_str(content: &str) -> DeckResult<DeckDefinition> {
    let definition: DeckDefinition = serde_yaml::from_str(content)?;
    validate_definition(&definition)?;
    Ok(definition)
}

/// Validate a definition for common errors.
fn validate_definition(definition: &DeckDefinition) -> DeckResult<()> {
    if definition.slides.is_empty() {
        return Err(DeckError::Invalid("deck must have at least one slide".to_string()));
    }

    for (i, slide) in definition.slides.iter().enumerate() {
        let n = i + 1;
        match slide {
            SlideDefinition::Title { title, .. } if title.trim().is_empty() => {
                return Err(DeckError::Invalid(format!("slide {n}: title slide has no title")));
            }
            SlideDefinition::Image(v) | SlideDefinition::Diagram(v) | SlideDefinition::Chart(v) => {
                validate_visual(n, &v.content)?;
            }
            SlideDefinition::TwoColumn { left, right, .. } => {
                validate_block(n, left)?;
                validate_block(n, right)?;
            }
            SlideDefinition::Grid { rows, cols, items, .. } => {
                if *rows == 0 || *cols == 0 {
                    return Err(DeckError::Invalid(format!(
                        "slide {n}: grid needs at least one row and column (got {rows}x{cols})"
                    )));
                }
                let capacity = rows.checked_mul(*cols).ok_or_else(|| {
                    DeckError::Invalid(format!("slide {n}: a {rows}x{cols} grid is too large"))
                })?;
                if items.len() > capacity {
                    return Err(DeckError::Invalid(format!(
                        "slide {n}: {} items do not fit a {rows}x{cols} grid",
                        items.len()
                    )));
                }
                for item in items {
                    validate_block(n, item)?;
                }
            }
            _ => {}
        }

        if slide.title().trim().is_empty() && !matches!(slide, SlideDefinition::Title { .. }) {
            tracing::warn!(slide = n, layout = slide.layout_name(), "Slide has no title");
        }
    }

    Ok(())
}

fn validate_block(slide: usize, block: &Block) -> DeckResult<()> {
    match block {
        Block::Visual(visual) => validate_visual(slide, visual),
        Block::Text(_) | Block::Bullets(_) => Ok(()),
    }
}

fn validate_visual(slide: usize, visual: &Visual) -> DeckResult<()> {
    match visual {
        Visual::File { path, width, height } => {
            if path.as_os_str().is_empty() {
                return Err(DeckError::Invalid(format!("slide {slide}: image path is empty")));
            }
            for (axis, value) in [("width", width), ("height", height)] {
                if let Some(v) = value {
                    if !v.is_finite() || *v <= 0.0 {
                        return Err(DeckError::Invalid(format!(
                            "slide {slide}: image {axis} must be positive (got {v})"
                        )));
                    }
                }
            }
            Ok(())
        }
        Visual::Generate { generate } => {
            if generate.name.trim().is_empty() {
                return Err(DeckError::Invalid(format!("slide {slide}: asset request has no name")));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    const SAMPLE: &str = r#"
presentation:
  title: Data Space Interoperability
  author: Platform Team
  language: en
  theme: technical
slides:
  - layout: title
    title: Data Space Interoperability
    subtitle: Status and Prospects
  - layout: text
    title: Introduction
    bullets:
      - Data spaces enable secure sharing
      - International collaboration
    notes: Keep this short
  - layout: diagram
    title: Three Layer Architecture
    content:
      path: diagrams/three_layer.png
      width: 12
      height: 6
  - layout: chart
    title: Adoption
    content:
      generate:
        name: line
        params:
          x: [2020, 2021, 2022]
          y: [10, 25, 45]
  - layout: two_column
    title: Japan and Europe
    left: [Ouranos, Japanese data spaces]
    right:
      path: img/map.png
  - layout: grid
    title: Pillars
    rows: 2
    cols: 2
    items: [Standards, Governance, Trust, Sovereignty]
"#;

    #[test]
    fn test_parse_valid_definition() {
        let deck = parse_definition_str(SAMPLE).unwrap();
        assert_eq!(deck.presentation.title, "Data Space Interoperability");
        assert_eq!(deck.presentation.language, Some(Language::En));
        assert_eq!(deck.presentation.theme.as_deref(), Some("technical"));
        assert_eq!(deck.slides.len(), 6);

        let layouts: Vec<&str> = deck.slides.iter().map(SlideDefinition::layout_name).collect();
        assert_eq!(layouts, ["title", "text", "diagram", "chart", "two_column", "grid"]);
        assert_eq!(deck.slides[1].notes(), "Keep this short");
    }

    #[test]
    fn test_parse_visual_variants() {
        let deck = parse_definition_str(SAMPLE).unwrap();

        let SlideDefinition::Diagram(diagram) = &deck.slides[2] else { panic!("expected diagram") };
        assert!(matches!(
            diagram.content,
            Visual::File { width: Some(w), height: Some(h), .. } if w == 12.0 && h == 6.0
        ));

        let SlideDefinition::Chart(chart) = &deck.slides[3] else { panic!("expected chart") };
        let Visual::Generate { generate } = &chart.content else { panic!("expected request") };
        assert_eq!(generate.name, "line");
        assert_eq!(generate.params["y"][2], 45);

        let SlideDefinition::TwoColumn { left, right, .. } = &deck.slides[4] else {
            panic!("expected two column")
        };
        assert!(matches!(left, Block::Bullets(items) if items.len() == 2));
        assert!(matches!(right, Block::Visual(Visual::File { width: None, .. })));
    }

    #[test]
    fn test_empty_deck_rejected() {
        let err = parse_definition_str("presentation:\n  title: Empty\n").unwrap_err();
        assert!(err.to_string().contains("at least one slide"));
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let yaml = "slides:\n  - layout: carousel\n    title: X\n";
        assert!(matches!(parse_definition_str(yaml), Err(DeckError::Parse(_))));
    }

    #[test]
    fn test_grid_validation() {
        let zero = "slides:\n  - layout: grid\n    title: G\n    rows: 0\n    cols: 2\n";
        assert!(parse_definition_str(zero).unwrap_err().to_string().contains("at least one row"));

        let crowded =
            "slides:\n  - layout: grid\n    title: G\n    rows: 1\n    cols: 2\n    items: [a, b, c]\n";
        assert!(parse_definition_str(crowded).unwrap_err().to_string().contains("do not fit"));
    }

    #[test]
    fn test_grid_capacity_overflow_rejected() {
        let huge = format!(
            "slides:\n  - layout: grid\n    title: G\n    rows: {}\n    cols: 2\n    items: [a]\n",
            usize::MAX
        );
        let err = parse_definition_str(&huge).unwrap_err();
        assert!(matches!(err, DeckError::Invalid(_)));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_negative_image_size_rejected() {
        let yaml = "slides:\n  - layout: image\n    title: I\n    content:\n      path: a.png\n      width: -3\n";
        assert!(parse_definition_str(yaml).unwrap_err().to_string().contains("must be positive"));
    }

    #[test]
    fn test_title_slide_requires_title() {
        let yaml = "slides:\n  - layout: title\n    title: \"\"\n";
        assert!(matches!(parse_definition_str(yaml), Err(DeckError::Invalid(_))));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_definition(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, DeckError::Read { .. }));
    }
}
