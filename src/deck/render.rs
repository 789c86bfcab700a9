//! Rendering collaborators.
//!
//! The planner never draws anything itself. Diagrams and charts come from an
//! [`AssetRenderer`], finished plans are written by a [`DeckRenderer`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::RenderError;
use super::plan::DeckPlan;
use super::schema::AssetRequest;

/// Which slide layout asked for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Diagram,
    Chart,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Image => "image",
            Self::Diagram => "diagram",
            Self::Chart => "chart",
        })
    }
}

/// A produced image file and its intrinsic size in inches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedAsset {
    pub path: PathBuf,
    pub width: f64,
    pub height: f64,
}

/// Produces diagram and chart images on request.
pub trait AssetRenderer {
    /// Render `request` and report where the file went.
    fn render_asset(&self, kind: AssetKind, request: &AssetRequest) -> Result<RenderedAsset, RenderError>;
}

/// Writes a planned deck to an artifact file.
pub trait DeckRenderer {
    /// File extension of produced artifacts, without the dot.
    fn extension(&self) -> &'static str;

    /// Write `plan` to `output`.
    fn render(&self, plan: &DeckPlan, output: &Path) -> Result<(), RenderError>;
}

/// Writes the plan itself as JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonPlanRenderer {
    pretty: bool,
}

impl Default for JsonPlanRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonPlanRenderer {
    /// Single-line JSON output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl DeckRenderer for JsonPlanRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, plan: &DeckPlan, output: &Path) -> Result<(), RenderError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(plan)?
        } else {
            serde_json::to_string(plan)?
        };

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, json)?;

        tracing::info!(path = %output.display(), slides = plan.slides.len(), "Wrote deck plan");
        Ok(())
    }
}
