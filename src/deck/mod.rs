//! Deck definitions and planning.
//!
//! A deck is described in YAML ([`DeckDefinition`]), placed by the
//! [`DeckPlanner`] into a [`DeckPlan`], and written by a [`DeckRenderer`].
//!
//! ```yaml
//! presentation:
//!   title: Quarterly Review
//!   language: en
//! slides:
//!   - layout: text
//!     title: Highlights
//!     bullets: [Revenue up, Costs flat]
//! ```

mod error;
mod parser;
mod plan;
mod planner;
mod render;
mod schema;

use std::path::Path;

pub use error::{DeckError, DeckResult, RenderError};
pub use parser::{parse_definition, parse_definition_str};
pub use plan::{DeckPlan, Element, ElementContent, SlidePlan};
pub use planner::{DeckPlanner, PlannerDefaults};
pub use render::{AssetKind, AssetRenderer, DeckRenderer, JsonPlanRenderer, RenderedAsset};
pub use schema::{AssetRequest, Block, DeckDefinition, PresentationMeta, SlideDefinition, Visual, VisualSlide};

/// Parse, plan and render the deck at `definition` into `output`.
pub fn build(
    definition: &Path,
    output: &Path,
    planner: &DeckPlanner,
    assets: Option<&dyn AssetRenderer>,
    renderer: &dyn DeckRenderer,
) -> DeckResult<DeckPlan> {
    let definition = parse_definition(definition)?;
    let plan = planner.plan(&definition, assets)?;
    renderer.render(&plan, output)?;
    Ok(plan)
}
