//! Slide layout geometry.
//!
//! Pure computation: placement rectangles for slide content, unit
//! conversion between inches and EMU, and text size estimates.

mod engine;
mod text;
pub mod units;

pub use engine::{EmuRect, LayoutEngine, LayoutError, Rect, SlideGeometry};
pub use text::TextMetrics;
pub use units::{emu_to_inches, emu_to_pt, inches_to_emu, pt_to_emu, EMUS_PER_INCH, EMUS_PER_PT};
