//! Slide placement geometry.
//!
//! All rectangles are derived from a fixed [`SlideGeometry`]: the slide size,
//! four margins and a reserved title band. The engine holds no other state;
//! every call returns fresh values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::units::inches_to_emu;

/// Errors raised for geometry that cannot produce a usable layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Margins and title band leave no room for content.
    #[error("content area is empty ({width:.3} x {height:.3} in); check slide size and margins")]
    EmptyContentArea { width: f64, height: f64 },

    /// A geometry value is negative or not a finite number.
    #[error("invalid slide geometry: {field} = {value}")]
    InvalidDimension { field: &'static str, value: f64 },

    /// Grid requested with zero rows or columns.
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    InvalidGrid { rows: usize, cols: usize },

    /// Gaps consume the whole content area.
    #[error("a {rows}x{cols} grid does not fit in the content area")]
    GridTooDense { rows: usize, cols: usize },
}

/// Fixed slide configuration, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideGeometry {
    /// Slide width
    pub width: f64,
    /// Slide height
    pub height: f64,
    /// Left margin
    pub margin_left: f64,
    /// Right margin
    pub margin_right: f64,
    /// Top margin
    pub margin_top: f64,
    /// Bottom margin
    pub margin_bottom: f64,
    /// Height reserved for the slide title below the top margin
    pub title_height: f64,
    /// Gap between the two columns of a two-column layout
    pub column_gap: f64,
    /// Gap between grid cells on both axes
    pub grid_gap: f64,
}

impl Default for SlideGeometry {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 7.5,
            margin_left: 0.5,
            margin_right: 0.5,
            margin_top: 0.5,
            margin_bottom: 0.5,
            title_height: 1.0,
            column_gap: 0.5,
            grid_gap: 0.3,
        }
    }
}

impl SlideGeometry {
    /// Check that every value is finite and non-negative and that the
    /// content area has positive extent.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("margin_left", self.margin_left),
            ("margin_right", self.margin_right),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("title_height", self.title_height),
            ("column_gap", self.column_gap),
            ("grid_gap", self.grid_gap),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidDimension { field, value });
            }
        }

        let width = self.content_width();
        let height = self.content_height();
        if width <= 0.0 || height <= 0.0 {
            return Err(LayoutError::EmptyContentArea { width, height });
        }
        Ok(())
    }

    fn content_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    fn content_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom - self.title_height
    }
}

/// A placement rectangle in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center point as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Whether the interiors of two rectangles intersect. Shared edges do not
    /// count as overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Whether `other` lies entirely within this rectangle, allowing for
    /// floating-point noise.
    pub fn contains(&self, other: &Self) -> bool {
        const EPS: f64 = 1e-9;
        other.left >= self.left - EPS
            && other.top >= self.top - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }

    /// Scale an item of intrinsic size `width x height` into this rectangle
    /// and center it.
    ///
    /// The scale is `min(self.width / width, self.height / height, 1.0)`, so
    /// the item is never enlarged. A non-positive or non-finite intrinsic
    /// dimension contributes a scale of 1 and gets zero extent on that axis.
    pub fn fit(&self, width: f64, height: f64) -> Self {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);

        let scale_w = if width > 0.0 { self.width / width } else { 1.0 };
        let scale_h = if height > 0.0 { self.height / height } else { 1.0 };
        let scale = scale_w.min(scale_h).min(1.0);

        let fitted_width = width * scale;
        let fitted_height = height * scale;

        Self::new(
            self.left + (self.width - fitted_width) / 2.0,
            self.top + (self.height - fitted_height) / 2.0,
            fitted_width,
            fitted_height,
        )
    }

    /// The same rectangle in EMU.
    pub fn to_emu(&self) -> EmuRect {
        EmuRect {
            left: inches_to_emu(self.left),
            top: inches_to_emu(self.top),
            width: inches_to_emu(self.width),
            height: inches_to_emu(self.height),
        }
    }
}

/// A placement rectangle in EMU, as handed to the document backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmuRect {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

/// Computes placement rectangles within a slide's content area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    geometry: SlideGeometry,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self { geometry: SlideGeometry::default() }
    }
}

impl LayoutEngine {
    /// Create an engine for the given geometry.
    pub fn new(geometry: SlideGeometry) -> Result<Self, LayoutError> {
        geometry.validate()?;
        Ok(Self { geometry })
    }

    /// The geometry this engine was built from.
    pub fn geometry(&self) -> &SlideGeometry {
        &self.geometry
    }

    /// Full slide bounds.
    pub fn slide_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.geometry.width, self.geometry.height)
    }

    /// Title band: full content width, between the top margin and the content area.
    pub fn title_area(&self) -> Rect {
        let g = &self.geometry;
        Rect::new(g.margin_left, g.margin_top, g.content_width(), g.title_height)
    }

    /// Area available for non-title content.
    pub fn content_area(&self) -> Rect {
        let g = &self.geometry;
        Rect::new(
            g.margin_left,
            g.margin_top + g.title_height,
            g.content_width(),
            g.content_height(),
        )
    }

    /// Fit an item of the given intrinsic size into the content area.
    ///
    /// With `preserve_aspect_ratio` the item is scaled uniformly and centered
    /// (see [`Rect::fit`]); without it the whole content area is returned.
    pub fn center_image(
        &self,
        image_width: f64,
        image_height: f64,
        preserve_aspect_ratio: bool,
    ) -> Rect {
        let content = self.content_area();
        if preserve_aspect_ratio {
            content.fit(image_width, image_height)
        } else {
            content
        }
    }

    /// Split the content area into two equal columns separated by the
    /// configured column gap.
    pub fn two_column_layout(&self) -> (Rect, Rect) {
        let content = self.content_area();
        let gap = self.geometry.column_gap;
        let column_width = (content.width - gap) / 2.0;

        let left = Rect::new(content.left, content.top, column_width, content.height);
        let right = Rect::new(
            content.left + column_width + gap,
            content.top,
            column_width,
            content.height,
        );
        (left, right)
    }

    /// Divide the content area into `rows x cols` equal cells, indexed
    /// `[row][col]`.
    pub fn grid_layout(&self, rows: usize, cols: usize) -> Result<Vec<Vec<Rect>>, LayoutError> {
        if rows == 0 || cols == 0 {
            return Err(LayoutError::InvalidGrid { rows, cols });
        }

        let content = self.content_area();
        let gap = self.geometry.grid_gap;
        let cell_width = (content.width - gap * (cols - 1) as f64) / cols as f64;
        let cell_height = (content.height - gap * (rows - 1) as f64) / rows as f64;

        if cell_width <= 0.0 || cell_height <= 0.0 {
            return Err(LayoutError::GridTooDense { rows, cols });
        }

        let grid = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        Rect::new(
                            content.left + col as f64 * (cell_width + gap),
                            content.top + row as f64 * (cell_height + gap),
                            cell_width,
                            cell_height,
                        )
                    })
                    .collect()
            })
            .collect();

        Ok(grid)
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
