//! Shape types for the drawing surface
//!
//! Each variant is its own type that knows how to:
//! - Draw itself onto a [`Surface`]
//! - Answer hit tests and report its bounding box
//! - Move, and resize from one of its handles
//!
//! [`Shape`] is the closed set of variants; [`Geometry`] calls on it are
//! dispatched by `enum_dispatch`.

mod curve;
mod disc;
mod rect;
mod segment;

pub use curve::{CubicCurve, QuadraticCurve};
pub use disc::Disc;
pub use rect::{Corner, Rect};
pub use segment::{Algorithm, Segment, UnknownAlgorithm};

use enum_dispatch::enum_dispatch;

use crate::defaults;
use crate::surface::Surface;
use crate::types::{Aabb, Point};

/// A resize handle, numbered locally to its variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub usize);

impl Handle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Paint properties carried by every shape
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub stroke_color: String,
    /// Segments and curves never fill and carry none
    pub fill_color: Option<String>,
    pub line_width: f64,
    pub use_fill: bool,
}

impl Style {
    /// Stroke-only style
    pub fn stroke(color: impl Into<String>, line_width: f64) -> Self {
        Self {
            stroke_color: color.into(),
            fill_color: None,
            line_width,
            use_fill: false,
        }
    }

    /// Style for closed shapes, with a fill color that is used only when `use_fill`
    pub fn filled(
        stroke: impl Into<String>,
        fill: impl Into<String>,
        line_width: f64,
        use_fill: bool,
    ) -> Self {
        Self {
            stroke_color: stroke.into(),
            fill_color: Some(fill.into()),
            line_width,
            use_fill,
        }
    }

    /// The fill color to paint with, if this style fills at all
    pub fn active_fill(&self) -> Option<&str> {
        match (&self.fill_color, self.use_fill) {
            (Some(c), true) => Some(c.as_str()),
            _ => None,
        }
    }

    pub(crate) fn apply_stroke(&self, surface: &mut dyn Surface) {
        surface.set_stroke_color(&self.stroke_color);
        surface.set_line_width(self.line_width);
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::stroke(defaults::STROKE_COLOR, defaults::LINE_WIDTH)
    }
}

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Geometry {
    fn style(&self) -> &Style;

    fn style_mut(&mut self) -> &mut Style;

    /// Paint the shape (no selection marks)
    fn draw(&self, surface: &mut dyn Surface);

    /// Whether a pointer at `p` grabs this shape
    fn contains(&self, p: Point) -> bool;

    fn bounds(&self) -> Aabb;

    /// Move by `(dx, dy)` in place
    fn translate(&mut self, dx: f64, dy: f64);

    /// Drag `handle` to `to`. Variants without handles ignore this.
    fn resize(&mut self, handle: Handle, to: Point, maintain_aspect: bool);

    /// The handle under `p`, if any
    fn resize_handle(&self, p: Point) -> Option<Handle>;

    /// Where selection marks are drawn
    fn anchors(&self) -> Vec<Point>;
}

/// Any drawable shape
#[enum_dispatch(Geometry)]
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Segment(Segment),
    Rect(Rect),
    Disc(Disc),
    QuadraticCurve(QuadraticCurve),
    CubicCurve(CubicCurve),
}

impl Shape {
    /// Short lowercase variant name, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Segment(_) => "segment",
            Shape::Rect(_) => "rect",
            Shape::Disc(_) => "disc",
            Shape::QuadraticCurve(_) => "quadratic",
            Shape::CubicCurve(_) => "cubic",
        }
    }

    /// Paint the square marks shown on a selected shape
    pub fn draw_marks(&self, surface: &mut dyn Surface) {
        let half = defaults::MARK_SIZE / 2.0;
        surface.set_fill_color(defaults::MARK_COLOR);
        for a in self.anchors() {
            surface.fill_rect(
                a.x - half,
                a.y - half,
                defaults::MARK_SIZE,
                defaults::MARK_SIZE,
            );
        }
    }
}

/// First anchor within the handle tolerance of `p`, in anchor order
pub(crate) fn anchor_hit(anchors: &[Point], p: Point) -> Option<Handle> {
    anchors
        .iter()
        .position(|a| a.chebyshev(p) < defaults::HANDLE_TOLERANCE)
        .map(Handle)
}
