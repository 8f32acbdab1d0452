//! Rendering surfaces
//!
//! Shapes draw through the [`Surface`] trait, an immediate-mode 2D context in
//! the style of an HTML canvas: a current path, a current stroke and fill
//! style, and rectangle shortcuts. Two implementations ship with the crate:
//! - `recording`: keeps every call as a [`DrawOp`], for tests and inspection
//! - `pixmap`: rasterizes into a `tiny_skia::Pixmap` and encodes PNG

pub mod color;
pub mod pixmap;
pub mod recording;

pub use color::Rgba;
pub use pixmap::PixmapSurface;
pub use recording::{DrawOp, RecordingSurface};

use crate::types::Point;

/// Immediate-mode 2D drawing context
///
/// Colors are passed as the strings stored on shapes; parsing them is the
/// surface's business. Rectangles may have negative extents.
pub trait Surface {
    /// Erase everything drawn so far
    fn clear(&mut self);

    fn set_stroke_color(&mut self, color: &str);
    fn set_fill_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    /// Dash lengths for subsequent strokes; an empty slice means solid
    fn set_line_dash(&mut self, pattern: &[f64]);

    /// Discard the current path
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quad_to(&mut self, ctrl: Point, to: Point);
    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);
    /// Clockwise arc from `start` to `end` radians (Y-down)
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);

    /// Stroke the current path with the current stroke style
    fn stroke(&mut self);
    /// Fill the current path with the current fill color
    fn fill(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}
