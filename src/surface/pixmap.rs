//! Raster surface backed by a `tiny_skia::Pixmap`.

use std::f64::consts::{FRAC_PI_2, TAU};

use tiny_skia::{
    Color, FillRule, LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};

use super::{Rgba, Surface};
use crate::errors::ExportError;
use crate::log::debug;
use crate::types::Point;

#[derive(Debug, Clone, Copy)]
enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
}

/// A canvas-like surface that paints real pixels.
///
/// Paths are kept as plain commands until `stroke`/`fill`, then built into a
/// `tiny_skia::Path`. Rectangle fills are not antialiased so rasterizer
/// stamps land on whole pixels.
pub struct PixmapSurface {
    pixmap: Pixmap,
    background: Rgba,
    stroke_color: Rgba,
    fill_color: Rgba,
    line_width: f64,
    dash: Vec<f64>,
    path: Vec<PathCmd>,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, ExportError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(ExportError::EmptyCanvas { width, height })?;
        Ok(Self {
            pixmap,
            background: Rgba::TRANSPARENT,
            stroke_color: Rgba::BLACK,
            fill_color: Rgba::BLACK,
            line_width: 1.0,
            dash: Vec::new(),
            path: Vec::new(),
        })
    }

    /// Color `clear` resets to; transparent unless set
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self.pixmap.fill(to_skia(background));
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Unpremultiplied color of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// PNG bytes of everything drawn so far
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        self.pixmap.encode_png().map_err(|e| ExportError::Encode {
            message: e.to_string(),
        })
    }

    fn paint(color: Rgba, anti_alias: bool) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(to_skia(color));
        paint.anti_alias = anti_alias;
        paint
    }

    fn stroke_style(&self) -> Stroke {
        let mut stroke = Stroke {
            width: self.line_width as f32,
            line_cap: LineCap::Butt,
            ..Stroke::default()
        };
        if !self.dash.is_empty() {
            // canvas repeats odd-length patterns to make them even
            let mut pattern: Vec<f32> = self.dash.iter().map(|&d| d as f32).collect();
            if pattern.len() % 2 == 1 {
                pattern.extend_from_within(..);
            }
            stroke.dash = StrokeDash::new(pattern, 0.0);
        }
        stroke
    }

    fn build_path(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for cmd in &self.path {
            match *cmd {
                PathCmd::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
                PathCmd::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
                PathCmd::QuadTo(c, p) => {
                    pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32)
                }
                PathCmd::CubicTo(c1, c2, p) => pb.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    p.x as f32,
                    p.y as f32,
                ),
            }
        }
        pb.finish()
    }

    fn rect(x: f64, y: f64, width: f64, height: f64) -> Option<Rect> {
        let (l, r) = (x.min(x + width), x.max(x + width));
        let (t, b) = (y.min(y + height), y.max(y + height));
        Rect::from_ltrb(l as f32, t as f32, r as f32, b as f32)
    }
}

impl Surface for PixmapSurface {
    fn clear(&mut self) {
        self.pixmap.fill(to_skia(self.background));
        self.path.clear();
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.stroke_color = Rgba::parse_or_black(color);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.fill_color = Rgba::parse_or_black(color);
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        if pattern.iter().all(|d| d.is_finite() && *d >= 0.0) {
            self.dash = pattern.to_vec();
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point) {
        self.path.push(PathCmd::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.path.push(PathCmd::LineTo(p));
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        self.path.push(PathCmd::QuadTo(ctrl, to));
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.path.push(PathCmd::CubicTo(ctrl1, ctrl2, to));
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        if !(radius.is_finite() && radius >= 0.0) {
            debug!(radius, "skipping arc with invalid radius");
            return;
        }
        let sweep = (end - start).clamp(0.0, TAU);
        let at = |angle: f64| {
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        };

        let first = at(start);
        if self.path.is_empty() {
            self.path.push(PathCmd::MoveTo(first));
        } else {
            self.path.push(PathCmd::LineTo(first));
        }

        // cubic approximation, one piece per quarter turn at most
        let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / pieces as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;
        let mut a0 = start;
        for _ in 0..pieces {
            let a1 = a0 + step;
            let p0 = at(a0);
            let p3 = at(a1);
            let c1 = Point::new(p0.x - k * a0.sin(), p0.y + k * a0.cos());
            let c2 = Point::new(p3.x + k * a1.sin(), p3.y - k * a1.cos());
            self.path.push(PathCmd::CubicTo(c1, c2, p3));
            a0 = a1;
        }
    }

    fn stroke(&mut self) {
        let Some(path) = self.build_path() else {
            return;
        };
        let paint = Self::paint(self.stroke_color, true);
        let stroke = self.stroke_style();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn fill(&mut self) {
        let Some(path) = self.build_path() else {
            return;
        };
        let paint = Self::paint(self.fill_color, true);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(rect) = Self::rect(x, y, width, height) else {
            return;
        };
        let paint = Self::paint(self.fill_color, false);
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(rect) = Self::rect(x, y, width, height) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let paint = Self::paint(self.stroke_color, true);
        let stroke = self.stroke_style();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

fn to_skia(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}
