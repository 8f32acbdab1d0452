//! A surface that records calls instead of drawing them.

use super::Surface;
use crate::types::Point;

/// One recorded call on a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    StrokeColor(String),
    FillColor(String),
    LineWidth(f64),
    LineDash(Vec<f64>),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
    },
    Stroke,
    Fill,
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `fill_rect` call, as `(x, y, width, height)`
    pub fn filled_rects(&self) -> Vec<(f64, f64, f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::FillRect {
                    x,
                    y,
                    width,
                    height,
                } => Some((x, y, width, height)),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded `stroke` calls
    pub fn stroke_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Stroke).count()
    }

    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ops.push(DrawOp::StrokeColor(color.to_string()));
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ops.push(DrawOp::FillColor(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.ops.push(DrawOp::LineDash(pattern.to_vec()));
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(DrawOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(DrawOp::LineTo(p));
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        self.ops.push(DrawOp::QuadTo(ctrl, to));
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.ops.push(DrawOp::CubicTo(ctrl1, ctrl2, to));
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.ops.push(DrawOp::Arc {
            center,
            radius,
            start,
            end,
        });
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
        });
    }
}
