//! Straight segment with selectable rasterizer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Geometry, Handle, Style, anchor_hit};
use crate::defaults;
use crate::raster::{self, stamp_side};
use crate::surface::Surface;
use crate::types::{Aabb, Point};

/// How a segment is turned into pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Integer Bresenham walk with square stamps
    #[default]
    Bresenham,
    /// Floating-point DDA walk with square stamps
    Dda,
    /// The surface's own antialiased stroke
    Native,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Bresenham,
        Algorithm::Dda,
        Algorithm::Native,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Bresenham => "bresenham",
            Algorithm::Dda => "dda",
            Algorithm::Native => "native",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown line algorithm `{0}` (expected bresenham, dda or native)")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Which endpoint a segment handle drags
const SEGMENT_HANDLES: [Endpoint; 2] = [Endpoint::P1, Endpoint::P2];

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    P1,
    P2,
}

/// A straight segment from `p1` to `p2`
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
    pub algorithm: Algorithm,
    pub style: Style,
}

impl Segment {
    pub const P1: Handle = Handle(0);
    pub const P2: Handle = Handle(1);

    pub fn new(p1: Point, p2: Point, algorithm: Algorithm, style: Style) -> Self {
        Self {
            p1,
            p2,
            algorithm,
            style,
        }
    }

    /// Paint one square stamp per pixel reported by the rasterizer
    fn draw_stamped(&self, surface: &mut dyn Surface) {
        let side = stamp_side(self.style.line_width);
        let half = side / 2;
        let extent = side as f64;
        surface.set_fill_color(&self.style.stroke_color);

        let mut stamp = |x: i64, y: i64| {
            surface.fill_rect((x - half) as f64, (y - half) as f64, extent, extent);
        };
        match self.algorithm {
            Algorithm::Dda => raster::dda(self.p1, self.p2, &mut stamp),
            _ => raster::bresenham(self.p1, self.p2, &mut stamp),
        }
    }

    fn draw_native(&self, surface: &mut dyn Surface) {
        self.style.apply_stroke(surface);
        surface.begin_path();
        surface.move_to(self.p1);
        surface.line_to(self.p2);
        surface.stroke();
    }
}

impl Geometry for Segment {
    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn draw(&self, surface: &mut dyn Surface) {
        match self.algorithm {
            Algorithm::Bresenham | Algorithm::Dda => self.draw_stamped(surface),
            Algorithm::Native => self.draw_native(surface),
        }
    }

    /// Perpendicular distance under the threshold, and the projection must
    /// land between the endpoints.
    fn contains(&self, p: Point) -> bool {
        let d = self.p2 - self.p1;
        let len_sq = d.length_squared();
        if len_sq == 0.0 {
            return self.p1.distance(p) < defaults::SEGMENT_HIT_DISTANCE;
        }
        let t = (p - self.p1).dot(d) / len_sq;
        let closest = self.p1 + d * t;
        let distance = closest.distance(p);
        distance < defaults::SEGMENT_HIT_DISTANCE && (0.0..=1.0).contains(&t)
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_points([self.p1, self.p2])
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.p1.translate(dx, dy);
        self.p2.translate(dx, dy);
    }

    fn resize(&mut self, handle: Handle, to: Point, _maintain_aspect: bool) {
        match SEGMENT_HANDLES.get(handle.index()) {
            Some(Endpoint::P1) => self.p1 = to,
            Some(Endpoint::P2) => self.p2 = to,
            None => {}
        }
    }

    fn resize_handle(&self, p: Point) -> Option<Handle> {
        anchor_hit(&self.anchors(), p)
    }

    fn anchors(&self) -> Vec<Point> {
        vec![self.p1, self.p2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64, algorithm: Algorithm, width: f64) -> Segment {
        Segment::new(
            Point::new(x1, y1),
            Point::new(x2, y2),
            algorithm,
            Style::stroke("#000", width),
        )
    }

    #[test]
    fn algorithm_parses_exactly_three_names() {
        assert_eq!("bresenham".parse(), Ok(Algorithm::Bresenham));
        assert_eq!("dda".parse(), Ok(Algorithm::Dda));
        assert_eq!("native".parse(), Ok(Algorithm::Native));
        assert!("DDA".parse::<Algorithm>().is_err());
        assert!("wu".parse::<Algorithm>().is_err());
    }

    #[test]
    fn bresenham_eleven_stamps() {
        let mut s = RecordingSurface::new();
        seg(0.0, 0.0, 10.0, 0.0, Algorithm::Bresenham, 1.0).draw(&mut s);

        let expected: Vec<_> = (0..=10).map(|x| (x as f64, 0.0, 1.0, 1.0)).collect();
        assert_eq!(s.filled_rects(), expected);
    }

    #[test]
    fn thick_stamps_are_centered() {
        let mut s = RecordingSurface::new();
        seg(5.0, 5.0, 5.0, 5.0, Algorithm::Bresenham, 4.0).draw(&mut s);
        assert_eq!(s.filled_rects(), vec![(3.0, 3.0, 5.0, 5.0)]);
    }

    #[test]
    fn zero_length_dda_single_stamp() {
        let mut s = RecordingSurface::new();
        seg(2.0, 3.0, 2.0, 3.0, Algorithm::Dda, 2.0).draw(&mut s);
        assert_eq!(s.filled_rects(), vec![(1.0, 2.0, 3.0, 3.0)]);
    }

    #[test]
    fn stamps_use_stroke_color() {
        let mut s = RecordingSurface::new();
        seg(0.0, 0.0, 1.0, 0.0, Algorithm::Dda, 1.0).draw(&mut s);
        assert_eq!(s.ops[0], DrawOp::FillColor("#000".into()));
    }

    #[test]
    fn native_delegates_to_stroke() {
        let mut s = RecordingSurface::new();
        seg(0.0, 0.0, 3.0, 4.0, Algorithm::Native, 2.5).draw(&mut s);
        assert_eq!(
            s.ops,
            vec![
                DrawOp::StrokeColor("#000".into()),
                DrawOp::LineWidth(2.5),
                DrawOp::BeginPath,
                DrawOp::MoveTo(Point::new(0.0, 0.0)),
                DrawOp::LineTo(Point::new(3.0, 4.0)),
                DrawOp::Stroke,
            ]
        );
    }

    #[test]
    fn contains_near_the_body() {
        let s = seg(0.0, 0.0, 100.0, 0.0, Algorithm::Native, 1.0);
        assert!(s.contains(Point::new(50.0, 9.9)));
        assert!(s.contains(Point::new(0.0, -5.0)));
        assert!(!s.contains(Point::new(50.0, 10.0)));
    }

    #[test]
    fn contains_rejects_beyond_endpoints() {
        let s = seg(0.0, 0.0, 100.0, 0.0, Algorithm::Native, 1.0);
        assert!(!s.contains(Point::new(-0.5, 0.0)));
        assert!(!s.contains(Point::new(100.5, 1.0)));
    }

    #[test]
    fn zero_length_contains_is_radial() {
        let s = seg(5.0, 5.0, 5.0, 5.0, Algorithm::Native, 1.0);
        assert!(s.contains(Point::new(11.0, 5.0)));
        assert!(!s.contains(Point::new(12.0, 13.0)));
    }

    #[test]
    fn handles_and_resize() {
        let mut s = seg(0.0, 0.0, 50.0, 50.0, Algorithm::Bresenham, 1.0);
        assert_eq!(s.resize_handle(Point::new(3.0, -3.0)), Some(Segment::P1));
        assert_eq!(s.resize_handle(Point::new(47.0, 52.0)), Some(Segment::P2));
        assert_eq!(s.resize_handle(Point::new(25.0, 25.0)), None);

        s.resize(Segment::P2, Point::new(80.0, 10.0), true);
        assert_eq!(s.p2, Point::new(80.0, 10.0));
        s.resize(Segment::P1, Point::new(-1.0, -1.0), false);
        assert_eq!(s.p1, Point::new(-1.0, -1.0));
        s.resize(Handle(7), Point::new(9.0, 9.0), false);
        assert_eq!((s.p1, s.p2), (Point::new(-1.0, -1.0), Point::new(80.0, 10.0)));
    }

    #[test]
    fn translate_and_bounds() {
        let mut s = seg(10.0, 0.0, 0.0, 5.0, Algorithm::Dda, 1.0);
        s.translate(1.0, 1.0);
        let bb = s.bounds();
        assert_eq!(bb.min, Point::new(1.0, 1.0));
        assert_eq!(bb.max, Point::new(11.0, 6.0));
    }
}
