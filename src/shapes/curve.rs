//! Quadratic and cubic Bézier curves
//!
//! Curves are grabbed only by their control points and have no resize
//! handles; they are edited by moving the whole curve.

use super::{Geometry, Handle, Style};
use crate::defaults;
use crate::surface::Surface;
use crate::types::{Aabb, Point};

fn near_control_point(points: &[Point], p: Point) -> bool {
    points.iter().any(|c| {
        (p.x - c.x).abs() < defaults::CONTROL_POINT_HIT_DISTANCE
            && (p.y - c.y).abs() < defaults::CONTROL_POINT_HIT_DISTANCE
    })
}

macro_rules! curve_geometry {
    ($ty:ty) => {
        impl Geometry for $ty {
            fn style(&self) -> &Style {
                &self.style
            }

            fn style_mut(&mut self) -> &mut Style {
                &mut self.style
            }

            fn draw(&self, surface: &mut dyn Surface) {
                self.style.apply_stroke(surface);
                surface.begin_path();
                self.trace_path(surface);
                surface.stroke();
            }

            fn contains(&self, p: Point) -> bool {
                near_control_point(&self.points, p)
            }

            /// Box of the control points, which always encloses the curve
            fn bounds(&self) -> Aabb {
                Aabb::from_points(self.points)
            }

            fn translate(&mut self, dx: f64, dy: f64) {
                for p in &mut self.points {
                    p.translate(dx, dy);
                }
            }

            fn resize(&mut self, _handle: Handle, _to: Point, _maintain_aspect: bool) {}

            fn resize_handle(&self, _p: Point) -> Option<Handle> {
                None
            }

            fn anchors(&self) -> Vec<Point> {
                self.points.to_vec()
            }
        }
    };
}

/// Quadratic Bézier: `[start, control, end]`
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticCurve {
    pub points: [Point; 3],
    pub style: Style,
}

impl QuadraticCurve {
    pub fn new(points: [Point; 3], style: Style) -> Self {
        Self { points, style }
    }

    fn trace_path(&self, surface: &mut dyn Surface) {
        let [start, ctrl, end] = self.points;
        surface.move_to(start);
        surface.quad_to(ctrl, end);
    }
}

/// Cubic Bézier: `[start, control1, control2, end]`
#[derive(Debug, Clone, PartialEq)]
pub struct CubicCurve {
    pub points: [Point; 4],
    pub style: Style,
}

impl CubicCurve {
    pub fn new(points: [Point; 4], style: Style) -> Self {
        Self { points, style }
    }

    fn trace_path(&self, surface: &mut dyn Surface) {
        let [start, c1, c2, end] = self.points;
        surface.move_to(start);
        surface.cubic_to(c1, c2, end);
    }
}

curve_geometry!(QuadraticCurve);
curve_geometry!(CubicCurve);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    fn quad() -> QuadraticCurve {
        QuadraticCurve::new(
            [Point::new(0.0, 0.0), Point::new(50.0, 100.0), Point::new(100.0, 0.0)],
            Style::stroke("#00f", 3.0),
        )
    }

    fn cubic() -> CubicCurve {
        CubicCurve::new(
            [
                Point::new(0.0, 0.0),
                Point::new(10.0, 40.0),
                Point::new(30.0, -40.0),
                Point::new(40.0, 0.0),
            ],
            Style::stroke("#00f", 1.0),
        )
    }

    #[test]
    fn quadratic_draws_native_curve() {
        let mut s = RecordingSurface::new();
        quad().draw(&mut s);
        assert_eq!(
            s.ops,
            vec![
                DrawOp::StrokeColor("#00f".into()),
                DrawOp::LineWidth(3.0),
                DrawOp::BeginPath,
                DrawOp::MoveTo(Point::new(0.0, 0.0)),
                DrawOp::QuadTo(Point::new(50.0, 100.0), Point::new(100.0, 0.0)),
                DrawOp::Stroke,
            ]
        );
    }

    #[test]
    fn cubic_draws_native_curve() {
        let mut s = RecordingSurface::new();
        cubic().draw(&mut s);
        assert!(s.ops.contains(&DrawOp::CubicTo(
            Point::new(10.0, 40.0),
            Point::new(30.0, -40.0),
            Point::new(40.0, 0.0)
        )));
        assert_eq!(s.stroke_count(), 1);
    }

    #[test]
    fn only_control_points_are_grabbable() {
        let q = quad();
        assert!(q.contains(Point::new(9.0, -9.0)));
        assert!(q.contains(Point::new(55.0, 95.0)));
        assert!(!q.contains(Point::new(10.0, 0.0)));
        // (50, 50) lies on the curve body but far from every control point
        assert!(!q.contains(Point::new(50.0, 50.0)));
    }

    #[test]
    fn translate_moves_every_point() {
        let mut c = cubic();
        c.translate(1.0, 2.0);
        assert_eq!(c.points[0], Point::new(1.0, 2.0));
        assert_eq!(c.points[3], Point::new(41.0, 2.0));
        assert_eq!(c.points[2], Point::new(31.0, -38.0));
    }

    #[test]
    fn no_resize_handles() {
        let mut q = quad();
        assert_eq!(q.resize_handle(Point::new(0.0, 0.0)), None);
        let before = q.clone();
        q.resize(Handle(0), Point::new(7.0, 7.0), false);
        assert_eq!(q, before);
    }

    #[test]
    fn bounds_of_control_points() {
        let bb = cubic().bounds();
        assert_eq!(bb.min, Point::new(0.0, -40.0));
        assert_eq!(bb.max, Point::new(40.0, 40.0));
    }
}
