//! Axis-aligned rectangle with signed extents
//!
//! `width` and `height` keep their sign: a rectangle dragged up-left from its
//! origin has negative extents. Nothing here normalizes them; drawing and hit
//! testing work on the normalized box instead.

use super::{Geometry, Handle, Style, anchor_hit};
use crate::log::debug;
use crate::surface::Surface;
use crate::types::{Aabb, Point, sign};

/// Which side of an axis a corner handle drags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    /// The origin side (`x` or `y`)
    Near,
    /// The far side (`x + width` or `y + height`)
    Far,
}

/// Corner handles in hit-test order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn handle(self) -> Handle {
        Handle(self as usize)
    }

    pub fn from_handle(handle: Handle) -> Option<Corner> {
        Corner::ALL.get(handle.index()).copied()
    }

    /// (horizontal edge, vertical edge) this corner drags
    const fn edges(self) -> (Edge, Edge) {
        match self {
            Corner::TopLeft => (Edge::Near, Edge::Near),
            Corner::TopRight => (Edge::Far, Edge::Near),
            Corner::BottomRight => (Edge::Far, Edge::Far),
            Corner::BottomLeft => (Edge::Near, Edge::Far),
        }
    }
}

/// One axis of a resize: the dragged edge moves to `pointer`, the other stays.
/// Returns the new (start, extent).
fn drag_axis(edge: Edge, start: f64, extent: f64, pointer: f64) -> (f64, f64) {
    match edge {
        Edge::Near => (pointer, start + extent - pointer),
        Edge::Far => (start, pointer - start),
    }
}

/// Re-derive the start after the extent was clamped, keeping the fixed side
fn refix_start(edge: Edge, fixed: f64, extent: f64, start: f64) -> f64 {
    match edge {
        Edge::Near => fixed - extent,
        Edge::Far => start,
    }
}

/// An axis-aligned rectangle spanned from `origin` by a signed size
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub style: Style,
}

impl Rect {
    pub fn new(origin: Point, width: f64, height: f64, style: Style) -> Self {
        Self {
            origin,
            width,
            height,
            style,
        }
    }

    /// Normalized box, whatever the signs of the extents
    pub fn normalized(&self) -> Aabb {
        Aabb::from_origin_size(self.origin, self.width, self.height)
    }

    /// |width / height| used as the aspect lock; 1 when undefined
    fn lock_aspect(&self) -> f64 {
        let aspect = (self.width / self.height).abs();
        if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            debug!(
                width = self.width,
                height = self.height,
                "degenerate aspect, locking to 1"
            );
            1.0
        }
    }

    fn corner_point(&self, corner: Corner) -> Point {
        let (h, v) = corner.edges();
        let x = match h {
            Edge::Near => self.origin.x,
            Edge::Far => self.origin.x + self.width,
        };
        let y = match v {
            Edge::Near => self.origin.y,
            Edge::Far => self.origin.y + self.height,
        };
        Point::new(x, y)
    }
}

impl Geometry for Rect {
    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let bb = self.normalized();
        let (x, y, w, h) = (bb.min.x, bb.min.y, bb.width(), bb.height());
        if let Some(fill) = self.style.active_fill() {
            surface.set_fill_color(fill);
            surface.fill_rect(x, y, w, h);
        }
        self.style.apply_stroke(surface);
        surface.stroke_rect(x, y, w, h);
    }

    fn contains(&self, p: Point) -> bool {
        self.normalized().contains(p)
    }

    fn bounds(&self) -> Aabb {
        self.normalized()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.origin.translate(dx, dy);
    }

    /// Drag a corner while the opposite corner stays put.
    ///
    /// With `maintain_aspect`, the longer side (relative to the aspect before
    /// the drag) is shortened to restore it; signs are preserved.
    fn resize(&mut self, handle: Handle, to: Point, maintain_aspect: bool) {
        let Some(corner) = Corner::from_handle(handle) else {
            return;
        };
        let (h_edge, v_edge) = corner.edges();
        let aspect = self.lock_aspect();

        // the corner opposite the handle
        let fixed = self.corner_point(match corner {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomRight => Corner::TopLeft,
            Corner::BottomLeft => Corner::TopRight,
        });

        let (mut x, mut width) = drag_axis(h_edge, self.origin.x, self.width, to.x);
        let (mut y, mut height) = drag_axis(v_edge, self.origin.y, self.height, to.y);

        if maintain_aspect {
            let current = (width / height).abs();
            if current > aspect {
                width = sign(width) * (height * aspect).abs();
            } else {
                height = sign(height) * (width / aspect).abs();
            }
            x = refix_start(h_edge, fixed.x, width, x);
            y = refix_start(v_edge, fixed.y, height, y);
        }

        self.origin = Point::new(x, y);
        self.width = width;
        self.height = height;
    }

    fn resize_handle(&self, p: Point) -> Option<Handle> {
        anchor_hit(&self.anchors(), p)
    }

    /// Corners in handle order, taken from the stored (signed) geometry
    fn anchors(&self) -> Vec<Point> {
        Corner::ALL.iter().map(|&c| self.corner_point(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(Point::new(x, y), w, h, Style::filled("#000", "#f00", 2.0, false))
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn corner_handles_round_trip() {
        for c in Corner::ALL {
            assert_eq!(Corner::from_handle(c.handle()), Some(c));
        }
        assert_eq!(Corner::from_handle(Handle(4)), None);
    }

    #[test]
    fn contains_negative_extents() {
        let r = rect(10.0, 10.0, -5.0, -5.0);
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(7.0, 8.0)));
        assert!(!r.contains(Point::new(10.1, 8.0)));
    }

    #[test]
    fn draw_fills_under_stroke() {
        let mut r = rect(10.0, 10.0, -4.0, 6.0);
        r.style.use_fill = true;
        let mut s = RecordingSurface::new();
        r.draw(&mut s);
        assert_eq!(
            s.ops,
            vec![
                DrawOp::FillColor("#f00".into()),
                DrawOp::FillRect {
                    x: 6.0,
                    y: 10.0,
                    width: 4.0,
                    height: 6.0
                },
                DrawOp::StrokeColor("#000".into()),
                DrawOp::LineWidth(2.0),
                DrawOp::StrokeRect {
                    x: 6.0,
                    y: 10.0,
                    width: 4.0,
                    height: 6.0
                },
            ]
        );
    }

    #[test]
    fn draw_without_fill_only_strokes() {
        let mut s = RecordingSurface::new();
        rect(0.0, 0.0, 3.0, 3.0).draw(&mut s);
        assert!(s.filled_rects().is_empty());
    }

    #[test]
    fn handle_order_is_tl_tr_br_bl() {
        let r = rect(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r.resize_handle(Point::new(1.0, 1.0)), Some(Corner::TopLeft.handle()));
        assert_eq!(r.resize_handle(Point::new(99.0, 1.0)), Some(Corner::TopRight.handle()));
        assert_eq!(r.resize_handle(Point::new(99.0, 49.0)), Some(Corner::BottomRight.handle()));
        assert_eq!(r.resize_handle(Point::new(1.0, 49.0)), Some(Corner::BottomLeft.handle()));
        assert_eq!(r.resize_handle(Point::new(50.0, 25.0)), None);
    }

    #[test]
    fn top_left_keeps_bottom_right() {
        let mut r = rect(10.0, 10.0, 100.0, 50.0);
        r.resize(Corner::TopLeft.handle(), Point::new(0.0, 20.0), false);
        assert_eq!(r.origin, Point::new(0.0, 20.0));
        assert_eq!((r.width, r.height), (110.0, 40.0));
    }

    #[test]
    fn bottom_right_only_changes_size() {
        let mut r = rect(10.0, 10.0, 100.0, 50.0);
        r.resize(Corner::BottomRight.handle(), Point::new(20.0, 15.0), false);
        assert_eq!(r.origin, Point::new(10.0, 10.0));
        assert_eq!((r.width, r.height), (10.0, 5.0));
    }

    #[test]
    fn top_right_and_bottom_left() {
        let mut r = rect(0.0, 0.0, 10.0, 10.0);
        r.resize(Corner::TopRight.handle(), Point::new(20.0, -5.0), false);
        assert_eq!(r.origin, Point::new(0.0, -5.0));
        assert_eq!((r.width, r.height), (20.0, 15.0));

        let mut r = rect(0.0, 0.0, 10.0, 10.0);
        r.resize(Corner::BottomLeft.handle(), Point::new(-5.0, 30.0), false);
        assert_eq!(r.origin, Point::new(-5.0, 0.0));
        assert_eq!((r.width, r.height), (15.0, 30.0));
    }

    #[test]
    fn dragging_through_keeps_negative_extent() {
        let mut r = rect(10.0, 10.0, 20.0, 20.0);
        r.resize(Corner::BottomRight.handle(), Point::new(0.0, 5.0), false);
        assert_eq!((r.width, r.height), (-10.0, -5.0));
        assert_eq!(r.origin, Point::new(10.0, 10.0));
    }

    #[test]
    fn aspect_lock_clamps_width() {
        let mut r = rect(0.0, 0.0, 40.0, 20.0);
        r.resize(Corner::BottomRight.handle(), Point::new(100.0, 30.0), true);
        assert_close(r.width, 60.0);
        assert_close(r.height, 30.0);
    }

    #[test]
    fn aspect_lock_clamps_height() {
        let mut r = rect(0.0, 0.0, 40.0, 20.0);
        r.resize(Corner::BottomRight.handle(), Point::new(50.0, 80.0), true);
        assert_close(r.width, 50.0);
        assert_close(r.height, 25.0);
    }

    #[test]
    fn aspect_lock_keeps_opposite_corner() {
        let mut r = rect(10.0, 10.0, 40.0, 20.0);
        // bottom-right corner is (50, 30)
        r.resize(Corner::TopLeft.handle(), Point::new(-70.0, 0.0), true);
        assert_close(r.origin.x + r.width, 50.0);
        assert_close(r.origin.y + r.height, 30.0);
        assert_close((r.width / r.height).abs(), 2.0);
    }

    #[test]
    fn aspect_lock_preserves_signs() {
        let mut r = rect(0.0, 0.0, 30.0, 10.0);
        r.resize(Corner::BottomRight.handle(), Point::new(-90.0, -60.0), true);
        assert!(r.width < 0.0 && r.height < 0.0);
        assert_close((r.width / r.height).abs(), 3.0);
    }

    #[test]
    fn aspect_lock_zero_height_uses_square() {
        let mut r = rect(0.0, 0.0, 30.0, 0.0);
        r.resize(Corner::BottomRight.handle(), Point::new(40.0, 10.0), true);
        assert_close(r.width, 10.0);
        assert_close(r.height, 10.0);
        assert!(r.width.is_finite() && r.height.is_finite());
    }

    #[test]
    fn aspect_lock_zero_width_uses_square() {
        let mut r = rect(0.0, 0.0, 0.0, 30.0);
        r.resize(Corner::BottomRight.handle(), Point::new(10.0, 40.0), true);
        assert_close(r.width, 10.0);
        assert_close(r.height, 10.0);
    }

    #[test]
    fn unknown_handle_is_ignored() {
        let mut r = rect(1.0, 2.0, 3.0, 4.0);
        let before = r.clone();
        r.resize(Handle(9), Point::new(50.0, 50.0), false);
        assert_eq!(r, before);
    }
}
