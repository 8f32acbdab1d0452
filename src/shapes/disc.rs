//! Filled or outlined circle

use std::f64::consts::TAU;

use super::{Geometry, Handle, Style, anchor_hit};
use crate::surface::Surface;
use crate::types::{Aabb, Point};

/// A circle around `center`
#[derive(Debug, Clone, PartialEq)]
pub struct Disc {
    pub center: Point,
    radius: f64,
    pub style: Style,
}

impl Disc {
    /// Negative or NaN radii are clamped to zero
    pub fn new(center: Point, radius: f64, style: Style) -> Self {
        Self {
            center,
            radius: clamp_radius(radius),
            style,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = clamp_radius(radius);
    }
}

/// North, east, south and west
const RIM_HANDLES: usize = 4;

fn clamp_radius(r: f64) -> f64 {
    if r.is_nan() { 0.0 } else { r.max(0.0) }
}

impl Geometry for Disc {
    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        surface.arc(self.center, self.radius, 0.0, TAU);
        if let Some(fill) = self.style.active_fill() {
            surface.set_fill_color(fill);
            surface.fill();
        }
        self.style.apply_stroke(surface);
        surface.stroke();
    }

    fn contains(&self, p: Point) -> bool {
        self.center.distance(p) <= self.radius
    }

    fn bounds(&self) -> Aabb {
        let r = self.radius;
        Aabb::from_points([
            Point::new(self.center.x - r, self.center.y - r),
            Point::new(self.center.x + r, self.center.y + r),
        ])
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center.translate(dx, dy);
    }

    /// Every handle does the same thing: the pointer lands on the rim.
    fn resize(&mut self, handle: Handle, to: Point, _maintain_aspect: bool) {
        if handle.index() >= RIM_HANDLES {
            return;
        }
        self.set_radius(self.center.distance(to));
    }

    fn resize_handle(&self, p: Point) -> Option<Handle> {
        anchor_hit(&self.anchors(), p)
    }

    /// North, east, south, west
    fn anchors(&self) -> Vec<Point> {
        let Point { x, y } = self.center;
        let r = self.radius;
        vec![
            Point::new(x, y - r),
            Point::new(x + r, y),
            Point::new(x, y + r),
            Point::new(x - r, y),
        ]
    }
}
