//! Geometric primitives shared by every shape: canvas points and bounding boxes.
//!
//! Coordinates are canvas-local pixels, Y pointing down. Arithmetic goes
//! through `glam::DVec2`; `Point` is the persisted `{x, y}` form.

use std::ops::{Add, Sub};

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

/// A point on the canvas
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn to_vec(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Move by an offset in place
    #[inline]
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Chebyshev distance, max(|dx|, |dy|)
    #[inline]
    pub fn chebyshev(self, other: Point) -> f64 {
        let d = (self.to_vec() - other.to_vec()).abs();
        d.max_element()
    }

    /// True when both coordinates are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.to_vec()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Translate a point by a displacement
impl Add<DVec2> for Point {
    type Output = Point;
    fn add(self, rhs: DVec2) -> Point {
        Point::from(self.to_vec() + rhs)
    }
}

/// Subtract two points to get the displacement between them
impl Sub<Point> for Point {
    type Output = DVec2;
    fn sub(self, rhs: Point) -> DVec2 {
        self.to_vec() - rhs.to_vec()
    }
}

/// Axis-aligned bounding box
///
/// `min` is always the top-left corner and `max` the bottom-right, whatever
/// the sign of the shape's own extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    /// Create an empty bounding box (will expand on first point)
    pub fn empty() -> Self {
        Aabb {
            min: Point::new(f64::MAX, f64::MAX),
            max: Point::new(f64::MIN, f64::MIN),
        }
    }

    /// Smallest box holding every point
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut bb = Aabb::empty();
        for p in points {
            bb.expand_point(p);
        }
        bb
    }

    /// Box spanned by a corner and a signed size
    pub fn from_origin_size(origin: Point, width: f64, height: f64) -> Self {
        Aabb::from_points([origin, Point::new(origin.x + width, origin.y + height)])
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        ((self.min.to_vec() + self.max.to_vec()) * 0.5).into()
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb::empty()
    }
}

/// Sign of a value with `sign(0) == 0`, unlike `f64::signum`
#[inline]
pub fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Canvas pixel rounding: halves round up, `-0.5` goes to `0`.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}
