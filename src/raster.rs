//! Pixel-stepping line rasterizers.
//!
//! Both walkers report integer pixel centers through a callback and never
//! touch a surface themselves; the segment shape turns each reported pixel
//! into a square stamp.

use crate::defaults::RASTER_EXTENT;
use crate::log::{debug, trace};
use crate::types::{Point, round_half_up};

/// Side of the square stamp that gives a rasterized line its thickness:
/// `2 * floor(line_width / 2) + 1`, so always odd and at least 1.
/// The half side is capped at [`RASTER_EXTENT`].
pub fn stamp_side(line_width: f64) -> i64 {
    let half = if line_width.is_finite() {
        (line_width / 2.0).floor().clamp(0.0, RASTER_EXTENT) as i64
    } else {
        0
    };
    2 * half + 1
}

/// Finite and within [`RASTER_EXTENT`] on both axes
fn rasterizable(p: Point) -> bool {
    p.is_finite() && p.x.abs() <= RASTER_EXTENT && p.y.abs() <= RASTER_EXTENT
}

/// Classic integer Bresenham walk from `from` to `to`, endpoints rounded.
///
/// Every pixel is reported exactly once, both endpoints included. Coincident
/// endpoints report a single pixel.
pub fn bresenham(from: Point, to: Point, mut plot: impl FnMut(i64, i64)) {
    if !(rasterizable(from) && rasterizable(to)) {
        debug!(?from, ?to, "bresenham: endpoint out of range, nothing plotted");
        return;
    }

    let (mut x, mut y) = (round_half_up(from.x) as i64, round_half_up(from.y) as i64);
    let (x2, y2) = (round_half_up(to.x) as i64, round_half_up(to.y) as i64);

    let dx = (x2 - x).abs();
    let dy = (y2 - y).abs();
    let sx = if x < x2 { 1 } else { -1 };
    let sy = if y < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    trace!(x, y, x2, y2, "bresenham");
    loop {
        plot(x, y);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Digital differential analyzer walk from `from` to `to`.
///
/// Takes `round(max(|dx|, |dy|))` equal floating steps and rounds each
/// position to the nearest pixel, reporting `steps + 1` pixels. A zero step
/// count reports the start pixel once instead of dividing by zero.
pub fn dda(from: Point, to: Point, mut plot: impl FnMut(i64, i64)) {
    if !(rasterizable(from) && rasterizable(to)) {
        debug!(?from, ?to, "dda: endpoint out of range, nothing plotted");
        return;
    }

    let delta = to - from;
    let steps = round_half_up(delta.abs().max_element());
    if steps <= 0.0 {
        debug!(?from, "dda: zero-length segment, single stamp");
        plot(round_half_up(from.x) as i64, round_half_up(from.y) as i64);
        return;
    }

    let inc = delta / steps;
    let mut pos = from.to_vec();
    let count = steps as u64;
    trace!(count, "dda");
    for _ in 0..=count {
        plot(round_half_up(pos.x) as i64, round_half_up(pos.y) as i64);
        pos += inc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(
        f: fn(Point, Point, &mut dyn FnMut(i64, i64)),
        a: (f64, f64),
        b: (f64, f64),
    ) -> Vec<(i64, i64)> {
        let mut out = Vec::new();
        f(a.into(), b.into(), &mut |x, y| out.push((x, y)));
        out
    }

    fn bres(a: Point, b: Point, plot: &mut dyn FnMut(i64, i64)) {
        bresenham(a, b, plot)
    }

    fn dda_walk(a: Point, b: Point, plot: &mut dyn FnMut(i64, i64)) {
        dda(a, b, plot)
    }

    #[test]
    fn stamp_side_is_odd() {
        assert_eq!(stamp_side(1.0), 1);
        assert_eq!(stamp_side(2.0), 3);
        assert_eq!(stamp_side(3.0), 3);
        assert_eq!(stamp_side(4.5), 5);
        assert_eq!(stamp_side(0.0), 1);
        assert_eq!(stamp_side(-4.0), 1);
        assert_eq!(stamp_side(f64::NAN), 1);
    }

    #[test]
    fn stamp_side_is_capped() {
        let cap = 2 * RASTER_EXTENT as i64 + 1;
        assert_eq!(stamp_side(1e19), cap);
        assert_eq!(stamp_side(f64::MAX), cap);
    }

    #[test]
    fn bresenham_horizontal() {
        let pts = walk(bres, (0.0, 0.0), (10.0, 0.0));
        let expected: Vec<_> = (0..=10).map(|x| (x, 0)).collect();
        assert_eq!(pts, expected);
    }

    #[test]
    fn bresenham_reverse_diagonal() {
        let pts = walk(bres, (3.0, 3.0), (0.0, 0.0));
        assert_eq!(pts, vec![(3, 3), (2, 2), (1, 1), (0, 0)]);
    }

    #[test]
    fn bresenham_steep() {
        let pts = walk(bres, (0.0, 0.0), (1.0, 4.0));
        assert_eq!(pts.len(), 5);
        assert_eq!(pts.first(), Some(&(0, 0)));
        assert_eq!(pts.last(), Some(&(1, 4)));
        // one pixel per row on a steep line
        for (i, (_, y)) in pts.iter().enumerate() {
            assert_eq!(*y, i as i64);
        }
    }

    #[test]
    fn bresenham_rounds_endpoints() {
        let pts = walk(bres, (0.4, 0.5), (2.49, 0.6));
        assert_eq!(pts, vec![(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn bresenham_zero_length_plots_once() {
        assert_eq!(walk(bres, (5.2, 5.2), (4.9, 5.0)), vec![(5, 5)]);
    }

    #[test]
    fn dda_zero_length_plots_once() {
        assert_eq!(walk(dda_walk, (7.0, 7.0), (7.0, 7.0)), vec![(7, 7)]);
        assert_eq!(walk(dda_walk, (7.0, 7.0), (7.3, 6.8)), vec![(7, 7)]);
    }

    #[test]
    fn dda_horizontal() {
        let pts = walk(dda_walk, (0.0, 0.0), (4.0, 0.0));
        assert_eq!(pts, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn dda_diagonal_hits_end() {
        let pts = walk(dda_walk, (0.0, 0.0), (4.0, -2.0));
        assert_eq!(pts.len(), 5);
        assert_eq!(pts.last(), Some(&(4, -2)));
    }

    #[test]
    fn non_finite_plots_nothing() {
        assert!(walk(bres, (f64::NAN, 0.0), (1.0, 1.0)).is_empty());
        assert!(walk(dda_walk, (0.0, 0.0), (f64::INFINITY, 1.0)).is_empty());
    }

    #[test]
    fn huge_endpoints_plot_nothing() {
        assert!(walk(bres, (-1e19, 0.0), (1e19, 0.0)).is_empty());
        assert!(walk(dda_walk, (-1e19, 0.0), (1e19, 0.0)).is_empty());
        assert!(walk(bres, (0.0, 0.0), (1e12, 0.0)).is_empty());
        assert!(walk(dda_walk, (0.0, 1e12), (0.0, 0.0)).is_empty());
    }

    #[test]
    fn endpoints_at_the_extent_still_plot() {
        let edge = RASTER_EXTENT;
        assert_eq!(walk(bres, (edge, 0.0), (edge, 0.0)), vec![(edge as i64, 0)]);
        assert_eq!(walk(dda_walk, (0.0, -edge), (0.0, -edge)), vec![(0, -edge as i64)]);
    }
}
