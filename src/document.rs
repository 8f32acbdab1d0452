//! The scene: shapes in paint order plus the single selection

use crate::log::{debug, trace};
use crate::shapes::{Geometry, Shape};
use crate::surface::Surface;
use crate::types::Point;

/// Ordered shapes (later = drawn on top) and at most one selected shape.
///
/// The selection is an index into `shapes`, so "selected" can never be true
/// for two shapes at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDocument {
    shapes: Vec<Shape>,
    selected: Option<usize>,
}

impl SceneDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            selected: None,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Append as the new topmost shape, returning its index
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> usize {
        let shape = shape.into();
        trace!(kind = shape.kind(), index = self.shapes.len(), "add shape");
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Index of the topmost shape containing `p`
    pub fn hit_test(&self, p: Point) -> Option<usize> {
        self.shapes.iter().rposition(|s| s.contains(p))
    }

    /// Make `index` the only selected shape; out-of-range clears the selection
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.shapes.len());
    }

    /// Hit-test and select in one go; a miss clears the selection
    pub fn select_at(&mut self, p: Point) -> Option<usize> {
        let hit = self.hit_test(p);
        debug!(x = p.x, y = p.y, ?hit, "select");
        self.select(hit);
        hit
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Shape> {
        self.selected.and_then(|i| self.shapes.get(i))
    }

    pub fn selected_mut(&mut self) -> Option<&mut Shape> {
        self.selected.and_then(|i| self.shapes.get_mut(i))
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    /// Remove every shape and the selection
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.selected = None;
    }

    /// Swap in a whole new shape list; nothing is selected afterwards
    pub fn replace(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.selected = None;
    }

    /// Clear the surface, paint every shape in order, then the selection marks
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        for shape in &self.shapes {
            shape.draw(surface);
        }
        if let Some(shape) = self.selected() {
            shape.draw_marks(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Algorithm, Disc, Rect, Segment, Style};
    use crate::surface::{DrawOp, RecordingSurface};

    fn square(x: f64, y: f64, side: f64) -> Rect {
        Rect::new(Point::new(x, y), side, side, Style::default())
    }

    #[test]
    fn add_appends_on_top() {
        let mut doc = SceneDocument::new();
        assert_eq!(doc.add_shape(square(0.0, 0.0, 10.0)), 0);
        assert_eq!(doc.add_shape(square(5.0, 5.0, 10.0)), 1);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut doc = SceneDocument::new();
        doc.add_shape(square(0.0, 0.0, 10.0));
        doc.add_shape(Disc::new(Point::new(8.0, 8.0), 5.0, Style::default()));
        assert_eq!(doc.hit_test(Point::new(9.0, 9.0)), Some(1));
        assert_eq!(doc.hit_test(Point::new(1.0, 1.0)), Some(0));
        assert_eq!(doc.hit_test(Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn single_selection() {
        let mut doc = SceneDocument::new();
        doc.add_shape(square(0.0, 0.0, 10.0));
        doc.add_shape(square(20.0, 0.0, 10.0));

        doc.select_at(Point::new(1.0, 1.0));
        assert!(doc.is_selected(0));
        doc.select_at(Point::new(21.0, 1.0));
        assert!(doc.is_selected(1));
        assert!(!doc.is_selected(0));

        doc.select_at(Point::new(100.0, 100.0));
        assert_eq!(doc.selected(), None);
    }

    #[test]
    fn select_out_of_range_clears() {
        let mut doc = SceneDocument::new();
        doc.add_shape(square(0.0, 0.0, 10.0));
        doc.select(Some(0));
        doc.select(Some(3));
        assert_eq!(doc.selected_index(), None);
    }

    #[test]
    fn clear_drops_selection() {
        let mut doc = SceneDocument::new();
        doc.add_shape(square(0.0, 0.0, 10.0));
        doc.select(Some(0));
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.selected_index(), None);
    }

    #[test]
    fn selected_mut_edits_in_place() {
        let mut doc = SceneDocument::new();
        doc.add_shape(square(0.0, 0.0, 10.0));
        doc.select(Some(0));
        if let Some(s) = doc.selected_mut() {
            s.translate(5.0, 5.0);
        }
        assert_eq!(doc.hit_test(Point::new(1.0, 1.0)), None);
        assert_eq!(doc.hit_test(Point::new(14.0, 14.0)), Some(0));
    }

    #[test]
    fn render_marks_after_all_shapes() {
        let mut doc = SceneDocument::new();
        doc.add_shape(Segment::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Algorithm::Native,
            Style::default(),
        ));
        doc.add_shape(square(20.0, 0.0, 10.0));
        doc.select(Some(0));

        let mut s = RecordingSurface::new();
        doc.render(&mut s);

        assert_eq!(s.ops.first(), Some(&DrawOp::Clear));
        let stroke_rect = s
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::StrokeRect { .. }))
            .unwrap();
        let mark = s
            .ops
            .iter()
            .position(|op| *op == DrawOp::FillColor("#333".into()))
            .unwrap();
        assert!(mark > stroke_rect);
        assert_eq!(s.filled_rects().len(), 2);
    }
}
