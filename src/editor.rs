//! Pointer-driven editing on top of a [`SceneDocument`]
//!
//! The host forwards canvas-local pointer events; the editor turns them into
//! shape creation, selection, drags and handle resizes, and paints
//! rubber-band previews while a gesture is in progress.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::document::SceneDocument;
use crate::log::{debug, trace};
use crate::shapes::{
    Algorithm, CubicCurve, Disc, Geometry, Handle, QuadraticCurve, Rect, Segment, Shape, Style,
};
use crate::surface::Surface;
use crate::types::Point;

/// The active toolbar tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select, move and resize existing shapes
    #[default]
    Select,
    Segment,
    Rect,
    Disc,
    /// Three clicks: start, control, end
    Quadratic,
    /// Four clicks: start, two controls, end
    Cubic,
}

impl Tool {
    /// Number of clicks that commit a curve, `None` for drag tools
    pub fn curve_arity(self) -> Option<usize> {
        match self {
            Tool::Quadratic => Some(3),
            Tool::Cubic => Some(4),
            _ => None,
        }
    }
}

/// Style applied to newly created shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    pub stroke_color: String,
    pub fill_color: String,
    pub line_width: f64,
    pub use_fill: bool,
    pub algorithm: Algorithm,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            stroke_color: defaults::STROKE_COLOR.to_string(),
            fill_color: defaults::FILL_COLOR.to_string(),
            line_width: defaults::LINE_WIDTH,
            use_fill: false,
            algorithm: Algorithm::default(),
        }
    }
}

impl EditorSettings {
    fn stroke_style(&self) -> Style {
        Style::stroke(self.stroke_color.clone(), self.line_width)
    }

    fn closed_style(&self) -> Style {
        Style::filled(
            self.stroke_color.clone(),
            self.fill_color.clone(),
            self.line_width,
            self.use_fill,
        )
    }
}

/// Keyboard state sampled with a pointer event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Keep the aspect ratio while resizing
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// Dragging the selected shape; `last` is the previous pointer position
    Moving { last: Point },
    Resizing { handle: Handle },
    /// Dragging out a new segment, rect or disc
    Drawing { start: Point, current: Point },
}

/// Tool state machine owning the document it edits
#[derive(Debug, Clone)]
pub struct Editor {
    document: SceneDocument,
    tool: Tool,
    settings: EditorSettings,
    gesture: Gesture,
    /// Curve points clicked so far
    pending: Vec<Point>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            document: SceneDocument::new(),
            tool: Tool::Select,
            settings,
            gesture: Gesture::Idle,
            pending: Vec::new(),
        }
    }

    pub fn document(&self) -> &SceneDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut SceneDocument {
        &mut self.document
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools, dropping any half-collected curve
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.pending.clear();
        self.gesture = Gesture::Idle;
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EditorSettings {
        &mut self.settings
    }

    /// Curve points collected but not yet committed
    pub fn pending_points(&self) -> &[Point] {
        &self.pending
    }

    /// Empty the document and forget any gesture in progress
    pub fn clear(&mut self) {
        self.document.clear();
        self.pending.clear();
        self.gesture = Gesture::Idle;
    }

    /// Returns the index of a shape committed by this press (curve tools only)
    pub fn pointer_down(&mut self, p: Point) -> Option<usize> {
        match self.tool {
            Tool::Select => {
                self.begin_select(p);
                None
            }
            Tool::Quadratic | Tool::Cubic => self.collect_curve_point(p),
            Tool::Segment | Tool::Rect | Tool::Disc => {
                self.gesture = Gesture::Drawing { start: p, current: p };
                None
            }
        }
    }

    pub fn pointer_move(&mut self, p: Point, modifiers: Modifiers) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Moving { last } => {
                let delta = p - last;
                if let Some(shape) = self.document.selected_mut() {
                    shape.translate(delta.x, delta.y);
                }
                self.gesture = Gesture::Moving { last: p };
            }
            Gesture::Resizing { handle } => {
                if let Some(shape) = self.document.selected_mut() {
                    shape.resize(handle, p, modifiers.shift);
                }
            }
            Gesture::Drawing { start, .. } => {
                self.gesture = Gesture::Drawing { start, current: p };
            }
        }
    }

    /// Returns the index of a shape committed by this release
    pub fn pointer_up(&mut self, p: Point) -> Option<usize> {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        let Gesture::Drawing { start, .. } = gesture else {
            return None;
        };
        let shape = self.shape_from_drag(start, p)?;
        debug!(kind = shape.kind(), "commit");
        Some(self.document.add_shape(shape))
    }

    fn begin_select(&mut self, p: Point) {
        let handle = self.document.selected().and_then(|s| s.resize_handle(p));
        if let Some(handle) = handle {
            trace!(handle = handle.index(), "resize start");
            self.gesture = Gesture::Resizing { handle };
            return;
        }
        self.gesture = match self.document.select_at(p) {
            Some(_) => Gesture::Moving { last: p },
            None => Gesture::Idle,
        };
    }

    fn collect_curve_point(&mut self, p: Point) -> Option<usize> {
        self.pending.push(p);
        let arity = self.tool.curve_arity()?;
        if self.pending.len() < arity {
            return None;
        }
        let points = std::mem::take(&mut self.pending);
        let style = self.settings.stroke_style();
        let shape: Shape = match *points.as_slice() {
            [a, b, c] => QuadraticCurve::new([a, b, c], style).into(),
            [a, b, c, d] => CubicCurve::new([a, b, c, d], style).into(),
            _ => return None,
        };
        debug!(kind = shape.kind(), "commit");
        Some(self.document.add_shape(shape))
    }

    fn shape_from_drag(&self, start: Point, end: Point) -> Option<Shape> {
        let shape = match self.tool {
            Tool::Segment => Segment::new(
                start,
                end,
                self.settings.algorithm,
                self.settings.stroke_style(),
            )
            .into(),
            Tool::Rect => Rect::new(
                start,
                end.x - start.x,
                end.y - start.y,
                self.settings.closed_style(),
            )
            .into(),
            Tool::Disc => {
                Disc::new(start, start.distance(end), self.settings.closed_style()).into()
            }
            Tool::Select | Tool::Quadratic | Tool::Cubic => return None,
        };
        Some(shape)
    }

    /// Paint the document, then any rubber band and pending curve points
    pub fn render(&self, surface: &mut dyn Surface) {
        self.document.render(surface);
        if let Gesture::Drawing { start, current } = self.gesture {
            self.draw_preview(surface, start, current);
        }
        if !self.pending.is_empty() {
            self.draw_pending(surface);
        }
    }

    fn draw_preview(&self, surface: &mut dyn Surface, start: Point, current: Point) {
        surface.set_stroke_color(&self.settings.stroke_color);
        surface.set_line_width(self.settings.line_width);
        surface.set_line_dash(&defaults::PREVIEW_DASH);
        match self.tool {
            Tool::Segment => {
                surface.begin_path();
                surface.move_to(start);
                surface.line_to(current);
                surface.stroke();
            }
            Tool::Rect => {
                surface.stroke_rect(
                    start.x,
                    start.y,
                    current.x - start.x,
                    current.y - start.y,
                );
            }
            Tool::Disc => {
                surface.begin_path();
                surface.arc(start, start.distance(current), 0.0, std::f64::consts::TAU);
                surface.stroke();
            }
            Tool::Select | Tool::Quadratic | Tool::Cubic => {}
        }
        surface.set_line_dash(&[]);
    }

    fn draw_pending(&self, surface: &mut dyn Surface) {
        let side = defaults::PENDING_POINT_SIZE;
        surface.set_fill_color(defaults::PENDING_POINT_COLOR);
        for p in &self.pending {
            surface.fill_rect(p.x - side / 2.0, p.y - side / 2.0, side, side);
        }

        if let [first, rest @ ..] = self.pending.as_slice() {
            if rest.is_empty() {
                return;
            }
            surface.set_stroke_color(defaults::PENDING_GUIDE_COLOR);
            surface.set_line_width(1.0);
            surface.set_line_dash(&defaults::PENDING_GUIDE_DASH);
            surface.begin_path();
            surface.move_to(*first);
            for p in rest {
                surface.line_to(*p);
            }
            surface.stroke();
            surface.set_line_dash(&[]);
        }
    }
}
