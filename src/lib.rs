//! Vector shape editing for a 2D canvas.
//!
//! A [`SceneDocument`] holds line segments, rectangles, discs and Bézier
//! curves in paint order, with at most one of them selected. Shapes draw
//! themselves onto any [`Surface`]; segments can be rasterized pixel by pixel
//! with Bresenham or DDA. Documents round-trip through a JSON array of shape
//! records, and an [`Editor`] turns pointer events into shape edits.
//!
//! ```
//! use vecpaint::{Editor, Point, RecordingSurface, Tool};
//!
//! let mut editor = Editor::default();
//! editor.set_tool(Tool::Rect);
//! editor.pointer_down(Point::new(10.0, 10.0));
//! editor.pointer_up(Point::new(60.0, 40.0));
//!
//! let mut surface = RecordingSurface::new();
//! editor.render(&mut surface);
//! assert_eq!(editor.document().len(), 1);
//! ```

pub mod defaults;
pub mod document;
pub mod editor;
pub mod errors;
pub mod log;
pub mod raster;
pub mod serialize;
pub mod shapes;
pub mod surface;
pub mod types;

pub use document::SceneDocument;
pub use editor::{Editor, EditorSettings, Modifiers, Tool};
pub use errors::{ExportError, ImportError};
pub use serialize::ImportReport;
pub use shapes::{
    Algorithm, CubicCurve, Disc, Geometry, Handle, QuadraticCurve, Rect, Segment, Shape, Style,
};
pub use surface::{PixmapSurface, RecordingSurface, Surface};
pub use types::{Aabb, Point};
