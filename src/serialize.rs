//! Scene files: a JSON array with one plain record per shape.
//!
//! Records carry no type tag. The variant is recovered from which fields are
//! present, tried in a fixed order:
//!
//! | fields present              | variant          |
//! |-----------------------------|------------------|
//! | `x1`, `y1`, `x2`, `y2`      | `Segment`        |
//! | `width`, `height`           | `Rect`           |
//! | `radius`                    | `Disc`           |
//! | `points` with 3 entries     | `QuadraticCurve` |
//! | `points` with 4 entries     | `CubicCurve`     |
//!
//! Existing files depend on this, so a new variant must not reuse these
//! field names. Records matching none of the rows are skipped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::defaults;
use crate::document::SceneDocument;
use crate::errors::{ExportError, ImportError};
use crate::log::{debug, warn};
use crate::shapes::{
    Algorithm, CubicCurve, Disc, Geometry, QuadraticCurve, Rect, Segment, Shape, Style,
};
use crate::types::Point;

fn default_stroke_color() -> String {
    defaults::STROKE_COLOR.to_string()
}

fn default_line_width() -> f64 {
    defaults::LINE_WIDTH
}

/// Missing, `null` or empty means bresenham; anything else must be a known name.
fn lenient_algorithm<'de, D: Deserializer<'de>>(d: D) -> Result<Algorithm, D::Error> {
    match Option::<String>::deserialize(d)?.as_deref() {
        None | Some("") => Ok(Algorithm::default()),
        Some(name) => name.parse().map_err(serde::de::Error::custom),
    }
}

/// Fields shared by every record, in the order they are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    #[serde(default)]
    pub fill_color: Option<String>,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default)]
    pub use_fill: bool,
    /// Written for compatibility, ignored on load
    #[serde(default)]
    pub selected: bool,
}

impl StyleRecord {
    fn new(style: &Style, selected: bool) -> Self {
        Self {
            stroke_color: style.stroke_color.clone(),
            fill_color: style.fill_color.clone(),
            line_width: style.line_width,
            use_fill: style.use_fill,
            selected,
        }
    }

    fn into_style(self) -> Style {
        Style {
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            line_width: self.line_width,
            use_fill: self.use_fill,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    #[serde(flatten)]
    pub style: StyleRecord,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default, deserialize_with = "lenient_algorithm")]
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectRecord {
    #[serde(flatten)]
    pub style: StyleRecord,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscRecord {
    #[serde(flatten)]
    pub style: StyleRecord,
    #[serde(default)]
    pub cx: f64,
    #[serde(default)]
    pub cy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticRecord {
    #[serde(flatten)]
    pub style: StyleRecord,
    pub points: [Point; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicRecord {
    #[serde(flatten)]
    pub style: StyleRecord,
    pub points: [Point; 4],
}

/// One persisted shape. Deserialization tries the variants top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeRecord {
    Segment(SegmentRecord),
    Rect(RectRecord),
    Disc(DiscRecord),
    QuadraticCurve(QuadraticRecord),
    CubicCurve(CubicRecord),
}

impl ShapeRecord {
    /// Record for `shape`, with the compatibility `selected` flag
    pub fn new(shape: &Shape, selected: bool) -> Self {
        let style = StyleRecord::new(shape.style(), selected);
        match shape {
            Shape::Segment(s) => ShapeRecord::Segment(SegmentRecord {
                style,
                x1: s.p1.x,
                y1: s.p1.y,
                x2: s.p2.x,
                y2: s.p2.y,
                algorithm: s.algorithm,
            }),
            Shape::Rect(r) => ShapeRecord::Rect(RectRecord {
                style,
                x: r.origin.x,
                y: r.origin.y,
                width: r.width,
                height: r.height,
            }),
            Shape::Disc(d) => ShapeRecord::Disc(DiscRecord {
                style,
                cx: d.center.x,
                cy: d.center.y,
                radius: d.radius(),
            }),
            Shape::QuadraticCurve(q) => ShapeRecord::QuadraticCurve(QuadraticRecord {
                style,
                points: q.points,
            }),
            Shape::CubicCurve(c) => ShapeRecord::CubicCurve(CubicRecord {
                style,
                points: c.points,
            }),
        }
    }
}

impl From<ShapeRecord> for Shape {
    fn from(record: ShapeRecord) -> Shape {
        match record {
            ShapeRecord::Segment(r) => Segment::new(
                Point::new(r.x1, r.y1),
                Point::new(r.x2, r.y2),
                r.algorithm,
                r.style.into_style(),
            )
            .into(),
            ShapeRecord::Rect(r) => {
                Rect::new(Point::new(r.x, r.y), r.width, r.height, r.style.into_style()).into()
            }
            ShapeRecord::Disc(r) => {
                Disc::new(Point::new(r.cx, r.cy), r.radius, r.style.into_style()).into()
            }
            ShapeRecord::QuadraticCurve(r) => {
                QuadraticCurve::new(r.points, r.style.into_style()).into()
            }
            ShapeRecord::CubicCurve(r) => CubicCurve::new(r.points, r.style.into_style()).into(),
        }
    }
}

/// Recover one shape from a record, or `None` if no field signature matches
pub fn shape_from_value(value: Value) -> Option<Shape> {
    match serde_json::from_value::<ShapeRecord>(value) {
        Ok(record) => Some(record.into()),
        Err(e) => {
            debug!(error = %e, "record matches no shape signature");
            None
        }
    }
}

/// Plain record for one shape
pub fn shape_to_value(shape: &Shape, selected: bool) -> Result<Value, ExportError> {
    Ok(serde_json::to_value(ShapeRecord::new(shape, selected))?)
}

/// Outcome of a successful import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub loaded: usize,
    /// Records that matched no shape signature and were dropped
    pub skipped: usize,
}

/// Parse a scene file into shapes.
///
/// Fails as a whole only when the text is not JSON or not an array;
/// individual unrecognized records are dropped and counted.
pub fn parse_scene(name: &str, text: &str) -> Result<(Vec<Shape>, ImportReport), ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::syntax(name, text, &e))?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ImportError::NotAnArray {
                found: value_kind(&other),
            });
        }
    };

    let mut report = ImportReport::default();
    let mut shapes = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match shape_from_value(item) {
            Some(shape) => shapes.push(shape),
            None => {
                warn!(index, file = name, "skipping unrecognized shape record");
                report.skipped += 1;
            }
        }
    }
    report.loaded = shapes.len();
    Ok((shapes, report))
}

/// Records for every shape, in paint order
pub fn to_records(doc: &SceneDocument) -> Vec<ShapeRecord> {
    doc.shapes()
        .iter()
        .enumerate()
        .map(|(i, s)| ShapeRecord::new(s, doc.is_selected(i)))
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl SceneDocument {
    /// Pretty-printed scene file (2-space indent)
    pub fn export_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&to_records(self))?)
    }

    /// Replace the whole document with the shapes in `text`.
    ///
    /// On error the document is left exactly as it was.
    pub fn import_json(&mut self, name: &str, text: &str) -> Result<ImportReport, ImportError> {
        let (shapes, report) = parse_scene(name, text)?;
        debug!(loaded = report.loaded, skipped = report.skipped, "import");
        self.replace(shapes);
        Ok(report)
    }
}
