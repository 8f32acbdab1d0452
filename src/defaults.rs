//! Default sizes, tolerances and colors (all in canvas pixels)

/// Chebyshev radius around an anchor that grabs a resize handle
pub const HANDLE_TOLERANCE: f64 = 8.0;
/// Perpendicular distance from a segment that still counts as a hit
pub const SEGMENT_HIT_DISTANCE: f64 = 10.0;
/// Per-axis distance from a curve control point that counts as a hit
pub const CONTROL_POINT_HIT_DISTANCE: f64 = 10.0;

/// Largest |coordinate| the pixel rasterizers accept, and the cap on half a
/// stamp side; segments reaching past it are not stamped
pub const RASTER_EXTENT: f64 = 1_048_576.0;

/// Side of the square mark drawn on each anchor of the selected shape
pub const MARK_SIZE: f64 = 8.0;
pub const MARK_COLOR: &str = "#333";

/// Side of the mark drawn on each collected curve point before commit
pub const PENDING_POINT_SIZE: f64 = 6.0;
pub const PENDING_POINT_COLOR: &str = "red";
pub const PENDING_GUIDE_COLOR: &str = "#888";
pub const PENDING_GUIDE_DASH: [f64; 2] = [4.0, 4.0];

/// Dash pattern of the rubber-band preview while dragging out a shape
pub const PREVIEW_DASH: [f64; 2] = [5.0, 5.0];

pub const STROKE_COLOR: &str = "#000000";
pub const FILL_COLOR: &str = "#ff0000";
pub const LINE_WIDTH: f64 = 2.0;
