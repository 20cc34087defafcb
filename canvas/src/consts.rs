//! Shared numeric constants for the canvas crate.

// ── Grid ────────────────────────────────────────────────────────

/// Side length of one grid cell in world units. Independent of zoom.
pub const GRID_UNIT: f64 = 20.0;

/// Radius of a background grid dot in screen pixels.
pub const GRID_DOT_RADIUS_PX: f64 = 2.0;

// ── Viewport ────────────────────────────────────────────────────

/// Lowest allowed zoom scale.
pub const MIN_SCALE: f64 = 0.3;

/// Highest allowed zoom scale.
pub const MAX_SCALE: f64 = 2.0;

/// Wheel delta (pixels) that corresponds to a zoom change of 1.0.
pub const WHEEL_ZOOM_DIVISOR: f64 = 500.0;

// ── Components ──────────────────────────────────────────────────

/// Smallest side length a placed component can be resized to.
pub const MIN_SIZE: f64 = 400.0;

/// Largest side length a placed component can be resized to.
pub const MAX_SIZE: f64 = 1080.0;

/// Side length of a freshly dropped component.
pub const DEFAULT_SIZE: f64 = 1080.0;

/// Size change for one keyboard or menu resize increment (half a grid unit).
pub const RESIZE_STEP: f64 = GRID_UNIT / 2.0;

// ── Traces ──────────────────────────────────────────────────────

/// Stroke width of trace polylines in world units.
pub const TRACE_STROKE_WIDTH: f64 = 2.0;

/// World-space distance within which a trace vertex counts as clicked.
pub const TRACE_HIT_TOLERANCE: f64 = 5.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for component resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

// ── History ─────────────────────────────────────────────────────

/// Number of snapshots kept before the oldest is evicted.
pub const HISTORY_CAPACITY: usize = 50;
