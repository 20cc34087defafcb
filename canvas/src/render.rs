//! Rendering: lays out the display list the host draws each frame.
//!
//! This module is the only place that decides what is visible. It receives
//! read-only views of document, camera, and UI state and produces a
//! [`Scene`]: a dotted grid, trace polylines, component image placements, and
//! overlays. It does not mutate any application state. The host maps the
//! scene onto its drawing surface (SVG, canvas 2D, GPU) and applies the
//! camera transform to world-space geometry.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Camera, Point, grid_to_world, world_to_grid};
use crate::consts::{GRID_DOT_RADIUS_PX, GRID_UNIT, TRACE_STROKE_WIDTH};
use crate::doc::{Component, ComponentId, DocStore, Rgb, Trace, TraceId};
use crate::input::{ContextMenu, InputState, UiState};
use crate::route::ActiveTrace;
use crate::selection::{Rect, Selection};

/// Stroke color of the trace currently being drawn.
pub const ACTIVE_TRACE_COLOR: Rgb = Rgb::new(0xff, 0xc4, 0x00);

/// Dotted background, in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLayer {
    /// Distance between neighbouring dots in screen pixels.
    pub spacing: f64,
    /// Screen x of the first dot column.
    pub offset_x: f64,
    /// Screen y of the first dot row.
    pub offset_y: f64,
    pub dot_radius: f64,
    pub columns: usize,
    pub rows: usize,
}

/// Upper bound on the dot buffer reserved up front.
const MAX_DOT_PREALLOC: usize = 1 << 16;

impl GridLayer {
    /// Lay out dots that cover a `width` × `height` viewport and stay aligned
    /// with world grid lines under the camera.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(camera: &Camera, width: f64, height: f64) -> Self {
        let spacing = GRID_UNIT * camera.zoom;
        let count = |extent: f64, offset: f64| {
            if !extent.is_finite() || extent <= 0.0 || extent < offset {
                0
            } else {
                (((extent - offset) / spacing).floor() as usize).saturating_add(1)
            }
        };
        let offset_x = camera.pan_x.rem_euclid(spacing);
        let offset_y = camera.pan_y.rem_euclid(spacing);
        Self {
            spacing,
            offset_x,
            offset_y,
            dot_radius: GRID_DOT_RADIUS_PX,
            columns: count(width, offset_x),
            rows: count(height, offset_y),
        }
    }

    /// Screen position of every dot, row by row.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn dots(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.columns.saturating_mul(self.rows).min(MAX_DOT_PREALLOC));
        for row in 0..self.rows {
            for col in 0..self.columns {
                out.push(Point::new(
                    self.offset_x + col as f64 * self.spacing,
                    self.offset_y + row as f64 * self.spacing,
                ));
            }
        }
        out
    }
}

/// A trace polyline in world space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TracePath {
    pub id: TraceId,
    pub points: Vec<Point>,
    /// `#rrggbb` stroke color.
    pub color: String,
    pub width: f64,
    pub selected: bool,
    /// `true` for the uncommitted trace of an active draw gesture.
    pub preview: bool,
}

impl TracePath {
    fn committed(trace: &Trace, selection: &Selection) -> Self {
        Self {
            id: trace.id,
            points: trace.points.iter().map(|&p| grid_to_world(p)).collect(),
            color: trace.color.to_hex(),
            width: TRACE_STROKE_WIDTH,
            selected: selection.contains_trace(&trace.id),
            preview: false,
        }
    }

    fn active(trace: &ActiveTrace) -> Self {
        Self {
            id: trace.id(),
            points: trace.points().iter().map(|&p| grid_to_world(p)).collect(),
            color: ACTIVE_TRACE_COLOR.to_hex(),
            width: TRACE_STROKE_WIDTH,
            selected: false,
            preview: true,
        }
    }
}

/// A component image placement in world space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePlacement {
    pub id: ComponentId,
    pub image_ref: String,
    /// Accessible label for the image.
    pub alt: String,
    /// Left edge in world space.
    pub x: f64,
    /// Top edge in world space.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub selected: bool,
}

impl ImagePlacement {
    fn new(component: &Component, selection: &Selection) -> Self {
        Self {
            id: component.id,
            image_ref: component.image_ref.clone(),
            alt: component.display_name.clone(),
            x: component.left(),
            y: component.top(),
            width: component.width,
            height: component.height,
            selected: selection.contains_component(&component.id),
        }
    }
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub camera: Camera,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub grid: GridLayer,
    /// Traces in draw order; the active trace, if any, is last.
    pub traces: Vec<TracePath>,
    /// Components in draw order, drawn above traces.
    pub components: Vec<ImagePlacement>,
    /// Selection rectangle overlay in screen space.
    pub marquee: Option<Rect>,
    /// First click of a pending two-click route, in world space.
    pub anchor_marker: Option<Point>,
    pub context_menu: Option<ContextMenu>,
}

/// Build the scene for the current state.
#[must_use]
pub fn build_scene(
    doc: &DocStore,
    camera: &Camera,
    ui: &UiState,
    input: &InputState,
    viewport_w: f64,
    viewport_h: f64,
) -> Scene {
    let mut traces: Vec<TracePath> = doc
        .traces()
        .iter()
        .map(|t| TracePath::committed(t, &ui.selection))
        .collect();
    if let InputState::Drawing { trace } = input {
        traces.push(TracePath::active(trace));
    }

    Scene {
        camera: *camera,
        viewport_width: viewport_w,
        viewport_height: viewport_h,
        grid: GridLayer::new(camera, viewport_w, viewport_h),
        traces,
        components: doc
            .components()
            .iter()
            .map(|c| ImagePlacement::new(c, &ui.selection))
            .collect(),
        marquee: ui.marquee,
        anchor_marker: ui.smart_anchor.map(|p| grid_to_world(world_to_grid(p))),
        context_menu: ui.context_menu,
    }
}
