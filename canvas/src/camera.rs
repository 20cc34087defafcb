//! Viewport camera and the screen ↔ world ↔ grid coordinate mapping.
//!
//! Screen space is raw pointer coordinates relative to the drawing surface.
//! World space is where document geometry lives; it does not move when the
//! user pans or zooms. Grid space is the integer lattice of [`GRID_UNIT`]
//! sized cells that trace points are stored in.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_UNIT, MAX_SCALE, MIN_SCALE};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An integer lattice coordinate; one unit is one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub gx: i64,
    pub gy: i64,
}

impl GridPoint {
    #[must_use]
    pub fn new(gx: i64, gy: i64) -> Self {
        Self { gx, gy }
    }
}

/// Convert a world-space point to the nearest grid point.
///
/// Rounds half away from zero on both axes.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn world_to_grid(world: Point) -> GridPoint {
    GridPoint {
        gx: (world.x / GRID_UNIT).round() as i64,
        gy: (world.y / GRID_UNIT).round() as i64,
    }
}

/// Convert a grid point to its world-space position.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_to_world(grid: GridPoint) -> Point {
    Point {
        x: grid.gx as f64 * GRID_UNIT,
        y: grid.gy as f64 * GRID_UNIT,
    }
}

/// Round a single world coordinate to the nearest multiple of the grid unit.
///
/// Uses the same rounding as [`world_to_grid`].
#[must_use]
pub fn snap_world(value: f64) -> f64 {
    (value / GRID_UNIT).round() * GRID_UNIT
}

/// Snap both axes of a world-space point.
#[must_use]
pub fn snap_point(world: Point) -> Point {
    Point { x: snap_world(world.x), y: snap_world(world.y) }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `pan_x` / `pan_y` are the screen-pixel offset of the world origin.
/// `zoom` is a scale factor (1.0 = no zoom), always within
/// [`MIN_SCALE`]..=[`MAX_SCALE`] when changed through [`Camera::zoom_by`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space point straight to the grid cell under it.
    #[must_use]
    pub fn screen_to_grid(&self, screen: Point) -> GridPoint {
        world_to_grid(self.screen_to_world(screen))
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Add `delta` to the zoom scale, clamping the result. Returns the new scale.
    pub fn zoom_by(&mut self, delta: f64) -> f64 {
        let next = self.zoom + delta;
        self.zoom = if next.is_nan() { self.zoom } else { next.clamp(MIN_SCALE, MAX_SCALE) };
        self.zoom
    }
}
