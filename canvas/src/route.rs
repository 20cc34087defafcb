//! Trace construction: free-hand point accumulation and orthogonal auto-routing.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use uuid::Uuid;

use crate::camera::GridPoint;
use crate::doc::{Rgb, Trace, TraceId};

/// An in-progress trace being drawn by a free-hand gesture.
///
/// Holds at least one point from the moment it is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTrace {
    id: TraceId,
    points: Vec<GridPoint>,
    color: Rgb,
}

impl ActiveTrace {
    /// Start a trace at `start` with the given stroke color.
    #[must_use]
    pub fn new(start: GridPoint, color: Rgb) -> Self {
        Self { id: Uuid::new_v4(), points: vec![start], color }
    }

    /// Append `cell` unless it is the cell of the last recorded point.
    /// Returns `true` when a point was added.
    pub fn push_cell(&mut self, cell: GridPoint) -> bool {
        if self.points.last() == Some(&cell) {
            return false;
        }
        self.points.push(cell);
        true
    }

    #[must_use]
    pub fn id(&self) -> TraceId {
        self.id
    }

    #[must_use]
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Finish the gesture. Yields a trace only if it spans two or more cells.
    #[must_use]
    pub fn finish(self) -> Option<Trace> {
        if self.points.len() < 2 {
            return None;
        }
        Some(Trace { id: self.id, points: self.points, color: self.color })
    }
}

/// Route an orthogonal path from `from` to `to`.
///
/// The longer axis is travelled first; equal spans go horizontal first.
/// The result is `[from, corner, to]`, or `[from, to]` when both points share
/// a row or column.
#[must_use]
pub fn smart_route(from: GridPoint, to: GridPoint) -> Vec<GridPoint> {
    let dx = to.gx - from.gx;
    let dy = to.gy - from.gy;
    if dx == 0 || dy == 0 {
        return vec![from, to];
    }
    let corner = if dx.abs() >= dy.abs() {
        GridPoint::new(to.gx, from.gy)
    } else {
        GridPoint::new(from.gx, to.gy)
    };
    vec![from, corner, to]
}

/// Build a committed trace along [`smart_route`]. Returns `None` when both
/// ends fall in the same cell.
#[must_use]
pub fn routed_trace(from: GridPoint, to: GridPoint, color: Rgb) -> Option<Trace> {
    if from == to {
        return None;
    }
    Some(Trace { id: Uuid::new_v4(), points: smart_route(from, to), color })
}
