//! Rectangle selection and the selection set.
//!
//! Selection is evaluated in world space. A trace is a member when any of its
//! vertices lies inside the rectangle; segments crossing the rectangle
//! without a vertex inside do not count. A component is a member when its
//! bounding box overlaps the rectangle, touching edges included.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point, grid_to_world};
use crate::doc::{Component, ComponentId, DocStore, Trace, TraceId};

/// An axis-aligned rectangle with non-negative width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Normalize two opposite corners, in any drag direction.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Point containment with inclusive bounds.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// AABB overlap where shared edges count as overlapping.
    #[must_use]
    pub fn overlaps(&self, left: f64, top: f64, right: f64, bottom: f64) -> bool {
        !(right < self.left() || left > self.right() || bottom < self.top() || top > self.bottom())
    }
}

/// Screen-space selection box converted to a world-space rectangle.
///
/// Only the two corners are transformed.
#[must_use]
pub fn screen_rect_to_world(camera: &Camera, a: Point, b: Point) -> Rect {
    Rect::from_corners(camera.screen_to_world(a), camera.screen_to_world(b))
}

/// Whether any vertex of `trace` lies inside `rect` (world space).
#[must_use]
pub fn trace_in_rect(trace: &Trace, rect: &Rect) -> bool {
    trace.points.iter().any(|&p| rect.contains(grid_to_world(p)))
}

/// Whether the bounding box of `component` overlaps `rect` (world space).
#[must_use]
pub fn component_in_rect(component: &Component, rect: &Rect) -> bool {
    rect.overlaps(component.left(), component.top(), component.right(), component.bottom())
}

/// The current selection: sets of trace ids and component ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub traces: HashSet<TraceId>,
    pub components: HashSet<ComponentId>,
}

impl Selection {
    /// Compute the selection for `rect` against every item in `doc`.
    #[must_use]
    pub fn in_rect(doc: &DocStore, rect: &Rect) -> Self {
        Self {
            traces: doc.traces().iter().filter(|t| trace_in_rect(t, rect)).map(|t| t.id).collect(),
            components: doc
                .components()
                .iter()
                .filter(|c| component_in_rect(c, rect))
                .map(|c| c.id)
                .collect(),
        }
    }

    /// Select every trace and component in `doc`.
    #[must_use]
    pub fn all(doc: &DocStore) -> Self {
        Self {
            traces: doc.traces().iter().map(|t| t.id).collect(),
            components: doc.components().iter().map(|c| c.id).collect(),
        }
    }

    /// Select exactly one component.
    #[must_use]
    pub fn single_component(id: ComponentId) -> Self {
        Self { traces: HashSet::new(), components: HashSet::from([id]) }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty() && self.components.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.traces.len() + self.components.len()
    }

    pub fn clear(&mut self) {
        self.traces.clear();
        self.components.clear();
    }

    #[must_use]
    pub fn contains_trace(&self, id: &TraceId) -> bool {
        self.traces.contains(id)
    }

    #[must_use]
    pub fn contains_component(&self, id: &ComponentId) -> bool {
        self.components.contains(id)
    }

    /// The component id when the selection is exactly one component and no traces.
    #[must_use]
    pub fn sole_component(&self) -> Option<ComponentId> {
        if self.traces.is_empty() && self.components.len() == 1 {
            self.components.iter().next().copied()
        } else {
            None
        }
    }
}
