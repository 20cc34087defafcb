#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Point, grid_to_world};
use crate::consts::{HANDLE_RADIUS_PX, TRACE_HIT_TOLERANCE};
use crate::doc::{Component, ComponentId, DocStore, TraceId};

/// Which part of a component was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(Corner),
}

/// Corner handle of a component's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Ne,
    Se,
    Sw,
    Nw,
}

impl Corner {
    const ALL: [Corner; 4] = [Self::Ne, Self::Se, Self::Sw, Self::Nw];

    /// World position of this corner on `component`.
    #[must_use]
    pub fn position(self, component: &Component) -> Point {
        match self {
            Self::Ne => Point::new(component.right(), component.top()),
            Self::Se => Point::new(component.right(), component.bottom()),
            Self::Sw => Point::new(component.left(), component.bottom()),
            Self::Nw => Point::new(component.left(), component.top()),
        }
    }
}

/// Result of a component hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub component_id: ComponentId,
    pub part: HitPart,
}

/// What a context-menu click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum MenuTarget {
    Trace(TraceId),
    Component(ComponentId),
}

/// Test which component (if any) is under `world_pt`.
///
/// Resize handles of `selected` are checked first, with a radius that stays
/// constant on screen. Bodies are checked topmost first.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &DocStore, camera: &Camera, selected: Option<ComponentId>) -> Option<Hit> {
    if let Some(component) = selected.and_then(|id| doc.component(&id)) {
        let radius = camera.screen_dist_to_world(HANDLE_RADIUS_PX);
        for corner in Corner::ALL {
            if corner.position(component).distance(world_pt) <= radius {
                return Some(Hit { component_id: component.id, part: HitPart::ResizeHandle(corner) });
            }
        }
    }

    doc.components()
        .iter()
        .rev()
        .find(|c| c.contains(world_pt))
        .map(|c| Hit { component_id: c.id, part: HitPart::Body })
}

/// The most recently drawn trace with a vertex within `tolerance` of `world_pt`.
#[must_use]
pub fn trace_at(world_pt: Point, doc: &DocStore, tolerance: f64) -> Option<TraceId> {
    doc.traces()
        .iter()
        .rev()
        .find(|t| t.points.iter().any(|&p| grid_to_world(p).distance(world_pt) <= tolerance))
        .map(|t| t.id)
}

/// Resolve the target of a context-menu click. Traces win over components.
#[must_use]
pub fn menu_target(world_pt: Point, doc: &DocStore, camera: &Camera) -> Option<MenuTarget> {
    if let Some(id) = trace_at(world_pt, doc, TRACE_HIT_TOLERANCE) {
        return Some(MenuTarget::Trace(id));
    }
    hit_test(world_pt, doc, camera, None).map(|hit| MenuTarget::Component(hit.component_id))
}
