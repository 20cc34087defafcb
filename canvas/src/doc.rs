//! Document model: traces, placed components, and the in-memory store.
//!
//! Trace geometry is kept in grid space so panning and zooming never distort
//! it. Components keep their center in world space. `DocStore` owns both
//! collections in insertion order, which is also the draw order.
//!
//! `DocStore` is a plain owned value. Cloning it produces a fully independent
//! copy, which is what the history log stores.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{GridPoint, Point};
use crate::consts::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};

/// Unique identifier for a trace.
pub type TraceId = Uuid;

/// Unique identifier for a placed component.
pub type ComponentId = Uuid;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a lowercase `#rrggbb` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fixed stroke palette offered by the host's color picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceColor {
    Red,
    Green,
    #[default]
    Black,
    Blue,
}

impl TraceColor {
    /// All palette entries in picker order.
    pub const ALL: [TraceColor; 4] = [Self::Red, Self::Green, Self::Black, Self::Blue];

    #[must_use]
    pub fn rgb(self) -> Rgb {
        match self {
            Self::Red => Rgb::new(0xe5, 0x39, 0x35),
            Self::Green => Rgb::new(0x00, 0xc8, 0x53),
            Self::Black => Rgb::new(0x00, 0x00, 0x00),
            Self::Blue => Rgb::new(0x29, 0x62, 0xff),
        }
    }

    /// Palette name as used by the host (`"red"`, `"green"`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Black => "black",
            Self::Blue => "blue",
        }
    }

    /// Look up a palette entry by name, ignoring ASCII case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

/// A committed wire trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub id: TraceId,
    /// Vertices in grid space. Always at least two for a committed trace.
    pub points: Vec<GridPoint>,
    pub color: Rgb,
}

/// A part placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    /// Catalog identifier of the part (e.g. `"esp8266"`).
    pub part_type: String,
    /// Human-readable label.
    pub display_name: String,
    /// Image handle the renderer resolves (URL or asset path).
    pub image_ref: String,
    /// Center x in world coordinates.
    pub x: f64,
    /// Center y in world coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Component {
    /// Build a component centered at `center` with the default size.
    #[must_use]
    pub fn new(part_type: String, display_name: String, image_ref: String, center: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            part_type,
            display_name,
            image_ref,
            x: center.x,
            y: center.y,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
        }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Whether a world point lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, world: Point) -> bool {
        world.x >= self.left() && world.x <= self.right() && world.y >= self.top() && world.y <= self.bottom()
    }

    /// Set both sides to `size`, clamped to the allowed range. The center is unchanged.
    pub fn set_size(&mut self, size: f64) {
        let size = clamp_size(size);
        self.width = size;
        self.height = size;
    }
}

/// Clamp a component side length to [`MIN_SIZE`]..=[`MAX_SIZE`]. NaN maps to [`MIN_SIZE`].
#[must_use]
pub fn clamp_size(size: f64) -> f64 {
    if size.is_nan() { MIN_SIZE } else { size.clamp(MIN_SIZE, MAX_SIZE) }
}

/// In-memory store of traces and components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocStore {
    traces: Vec<Trace>,
    components: Vec<Component>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Traces ---

    /// Append a trace. Traces with fewer than two points are rejected and `false` is returned.
    pub fn add_trace(&mut self, trace: Trace) -> bool {
        if trace.points.len() < 2 {
            return false;
        }
        self.traces.push(trace);
        true
    }

    /// Remove a trace by id, returning it if it was present.
    pub fn remove_trace(&mut self, id: &TraceId) -> Option<Trace> {
        let idx = self.traces.iter().position(|t| t.id == *id)?;
        Some(self.traces.remove(idx))
    }

    #[must_use]
    pub fn trace(&self, id: &TraceId) -> Option<&Trace> {
        self.traces.iter().find(|t| t.id == *id)
    }

    /// All traces in draw order.
    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    // --- Components ---

    /// Append a component. Its size is clamped on the way in.
    pub fn add_component(&mut self, mut component: Component) {
        component.width = clamp_size(component.width);
        component.height = clamp_size(component.height);
        self.components.push(component);
    }

    /// Remove a component by id, returning it if it was present.
    pub fn remove_component(&mut self, id: &ComponentId) -> Option<Component> {
        let idx = self.components.iter().position(|c| c.id == *id)?;
        Some(self.components.remove(idx))
    }

    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == *id)
    }

    pub fn component_mut(&mut self, id: &ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == *id)
    }

    /// All components in draw order (last is topmost).
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    // --- Whole document ---

    /// Total number of traces and components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.traces.len() + self.components.len()
    }

    /// Returns `true` if the store holds no traces and no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty() && self.components.is_empty()
    }
}
