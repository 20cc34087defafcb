//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! This module defines the types consumed by the input engine. `Tool` and
//! `Modifiers` capture the user's intent at the time of a pointer event.
//! `InputState` is the single active gesture tracked between pointer-down and
//! pointer-up; being one enum, two gestures can never be live at once.
//! `UiState` is the transient, non-document state the renderer shows.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::ComponentId;
use crate::hit::{Corner, MenuTarget};
use crate::route::ActiveTrace;
use crate::selection::{Rect, Selection};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Drag the canvas.
    Pan,
    /// Move and resize components (default).
    #[default]
    Pointer,
    /// Rubber-band selection.
    Select,
    /// Free-hand trace that snaps to grid cells.
    Draw,
    /// Two-click orthogonal trace.
    SmartDraw,
}

impl Tool {
    /// Map a single-key shortcut (`p`, `v`, `s`, `d`, `w`) to its tool.
    #[must_use]
    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key {
            "p" | "P" => Some(Self::Pan),
            "v" | "V" => Some(Self::Pointer),
            "s" | "S" => Some(Self::Select),
            "d" | "D" => Some(Self::Draw),
            "w" | "W" => Some(Self::SmartDraw),
            _ => None,
        }
    }

    /// Cursor shown while the tool is idle.
    #[must_use]
    pub fn idle_cursor(self) -> &'static str {
        match self {
            Self::Pan => "grab",
            Self::Pointer => "default",
            Self::Select | Self::Draw | Self::SmartDraw => "crosshair",
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether any modifier is held.
    #[must_use]
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The space bar, reported as `" "` or `"Space"` depending on the host.
    #[must_use]
    pub fn is_space(&self) -> bool {
        matches!(self.0.as_str(), " " | "Space" | "Spacebar")
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Entry chosen from the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuAction {
    /// Remove the targeted trace or component.
    Delete,
    /// Enlarge the targeted component by one step.
    Grow,
    /// Shrink the targeted component by one step.
    Shrink,
}

/// An open context menu.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextMenu {
    /// Where the menu is anchored, in screen space.
    pub at: Point,
    pub target: MenuTarget,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Tool to restore when the space bar is released, while space-panning.
    pub space_restore: Option<Tool>,
    /// Currently selected traces and components.
    pub selection: Selection,
    /// Live selection rectangle in screen space, while selecting.
    pub marquee: Option<Rect>,
    /// First click of a two-click route, in world space.
    pub smart_anchor: Option<Point>,
    /// Open context menu, if any.
    pub context_menu: Option<ContextMenu>,
}

/// The gesture in progress between pointer-down and pointer-up.
///
/// Each active variant carries the context needed to apply incremental
/// updates and to commit or revert on release.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The canvas is being dragged.
    Panning {
        /// Screen position of the pointer at pointer-down.
        anchor_screen: Point,
        /// Camera pan at pointer-down.
        anchor_pan: Point,
    },
    /// A free-hand trace is being drawn.
    Drawing {
        trace: ActiveTrace,
    },
    /// A selection rectangle is being dragged out.
    Selecting {
        /// Screen-space corner where the drag started.
        anchor_screen: Point,
    },
    /// A component is being resized by one of its corner handles.
    Resizing {
        id: ComponentId,
        corner: Corner,
        /// Side length at the start of the gesture, restored on cancel.
        orig_size: f64,
    },
    /// A component is being moved.
    Dragging {
        id: ComponentId,
        /// Component center minus pointer position at pointer-down, in world space.
        grab_offset: Point,
        /// Center x at the start of the drag, restored on cancel.
        orig_x: f64,
        /// Center y at the start of the drag, restored on cancel.
        orig_y: f64,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Cursor shown while this gesture is active, or `None` when idle.
    #[must_use]
    pub fn cursor(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Panning { .. } | Self::Dragging { .. } => Some("grabbing"),
            Self::Drawing { .. } | Self::Selecting { .. } => Some("crosshair"),
            Self::Resizing { .. } => Some("nwse-resize"),
        }
    }
}
