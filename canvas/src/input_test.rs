use uuid::Uuid;

use super::*;
use crate::camera::GridPoint;
use crate::doc::TraceColor;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_pointer() {
    assert_eq!(Tool::default(), Tool::Pointer);
}

#[test]
fn tool_shortcuts() {
    assert_eq!(Tool::from_shortcut("p"), Some(Tool::Pan));
    assert_eq!(Tool::from_shortcut("v"), Some(Tool::Pointer));
    assert_eq!(Tool::from_shortcut("s"), Some(Tool::Select));
    assert_eq!(Tool::from_shortcut("d"), Some(Tool::Draw));
    assert_eq!(Tool::from_shortcut("W"), Some(Tool::SmartDraw));
    assert_eq!(Tool::from_shortcut("x"), None);
    assert_eq!(Tool::from_shortcut("Delete"), None);
}

#[test]
fn tool_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&Tool::SmartDraw).unwrap(), "\"smart_draw\"");
    let tool: Tool = serde_json::from_str("\"pan\"").unwrap();
    assert_eq!(tool, Tool::Pan);
}

#[test]
fn tool_idle_cursor() {
    assert_eq!(Tool::Pan.idle_cursor(), "grab");
    assert_eq!(Tool::Pointer.idle_cursor(), "default");
    assert_eq!(Tool::Draw.idle_cursor(), "crosshair");
}

// =============================================================
// Modifiers / Key / Button
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.any());
    assert!(!m.command());
}

#[test]
fn modifiers_command_is_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Default::default() }.command());
    assert!(Modifiers { meta: true, ..Default::default() }.command());
    assert!(!Modifiers { shift: true, ..Default::default() }.command());
}

#[test]
fn modifiers_deserialize_with_missing_fields() {
    let m: Modifiers = serde_json::from_str(r#"{"shift":true}"#).unwrap();
    assert!(m.shift);
    assert!(!m.ctrl);
}

#[test]
fn key_space_aliases() {
    assert!(Key::new(" ").is_space());
    assert!(Key::new("Space").is_space());
    assert!(!Key::new("s").is_space());
}

#[test]
fn button_default_is_primary() {
    assert_eq!(Button::default(), Button::Primary);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert!(state.is_idle());
    assert_eq!(state.cursor(), None);
}

#[test]
fn input_state_cursors() {
    let drawing = InputState::Drawing { trace: ActiveTrace::new(GridPoint::new(0, 0), TraceColor::Black.rgb()) };
    assert_eq!(drawing.cursor(), Some("crosshair"));

    let dragging = InputState::Dragging {
        id: Uuid::new_v4(),
        grab_offset: Point::new(0.0, 0.0),
        orig_x: 0.0,
        orig_y: 0.0,
    };
    assert_eq!(dragging.cursor(), Some("grabbing"));

    let resizing = InputState::Resizing { id: Uuid::new_v4(), corner: Corner::Se, orig_size: 400.0 };
    assert_eq!(resizing.cursor(), Some("nwse-resize"));
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Pointer);
    assert!(ui.selection.is_empty());
    assert!(ui.marquee.is_none());
    assert!(ui.smart_anchor.is_none());
    assert!(ui.context_menu.is_none());
    assert!(ui.space_restore.is_none());
}
