#![allow(clippy::float_cmp)]

use std::io::Cursor;

use super::*;

fn run(script: &str) -> (Engine, ReplayStats) {
    let mut engine = Engine::new();
    let stats = replay(Cursor::new(script), &mut engine).unwrap();
    (engine, stats)
}

// =============================================================
// parse_line
// =============================================================

#[test]
fn parse_pointer_down_with_defaults() {
    let event = parse_line(r#"{"type":"pointer_down","x":10,"y":20}"#, 1).unwrap();
    assert_eq!(
        event,
        Some(ScriptEvent::PointerDown { x: 10.0, y: 20.0, button: Button::Primary, modifiers: Modifiers::default() })
    );
}

#[test]
fn parse_modifiers_and_button() {
    let event = parse_line(
        r#"{"type":"pointer_up","x":0,"y":0,"button":"secondary","modifiers":{"shift":true}}"#,
        1,
    )
    .unwrap();
    let Some(ScriptEvent::PointerUp { button, modifiers, .. }) = event else {
        panic!("expected pointer_up, got {event:?}");
    };
    assert_eq!(button, Button::Secondary);
    assert!(modifiers.shift);
}

#[test]
fn parse_unit_events() {
    assert_eq!(parse_line(r#"{"type":"undo"}"#, 1).unwrap(), Some(ScriptEvent::Undo));
    assert_eq!(parse_line(r#"{"type":"select_all"}"#, 1).unwrap(), Some(ScriptEvent::SelectAll));
}

#[test]
fn parse_skips_blank_and_comment_lines() {
    assert_eq!(parse_line("", 1).unwrap(), None);
    assert_eq!(parse_line("   ", 2).unwrap(), None);
    assert_eq!(parse_line("# draw a wire", 3).unwrap(), None);
}

#[test]
fn parse_error_reports_line_number() {
    let err = parse_line(r#"{"type":"teleport"}"#, 7).unwrap_err();
    assert!(matches!(err, ReplayError::Event { line: 7, .. }));
    assert!(err.to_string().starts_with("line 7:"));
}

// =============================================================
// replay
// =============================================================

#[test]
fn replay_draws_a_trace() {
    let (engine, stats) = run(
        r#"
        {"type":"tool","tool":"draw"}
        {"type":"pointer_down","x":0,"y":0}
        {"type":"pointer_move","x":40,"y":0}
        {"type":"pointer_move","x":40,"y":40}
        {"type":"pointer_up","x":40,"y":40}
        "#,
    );
    assert_eq!(stats.events, 5);
    assert!(stats.actions > 0);
    assert_eq!(engine.doc.traces().len(), 1);
    assert_eq!(engine.doc.traces()[0].points.len(), 3);
}

#[test]
fn replay_color_applies_to_new_traces() {
    let (engine, _) = run(
        r#"
        {"type":"color","color":"red"}
        {"type":"tool","tool":"smart_draw"}
        {"type":"pointer_down","x":0,"y":0}
        {"type":"pointer_down","x":100,"y":40}
        "#,
    );
    let trace = &engine.doc.traces()[0];
    assert_eq!(trace.color, TraceColor::Red.rgb());
    assert_eq!(trace.points.len(), 3);
}

#[test]
fn replay_drop_accepts_inline_object_and_string() {
    let (engine, _) = run(
        r#"
        {"type":"drop","x":0,"y":0,"payload":{"id":"esp8266","name":"ESP8266","imageUrl":"/parts/esp8266.png"}}
        {"type":"drop","x":3000,"y":0,"payload":"/parts/led.png"}
        "#,
    );
    let components = engine.doc.components();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].part_type, "esp8266");
    assert_eq!(components[0].image_ref, "/parts/esp8266.png");
    assert_eq!(components[1].image_ref, "/parts/led.png");
}

#[test]
fn replay_undo_and_redo() {
    let (engine, _) = run(
        r#"
        {"type":"drop","x":0,"y":0,"payload":"/parts/led.png"}
        {"type":"drop","x":3000,"y":0,"payload":"/parts/led.png"}
        {"type":"undo"}
        {"type":"undo"}
        {"type":"redo"}
        "#,
    );
    assert_eq!(engine.doc.components().len(), 1);
}

#[test]
fn replay_keyboard_select_all_and_delete() {
    let (engine, _) = run(
        r#"
        {"type":"drop","x":0,"y":0,"payload":"/parts/led.png"}
        {"type":"key_down","key":"a","modifiers":{"ctrl":true}}
        {"type":"key_down","key":"Delete"}
        "#,
    );
    assert!(engine.doc.is_empty());
}

#[test]
fn replay_menu_action() {
    let (engine, _) = run(
        r#"
        {"type":"drop","x":0,"y":0,"payload":"/parts/led.png"}
        {"type":"pointer_down","x":0,"y":0,"button":"secondary"}
        {"type":"menu","action":"shrink"}
        "#,
    );
    assert_eq!(engine.doc.components()[0].width, 1070.0);
}

#[test]
fn replay_viewport_and_wheel() {
    let (engine, _) = run(
        r#"
        {"type":"viewport","width":400,"height":300}
        {"type":"wheel","dy":-250}
        "#,
    );
    assert_eq!(engine.viewport_width, 400.0);
    assert!((engine.camera.zoom - 1.5).abs() < 1e-9);
}

#[test]
fn replay_stops_at_first_bad_line() {
    let mut engine = Engine::new();
    let script = "{\"type\":\"tool\",\"tool\":\"pan\"}\nnot json\n{\"type\":\"undo\"}\n";
    let err = replay(Cursor::new(script), &mut engine).unwrap_err();
    assert!(matches!(err, ReplayError::Event { line: 2, .. }));
    assert_eq!(engine.tool(), Tool::Pan);
}

#[test]
fn scene_of_replayed_engine_serializes() {
    let (engine, _) = run(r#"{"type":"drop","x":0,"y":0,"payload":"/parts/led.png"}"#);
    let json = serde_json::to_value(engine.scene()).unwrap();
    assert_eq!(json["components"][0]["image_ref"], "/parts/led.png");
}
