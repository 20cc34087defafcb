//! Replay scripts: newline-delimited JSON input events fed into an [`Engine`].
//!
//! Each non-blank line is one event object tagged by `type`, for example
//! `{"type":"pointer_down","x":10,"y":20}` or `{"type":"tool","tool":"draw"}`.
//! Lines starting with `#` are comments.

use std::io::BufRead;

use canvas::camera::Point;
use canvas::config::ConfigError;
use canvas::doc::TraceColor;
use canvas::engine::{Action, Engine};
use canvas::input::{Button, Key, MenuAction, Modifiers, Tool, WheelDelta};
use serde::Deserialize;
use serde_json::Value;

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid event: {source}")]
    Event {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to encode output: {0}")]
    Output(#[source] serde_json::Error),
}

/// One scripted host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Wheel {
        #[serde(default)]
        dx: f64,
        dy: f64,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyUp {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// A part dropped at a screen point. `payload` is either the raw
    /// transfer string or an inline part object.
    Drop {
        x: f64,
        y: f64,
        payload: Value,
    },
    Tool {
        tool: Tool,
    },
    Color {
        color: TraceColor,
    },
    Viewport {
        width: f64,
        height: f64,
    },
    Menu {
        action: MenuAction,
    },
    Undo,
    Redo,
    SelectAll,
    DeleteSelection,
}

impl ScriptEvent {
    /// Dispatch this event into `engine`.
    pub fn apply(self, engine: &mut Engine) -> Vec<Action> {
        match self {
            Self::PointerDown { x, y, button, modifiers } => engine.on_pointer_down(Point::new(x, y), button, modifiers),
            Self::PointerMove { x, y, modifiers } => engine.on_pointer_move(Point::new(x, y), modifiers),
            Self::PointerUp { x, y, button, modifiers } => engine.on_pointer_up(Point::new(x, y), button, modifiers),
            Self::Wheel { dx, dy } => engine.on_wheel(WheelDelta { dx, dy }),
            Self::KeyDown { key, modifiers } => engine.on_key_down(Key::new(key), modifiers),
            Self::KeyUp { key, modifiers } => engine.on_key_up(Key::new(key), modifiers),
            Self::Drop { x, y, payload } => {
                let raw = match payload {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                engine.on_drop(Point::new(x, y), &raw)
            }
            Self::Tool { tool } => engine.set_tool(tool),
            Self::Color { color } => {
                engine.set_trace_color(color);
                Vec::new()
            }
            Self::Viewport { width, height } => {
                engine.set_viewport(width, height);
                vec![Action::RenderNeeded]
            }
            Self::Menu { action } => engine.on_menu_action(action),
            Self::Undo => engine.undo(),
            Self::Redo => engine.redo(),
            Self::SelectAll => engine.select_all(),
            Self::DeleteSelection => engine.delete_selection(),
        }
    }
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns [`ReplayError::Event`] when the line is not a valid event.
pub fn parse_line(line: &str, number: usize) -> Result<Option<ScriptEvent>, ReplayError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| ReplayError::Event { line: number, source })
}

/// Counts from a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    pub actions: usize,
}

/// Apply every event in `reader` to `engine`, stopping at the first bad line.
///
/// # Errors
///
/// Returns an error if reading fails or a line does not parse.
pub fn replay<R: BufRead>(reader: R, engine: &mut Engine) -> Result<ReplayStats, ReplayError> {
    let mut stats = ReplayStats::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let number = idx + 1;
        let Some(event) = parse_line(&line, number)? else {
            continue;
        };
        tracing::debug!(line = number, ?event, "replaying event");
        let actions = event.apply(engine);
        stats.events += 1;
        stats.actions += actions.len();
    }
    Ok(stats)
}
