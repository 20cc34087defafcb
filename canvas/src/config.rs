//! Editor configuration with defaults and environment overrides.

use crate::consts::{HISTORY_CAPACITY, WHEEL_ZOOM_DIVISOR};
use crate::doc::TraceColor;

/// Error returned by [`EditorConfig::from_env`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown trace color '{0}' (expected red, green, black or blue)")]
    UnknownColor(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Stroke color applied to new traces until the host picks another.
    pub trace_color: TraceColor,
    /// Snapshots kept by the undo history.
    pub history_capacity: usize,
    /// Wheel pixels per 1.0 of zoom change.
    pub wheel_divisor: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            trace_color: TraceColor::default(),
            history_capacity: HISTORY_CAPACITY,
            wheel_divisor: WHEEL_ZOOM_DIVISOR,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `WIREFRAME_TRACE_COLOR`: `red`, `green`, `black` (default) or `blue`
    /// - `WIREFRAME_HISTORY_CAPACITY`: default 50, at least 1
    /// - `WIREFRAME_WHEEL_DIVISOR`: default 500, must be positive
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownColor`] for a color outside the palette.
    pub fn from_env() -> Result<Self, ConfigError> {
        let trace_color = match std::env::var("WIREFRAME_TRACE_COLOR") {
            Ok(raw) => TraceColor::from_name(&raw).ok_or(ConfigError::UnknownColor(raw))?,
            Err(_) => TraceColor::default(),
        };
        let history_capacity = env_parse::<usize>("WIREFRAME_HISTORY_CAPACITY")
            .unwrap_or(HISTORY_CAPACITY)
            .max(1);
        let wheel_divisor = env_parse::<f64>("WIREFRAME_WHEEL_DIVISOR")
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(WHEEL_ZOOM_DIVISOR);

        Ok(Self { trace_color, history_capacity, wheel_divisor })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    match std::env::var(key).map(|v| v.trim().parse::<T>()) {
        Ok(Ok(value)) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
