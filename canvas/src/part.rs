//! Decoding of part descriptors delivered by an external drag-and-drop.
//!
//! The catalog sends a JSON object such as
//! `{"id":"esp8266","name":"ESP8266","image":"/assets/esp8266.png"}`. Anything
//! that is not a JSON object is treated as a bare image reference, so a drop
//! never fails outright.

#[cfg(test)]
#[path = "part_test.rs"]
mod part_test;

use serde_json::{Map, Value};

/// Part type used when the payload carries neither an id nor a name.
pub const FALLBACK_PART_TYPE: &str = "part";

/// Display name used when the payload carries neither a name nor a type.
pub const FALLBACK_DISPLAY_NAME: &str = "Part";

/// Error returned by [`parse_structured`].
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The payload is empty or whitespace only.
    #[error("drop payload is empty")]
    Empty,
    /// The payload is not valid JSON.
    #[error("drop payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The payload is JSON but not an object.
    #[error("drop payload is not a JSON object")]
    NotAnObject,
}

/// A part ready to be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartDescriptor {
    pub part_type: String,
    pub display_name: String,
    pub image_ref: String,
}

/// Keys that may carry the image reference, in priority order.
const IMAGE_KEYS: [&str; 4] = ["image", "imageUrl", "img", "imageSrc"];

/// Read `key` as a non-blank string. Numbers and booleans are stringified.
fn field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl PartDescriptor {
    fn from_fields(map: &Map<String, Value>) -> Self {
        let name = field(map, "name");

        let image_ref = IMAGE_KEYS.iter().find_map(|key| field(map, key)).unwrap_or_default();
        let part_type = field(map, "id")
            .or_else(|| name.clone())
            .unwrap_or_else(|| FALLBACK_PART_TYPE.to_owned());
        let display_name = name
            .or_else(|| field(map, "type"))
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_owned());

        Self { part_type, display_name, image_ref }
    }
}

/// Parse a structured catalog payload.
///
/// # Errors
///
/// Returns [`PayloadError`] when the payload is empty, not JSON, or not a JSON object.
pub fn parse_structured(raw: &str) -> Result<PartDescriptor, PayloadError> {
    if raw.trim().is_empty() {
        return Err(PayloadError::Empty);
    }
    let Value::Object(map) = serde_json::from_str::<Value>(raw)? else {
        return Err(PayloadError::NotAnObject);
    };
    Ok(PartDescriptor::from_fields(&map))
}

/// Decode a drop payload, falling back to a generic part whose image is the
/// raw payload. Returns `None` only for an empty payload.
#[must_use]
pub fn decode_drop_payload(raw: &str) -> Option<PartDescriptor> {
    match parse_structured(raw) {
        Ok(part) => Some(part),
        Err(PayloadError::Empty) => None,
        Err(e) => {
            tracing::warn!(error = %e, "unstructured drop payload; using it as an image reference");
            Some(PartDescriptor {
                part_type: FALLBACK_PART_TYPE.to_owned(),
                display_name: FALLBACK_DISPLAY_NAME.to_owned(),
                image_ref: raw.to_owned(),
            })
        }
    }
}
