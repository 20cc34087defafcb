//! Interaction engine for a grid-snapped wiring canvas.
//!
//! The crate owns everything between raw host input and a drawable frame:
//! translating pointer, wheel, keyboard and drop events into document edits,
//! maintaining camera state for pan/zoom, hit-testing, undo history, and
//! laying out the [`render::Scene`] the host draws. The host is responsible
//! only for wiring its events to [`engine::Engine`] and drawing the scene.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Engine`] and the tool state machine |
//! | [`doc`] | Document store: traces, components and the color palette |
//! | [`camera`] | Pan/zoom camera, grid snapping and coordinate conversions |
//! | [`route`] | Free-hand trace accumulation and two-click L routing |
//! | [`part`] | Decoding part payloads dropped onto the canvas |
//! | [`selection`] | Rectangle selection and the selection set |
//! | [`hit`] | Hit-testing components, resize handles and traces |
//! | [`history`] | Bounded undo/redo snapshot history |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`render`] | Scene layout: grid, traces, images and overlays |
//! | [`config`] | Editor settings with environment overrides |
//! | [`consts`] | Shared numeric constants (grid unit, zoom limits, sizes) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod history;
pub mod hit;
pub mod input;
pub mod part;
pub mod render;
pub mod route;
pub mod selection;
