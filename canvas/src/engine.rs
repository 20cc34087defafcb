use crate::camera::{Camera, Point, snap_point, snap_world, world_to_grid};
use crate::config::EditorConfig;
use crate::consts::RESIZE_STEP;
use crate::doc::{Component, ComponentId, DocStore, Rgb, Trace, TraceColor, TraceId};
use crate::hit::{HitPart, MenuTarget, hit_test, menu_target};
use crate::history::History;
use crate::input::{Button, ContextMenu, InputState, Key, MenuAction, Modifiers, Tool, UiState, WheelDelta};
use crate::part::decode_drop_payload;
use crate::render::{Scene, build_scene};
use crate::route::{ActiveTrace, routed_trace};
use crate::selection::{Rect, Selection, screen_rect_to_world};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TraceCommitted(TraceId),
    TraceDeleted(TraceId),
    ComponentPlaced(ComponentId),
    ComponentMoved(ComponentId),
    ComponentResized { id: ComponentId, size: f64 },
    ComponentDeleted(ComponentId),
    SelectionChanged,
    ContextMenuChanged,
    /// A snapshot of the post-event document was appended to the history.
    HistorySaved { len: usize, cursor: usize },
    /// Undo or redo replaced the live document.
    DocumentRestored,
    SetCursor(String),
    RenderNeeded,
}

/// The canvas interaction engine.
///
/// Owns the document, the camera, transient UI state and the gesture in
/// progress. Every mutation goes through one of the `on_*` handlers or the
/// explicit commands below; each returns the [`Action`]s the host should
/// react to. When a handler changes the document, a history snapshot is
/// taken once the handler's mutations are complete, just before it returns.
pub struct Engine {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    history: History,
    stroke_color: Rgb,
    wheel_divisor: f64,
    snapshot_pending: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with an empty document. The empty document is the
    /// first history entry, so the first edit can be undone.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        let doc = DocStore::new();
        let mut history = History::with_capacity(config.history_capacity);
        history.save(&doc);
        Self {
            doc,
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            history,
            stroke_color: config.trace_color.rgb(),
            wheel_divisor: config.wheel_divisor,
            snapshot_pending: false,
        }
    }

    // --- Host inputs ---

    /// Update viewport dimensions in screen pixels. Non-finite or negative
    /// sizes are ignored.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(width) || !valid(height) {
            tracing::warn!(width, height, "ignoring invalid viewport size");
            return;
        }
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Set the stroke color used for traces created from now on.
    pub fn set_trace_color(&mut self, color: TraceColor) {
        self.stroke_color = color.rgb();
    }

    /// Switch the active tool, dropping any gesture and transient state.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let mut actions = Vec::new();
        self.reset_transient(&mut actions);
        self.ui.space_restore = None;
        self.ui.tool = tool;
        tracing::debug!(?tool, "tool selected");
        actions.push(Action::SetCursor(tool.idle_cursor().to_owned()));
        self.finish(actions)
    }

    // --- Pointer events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.input.is_idle() {
            return actions;
        }
        match button {
            Button::Secondary => self.open_context_menu(screen, &mut actions),
            Button::Middle => {
                self.close_context_menu(&mut actions);
                self.begin_pan(screen, &mut actions);
            }
            Button::Primary => {
                self.close_context_menu(&mut actions);
                self.primary_down(screen, modifiers, &mut actions);
            }
        }
        self.finish(actions)
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        let world = self.camera.screen_to_world(screen);

        // One gesture at a time; listed in resize > select > pan > draw > drag order.
        match &mut self.input {
            InputState::Idle => {}
            InputState::Resizing { id, .. } => {
                if let Some(c) = self.doc.component_mut(id) {
                    let half = (world.x - c.x).abs().max((world.y - c.y).abs());
                    c.set_size(half * 2.0);
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::Selecting { anchor_screen } => {
                let anchor = *anchor_screen;
                self.update_marquee(anchor, screen, &mut actions);
            }
            InputState::Panning { anchor_screen, anchor_pan } => {
                self.camera.pan_x = anchor_pan.x + (screen.x - anchor_screen.x) / self.camera.zoom;
                self.camera.pan_y = anchor_pan.y + (screen.y - anchor_screen.y) / self.camera.zoom;
                actions.push(Action::RenderNeeded);
            }
            InputState::Drawing { trace } => {
                if trace.push_cell(self.camera.screen_to_grid(screen)) {
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::Dragging { id, grab_offset, .. } => {
                if let Some(c) = self.doc.component_mut(id) {
                    c.x = world.x + grab_offset.x;
                    c.y = world.y + grab_offset.y;
                    actions.push(Action::RenderNeeded);
                }
            }
        }
        self.finish(actions)
    }

    pub fn on_pointer_up(&mut self, screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Idle => return actions,
            InputState::Resizing { id, orig_size, .. } => {
                if let Some(c) = self.doc.component(&id) {
                    if c.width != orig_size {
                        tracing::debug!(%id, size = c.width, "component resized");
                        actions.push(Action::ComponentResized { id, size: c.width });
                        self.snapshot_pending = true;
                    }
                }
            }
            InputState::Selecting { anchor_screen } => {
                self.update_marquee(anchor_screen, screen, &mut actions);
                self.ui.marquee = None;
                actions.push(Action::RenderNeeded);
            }
            InputState::Panning { .. } => {}
            InputState::Drawing { trace } => self.finish_draw(trace, &mut actions),
            InputState::Dragging { id, orig_x, orig_y, .. } => {
                if let Some(c) = self.doc.component_mut(&id) {
                    c.x = snap_world(c.x);
                    c.y = snap_world(c.y);
                    if c.x != orig_x || c.y != orig_y {
                        tracing::debug!(%id, x = c.x, y = c.y, "component moved");
                        actions.push(Action::ComponentMoved(id));
                        self.snapshot_pending = true;
                    }
                    actions.push(Action::RenderNeeded);
                }
            }
        }
        actions.push(Action::SetCursor(self.ui.tool.idle_cursor().to_owned()));
        self.finish(actions)
    }

    /// Wheel zoom. Scrolling up zooms in.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        let before = self.camera.zoom;
        let after = self.camera.zoom_by(-delta.dy / self.wheel_divisor);
        if after == before { Vec::new() } else { vec![Action::RenderNeeded] }
    }

    /// Place a part dropped onto the canvas at `screen`.
    pub fn on_drop(&mut self, screen: Point, payload: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        let Some(part) = decode_drop_payload(payload) else {
            tracing::warn!("ignoring drop with empty payload");
            return actions;
        };
        let center = snap_point(self.camera.screen_to_world(screen));
        let component = Component::new(part.part_type, part.display_name, part.image_ref, center);
        let id = component.id;
        tracing::debug!(%id, part = %component.part_type, x = center.x, y = center.y, "component placed");
        self.doc.add_component(component);
        self.snapshot_pending = true;
        actions.push(Action::ComponentPlaced(id));
        actions.push(Action::RenderNeeded);
        self.finish(actions)
    }

    // --- Keyboard events ---

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        let name = key.as_str();

        if key.is_space() {
            if self.ui.space_restore.is_none() {
                self.ui.space_restore = Some(self.ui.tool);
                self.ui.tool = Tool::Pan;
                actions.push(Action::SetCursor(Tool::Pan.idle_cursor().to_owned()));
            }
        } else if name == "Escape" {
            self.reset_transient(&mut actions);
            actions.push(Action::SetCursor(self.ui.tool.idle_cursor().to_owned()));
        } else if matches!(name, "Delete" | "Backspace") {
            self.delete_selection_into(&mut actions);
        } else if modifiers.command() {
            match name.to_ascii_lowercase().as_str() {
                "a" => self.select_all_into(&mut actions),
                "z" if modifiers.shift => self.redo_into(&mut actions),
                "z" => self.undo_into(&mut actions),
                "y" => self.redo_into(&mut actions),
                _ => {}
            }
        } else if modifiers.shift && matches!(name, "+" | "=") {
            if let Some(id) = self.resize_target() {
                self.resize_into(id, RESIZE_STEP, &mut actions);
            }
        } else if modifiers.shift && matches!(name, "-" | "_") {
            if let Some(id) = self.resize_target() {
                self.resize_into(id, -RESIZE_STEP, &mut actions);
            }
        } else if let Some(tool) = Tool::from_shortcut(name) {
            return self.set_tool(tool);
        }
        self.finish(actions)
    }

    pub fn on_key_up(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if key.is_space() {
            if let Some(prev) = self.ui.space_restore.take() {
                if matches!(self.input, InputState::Panning { .. }) {
                    self.input = InputState::Idle;
                }
                self.ui.tool = prev;
                actions.push(Action::SetCursor(prev.idle_cursor().to_owned()));
            }
        }
        actions
    }

    // --- Commands ---

    /// Apply an entry of the open context menu, then close it.
    pub fn on_menu_action(&mut self, action: MenuAction) -> Vec<Action> {
        let mut actions = Vec::new();
        let Some(menu) = self.ui.context_menu.take() else {
            return actions;
        };
        actions.push(Action::ContextMenuChanged);
        match (action, menu.target) {
            (MenuAction::Delete, MenuTarget::Trace(id)) => self.delete_trace_into(id, &mut actions),
            (MenuAction::Delete, MenuTarget::Component(id)) => self.delete_component_into(id, &mut actions),
            (MenuAction::Grow, MenuTarget::Component(id)) => self.resize_into(id, RESIZE_STEP, &mut actions),
            (MenuAction::Shrink, MenuTarget::Component(id)) => self.resize_into(id, -RESIZE_STEP, &mut actions),
            (MenuAction::Grow | MenuAction::Shrink, MenuTarget::Trace(_)) => {}
        }
        actions.push(Action::RenderNeeded);
        self.finish(actions)
    }

    pub fn undo(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.undo_into(&mut actions);
        self.finish(actions)
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.redo_into(&mut actions);
        self.finish(actions)
    }

    pub fn select_all(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.select_all_into(&mut actions);
        self.finish(actions)
    }

    pub fn delete_selection(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.delete_selection_into(&mut actions);
        self.finish(actions)
    }

    /// Delete one trace. Unknown ids are ignored.
    pub fn delete_trace(&mut self, id: &TraceId) -> Vec<Action> {
        let mut actions = Vec::new();
        self.delete_trace_into(*id, &mut actions);
        self.finish(actions)
    }

    /// Delete one component. Unknown ids are ignored.
    pub fn delete_component(&mut self, id: &ComponentId) -> Vec<Action> {
        let mut actions = Vec::new();
        self.delete_component_into(*id, &mut actions);
        self.finish(actions)
    }

    /// Grow (positive `delta`) or shrink a component about its center, clamped to the size bounds.
    pub fn resize_component(&mut self, id: &ComponentId, delta: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        self.resize_into(*id, delta, &mut actions);
        self.finish(actions)
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.ui.selection
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    #[must_use]
    pub fn stroke_color(&self) -> Rgb {
        self.stroke_color
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn trace(&self, id: &TraceId) -> Option<&Trace> {
        self.doc.trace(id)
    }

    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.doc.component(id)
    }

    /// Lay out the current frame.
    #[must_use]
    pub fn scene(&self) -> Scene {
        build_scene(&self.doc, &self.camera, &self.ui, &self.input, self.viewport_width, self.viewport_height)
    }

    // =============================================================
    // Gesture starts
    // =============================================================

    fn primary_down(&mut self, screen: Point, modifiers: Modifiers, actions: &mut Vec<Action>) {
        let world = self.camera.screen_to_world(screen);
        match self.ui.tool {
            Tool::Pan => self.begin_pan(screen, actions),
            Tool::Pointer => {
                let selected = self.ui.selection.sole_component();
                match hit_test(world, &self.doc, &self.camera, selected) {
                    Some(hit) => self.begin_item_gesture(hit.component_id, hit.part, world, actions),
                    None => {
                        if !modifiers.any() {
                            self.clear_selection(actions);
                        }
                    }
                }
            }
            Tool::Select => {
                self.clear_selection(actions);
                self.ui.marquee = Some(Rect::from_corners(screen, screen));
                self.input = InputState::Selecting { anchor_screen: screen };
                actions.push(Action::RenderNeeded);
            }
            Tool::Draw => {
                let trace = ActiveTrace::new(self.camera.screen_to_grid(screen), self.stroke_color);
                self.input = InputState::Drawing { trace };
                actions.push(Action::RenderNeeded);
            }
            Tool::SmartDraw => {
                match self.ui.smart_anchor.take() {
                    None => self.ui.smart_anchor = Some(world),
                    Some(anchor) => {
                        let end = self.camera.screen_to_grid(screen);
                        match routed_trace(world_to_grid(anchor), end, self.stroke_color) {
                            Some(trace) => self.commit_trace(trace, actions),
                            None => tracing::debug!("smart route ends in its start cell; nothing to commit"),
                        }
                    }
                }
                actions.push(Action::RenderNeeded);
            }
        }
        if let Some(cursor) = self.input.cursor() {
            actions.push(Action::SetCursor(cursor.to_owned()));
        }
    }

    fn begin_item_gesture(&mut self, id: ComponentId, part: HitPart, world: Point, actions: &mut Vec<Action>) {
        let Some(c) = self.doc.component(&id) else {
            return;
        };
        let center = c.center();
        self.input = match part {
            HitPart::ResizeHandle(corner) => InputState::Resizing { id, corner, orig_size: c.width },
            HitPart::Body => InputState::Dragging {
                id,
                grab_offset: Point::new(center.x - world.x, center.y - world.y),
                orig_x: center.x,
                orig_y: center.y,
            },
        };
        if self.ui.selection.sole_component() != Some(id) {
            self.ui.selection = Selection::single_component(id);
            actions.push(Action::SelectionChanged);
        }
        actions.push(Action::RenderNeeded);
    }

    fn begin_pan(&mut self, screen: Point, actions: &mut Vec<Action>) {
        self.input = InputState::Panning {
            anchor_screen: screen,
            anchor_pan: Point::new(self.camera.pan_x, self.camera.pan_y),
        };
        actions.push(Action::SetCursor("grabbing".to_owned()));
    }

    fn open_context_menu(&mut self, screen: Point, actions: &mut Vec<Action>) {
        let world = self.camera.screen_to_world(screen);
        match menu_target(world, &self.doc, &self.camera) {
            Some(target) => {
                self.ui.context_menu = Some(ContextMenu { at: screen, target });
                actions.push(Action::ContextMenuChanged);
                actions.push(Action::RenderNeeded);
            }
            None => self.close_context_menu(actions),
        }
    }

    fn close_context_menu(&mut self, actions: &mut Vec<Action>) {
        if self.ui.context_menu.take().is_some() {
            actions.push(Action::ContextMenuChanged);
            actions.push(Action::RenderNeeded);
        }
    }

    // =============================================================
    // Gesture updates and commits
    // =============================================================

    /// Recompute the selection for the box spanned by two screen corners.
    fn update_marquee(&mut self, anchor: Point, screen: Point, actions: &mut Vec<Action>) {
        self.ui.marquee = Some(Rect::from_corners(anchor, screen));
        let world_rect = screen_rect_to_world(&self.camera, anchor, screen);
        let selection = Selection::in_rect(&self.doc, &world_rect);
        if selection != self.ui.selection {
            self.ui.selection = selection;
            actions.push(Action::SelectionChanged);
        }
        actions.push(Action::RenderNeeded);
    }

    fn finish_draw(&mut self, trace: ActiveTrace, actions: &mut Vec<Action>) {
        match trace.finish() {
            Some(trace) => self.commit_trace(trace, actions),
            None => tracing::debug!("draw gesture covered a single cell; trace discarded"),
        }
        actions.push(Action::RenderNeeded);
    }

    fn commit_trace(&mut self, trace: Trace, actions: &mut Vec<Action>) {
        let id = trace.id;
        let points = trace.points.len();
        if self.doc.add_trace(trace) {
            tracing::debug!(%id, points, "trace committed");
            actions.push(Action::TraceCommitted(id));
            self.snapshot_pending = true;
        }
    }

    /// Abandon the current gesture, restoring anything it changed live.
    fn cancel_gesture(&mut self) {
        match std::mem::take(&mut self.input) {
            InputState::Dragging { id, orig_x, orig_y, .. } => {
                if let Some(c) = self.doc.component_mut(&id) {
                    c.x = orig_x;
                    c.y = orig_y;
                }
            }
            InputState::Resizing { id, orig_size, .. } => {
                if let Some(c) = self.doc.component_mut(&id) {
                    c.set_size(orig_size);
                }
            }
            InputState::Idle | InputState::Panning { .. } | InputState::Drawing { .. } | InputState::Selecting { .. } => {}
        }
    }

    /// Drop the gesture, selection, marquee, route anchor and context menu.
    fn reset_transient(&mut self, actions: &mut Vec<Action>) {
        self.cancel_gesture();
        self.ui.marquee = None;
        self.ui.smart_anchor = None;
        self.close_context_menu(actions);
        self.clear_selection(actions);
        actions.push(Action::RenderNeeded);
    }

    fn clear_selection(&mut self, actions: &mut Vec<Action>) {
        if !self.ui.selection.is_empty() {
            self.ui.selection.clear();
            actions.push(Action::SelectionChanged);
        }
    }

    // =============================================================
    // Document commands
    // =============================================================

    /// The component keyboard resizes apply to: the context-menu target, else
    /// the only selected component.
    fn resize_target(&self) -> Option<ComponentId> {
        match self.ui.context_menu {
            Some(ContextMenu { target: MenuTarget::Component(id), .. }) => Some(id),
            _ => self.ui.selection.sole_component(),
        }
    }

    fn resize_into(&mut self, id: ComponentId, delta: f64, actions: &mut Vec<Action>) {
        let Some(c) = self.doc.component_mut(&id) else {
            return;
        };
        let before = c.width;
        c.set_size(before + delta);
        if c.width != before {
            tracing::debug!(%id, size = c.width, "component resized");
            actions.push(Action::ComponentResized { id, size: c.width });
            actions.push(Action::RenderNeeded);
            self.snapshot_pending = true;
        }
    }

    fn delete_trace_into(&mut self, id: TraceId, actions: &mut Vec<Action>) {
        if self.doc.remove_trace(&id).is_none() {
            return;
        }
        tracing::debug!(%id, "trace deleted");
        self.ui.selection.traces.remove(&id);
        if matches!(self.ui.context_menu, Some(ContextMenu { target: MenuTarget::Trace(t), .. }) if t == id) {
            self.close_context_menu(actions);
        }
        actions.push(Action::TraceDeleted(id));
        actions.push(Action::RenderNeeded);
        self.snapshot_pending = true;
    }

    fn delete_component_into(&mut self, id: ComponentId, actions: &mut Vec<Action>) {
        if self.doc.remove_component(&id).is_none() {
            return;
        }
        tracing::debug!(%id, "component deleted");
        self.ui.selection.components.remove(&id);
        if matches!(self.ui.context_menu, Some(ContextMenu { target: MenuTarget::Component(c), .. }) if c == id) {
            self.close_context_menu(actions);
        }
        actions.push(Action::ComponentDeleted(id));
        actions.push(Action::RenderNeeded);
        self.snapshot_pending = true;
    }

    fn delete_selection_into(&mut self, actions: &mut Vec<Action>) {
        if self.ui.selection.is_empty() {
            return;
        }
        let selection = std::mem::take(&mut self.ui.selection);
        for id in &selection.traces {
            self.delete_trace_into(*id, actions);
        }
        for id in &selection.components {
            self.delete_component_into(*id, actions);
        }
        actions.push(Action::SelectionChanged);
    }

    fn select_all_into(&mut self, actions: &mut Vec<Action>) {
        let all = Selection::all(&self.doc);
        if all != self.ui.selection {
            self.ui.selection = all;
            actions.push(Action::SelectionChanged);
            actions.push(Action::RenderNeeded);
        }
    }

    /// Restore the previous snapshot. A gesture in progress is abandoned only
    /// when there is something to undo.
    fn undo_into(&mut self, actions: &mut Vec<Action>) {
        if !self.history.can_undo() {
            return;
        }
        self.cancel_gesture();
        if let Some(doc) = self.history.undo() {
            self.doc = doc.clone();
            tracing::debug!(cursor = self.history.cursor(), "undo");
            self.after_restore(actions);
        }
    }

    fn redo_into(&mut self, actions: &mut Vec<Action>) {
        if !self.history.can_redo() {
            return;
        }
        self.cancel_gesture();
        if let Some(doc) = self.history.redo() {
            self.doc = doc.clone();
            tracing::debug!(cursor = self.history.cursor(), "redo");
            self.after_restore(actions);
        }
    }

    fn after_restore(&mut self, actions: &mut Vec<Action>) {
        self.ui.marquee = None;
        self.close_context_menu(actions);
        self.clear_selection(actions);
        actions.push(Action::DocumentRestored);
        actions.push(Action::RenderNeeded);
    }

    /// Take the pending history snapshot, after all of this event's mutations.
    fn finish(&mut self, mut actions: Vec<Action>) -> Vec<Action> {
        if std::mem::take(&mut self.snapshot_pending) {
            self.history.save(&self.doc);
            actions.push(Action::HistorySaved { len: self.history.len(), cursor: self.history.cursor() });
        }
        actions
    }
}
