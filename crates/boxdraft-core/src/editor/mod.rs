//! The interaction state machine.
//!
//! [`Editor`] owns the document and turns [`Command`]s into tool behavior.
//! Every command first goes through the tool-level handlers (tool switching,
//! press bookkeeping, camera), then through the handlers of the active
//! sub-state, which evaluate guards, run actions and transition.

mod camera;
mod create;
mod gesture;
pub mod guards;
mod selection;
mod transform;
mod translate;

pub use gesture::{Gesture, SnapInfo};

use crate::config::{ConfigResult, EditorConfig};
use crate::document::Document;
use crate::input::{Command, PointerInfo, PointerTarget};
use crate::selection::{BoundsHandle, HANDLE_HIT_TOLERANCE, hit_test_handles};
use crate::shapes::ShapeId;
use crate::tools::{BoxState, SelectState, ToolKind, ToolState};
use kurbo::{Point, Rect};

/// Default render surface, in screen units.
pub const DEFAULT_VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

/// Interaction state machine over a single document.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    state: ToolState,
    config: EditorConfig,
    /// Screen-space bounds of the render surface.
    viewport: Rect,
    gesture: Option<Gesture>,
    /// Shape most recently added by a shift-click, until the next return to idle.
    just_shift_selected: Option<ShapeId>,
    /// Handle grabbed by the last press, waiting for its gesture to start.
    grabbed_handle: Option<BoundsHandle>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_document(Document::default())
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            state: ToolState::default(),
            config: EditorConfig::default(),
            viewport: DEFAULT_VIEWPORT,
            gesture: None,
            just_shift_selected: None,
            grabbed_handle: None,
        }
    }

    /// Builder-style config setter. Rejects a config that fails validation.
    pub fn with_config(mut self, config: EditorConfig) -> ConfigResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct access to the document, for loading content outside of a gesture.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn tool(&self) -> ToolKind {
        self.state.tool()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The gesture in progress, between a press and its release or cancellation.
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn just_shift_selected(&self) -> Option<ShapeId> {
        self.just_shift_selected
    }

    /// Combined bounds of the current selection.
    pub fn selection_bounds(&self) -> Option<Rect> {
        self.document.selection_bounds()
    }

    /// Shapes under a page point, topmost first.
    pub fn hit_test_shapes(&self, page_point: Point) -> Vec<ShapeId> {
        self.document.page.shapes_at_point(page_point)
    }

    /// Classify a screen point the way a pointer press there should be reported.
    ///
    /// Handles of the selection win, then shapes, then the inside of the
    /// selection bounds, then the canvas.
    pub fn pointer_target_at(&self, screen_point: Point) -> PointerTarget {
        let page_point = self.document.page_point(screen_point);
        let zoom = self.document.page_state.camera.zoom;

        let bounds = self.selection_bounds();
        if let Some(bounds) = bounds {
            let rotation = match self.document.page_state.selected_ids.as_slice() {
                [only] => self.document.page.get_shape(*only).map_or(0.0, |s| s.rotation),
                _ => 0.0,
            };
            if let Some(handle) =
                hit_test_handles(bounds, rotation, page_point, HANDLE_HIT_TOLERANCE, zoom)
            {
                return PointerTarget::Handle(handle);
            }
        }

        if let Some(&id) = self.hit_test_shapes(page_point).first() {
            return PointerTarget::Shape(id);
        }

        match bounds {
            Some(bounds) if bounds.contains(page_point) => PointerTarget::Bounds,
            _ => PointerTarget::Canvas,
        }
    }

    /// Deliver a press: the pointed command for the info's target, then `StartedPointing`.
    pub fn pointer_down(&mut self, info: PointerInfo) {
        self.dispatch(Command::pointed(info));
        self.dispatch(Command::StartedPointing(info));
    }

    /// Process one command to completion.
    pub fn dispatch(&mut self, command: Command) {
        log::trace!("{} <- {}", self.state, command.name());

        self.handle_tool(&command);
        match self.state {
            ToolState::Select(state) => self.handle_select(state, &command),
            ToolState::Box(state) => self.handle_box(state, &command),
        }

        if matches!(command, Command::StoppedPointing(_) | Command::Cancelled) {
            self.gesture = None;
            self.grabbed_handle = None;
        }
    }

    fn handle_tool(&mut self, command: &Command) {
        let viewport = self.viewport;
        let doc = &mut self.document;
        match command {
            Command::SelectedTool { tool } => {
                log::info!("Selected tool: {}", tool.name());
                self.transition(ToolState::idle(*tool));
                // Switching tools ends any gesture in progress, keeping its edits
                self.gesture = None;
                self.grabbed_handle = None;
            }
            Command::StartedPointing(info) => {
                let initial_point = doc.page_point(info.origin);
                let handle = self.grabbed_handle.take();
                self.gesture = Some(Gesture::new(initial_point, doc.clone(), handle));
            }
            Command::Panned(info) => camera::pan(doc, info),
            Command::Pinched { info, zoom } => camera::pinch(doc, info, *zoom),
            Command::ZoomedToSelection => camera::zoom_to_selection(doc, &self.config, viewport),
            Command::ZoomedToFit => camera::zoom_to_fit(doc, &self.config, viewport),
            Command::ZoomedIn => camera::zoom_in(doc, &self.config, viewport),
            Command::ZoomedOut => camera::zoom_out(doc, &self.config, viewport),
            _ => {}
        }
    }

    fn handle_select(&mut self, state: SelectState, command: &Command) {
        use SelectState::*;

        match (state, command) {
            (Idle, Command::Cancelled) => selection::clear_selection(&mut self.document),
            (Idle, Command::Deleted) => create::delete_selection(&mut self.document),
            (Idle, Command::PointedCanvas(info)) => {
                if !guards::is_pressing_shift(info) {
                    selection::clear_selection(&mut self.document);
                }
                self.transition(ToolState::Select(PointingCanvas));
            }
            (Idle, Command::PointedShape(info)) => {
                let Some(id) = self.target_shape(info) else {
                    return;
                };
                if !guards::shape_is_selected(&self.document, info) {
                    self.select_shape(id, info);
                }
                self.transition(ToolState::Select(PointingShape));
            }
            (Idle, Command::PointedBounds(_)) => self.transition(ToolState::Select(PointingBounds)),
            (Idle, Command::PointedBoundsHandle(info)) => {
                let Some(handle) = info.handle() else {
                    log::warn!("Bounds handle press without a handle target");
                    return;
                };
                self.grabbed_handle = Some(handle);
                self.transition(ToolState::Select(PointingBoundsHandle));
            }

            (PointingCanvas, Command::MovedPointer(_)) => {
                self.transition(ToolState::Select(BrushSelecting));
            }
            (PointingBoundsHandle, Command::MovedPointer(info)) => {
                if self.has_left_dead_zone(info) {
                    self.transition(ToolState::Select(TransformingSelection));
                }
            }
            (PointingBounds | PointingShape, Command::MovedPointer(info)) => {
                if self.has_left_dead_zone(info) {
                    self.transition(ToolState::Select(TranslatingSelection));
                }
            }
            (PointingBounds, Command::StoppedPointing(_)) => {
                selection::clear_selection(&mut self.document);
                self.transition(ToolState::Select(Idle));
            }
            (PointingShape, Command::StoppedPointing(info)) => {
                if guards::shape_is_selected(&self.document, info) {
                    if let Some(id) = info.shape_id() {
                        self.select_shape(id, info);
                    }
                }
                self.transition(ToolState::Select(Idle));
            }
            (
                PointingCanvas | PointingBoundsHandle,
                Command::StoppedPointing(_),
            )
            | (
                PointingCanvas | PointingBoundsHandle | PointingBounds | PointingShape,
                Command::Cancelled,
            ) => self.transition(ToolState::Select(Idle)),

            (
                TranslatingSelection,
                Command::ToggledModifier(info) | Command::MovedPointer(info) | Command::Panned(info),
            ) => {
                if let Some(gesture) = self.gesture.as_mut() {
                    translate::translate_selection(
                        &mut self.document,
                        gesture,
                        info,
                        &self.config,
                        self.viewport,
                    );
                }
            }
            (
                TransformingSelection,
                Command::ToggledModifier(info) | Command::MovedPointer(info) | Command::Panned(info),
            ) => {
                if let Some(gesture) = self.gesture.as_ref() {
                    transform::transform_selection(&mut self.document, gesture, info, &self.config);
                }
            }
            (TranslatingSelection | TransformingSelection, Command::Cancelled) => {
                self.restore_snapshot();
                self.transition(ToolState::Select(Idle));
            }
            (TranslatingSelection | TransformingSelection, Command::StoppedPointing(_)) => {
                log::info!(
                    "Finished {} of {} shape(s)",
                    if state == TranslatingSelection { "translate" } else { "transform" },
                    self.document.page_state.selected_ids.len()
                );
                self.transition(ToolState::Select(Idle));
            }

            (BrushSelecting, Command::MovedPointer(info) | Command::Panned(info)) => {
                if let Some(gesture) = self.gesture.as_ref() {
                    selection::update_brush(&mut self.document, gesture, info);
                }
            }
            (BrushSelecting, Command::Cancelled | Command::StoppedPointing(_)) => {
                self.transition(ToolState::Select(Idle));
            }

            _ => {}
        }
    }

    fn handle_box(&mut self, state: BoxState, command: &Command) {
        match (state, command) {
            (BoxState::Idle, Command::StartedPointing(info)) => {
                create::create_box_shape(&mut self.document, info);
                self.transition(ToolState::Box(BoxState::Creating));
            }
            (BoxState::Creating, Command::MovedPointer(info) | Command::Panned(info)) => {
                if let Some(gesture) = self.gesture.as_ref() {
                    create::update_creating_shape(&mut self.document, gesture, info);
                }
            }
            (BoxState::Creating, Command::StoppedPointing(_)) => {
                self.transition(ToolState::idle(ToolKind::Select));
            }
            (BoxState::Creating, Command::Cancelled) => {
                self.restore_snapshot();
                self.transition(ToolState::Box(BoxState::Idle));
            }
            _ => {}
        }
    }

    /// Leave the current state for `next`, running exit and entry hooks.
    fn transition(&mut self, next: ToolState) {
        let prev = self.state;
        match prev {
            ToolState::Select(SelectState::TranslatingSelection)
            | ToolState::Select(SelectState::TransformingSelection) => {
                if let Some(gesture) = self.gesture.as_mut() {
                    gesture.snap_info = None;
                }
                self.document.overlays.snap_lines.clear();
            }
            ToolState::Select(SelectState::BrushSelecting) => {
                selection::clear_brush(&mut self.document);
            }
            _ => {}
        }

        self.state = next;
        log::debug!("{prev} -> {next}");

        match next {
            ToolState::Select(SelectState::Idle) => self.just_shift_selected = None,
            ToolState::Select(SelectState::TranslatingSelection) => {
                let snap_info = SnapInfo::from_document(&self.document);
                if let Some(gesture) = self.gesture.as_mut() {
                    gesture.is_cloning = false;
                    gesture.snap_info = snap_info;
                }
            }
            ToolState::Select(SelectState::TransformingSelection) => {
                let snap_info = SnapInfo::from_document(&self.document);
                if let Some(gesture) = self.gesture.as_mut() {
                    gesture.snap_info = snap_info;
                }
            }
            _ => {}
        }
    }

    /// Put the document back the way it was when the gesture started.
    fn restore_snapshot(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            self.document = gesture.snapshot;
            log::debug!("Restored snapshot");
        }
    }

    fn has_left_dead_zone(&self, info: &PointerInfo) -> bool {
        guards::has_left_dead_zone(
            &self.document,
            self.gesture.as_ref(),
            info,
            self.config.dead_zone,
        )
    }

    fn select_shape(&mut self, id: ShapeId, info: &PointerInfo) {
        selection::select_shape(
            &mut self.document.page_state,
            &mut self.just_shift_selected,
            id,
            guards::is_pressing_shift(info),
        );
    }

    /// The targeted shape, if it exists on the page.
    fn target_shape(&self, info: &PointerInfo) -> Option<ShapeId> {
        let Some(id) = info.shape_id() else {
            log::warn!("Shape press without a shape target");
            return None;
        };
        if self.document.page.get_shape(id).is_none() {
            log::warn!("Ignoring press on unknown shape {id}");
            return None;
        }
        Some(id)
    }
}
