//! Session state: the single owner of the document and interaction state.
//!
//! Every collaborator (toolbar, layer panel, side panel, text prompt, host
//! pointer input) mutates the drawing only through [`Session`] methods. Each
//! mutation records a [`Repaint`] request; the host drains it with
//! [`Session::take_repaint`] and hands it to the render pipeline, so state
//! changes and painting never interleave.

use crate::config::SessionConfig;
use crate::document::Document;
use crate::input::{MouseButton, PointerEvent};
use crate::layers::{Axis, Layer, Rgba};
use crate::mapper::SurfaceViewport;
use crate::tools::{self, DraftChange, Interaction, StyleState, ToolKind};
use kurbo::{Point, Rect};

/// Pending surface update produced by session mutations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Repaint {
    /// Surface is up to date.
    #[default]
    None,
    /// Clear and repaint everything from the document and draft.
    Full,
    /// Paint one pen segment on top of the current surface.
    Segment { from: Point, to: Point, color: Rgba },
}

impl Repaint {
    /// Combine two pending requests. Two segments collapse into a full repaint.
    pub fn merge(self, next: Repaint) -> Repaint {
        match (self, next) {
            (Repaint::None, next) => next,
            (current, Repaint::None) => current,
            _ => Repaint::Full,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Repaint::None)
    }
}

/// Open text-entry affordance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPrompt {
    /// Where the text layer will be placed, in surface coordinates.
    pub position: Point,
    /// Where the host should show the input, in client coordinates.
    pub screen_position: Point,
}

/// Runtime state for one drawing session.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    document: Document,
    tool: ToolKind,
    interaction: Interaction,
    style: StyleState,
    show_grid: bool,
    show_layers_panel: bool,
    /// Layer bound for axis edits; survives pointer-up after a drag.
    move_target: Option<usize>,
    /// Reference position shown in the side panel.
    position: Point,
    text_prompt: Option<TextPrompt>,
    repaint: Repaint,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Create a session with an empty document.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            style: config.style.clone(),
            show_grid: config.show_grid,
            config,
            document: Document::new(),
            tool: ToolKind::default(),
            interaction: Interaction::Idle,
            show_layers_panel: false,
            move_target: None,
            position: Point::ZERO,
            text_prompt: None,
            // First frame paints the (empty) surface and optional grid.
            repaint: Repaint::Full,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Read-only layer listing for the layer panel.
    pub fn layers(&self) -> &[Layer] {
        self.document.layers()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// The uncommitted layer being drawn, if any.
    pub fn draft(&self) -> Option<&Layer> {
        self.interaction.draft()
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn show_layers_panel(&self) -> bool {
        self.show_layers_panel
    }

    pub fn move_target(&self) -> Option<usize> {
        self.move_target
    }

    /// Reference position of the selected or moving layer.
    pub fn current_position(&self) -> Point {
        self.position
    }

    pub fn text_prompt(&self) -> Option<&TextPrompt> {
        self.text_prompt.as_ref()
    }

    /// Viewport for the configured surface size shown at `bounds`.
    pub fn viewport(&self, bounds: Rect) -> SurfaceViewport {
        SurfaceViewport::new(bounds, self.config.surface_size())
    }

    /// Take the pending repaint request, leaving `Repaint::None`.
    pub fn take_repaint(&mut self) -> Repaint {
        std::mem::take(&mut self.repaint)
    }

    /// Peek at the pending repaint request.
    pub fn pending_repaint(&self) -> Repaint {
        self.repaint
    }

    fn request(&mut self, repaint: Repaint) {
        self.repaint = self.repaint.merge(repaint);
    }

    /// Drop an open draft. Returns true if one was discarded.
    fn discard_draft(&mut self) -> bool {
        if self.interaction.is_drawing() {
            log::debug!("Discarding open draft");
            self.interaction = Interaction::Idle;
            self.request(Repaint::Full);
            true
        } else {
            false
        }
    }

    // --- Pointer input ---

    /// Map a host pointer event into the surface and dispatch it.
    ///
    /// Only the primary button draws or drags.
    pub fn handle_pointer(&mut self, event: PointerEvent, viewport: &SurfaceViewport) {
        if viewport.is_degenerate() {
            log::debug!("Ignoring pointer event on zero-size viewport");
            return;
        }
        if event.button().is_some_and(|b| b != MouseButton::Left) {
            log::debug!("Ignoring non-primary button {:?}", event.button());
            return;
        }
        let client = event.position();
        let point = viewport.map(client);
        match event {
            PointerEvent::Down { .. } => self.pointer_down_at(point, client),
            PointerEvent::Move { .. } => self.pointer_move(point),
            PointerEvent::Up { .. } => self.pointer_up(),
        }
    }

    /// Pointer-down at a surface point.
    pub fn pointer_down(&mut self, point: Point) {
        self.pointer_down_at(point, point);
    }

    /// Pointer-down at a surface point, with the client position used to
    /// place the text prompt.
    pub fn pointer_down_at(&mut self, point: Point, screen_position: Point) {
        if let Interaction::Moving { target, drag_offset } = &mut self.interaction {
            match self.document.get(*target) {
                Some(layer) => {
                    *drag_offset = Some(point - layer.reference_point());
                }
                None => {
                    log::debug!("Move target {} no longer exists", target);
                    self.interaction = Interaction::Idle;
                    self.move_target = None;
                }
            }
            return;
        }

        if self.tool == ToolKind::Text {
            self.text_prompt = Some(TextPrompt {
                position: point,
                screen_position,
            });
            return;
        }

        if self.discard_draft() {
            log::debug!("Pointer-down restarted an open draft");
        }
        if let Some(draft) = tools::begin_draft(self.tool, point, &self.style) {
            self.interaction = Interaction::Drawing(draft);
        }
    }

    /// Pointer-move at a surface point.
    pub fn pointer_move(&mut self, point: Point) {
        match &mut self.interaction {
            Interaction::Idle => {}
            Interaction::Drawing(draft) => {
                let color = draft.stroke_color().unwrap_or_default();
                match tools::extend_draft(draft, point) {
                    Some(DraftChange::Extended { from, to }) => {
                        self.request(Repaint::Segment { from, to, color });
                    }
                    Some(DraftChange::Resized) => self.request(Repaint::Full),
                    None => {}
                }
            }
            Interaction::Moving {
                target,
                drag_offset: Some(offset),
            } => {
                let target = *target;
                let new_pos = point - *offset;
                let Some(layer) = self.document.get(target) else {
                    return;
                };
                let moved = layer.moved_to(new_pos);
                self.document.replace(target, moved);
                self.position = new_pos;
                self.request(Repaint::Full);
            }
            Interaction::Moving { drag_offset: None, .. } => {
                // Waiting for the pointer-down that starts the drag.
            }
        }
    }

    /// Pointer-up: commit the draft or finish a drag.
    pub fn pointer_up(&mut self) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => {}
            Interaction::Drawing(draft) => {
                if draft.is_valid() {
                    log::info!("Committed {} layer #{}", draft.kind().name(), self.document.len());
                    self.document.push(draft);
                }
                self.request(Repaint::Full);
            }
            Interaction::Moving { .. } => {
                // Offset is dropped; the binding stays in `move_target`.
            }
        }
    }

    // --- Toolbar ---

    /// Switch tools. Any open draft is discarded and the text prompt closes.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.discard_draft();
        self.text_prompt = None;
        self.tool = tool;
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.request(Repaint::Full);
        self.show_grid
    }

    pub fn toggle_layers_panel(&mut self) -> bool {
        self.show_layers_panel = !self.show_layers_panel;
        self.show_layers_panel
    }

    // --- Layer panel ---

    /// Show a layer's reference point in the side panel. No mutation.
    pub fn select_layer(&mut self, index: usize) -> bool {
        match self.document.get(index) {
            Some(layer) => {
                self.position = layer.reference_point();
                true
            }
            None => {
                log::debug!("select_layer: index {} out of range", index);
                false
            }
        }
    }

    /// Remove a layer. Out-of-range indices are ignored.
    pub fn delete_layer(&mut self, index: usize) -> Option<Layer> {
        let removed = self.document.remove(index);
        if removed.is_none() {
            log::debug!("delete_layer: index {} out of range", index);
            return None;
        }

        // Keep the move binding pointing at the same layer.
        match self.move_target {
            Some(target) if target == index => {
                self.move_target = None;
                if self.interaction.is_moving() {
                    self.interaction = Interaction::Idle;
                }
            }
            Some(target) if target > index => {
                self.move_target = Some(target - 1);
                if let Interaction::Moving { target, .. } = &mut self.interaction {
                    *target -= 1;
                }
            }
            _ => {}
        }

        self.request(Repaint::Full);
        removed
    }

    /// Bind a layer for repositioning; the next pointer-down starts the drag.
    pub fn begin_move(&mut self, index: usize) -> bool {
        let Some(layer) = self.document.get(index) else {
            log::debug!("begin_move: index {} out of range", index);
            return false;
        };
        self.position = layer.reference_point();
        self.discard_draft();
        self.move_target = Some(index);
        self.interaction = Interaction::Moving {
            target: index,
            drag_offset: None,
        };
        true
    }

    // --- Side panel ---

    /// Set one axis of the bound layer's reference point.
    pub fn set_axis_position(&mut self, axis: Axis, value: f64) -> bool {
        let Some(target) = self.move_target else {
            log::debug!("set_axis_position without a move target");
            return false;
        };
        let Some(layer) = self.document.get(target) else {
            self.move_target = None;
            return false;
        };
        let moved = layer.with_axis(axis, value);
        self.position = moved.reference_point();
        self.document.replace(target, moved);
        self.request(Repaint::Full);
        true
    }

    pub fn set_fill_color(&mut self, color: Rgba) {
        self.style.fill_color = color;
    }

    pub fn set_stroke_color(&mut self, color: Rgba) {
        self.style.stroke_color = color;
    }

    /// Set the font size for new text layers. Non-positive sizes are ignored.
    pub fn set_font_size(&mut self, size: f64) -> bool {
        if size.is_finite() && size > 0.0 {
            self.style.font_size = size;
            true
        } else {
            log::debug!("Ignoring font size {}", size);
            false
        }
    }

    // --- Text prompt ---

    /// Confirm the text prompt. Blank input closes the prompt without
    /// creating a layer. Returns true if a layer was appended.
    pub fn submit_text(&mut self, text: &str) -> bool {
        let Some(prompt) = self.text_prompt.take() else {
            log::debug!("submit_text with no open prompt");
            return false;
        };
        let content = text.trim();
        if content.is_empty() {
            return false;
        }
        let layer = self.style.text_layer(prompt.position, content);
        log::info!("Committed Text layer #{}", self.document.len());
        self.document.push(Layer::Text(layer));
        self.request(Repaint::Full);
        true
    }

    pub fn cancel_text(&mut self) {
        self.text_prompt = None;
    }
}
