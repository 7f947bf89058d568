//! Tool system for the drawing surface.
//!
//! [`ToolKind`] selects what a drag produces, [`Interaction`] records what
//! the pointer is currently doing, and the draft helpers build and grow the
//! uncommitted layer while a drag is active.

use crate::layers::{BoxShape, Layer, Rgba, Stroke, TextLayer};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Rectangle,
    Ellipse,
    Arrow,
    Text,
}

impl ToolKind {
    /// Get display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Circle",
            ToolKind::Arrow => "Arrow",
            ToolKind::Text => "Text",
        }
    }

    /// Get all available tools in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Pen,
            ToolKind::Rectangle,
            ToolKind::Ellipse,
            ToolKind::Arrow,
            ToolKind::Text,
        ]
    }

    /// Whether pointer-down with this tool starts a drag (as opposed to
    /// opening the text prompt).
    pub fn drags(self) -> bool {
        !matches!(self, ToolKind::Text)
    }
}

/// Style applied to layers created from now on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleState {
    pub fill_color: Rgba,
    pub stroke_color: Rgba,
    /// Font size in pixels for new text layers.
    pub font_size: f64,
}

impl StyleState {
    /// Default fill (light gray).
    pub const DEFAULT_FILL: Rgba = Rgba::opaque(0xd9, 0xd9, 0xd9);
    /// Default stroke (black).
    pub const DEFAULT_STROKE: Rgba = Rgba::black();

    /// Build a text layer with the current fill color and font size.
    pub fn text_layer(&self, position: Point, content: impl Into<String>) -> TextLayer {
        TextLayer {
            position,
            content: content.into(),
            fill_color: Some(self.fill_color),
            font_size: self.font_size,
        }
    }
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            fill_color: Self::DEFAULT_FILL,
            stroke_color: Self::DEFAULT_STROKE,
            font_size: TextLayer::DEFAULT_FONT_SIZE,
        }
    }
}

/// What the pointer is doing right now.
///
/// A single enum, so drawing and moving can never be active together.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// A drag is building the draft layer.
    Drawing(Layer),
    /// A layer is bound for repositioning. `drag_offset` is set by the
    /// pointer-down that starts the drag and cleared on pointer-up.
    Moving {
        target: usize,
        drag_offset: Option<Vec2>,
    },
}

impl Interaction {
    /// The draft under construction, if drawing.
    pub fn draft(&self) -> Option<&Layer> {
        match self {
            Interaction::Drawing(draft) => Some(draft),
            Interaction::Idle | Interaction::Moving { .. } => None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Interaction::Drawing(_))
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, Interaction::Moving { .. })
    }
}

/// How a draft changed in response to a pointer-move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftChange {
    /// A pen point was appended; only the new segment needs painting.
    Extended { from: Point, to: Point },
    /// A shape extent changed; the whole surface needs repainting.
    Resized,
}

/// Start a draft for `tool` anchored at `point`.
///
/// Returns `None` for tools that do not drag.
pub fn begin_draft(tool: ToolKind, point: Point, style: &StyleState) -> Option<Layer> {
    let stroke = Some(style.stroke_color);
    let fill = Some(style.fill_color);
    match tool {
        ToolKind::Pen => Some(Layer::Stroke(Stroke::starting_at(point, stroke, fill))),
        ToolKind::Rectangle => Some(Layer::Rectangle(BoxShape::anchored(point, stroke, fill))),
        ToolKind::Ellipse => Some(Layer::Ellipse(BoxShape::anchored(point, stroke, fill))),
        ToolKind::Arrow => Some(Layer::Arrow(BoxShape::anchored(point, stroke, fill))),
        ToolKind::Text => None,
    }
}

/// Grow `draft` towards `point`.
///
/// Pen drafts append the point; shape drafts set their signed extent to
/// `point - origin`. Text layers are never drafts and are left untouched.
pub fn extend_draft(draft: &mut Layer, point: Point) -> Option<DraftChange> {
    match draft {
        Layer::Stroke(stroke) => {
            let from = stroke.path.last().copied().unwrap_or(point);
            stroke.add_point(point);
            Some(DraftChange::Extended { from, to: point })
        }
        Layer::Rectangle(shape) | Layer::Ellipse(shape) | Layer::Arrow(shape) => {
            shape.stretch_to(point);
            Some(DraftChange::Resized)
        }
        Layer::Text(_) => None,
    }
}
