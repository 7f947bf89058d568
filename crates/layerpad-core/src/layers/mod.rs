//! Layer definitions for the drawing surface.
//!
//! A [`Layer`] is one committed drawable element. Layers are immutable once
//! committed apart from whole-layer repositioning, which always goes through
//! [`Layer::moved_to`] / [`Layer::translated`] so every coordinate shifts by
//! the same delta.

mod bounded;
mod color;
mod stroke;
mod text;

pub use bounded::BoxShape;
pub use color::{ColorParseError, Rgba};
pub use stroke::Stroke;
pub use text::{FONT_FAMILY, TextLayer};

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Discriminant of a [`Layer`], for display and tool mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Stroke,
    Rectangle,
    Ellipse,
    Arrow,
    Text,
}

impl LayerKind {
    /// Get display name for this layer kind.
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Stroke => "Pen",
            LayerKind::Rectangle => "Rectangle",
            LayerKind::Ellipse => "Circle",
            LayerKind::Arrow => "Arrow",
            LayerKind::Text => "Text",
        }
    }
}

/// Coordinate axis for side-panel position edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Enum wrapper for all layer types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Layer {
    Stroke(Stroke),
    Rectangle(BoxShape),
    Ellipse(BoxShape),
    Arrow(BoxShape),
    Text(TextLayer),
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Stroke(_) => LayerKind::Stroke,
            Layer::Rectangle(_) => LayerKind::Rectangle,
            Layer::Ellipse(_) => LayerKind::Ellipse,
            Layer::Arrow(_) => LayerKind::Arrow,
            Layer::Text(_) => LayerKind::Text,
        }
    }

    /// Anchor used for drag offsets and axis edits.
    ///
    /// Strokes anchor on their first point; an empty stroke (never committed)
    /// falls back to the surface origin.
    pub fn reference_point(&self) -> Point {
        match self {
            Layer::Stroke(s) => s.anchor().unwrap_or(Point::ZERO),
            Layer::Rectangle(b) | Layer::Ellipse(b) | Layer::Arrow(b) => b.origin,
            Layer::Text(t) => t.position,
        }
    }

    /// Stroke color, if the layer has one.
    pub fn stroke_color(&self) -> Option<Rgba> {
        match self {
            Layer::Stroke(s) => s.stroke_color,
            Layer::Rectangle(b) | Layer::Ellipse(b) | Layer::Arrow(b) => b.stroke_color,
            Layer::Text(_) => None,
        }
    }

    /// Fill color, if the layer has one.
    pub fn fill_color(&self) -> Option<Rgba> {
        match self {
            Layer::Stroke(s) => s.fill_color,
            Layer::Rectangle(b) | Layer::Ellipse(b) | Layer::Arrow(b) => b.fill_color,
            Layer::Text(t) => t.fill_color,
        }
    }

    /// Shift the whole layer by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Layer::Stroke(s) => s.translate(delta),
            Layer::Rectangle(b) | Layer::Ellipse(b) | Layer::Arrow(b) => b.translate(delta),
            Layer::Text(t) => t.translate(delta),
        }
    }

    /// Translated copy of this layer.
    pub fn translated(&self, delta: Vec2) -> Layer {
        let mut layer = self.clone();
        layer.translate(delta);
        layer
    }

    /// Copy of this layer with its reference point at `anchor`.
    pub fn moved_to(&self, anchor: Point) -> Layer {
        self.translated(anchor - self.reference_point())
    }

    /// Copy of this layer with one axis of its reference point replaced.
    pub fn with_axis(&self, axis: Axis, value: f64) -> Layer {
        let mut anchor = self.reference_point();
        match axis {
            Axis::X => anchor.x = value,
            Axis::Y => anchor.y = value,
        }
        self.moved_to(anchor)
    }

    /// Short description for layer listings.
    pub fn label(&self) -> String {
        match self {
            Layer::Stroke(s) => format!("{} ({} points)", self.kind().name(), s.len()),
            Layer::Rectangle(b) | Layer::Ellipse(b) | Layer::Arrow(b) => {
                format!("{} {}x{}", self.kind().name(), b.width, b.height)
            }
            Layer::Text(t) => format!("{} \"{}\"", self.kind().name(), t.content),
        }
    }

    /// Check if a committed layer is well formed (non-empty stroke path).
    pub fn is_valid(&self) -> bool {
        match self {
            Layer::Stroke(s) => !s.is_empty(),
            Layer::Rectangle(_) | Layer::Ellipse(_) | Layer::Arrow(_) | Layer::Text(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        let stroke = Layer::Stroke(Stroke::from_points(vec![Point::new(3.0, 4.0), Point::new(9.0, 9.0)]));
        assert_eq!(stroke.reference_point(), Point::new(3.0, 4.0));

        let rect = Layer::Rectangle(BoxShape::new(Point::new(1.0, 2.0), 5.0, 5.0));
        assert_eq!(rect.reference_point(), Point::new(1.0, 2.0));

        let text = Layer::Text(TextLayer::new(Point::new(7.0, 8.0), "a"));
        assert_eq!(text.reference_point(), Point::new(7.0, 8.0));
    }

    #[test]
    fn test_moved_to_shape_changes_only_origin() {
        for layer in [
            Layer::Rectangle(BoxShape::new(Point::new(0.0, 0.0), 10.0, -20.0)),
            Layer::Ellipse(BoxShape::new(Point::new(0.0, 0.0), 10.0, -20.0)),
            Layer::Arrow(BoxShape::new(Point::new(0.0, 0.0), 10.0, -20.0)),
        ] {
            let moved = layer.moved_to(Point::new(5.0, 6.0));
            assert_eq!(moved.kind(), layer.kind());
            match moved {
                Layer::Rectangle(b) | Layer::Ellipse(b) | Layer::Arrow(b) => {
                    assert_eq!(b.origin, Point::new(5.0, 6.0));
                    assert!((b.width - 10.0).abs() < f64::EPSILON);
                    assert!((b.height + 20.0).abs() < f64::EPSILON);
                }
                other => panic!("kind changed: {other:?}"),
            }
        }
    }

    #[test]
    fn test_moved_to_stroke_shifts_every_point() {
        let layer = Layer::Stroke(Stroke::from_points(vec![
            Point::new(10.0, 10.0),
            Point::new(10.0, 30.0),
            Point::new(30.0, 30.0),
        ]));
        let Layer::Stroke(moved) = layer.moved_to(Point::new(0.0, 5.0)) else {
            panic!("expected stroke");
        };
        assert_eq!(
            moved.path,
            vec![Point::new(0.0, 5.0), Point::new(0.0, 25.0), Point::new(20.0, 25.0)]
        );
    }

    #[test]
    fn test_with_axis() {
        let layer = Layer::Text(TextLayer::new(Point::new(7.0, 8.0), "a"));
        assert_eq!(layer.with_axis(Axis::X, 100.0).reference_point(), Point::new(100.0, 8.0));
        assert_eq!(layer.with_axis(Axis::Y, -1.0).reference_point(), Point::new(7.0, -1.0));
    }

    #[test]
    fn test_text_has_no_stroke_color() {
        let mut text = TextLayer::new(Point::ZERO, "x");
        text.fill_color = Some(Rgba::white());
        let layer = Layer::Text(text);
        assert_eq!(layer.stroke_color(), None);
        assert_eq!(layer.fill_color(), Some(Rgba::white()));
    }

    #[test]
    fn test_labels() {
        let layer = Layer::Rectangle(BoxShape::new(Point::ZERO, -20.0, -10.0));
        assert_eq!(layer.label(), "Rectangle -20x-10");
        let layer = Layer::Text(TextLayer::new(Point::ZERO, "Hi"));
        assert_eq!(layer.label(), "Text \"Hi\"");
    }
}
