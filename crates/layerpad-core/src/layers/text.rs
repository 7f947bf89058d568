//! Text layer.

use super::Rgba;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Generic font family used for all text layers.
pub const FONT_FAMILY: &str = "sans-serif";

/// A single line of text painted with the fill color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    /// Baseline origin.
    pub position: Point,
    pub content: String,
    pub fill_color: Option<Rgba>,
    /// Font size in pixels, captured when the layer was created.
    pub font_size: f64,
}

impl TextLayer {
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;

    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            fill_color: None,
            font_size: Self::DEFAULT_FONT_SIZE,
        }
    }

    /// CSS-style font description, e.g. `16px sans-serif`.
    pub fn font(&self) -> String {
        format!("{}px {}", self.font_size, FONT_FAMILY)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_string() {
        let mut text = TextLayer::new(Point::new(0.0, 0.0), "Hi");
        assert_eq!(text.font(), "16px sans-serif");
        text.font_size = 24.5;
        assert_eq!(text.font(), "24.5px sans-serif");
    }
}
