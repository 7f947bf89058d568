//! Recording surface.
//!
//! [`DisplayList`] stores every paint call as a [`DrawCommand`] instead of
//! rasterizing. Two renders of the same state produce equal lists, which is
//! how headless hosts and tests inspect what was painted.

use crate::surface::{StrokeStyle, Surface};
use kurbo::{BezPath, Point, Size};
use layerpad_core::Rgba;

/// One recorded paint call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    StrokePath {
        path: BezPath,
        style: StrokeStyle,
        color: Rgba,
    },
    FillPath {
        path: BezPath,
        color: Rgba,
    },
    FillText {
        text: String,
        position: Point,
        font_size: f64,
        family: String,
        color: Rgba,
    },
}

impl DrawCommand {
    pub fn is_stroke(&self) -> bool {
        matches!(self, DrawCommand::StrokePath { .. })
    }

    pub fn is_fill(&self) -> bool {
        matches!(self, DrawCommand::FillPath { .. })
    }

    /// Color used by the command, if it paints anything.
    pub fn color(&self) -> Option<Rgba> {
        match self {
            DrawCommand::Clear => None,
            DrawCommand::StrokePath { color, .. }
            | DrawCommand::FillPath { color, .. }
            | DrawCommand::FillText { color, .. } => Some(*color),
        }
    }
}

/// A surface that records paint calls.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Commands painted since the last clear (the clear itself included).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn last(&self) -> Option<&DrawCommand> {
        self.commands.last()
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for DisplayList {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        // Cleared contents are gone; only what follows is visible.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_path(&mut self, path: &BezPath, style: StrokeStyle, color: Rgba) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            style,
            color,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, position: Point, font_size: f64, family: &str, color: Rgba) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            position,
            font_size,
            family: family.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RendererError;

    #[test]
    fn test_clear_drops_previous_commands() {
        let mut list = DisplayList::new(Size::new(10.0, 10.0));
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((5.0, 5.0));
        list.stroke_path(&path, StrokeStyle::default(), Rgba::black());
        list.fill_path(&path, Rgba::white());
        assert_eq!(list.len(), 2);

        list.clear();
        assert_eq!(list.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_records_text() {
        let mut list = DisplayList::new(Size::new(10.0, 10.0));
        list.fill_text("Hi", Point::new(1.0, 2.0), 16.0, "sans-serif", Rgba::black());
        let Some(DrawCommand::FillText { text, family, .. }) = list.last() else {
            panic!("expected text command");
        };
        assert_eq!(text, "Hi");
        assert_eq!(family, "sans-serif");
        assert_eq!(list.last().and_then(DrawCommand::color), Some(Rgba::black()));
    }

    #[test]
    fn test_export_unsupported() {
        let mut list = DisplayList::new(Size::new(10.0, 10.0));
        assert!(matches!(list.export_image(), Err(RendererError::Unsupported)));
    }
}
