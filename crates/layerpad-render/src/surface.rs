//! Surface trait abstraction.

use crate::export::RasterImage;
use kurbo::{BezPath, Cap, Point, Size, Stroke};
use layerpad_core::{LineCap, Rgba};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Surface does not support raster export")]
    Unsupported,
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Outline style for stroked paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 5.0,
            cap: LineCap::Round,
        }
    }
}

impl StrokeStyle {
    pub fn new(width: f64, cap: LineCap) -> Self {
        Self { width, cap }
    }

    /// Thin butt-capped style used for grid lines.
    pub fn hairline(width: f64) -> Self {
        Self {
            width,
            cap: LineCap::Butt,
        }
    }

    /// Convert to a kurbo stroke.
    pub fn to_stroke(&self) -> Stroke {
        let cap = match self.cap {
            LineCap::Butt => Cap::Butt,
            LineCap::Round => Cap::Round,
            LineCap::Square => Cap::Square,
        };
        Stroke::new(self.width).with_caps(cap)
    }
}

/// A drawing target the render pipeline paints into.
///
/// Coordinates are surface pixels with the origin at the top-left. Painting
/// is immediate mode: later calls paint over earlier ones.
pub trait Surface {
    /// Intrinsic size in pixels.
    fn size(&self) -> Size;

    /// Erase everything.
    fn clear(&mut self);

    /// Stroke `path` with the given style.
    fn stroke_path(&mut self, path: &BezPath, style: StrokeStyle, color: Rgba);

    /// Fill `path` with the non-zero rule.
    fn fill_path(&mut self, path: &BezPath, color: Rgba);

    /// Fill `text` with its baseline starting at `position`.
    fn fill_text(&mut self, text: &str, position: Point, font_size: f64, family: &str, color: Rgba);

    /// Read back the current contents as RGBA pixels.
    fn export_image(&mut self) -> RenderResult<RasterImage> {
        Err(RendererError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stroke_style() {
        let style = StrokeStyle::default();
        assert!((style.width - 5.0).abs() < f64::EPSILON);
        assert_eq!(style.cap, LineCap::Round);
        let stroke = style.to_stroke();
        assert_eq!(stroke.start_cap, Cap::Round);
        assert_eq!(stroke.end_cap, Cap::Round);
    }

    #[test]
    fn test_hairline() {
        let stroke = StrokeStyle::hairline(0.5).to_stroke();
        assert!((stroke.width - 0.5).abs() < f64::EPSILON);
        assert_eq!(stroke.start_cap, Cap::Butt);
    }
}
