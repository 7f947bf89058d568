//! Render pipeline.
//!
//! Every full render clears the surface and repaints from scratch: optional
//! grid, then each committed layer in list order, then the draft on top.
//! Nothing here mutates session state.

use crate::surface::{StrokeStyle, Surface};
use kurbo::{BezPath, Point, Shape as KurboShape};
use layerpad_core::layers::FONT_FAMILY;
use layerpad_core::{Document, GridConfig, Layer, Repaint, Rgba, Session, SessionConfig};

/// Context for a single render frame.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Committed layers, painted back to front.
    pub document: &'a Document,
    /// Uncommitted layer, painted last.
    pub draft: Option<&'a Layer>,
    pub show_grid: bool,
    /// Outline style for layers.
    pub stroke: StrokeStyle,
    pub grid: GridConfig,
}

impl<'a> RenderContext<'a> {
    /// Create a render context with default styles.
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            draft: None,
            show_grid: false,
            stroke: StrokeStyle::default(),
            grid: GridConfig::default(),
        }
    }

    /// Context reflecting everything a session currently shows.
    pub fn from_session(session: &'a Session) -> Self {
        Self::new(session.document())
            .with_config(session.config())
            .with_draft(session.draft())
            .with_grid(session.show_grid())
    }

    /// Take line and grid styles from a session config.
    pub fn with_config(mut self, config: &SessionConfig) -> Self {
        self.stroke = StrokeStyle::new(config.line_width, config.line_cap);
        self.grid = config.grid.clone();
        self
    }

    pub fn with_draft(mut self, draft: Option<&'a Layer>) -> Self {
        self.draft = draft;
        self
    }

    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }
}

/// Clear `surface` and repaint the document and draft with default styles.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    document: &Document,
    draft: Option<&Layer>,
    show_grid: bool,
) {
    let ctx = RenderContext::new(document).with_draft(draft).with_grid(show_grid);
    render_with(surface, &ctx);
}

/// Clear `surface` and repaint everything in `ctx`.
pub fn render_with<S: Surface + ?Sized>(surface: &mut S, ctx: &RenderContext) {
    surface.clear();

    if ctx.show_grid {
        paint_grid(surface, &ctx.grid);
    }

    for layer in ctx.document {
        paint_layer(surface, layer, ctx.stroke);
    }

    if let Some(draft) = ctx.draft {
        paint_layer(surface, draft, ctx.stroke);
    }
}

/// Paint grid lines every `grid.step` pixels from 0 up to the surface edge.
pub fn paint_grid<S: Surface + ?Sized>(surface: &mut S, grid: &GridConfig) {
    let size = surface.size();
    let style = StrokeStyle::hairline(grid.line_width);

    // Vertical lines
    for x in grid_positions(grid.step, size.width) {
        let mut path = BezPath::new();
        path.move_to(Point::new(x, 0.0));
        path.line_to(Point::new(x, size.height));
        surface.stroke_path(&path, style, grid.color);
    }

    // Horizontal lines
    for y in grid_positions(grid.step, size.height) {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, y));
        path.line_to(Point::new(size.width, y));
        surface.stroke_path(&path, style, grid.color);
    }
}

/// Multiples of `step` in `0..=extent`.
fn grid_positions(step: f64, extent: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && extent >= 0.0 {
        (extent / step).floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |i| i as f64 * step)
}

/// Paint one layer. Missing colors fall back to black.
pub fn paint_layer<S: Surface + ?Sized>(surface: &mut S, layer: &Layer, stroke: StrokeStyle) {
    let stroke_color = layer.stroke_color().unwrap_or_default();
    let fill_color = layer.fill_color().unwrap_or_default();

    match layer {
        Layer::Stroke(s) => {
            if s.is_empty() {
                return;
            }
            surface.stroke_path(&s.to_path(), stroke, stroke_color);
        }
        Layer::Rectangle(b) => {
            let path = b.rect_path();
            surface.stroke_path(&path, stroke, stroke_color);
            surface.fill_path(&path, fill_color);
        }
        Layer::Ellipse(b) => {
            let path = b.circle_path();
            surface.stroke_path(&path, stroke, stroke_color);
            surface.fill_path(&path, fill_color);
        }
        Layer::Arrow(b) => {
            surface.stroke_path(&b.shaft().to_path(0.1), stroke, stroke_color);
            surface.fill_path(&b.arrow_head_path(), fill_color);
        }
        Layer::Text(t) => {
            surface.fill_text(&t.content, t.position, t.font_size, FONT_FAMILY, fill_color);
        }
    }
}

/// Paint one pen segment over the current contents.
pub fn paint_pen_segment<S: Surface + ?Sized>(
    surface: &mut S,
    from: Point,
    to: Point,
    color: Rgba,
    stroke: StrokeStyle,
) {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    surface.stroke_path(&path, stroke, color);
}

/// Apply a repaint request taken from `session`.
///
/// Returns true if anything was painted.
pub fn repaint<S: Surface + ?Sized>(surface: &mut S, session: &Session, request: Repaint) -> bool {
    match request {
        Repaint::None => false,
        Repaint::Full => {
            render_with(surface, &RenderContext::from_session(session));
            true
        }
        Repaint::Segment { from, to, color } => {
            let config = session.config();
            let stroke = StrokeStyle::new(config.line_width, config.line_cap);
            paint_pen_segment(surface, from, to, color, stroke);
            true
        }
    }
}

/// Drain the session's pending repaint and apply it.
pub fn flush<S: Surface + ?Sized>(surface: &mut S, session: &mut Session) -> bool {
    let request = session.take_repaint();
    repaint(surface, session, request)
}
