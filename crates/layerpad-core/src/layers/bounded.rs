//! Box-anchored shapes: rectangles, ellipses and arrows share one geometry.

use super::Rgba;
use crate::geometry;
use kurbo::{BezPath, Circle, Line, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// A shape described by an origin and a signed extent.
///
/// `width`/`height` keep the sign of the drag: dragging up-left from the
/// origin yields negative values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    /// Point where the drag started.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub stroke_color: Option<Rgba>,
    pub fill_color: Option<Rgba>,
}

impl BoxShape {
    /// Create a new shape.
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
            stroke_color: None,
            fill_color: None,
        }
    }

    /// Zero-extent shape anchored at `origin`, as created on pointer-down.
    pub fn anchored(origin: Point, stroke_color: Option<Rgba>, fill_color: Option<Rgba>) -> Self {
        Self {
            origin,
            width: 0.0,
            height: 0.0,
            stroke_color,
            fill_color,
        }
    }

    /// Stretch the extent so the far corner sits at `corner`.
    pub fn stretch_to(&mut self, corner: Point) {
        self.width = corner.x - self.origin.x;
        self.height = corner.y - self.origin.y;
    }

    /// Corner opposite the origin.
    pub fn far_corner(&self) -> Point {
        geometry::arrow_end(self.origin, self.width, self.height)
    }

    /// Normalized rectangle covering the box.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.origin, self.far_corner())
    }

    /// Rectangle outline. Signed extents keep the drag direction.
    pub fn rect_path(&self) -> BezPath {
        let Point { x, y } = self.origin;
        let (x1, y1) = (x + self.width, y + self.height);
        let mut path = BezPath::new();
        path.move_to((x, y));
        path.line_to((x1, y));
        path.line_to((x1, y1));
        path.line_to((x, y1));
        path.close_path();
        path
    }

    /// The circle painted for an ellipse layer.
    pub fn circle(&self) -> Circle {
        let (center, radius) = geometry::circle_from_extent(self.origin, self.width, self.height);
        Circle::new(center, radius)
    }

    /// Full circle path for an ellipse layer.
    pub fn circle_path(&self) -> BezPath {
        self.circle().to_path(0.1)
    }

    /// Arrow shaft from origin to the far corner.
    pub fn shaft(&self) -> Line {
        Line::new(self.origin, self.far_corner())
    }

    /// Closed triangular arrowhead at the far corner.
    pub fn arrow_head_path(&self) -> BezPath {
        let tip = self.far_corner();
        let [a, b] = geometry::arrow_head_points(self.origin, tip);
        let mut path = BezPath::new();
        path.move_to(tip);
        path.line_to(a);
        path.line_to(b);
        path.close_path();
        path
    }

    /// Move the origin; extent is unchanged.
    pub fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }
}
