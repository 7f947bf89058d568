//! Geometry helpers shared by the layer model and the render pipeline.
//!
//! All functions accept signed extents: a box dragged up or to the left has
//! negative width/height and still produces well-defined results.

use kurbo::{Point, Vec2};
use std::f64::consts::PI;

/// Length of each arrowhead edge.
pub const ARROW_HEAD_LENGTH: f64 = 10.0;

/// Half-angle between the shaft and each arrowhead edge.
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

/// Angle of the segment `start -> end` in radians (`atan2(dy, dx)`).
pub fn segment_angle(start: Point, end: Point) -> f64 {
    (end.y - start.y).atan2(end.x - start.x)
}

/// The two base points of a triangular arrowhead whose tip is `end`.
///
/// Each point sits [`ARROW_HEAD_LENGTH`] back from the tip, rotated by
/// `-ARROW_HEAD_ANGLE` and `+ARROW_HEAD_ANGLE` from the shaft direction.
/// A zero-length shaft has angle 0 and yields a head pointing right.
pub fn arrow_head_points(start: Point, end: Point) -> [Point; 2] {
    let angle = segment_angle(start, end);
    let wing = |theta: f64| {
        Point::new(
            end.x - ARROW_HEAD_LENGTH * theta.cos(),
            end.y - ARROW_HEAD_LENGTH * theta.sin(),
        )
    };
    [wing(angle - ARROW_HEAD_ANGLE), wing(angle + ARROW_HEAD_ANGLE)]
}

/// Arrow endpoint for a bounding delta anchored at `origin`.
pub fn arrow_end(origin: Point, width: f64, height: f64) -> Point {
    origin + Vec2::new(width, height)
}

/// Center of the box spanned by `origin` and the signed extent.
pub fn box_center(origin: Point, width: f64, height: f64) -> Point {
    Point::new(origin.x + width / 2.0, origin.y + height / 2.0)
}

/// Circle radius for an ellipse layer: half the box diagonal.
///
/// This is a circle through the box corners, not an inscribed ellipse.
pub fn circle_radius(width: f64, height: f64) -> f64 {
    (width * width + height * height).sqrt() / 2.0
}

/// Center and radius of the circle painted for an ellipse layer.
pub fn circle_from_extent(origin: Point, width: f64, height: f64) -> (Point, f64) {
    (box_center(origin, width, height), circle_radius(width, height))
}
