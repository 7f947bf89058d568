//! Freehand pen stroke.

use super::Rgba;
use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand drawing (series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in drawing order. Never empty once committed.
    pub path: Vec<Point>,
    pub stroke_color: Option<Rgba>,
    pub fill_color: Option<Rgba>,
}

impl Stroke {
    /// Start a stroke at a single point.
    pub fn starting_at(point: Point, stroke_color: Option<Rgba>, fill_color: Option<Rgba>) -> Self {
        Self {
            path: vec![point],
            stroke_color,
            fill_color,
        }
    }

    /// Create from existing points.
    pub fn from_points(path: Vec<Point>) -> Self {
        Self {
            path,
            stroke_color: None,
            fill_color: None,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.path.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// First point of the path, used as the stroke's anchor.
    pub fn anchor(&self) -> Option<Point> {
        self.path.first().copied()
    }

    /// Shift every point by the same delta.
    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.path {
            *p += delta;
        }
    }

    /// Polyline through all points. A single point yields a zero-length segment
    /// so round caps still leave a dot.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some((first, rest)) = self.path.split_first() else {
            return path;
        };
        path.move_to(*first);
        if rest.is_empty() {
            path.line_to(*first);
        }
        for p in rest {
            path.line_to(*p);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_stroke_growth() {
        let mut stroke = Stroke::starting_at(Point::new(1.0, 1.0), None, None);
        stroke.add_point(Point::new(2.0, 2.0));
        assert_eq!(stroke.len(), 2);
        assert_eq!(stroke.anchor(), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_translate_shifts_all_points() {
        let mut stroke = Stroke::from_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)]);
        stroke.translate(Vec2::new(3.0, -2.0));
        assert_eq!(stroke.path, vec![Point::new(3.0, -2.0), Point::new(13.0, 3.0)]);
    }

    #[test]
    fn test_single_point_path() {
        let stroke = Stroke::from_points(vec![Point::new(4.0, 4.0)]);
        let els: Vec<PathEl> = stroke.to_path().elements().to_vec();
        assert_eq!(els.len(), 2);
        assert_eq!(els[0], PathEl::MoveTo(Point::new(4.0, 4.0)));
        assert_eq!(els[1], PathEl::LineTo(Point::new(4.0, 4.0)));
    }

    #[test]
    fn test_empty_path() {
        let stroke = Stroke::from_points(Vec::new());
        assert!(stroke.is_empty());
        assert!(stroke.to_path().elements().is_empty());
    }
}
