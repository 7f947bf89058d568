//! Client-to-surface coordinate mapping.
//!
//! The drawing surface may be displayed at a different size than its
//! intrinsic pixel size (e.g. scaled by layout). Pointer events arrive in
//! client coordinates and must be mapped into surface-local coordinates
//! before they reach the tool state machine.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Map a client-space point into surface-local space.
///
/// Each axis is scaled independently by `intrinsic / displayed`. Zero-size
/// `bounds` produce non-finite coordinates; callers must guard.
pub fn map_to_surface(client: Point, bounds: Rect, intrinsic: Size) -> Point {
    let scale_x = intrinsic.width / bounds.width();
    let scale_y = intrinsic.height / bounds.height();
    Point::new(
        (client.x - bounds.x0) * scale_x,
        (client.y - bounds.y0) * scale_y,
    )
}

/// Where the surface is displayed and how large it really is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceViewport {
    /// Displayed bounds in client coordinates.
    pub bounds: Rect,
    /// Intrinsic surface size in pixels.
    pub intrinsic: Size,
}

impl SurfaceViewport {
    pub fn new(bounds: Rect, intrinsic: Size) -> Self {
        Self { bounds, intrinsic }
    }

    /// Viewport displayed at its intrinsic size with the given client offset.
    pub fn unscaled(origin: Point, intrinsic: Size) -> Self {
        Self {
            bounds: Rect::from_origin_size(origin, intrinsic),
            intrinsic,
        }
    }

    /// Scale factors (x, y) from client to surface space.
    pub fn scale(&self) -> (f64, f64) {
        (
            self.intrinsic.width / self.bounds.width(),
            self.intrinsic.height / self.bounds.height(),
        )
    }

    /// True when the displayed bounds have no area and mapping is undefined.
    pub fn is_degenerate(&self) -> bool {
        self.bounds.width() == 0.0 || self.bounds.height() == 0.0
    }

    /// Map a client point into the surface.
    pub fn map(&self, client: Point) -> Point {
        map_to_surface(client, self.bounds, self.intrinsic)
    }
}
