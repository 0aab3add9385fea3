use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Rectangular drawing surface with its origin at the top-left corner.
///
/// Dimensions come from the host layout pass and may change at any time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Keeps a body of edge `size` fully inside the canvas.
    ///
    /// Each axis is clamped to `[0, dim - size]`; when the canvas is smaller
    /// than the body the upper bound collapses to 0.
    pub fn clamp(&self, p: DVec2, size: f64) -> DVec2 {
        let max_x = (self.width - size).max(0.0);
        let max_y = (self.height - size).max(0.0);
        DVec2::new(p.x.clamp(0.0, max_x), p.y.clamp(0.0, max_y))
    }

    /// Converts a top-left screen position to a bottom-left reading frame.
    pub fn to_display(&self, p: DVec2, size: f64) -> DVec2 {
        DVec2::new(p.x, self.height - p.y - size)
    }
}
