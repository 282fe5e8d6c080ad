//! Layout rectangles reported by the host

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center, or `None` if the rectangle has not been laid out
    ///
    /// A zero-width or non-finite rectangle is what hosts report for
    /// elements that are not in the layout yet.
    pub fn center_x(&self) -> Option<f32> {
        if !self.x.is_finite() || !self.width.is_finite() || self.width <= 0.0 {
            return None;
        }
        Some(self.x + self.width / 2.0)
    }
}
