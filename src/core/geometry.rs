//! Points, viewports and the off-screen test

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Size of the host drawing surface in surface units (CSS pixels on the web).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A viewport with no usable area. Nothing can be off-screen on it.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }

    /// True when `p` lies further than `margin` past any edge.
    ///
    /// NaN coordinates never satisfy the in-bounds comparisons and therefore
    /// count as outside.
    #[inline]
    pub fn is_outside(&self, p: Point, margin: f32) -> bool {
        let inside_x = p.x >= -margin && p.x <= self.width + margin;
        let inside_y = p.y >= -margin && p.y <= self.height + margin;
        !(inside_x && inside_y)
    }
}
