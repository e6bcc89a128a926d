use crate::math::Vec2;

/// Axis-aligned rectangle in logical pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// True if `p` lies beyond the right or bottom edge by more than `margin`.
    ///
    /// Only the trailing edges are checked; points left of or above the
    /// rectangle are not considered outside.
    pub fn exceeds_trailing_edges(&self, p: Vec2, margin: f64) -> bool {
        let max = self.max();
        p.x > max.x + margin || p.y > max.y + margin
    }
}
