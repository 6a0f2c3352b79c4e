//! Axis-aligned boxes and hit testing
//!
//! Sprites carry a lot of transparent padding, so hit tests demand a minimum
//! overlap on each axis instead of a plain touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Signed overlap on each axis (negative means a gap)
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        Vec2::new(
            self.right().min(other.right()) - self.left().max(other.left()),
            self.bottom().min(other.bottom()) - self.top().max(other.top()),
        )
    }
}

/// Minimum overlap per axis required for a hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitMargin {
    pub horizontal: f32,
    pub vertical: f32,
}

impl HitMargin {
    pub const ZERO: HitMargin = HitMargin {
        horizontal: 0.0,
        vertical: 0.0,
    };

    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl Default for HitMargin {
    fn default() -> Self {
        Self::new(30.0, 2.0)
    }
}

/// True if the boxes overlap by more than the margin on both axes.
///
/// Symmetric in `a` and `b`. An overlap of exactly the margin is a graze,
/// not a hit.
pub fn intersects(a: &Rect, b: &Rect, margin: HitMargin) -> bool {
    let overlap = a.overlap(b);
    overlap.x > margin.horizontal && overlap.y > margin.vertical
}
