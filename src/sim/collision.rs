//! Axis-aligned bounding box collision
//!
//! Every entity in the field is a rectangle anchored at its top-left corner,
//! so a single overlap test covers player, bullets, enemies and power-ups.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Rectangle with top-left corner `pos` and extent `size`
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// True when both projections intersect. Rectangles that only share an
    /// edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Anything that occupies a rectangle in the field
pub trait Bounded {
    fn bounds(&self) -> Aabb;
}
