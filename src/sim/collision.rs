//! Collision detection for axis-aligned boxes
//!
//! Deliberately crude: the ball and paddles are boxes, walls are the field
//! edges, and every test is an independent per-axis comparison.

use glam::Vec2;

/// Axis-aligned bounding box (top-left corner + extent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Overlap test (touching edges do not count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

/// Which field walls the ball is touching, per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Left or right wall
    pub horizontal: bool,
    /// Top or bottom wall
    pub vertical: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Check a box of edge `size` at `pos` against the field bounds
///
/// Both axes are tested independently; a corner sets both flags.
pub fn wall_contact(pos: Vec2, size: f32, field: Vec2) -> WallContact {
    WallContact {
        horizontal: pos.x <= 0.0 || pos.x >= field.x - size,
        vertical: pos.y <= 0.0 || pos.y >= field.y - size,
    }
}
