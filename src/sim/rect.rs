//! Axis-aligned rectangles and the intersection primitive
//!
//! Every collision test in the game reduces to rectangle overlap: wall
//! segments are single rects, ball hitboxes are stacks of rects. Edges that
//! merely touch do not count as overlapping.

use glam::Vec2;

/// A pixel-space axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test: shared edges are not a collision
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.bottom() <= other.y
            || self.y >= other.bottom()
            || self.right() <= other.x
            || self.x >= other.right())
    }
}

/// True if any rect in `a` overlaps any rect in `b`
pub fn boxes_collide(a: &[Rect], b: &[Rect]) -> bool {
    a.iter().any(|ra| b.iter().any(|rb| ra.intersects(rb)))
}
