//! Ball entities
//!
//! The circular ball is approximated by eleven stacked horizontal rectangles.
//! All collision tests in the game are rect/rect over this silhouette rather
//! than true circle math; the coarse shape is part of the game's collision
//! feel and must not be refined.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::grid::Arena;
use super::rect::{Rect, boxes_collide};

/// Silhouette rows as (width, height) fractions of the ball extent, top to
/// bottom. At the base extent of 20px the rows are
/// 6/10/14/16/18/20/18/16/14/10/6 wide over heights 1/1/1/2/2/6/2/2/1/1/1.
pub const SILHOUETTE: [(f32, f32); 11] = [
    (0.30, 0.05),
    (0.50, 0.05),
    (0.70, 0.05),
    (0.80, 0.10),
    (0.90, 0.10),
    (1.00, 0.30),
    (0.90, 0.10),
    (0.80, 0.10),
    (0.70, 0.05),
    (0.50, 0.05),
    (0.30, 0.05),
];

/// A ball entity
#[derive(Debug, Clone)]
pub struct Ball {
    /// Top-left corner of the silhouette's bounding square
    pub pos: Vec2,
    /// Velocity in pixels per second
    pub vel: Vec2,
    /// Bounding square edge length (the silhouette spans this on both axes)
    pub radius: f32,
    /// Stacked-rect hitbox, recomputed on every position change
    pub hitbox: [Rect; 11],
}

impl Ball {
    pub fn new(pos: Vec2, speed: f32, radius: f32) -> Self {
        let mut ball = Self {
            pos,
            vel: Vec2::splat(speed),
            radius,
            hitbox: [Rect::default(); 11],
        };
        ball.shift_boxes();
        ball
    }

    /// Rebuild the hitbox stack at the current position
    pub fn shift_boxes(&mut self) {
        let mut row_offset = 0.0;
        for (slot, (w_frac, h_frac)) in self.hitbox.iter_mut().zip(SILHOUETTE.iter()) {
            let w = self.radius * w_frac;
            let h = self.radius * h_frac;
            *slot = Rect::new(
                self.pos.x + (self.radius - w) / 2.0,
                self.pos.y + row_offset,
                w,
                h,
            );
            row_offset += h;
        }
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.shift_boxes();
    }

    /// Advance by `dt` seconds, reflecting off the arena boundary. The clamp
    /// keeps the ball inside the playfield even on large steps (reflection,
    /// not tunneling).
    pub fn integrate(&mut self, dt: f32, arena: &Arena) {
        self.pos.x += self.vel.x * dt;
        if self.pos.x <= arena.left() || self.pos.x + self.radius >= arena.right() {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(arena.left(), arena.right() - self.radius);
        }

        self.pos.y += self.vel.y * dt;
        if self.pos.y <= arena.top() || self.pos.y + self.radius >= arena.bottom() {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(arena.top(), arena.bottom() - self.radius);
        }

        self.shift_boxes();
    }
}

/// Push two overlapping coordinates one unit apart so separated balls do not
/// re-collide on the next frame
pub fn nudge_apart(pos: &mut f32, other: &mut f32) {
    use crate::consts::SEPARATION_NUDGE;
    if *pos < *other {
        *pos -= SEPARATION_NUDGE;
        *other += SEPARATION_NUDGE;
    } else {
        *pos += SEPARATION_NUDGE;
        *other -= SEPARATION_NUDGE;
    }
}

/// Place `count` balls at uniformly random in-bounds positions, rejecting
/// candidates that overlap an already-placed ball.
///
/// The rejection loop is unbounded; on an arena crowded far beyond the
/// maximum 50 balls it could in principle never terminate.
pub fn spawn_balls(count: u32, speed: f32, arena: &Arena, rng: &mut Pcg32) -> Vec<Ball> {
    let mut balls: Vec<Ball> = Vec::with_capacity(count as usize);
    let radius = arena.ball_radius;
    for _ in 0..count {
        let mut ball = Ball::new(Vec2::ZERO, speed, radius);
        loop {
            let x = rng.random_range(arena.left() + radius..=arena.right() - radius);
            let y = rng.random_range(arena.top() + radius..=arena.bottom() - radius);
            ball.set_position(Vec2::new(x, y));
            if balls
                .iter()
                .all(|other| !boxes_collide(&ball.hitbox, &other.hitbox))
            {
                break;
            }
        }
        balls.push(ball);
    }
    balls
}
