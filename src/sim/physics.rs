//! Ball/wall and ball/ball collision resolution
//!
//! Bounces are sign-flip reflections with positional correction, not
//! momentum-conserving impacts. All tests run over the stacked-rect ball
//! silhouette; the first overlapping segment wins.

use glam::Vec2;

use crate::consts::*;

use super::ball::{Ball, nudge_apart};
use super::grid::Arena;
use super::growth::WallSegment;

/// First permanent segment overlapping the ball's hitbox
pub fn first_wall_hit(ball: &Ball, walls: &[WallSegment]) -> Option<WallSegment> {
    walls
        .iter()
        .copied()
        .find(|w| ball.hitbox.iter().any(|r| r.intersects(&w.rect)))
}

/// Clamp where the lower bound wins on an inverted span (a wall flush with
/// the arena boundary can produce lo > hi)
fn clamp_span(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Bounce a ball off a permanent wall segment.
///
/// The collision axis is the one with the larger center-to-center delta; that
/// axis's velocity flips and the ball is clamped to the wall's outer edge
/// plus a small offset so it cannot re-collide next frame. A near-zero delta
/// is an ambiguous corner hit: both axes flip and only the hitbox re-seats.
pub fn resolve_wall_bounce(ball: &mut Ball, wall: &WallSegment, arena: &Arena) {
    let ball_center = ball.pos + Vec2::splat(ball.radius / 2.0);
    let delta = ball_center - wall.rect.center();
    let offset = ball.radius / 10.0;

    if delta.length() < CORNER_EPSILON {
        ball.vel = -ball.vel;
        ball.shift_boxes();
        return;
    }

    if delta.x.abs() > delta.y.abs() {
        ball.vel.x = -ball.vel.x;
        if delta.x >= 0.0 {
            ball.pos.x = clamp_span(ball.pos.x, wall.rect.right(), arena.right() - ball.radius);
            ball.pos.x += offset;
        } else {
            ball.pos.x = clamp_span(ball.pos.x, arena.left(), wall.rect.x);
            ball.pos.x -= offset;
        }
    } else {
        ball.vel.y = -ball.vel.y;
        if delta.y >= 0.0 {
            ball.pos.y = clamp_span(ball.pos.y, wall.rect.bottom(), arena.bottom() - ball.radius);
            ball.pos.y += offset;
        } else {
            ball.pos.y = clamp_span(ball.pos.y, arena.top(), wall.rect.y);
            ball.pos.y -= offset;
        }
    }
    ball.shift_boxes();
}

/// Resolve two overlapping balls.
///
/// Opposing x-velocities flip on x; otherwise opposing y-velocities flip on
/// y; otherwise (the rare same-sign corner overlap) both axes flip on both
/// balls. Overlap is resolved with a one-unit separation nudge; the caller
/// re-integrates `other` immediately so later pairs in the same pass see
/// updated geometry.
pub fn resolve_ball_collision(ball: &mut Ball, other: &mut Ball) {
    let x_opposed = (ball.vel.x > 0.0 && other.vel.x < 0.0)
        || (ball.vel.x < 0.0 && other.vel.x > 0.0);
    let y_opposed = (ball.vel.y > 0.0 && other.vel.y < 0.0)
        || (ball.vel.y < 0.0 && other.vel.y > 0.0);

    if x_opposed {
        ball.vel.x = -ball.vel.x;
        other.vel.x = -other.vel.x;
        nudge_apart(&mut ball.pos.x, &mut other.pos.x);
    } else if y_opposed {
        ball.vel.y = -ball.vel.y;
        other.vel.y = -other.vel.y;
        nudge_apart(&mut ball.pos.y, &mut other.pos.y);
    } else {
        ball.vel = -ball.vel;
        other.vel = -other.vel;
        nudge_apart(&mut ball.pos.x, &mut other.pos.x);
        nudge_apart(&mut ball.pos.y, &mut other.pos.y);
    }

    ball.shift_boxes();
    other.shift_boxes();
}
