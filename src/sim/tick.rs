//! The per-frame simulation step
//!
//! One call per displayed frame: input -> build -> physics -> capture ->
//! state evaluation. Nothing here suspends; pause and the terminal end
//! screens are phases of the same step, not separate loops.

use crate::consts::*;

use super::capture;
use super::grid::Side;
use super::growth;
use super::physics;
use super::rect::boxes_collide;
use super::state::{GamePhase, MatchState};

/// Input gathered for a single frame (discrete events, already decoded)
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Left pointer-down positions, in window pixels
    pub clicks: Vec<(f32, f32)>,
    /// Right pointer-down: flip the growth orientation
    pub toggle_orientation: bool,
    /// Escape: pause toggle / acknowledge / leave end screen
    pub pause: bool,
    /// Window lost focus
    pub focus_lost: bool,
    /// Close request from the platform
    pub quit: bool,
    /// Let the built-in pilot play this frame (demo and headless runs)
    pub autoplay: bool,
}

/// Advance the match by one frame
pub fn tick(state: &mut MatchState, input: &FrameInput, now: u64) {
    if input.quit {
        state.game.quit = true;
    }

    let mut input = input.clone();
    if input.autoplay {
        autopilot(state, &mut input, now);
    }

    match state.game.phase {
        GamePhase::GameOver | GamePhase::Victory => {
            // Terminal: keep flashing until Escape or a quit request
            if input.pause {
                state.game.quit = true;
            }
            return;
        }
        GamePhase::Paused => {
            if input.pause {
                state.resume(now);
            }
            return;
        }
        GamePhase::LevelComplete => {
            if input.pause {
                state.advance_level(now);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    if input.pause || input.focus_lost {
        state.pause(now);
        return;
    }

    if input.toggle_orientation {
        state.orientation = state.orientation.toggled();
    }

    // A new growth may only start once the previous event is fully drained
    for &(x, y) in &input.clicks {
        if state.growth.is_none()
            && let Some(seed) = state.arena.cell_at(x, y)
        {
            state.growth =
                growth::start_growth(&mut state.grid, &state.walls, seed, state.orientation, now);
        }
    }

    // Promote pending cells whose stagger delay elapsed
    let finished = if let Some(event) = state.growth.as_mut() {
        growth::build_step(event, &mut state.grid, &mut state.walls, now);
        event.finished()
    } else {
        false
    };
    if finished {
        state.growth = None;
    }

    // Physics: integrate, fresh-wall hits, bounces, ball-ball
    let dt = state.ball_timer.ticks(now) as f32 / 1000.0;
    state.ball_timer.start(now);
    for i in 0..state.balls.len() {
        state.balls[i].integrate(dt, &state.arena);

        // Fresh (buffered) wall: exactly one life per collision event; the
        // cancelled lane stops the event from firing again next frame
        let mut retire = false;
        if let Some(event) = state.growth.as_mut() {
            let hit = [Side::Black, Side::White].into_iter().find(|&side| {
                boxes_collide(
                    &state.balls[i].hitbox,
                    &event.buffer_rects(side, &state.grid),
                )
            });
            if let Some(side) = hit {
                let lane = event.lane_mut(side);
                if lane.is_vulnerable() {
                    state.game.lives = state.game.lives.saturating_sub(1);
                    lane.cancel();
                }
                retire = event.finished();
            }
        }
        if retire {
            state.growth = None;
        }

        if let Some(wall) = physics::first_wall_hit(&state.balls[i], &state.walls) {
            physics::resolve_wall_bounce(&mut state.balls[i], &wall, &state.arena);
        }

        for j in 0..state.balls.len() {
            if i == j {
                continue;
            }
            let (ball, other) = pair_mut(&mut state.balls, i, j);
            if boxes_collide(&ball.hitbox, &other.hitbox) {
                physics::resolve_ball_collision(ball, other);
                // Later pairs in this pass must see the updated geometry
                other.integrate(dt, &state.arena);
            }
        }
    }

    // Capture: fill, then convert once no wall is mid-growth
    let building = state.growth_building();
    capture::recompute(
        &mut state.grid,
        &state.balls,
        &mut state.walls,
        building,
        &state.arena,
    );

    // Level state machine
    state.game.percentage = state.grid.built_percentage();
    if state.game.percentage > PERCENTAGE_TARGET {
        if state.game.level + 1 > MAX_LEVEL {
            state.finish(GamePhase::Victory, now);
        } else {
            state.game.level += 1;
            state.ball_timer.pause(now);
            state.game.phase = GamePhase::LevelComplete;
        }
    }
    if state.game.lives == 0 {
        state.finish(GamePhase::GameOver, now);
    }
}

fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

/// Built-in pilot for demo and headless runs: seeds a wall every second or
/// so, acknowledges level screens, leaves the end screen after the flash has
/// shown.
fn autopilot(state: &mut MatchState, input: &mut FrameInput, now: u64) {
    use rand::Rng;
    match state.game.phase {
        GamePhase::Playing => {
            if state.growth.is_none() && state.rng.random_range(0..60u32) == 0 {
                if state.rng.random_range(0..4u32) == 0 {
                    input.toggle_orientation = true;
                }
                let x = state
                    .rng
                    .random_range(state.arena.left()..state.arena.right());
                let y = state
                    .rng
                    .random_range(state.arena.top()..state.arena.bottom());
                input.clicks.push((x, y));
            }
        }
        GamePhase::LevelComplete | GamePhase::Paused => input.pause = true,
        GamePhase::GameOver | GamePhase::Victory => {
            if state.end_timer.ticks(now) > 2 * END_FLASH_PERIOD_MS {
                input.pause = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::sim::ball::Ball;
    use crate::sim::growth::GrowthEvent;
    use glam::Vec2;

    fn state() -> MatchState {
        let mut s = MatchState::new(&Options::default(), 42);
        // Pin the ball somewhere predictable, far from the test cells
        s.balls = vec![Ball::new(Vec2::new(650.0, 420.0), 0.0, s.arena.ball_radius)];
        s.balls[0].vel = Vec2::ZERO;
        s
    }

    /// Growth event whose black side has one fresh (buffered) cell
    fn buffered_event(s: &mut MatchState, col: usize, row: usize) -> GrowthEvent {
        let mut event = GrowthEvent::default();
        event.black.buffer.push((col, row));
        event.black.building = true;
        s.grid.at_mut(col, row).built = true;
        event
    }

    #[test]
    fn test_click_starts_growth_and_builds_over_time() {
        let mut s = state();
        let rect = s.arena.cell_rect(13, 8);
        let input = FrameInput {
            clicks: vec![(rect.x + 1.0, rect.y + 1.0)],
            ..Default::default()
        };
        tick(&mut s, &input, 0);
        assert!(s.growth.is_some());
        // Strictly-greater delay test: nothing is ready at the click instant
        assert_eq!(s.walls.len(), 0);

        tick(&mut s, &FrameInput::default(), 16);
        assert_eq!(s.walls.len(), 1);
        assert!(s.grid.at(13, 8).built);

        // Second click while the event is live is a no-op
        let other = s.arena.cell_rect(3, 3);
        let input = FrameInput {
            clicks: vec![(other.x + 1.0, other.y + 1.0)],
            ..Default::default()
        };
        tick(&mut s, &input, 32);
        assert!(!s.grid.at(3, 3).active);

        // Whole column finishes and the event retires
        tick(&mut s, &FrameInput::default(), 10_000);
        assert!(s.growth.is_none());
        assert_eq!(s.walls.len(), s.grid.rows());
    }

    #[test]
    fn test_click_outside_playfield_is_ignored() {
        let mut s = state();
        let input = FrameInput {
            clicks: vec![(10.0, 10.0)],
            ..Default::default()
        };
        tick(&mut s, &input, 0);
        assert!(s.growth.is_none());
    }

    #[test]
    fn test_orientation_toggles_on_right_click() {
        let mut s = state();
        assert_eq!(s.orientation, crate::sim::Orientation::Vertical);
        let input = FrameInput {
            toggle_orientation: true,
            ..Default::default()
        };
        tick(&mut s, &input, 0);
        assert_eq!(s.orientation, crate::sim::Orientation::Horizontal);
    }

    #[test]
    fn test_buffer_hit_costs_one_life_without_double_deduct() {
        let mut s = state();
        let (col, row) = s.arena.cell_at(650.0, 420.0).unwrap();
        let event = buffered_event(&mut s, col, row);
        s.walls.push(crate::sim::WallSegment {
            rect: s.grid.at(col, row).rect,
            side: Side::Black,
        });
        s.growth = Some(event);

        tick(&mut s, &FrameInput::default(), 16);
        assert_eq!(s.game.lives, 4);
        // Lane cancelled and event retired in the same step
        assert!(s.growth.is_none());

        // The segment it bounced off is permanent; staying on it must not
        // deduct again
        tick(&mut s, &FrameInput::default(), 32);
        assert_eq!(s.game.lives, 4);
    }

    #[test]
    fn test_five_hits_reach_game_over_never_negative() {
        let mut s = state();
        let (col, row) = s.arena.cell_at(650.0, 420.0).unwrap();
        for frame in 0..6u64 {
            let event = buffered_event(&mut s, col, row);
            s.growth = Some(event);
            // Keep the ball parked on the cell despite earlier bounces
            s.balls[0].set_position(Vec2::new(650.0, 420.0));
            s.balls[0].vel = Vec2::ZERO;
            tick(&mut s, &FrameInput::default(), frame * 16);
        }
        assert_eq!(s.game.lives, 0);
        assert_eq!(s.game.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut s = state();
        s.balls[0].vel = Vec2::new(75.0, 75.0);
        tick(&mut s, &FrameInput::default(), 0);
        tick(&mut s, &FrameInput::default(), 16);
        let pause = FrameInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut s, &pause, 32);
        assert_eq!(s.game.phase, GamePhase::Paused);

        let frozen = s.balls[0].pos;
        tick(&mut s, &FrameInput::default(), 5_000);
        assert_eq!(s.balls[0].pos, frozen);

        tick(&mut s, &pause, 6_000);
        assert_eq!(s.game.phase, GamePhase::Playing);
        // Resumed integration uses held ticks, not the wall-clock gap
        tick(&mut s, &FrameInput::default(), 6_016);
        assert!((s.balls[0].pos - frozen).length() < 10.0);
    }

    #[test]
    fn test_level_complete_then_advance() {
        let mut s = state();
        for cell in s.grid.cells_mut() {
            cell.built = true;
            cell.complete = true;
            cell.filled = true;
        }
        tick(&mut s, &FrameInput::default(), 16);
        assert_eq!(s.game.phase, GamePhase::LevelComplete);
        assert_eq!(s.game.level, 2);
        assert!(s.game.percentage > PERCENTAGE_TARGET);

        // Escape acknowledges and resets the field for level 2
        let ack = FrameInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut s, &ack, 32);
        assert_eq!(s.game.phase, GamePhase::Playing);
        assert_eq!(s.game.percentage, 0.0);
        assert_eq!(s.balls.len(), 2);
        assert_eq!(s.grid.built_count(), 0);
    }

    #[test]
    fn test_level_fifty_completion_is_victory() {
        let mut s = state();
        s.game.level = MAX_LEVEL;
        for cell in s.grid.cells_mut() {
            cell.built = true;
            cell.complete = true;
            cell.filled = true;
        }
        tick(&mut s, &FrameInput::default(), 16);
        assert_eq!(s.game.phase, GamePhase::Victory);
        assert_eq!(s.game.level, MAX_LEVEL);

        // Terminal phase: Escape quits instead of resuming
        let esc = FrameInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut s, &esc, 100);
        assert!(s.game.quit);
    }

    #[test]
    fn test_focus_loss_pauses() {
        let mut s = state();
        let input = FrameInput {
            focus_lost: true,
            ..Default::default()
        };
        tick(&mut s, &input, 0);
        assert_eq!(s.game.phase, GamePhase::Paused);
    }
}
