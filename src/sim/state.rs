//! Game state and the match context
//!
//! `MatchState` is the single simulation context object: the top-level loop
//! owns it and every component reads and mutates it through `tick`. There are
//! no process-wide globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::Options;
use crate::consts::*;

use super::ball::{self, Ball};
use super::grid::{Arena, Grid};
use super::growth::{GrowthEvent, Orientation, WallSegment};
use super::timer::Timer;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Data-level freeze; timers hold their ticks
    Paused,
    /// Target percentage reached, waiting for acknowledgement
    LevelComplete,
    /// Out of lives (terminal)
    GameOver,
    /// Level 50 cleared (terminal)
    Victory,
}

/// Aggregate scoreboard state
#[derive(Debug, Clone, Copy)]
pub struct GameState {
    pub level: u32,
    pub lives: u32,
    pub percentage: f32,
    pub phase: GamePhase,
    pub quit: bool,
}

/// Complete match state (deterministic given seed and input)
#[derive(Clone)]
pub struct MatchState {
    pub options: Options,
    pub arena: Arena,
    pub grid: Grid,
    pub walls: Vec<WallSegment>,
    /// The single in-flight growth event, if any
    pub growth: Option<GrowthEvent>,
    pub orientation: Orientation,
    pub balls: Vec<Ball>,
    pub game: GameState,
    /// Elapsed time source for ball integration; restarted every frame
    pub ball_timer: Timer,
    /// Drives the terminal-overlay flash cadence
    pub end_timer: Timer,
    pub(crate) rng: Pcg32,
}

impl MatchState {
    pub fn new(options: &Options, seed: u64) -> Self {
        let arena = Arena::new(options.resolution.0, options.resolution.1);
        let mut state = Self {
            options: options.clone(),
            arena,
            grid: Grid::new(&arena),
            walls: Vec::new(),
            growth: None,
            orientation: Orientation::Vertical,
            balls: Vec::new(),
            game: GameState {
                level: options.start_level,
                lives: options.starting_lives,
                percentage: 0.0,
                phase: GamePhase::Playing,
                quit: false,
            },
            ball_timer: Timer::default(),
            end_timer: Timer::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.spawn_balls();
        state
    }

    /// Ball speed in pixels per second, scaled with the arena
    pub fn ball_speed(&self) -> f32 {
        self.options.ball_speed * BALL_SPEED_MODIFIER * (self.arena.width / BASE_WIDTH)
    }

    /// Replace the ball set with `level` freshly placed balls
    pub fn spawn_balls(&mut self) {
        let speed = self.ball_speed();
        self.balls = ball::spawn_balls(self.game.level, speed, &self.arena, &mut self.rng);
    }

    /// Freeze the match (Escape or focus loss)
    pub fn pause(&mut self, now: u64) {
        self.ball_timer.pause(now);
        if let Some(event) = &self.growth {
            event.pause_delays(&mut self.grid, now);
        }
        self.game.phase = GamePhase::Paused;
    }

    /// Resume from pause; timers continue from their held ticks
    pub fn resume(&mut self, now: u64) {
        self.ball_timer.unpause(now);
        if let Some(event) = &self.growth {
            event.resume_delays(&mut self.grid, now);
        }
        self.game.phase = GamePhase::Playing;
    }

    /// Reset the field for the (already advanced) level counter: fresh
    /// percentage and lives, cleared walls and cells, new ball set.
    pub fn advance_level(&mut self, now: u64) {
        self.game.percentage = 0.0;
        self.game.lives = self.options.starting_lives;
        self.walls.clear();
        self.grid.reset_all();
        self.growth = None;
        self.spawn_balls();
        self.ball_timer.start(now);
        self.game.phase = GamePhase::Playing;
        log::info!(
            "level {} started with {} balls",
            self.game.level,
            self.balls.len()
        );
    }

    /// Enter a terminal phase; balls and builds freeze, the end overlay
    /// starts flashing
    pub fn finish(&mut self, phase: GamePhase, now: u64) {
        self.game.phase = phase;
        self.end_timer.start(now);
        self.ball_timer.stop();
        log::info!("match over: {:?} at level {}", phase, self.game.level);
    }

    /// Whether the terminal overlay shows its primary frame right now
    pub fn end_flash(&self, now: u64) -> bool {
        self.end_timer.ticks(now) % END_FLASH_PERIOD_MS < END_FLASH_ON_MS
    }

    /// True while either growth side is actively building
    pub fn growth_building(&self) -> bool {
        self.growth
            .as_ref()
            .map(GrowthEvent::any_building)
            .unwrap_or(false)
    }
}
