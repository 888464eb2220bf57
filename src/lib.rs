//! Gridlock - a territory-capture arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, wall growth, capture, physics, game state)
//! - `config`: Command-line options and validation
//! - `platform`: Clock/input/render seams the core is driven through

pub mod config;
pub mod platform;
pub mod sim;

pub use config::{BallColour, Options};

/// Game configuration constants
pub mod consts {
    /// Reference window size the layout constants below are expressed in.
    /// Other 4:3 resolutions scale the arena uniformly by `width / BASE_WIDTH`.
    pub const BASE_WIDTH: f32 = 800.0;
    pub const BASE_HEIGHT: f32 = 600.0;

    /// Grid cell edge length at base resolution
    pub const GRID_DIM: f32 = 25.0;
    /// Playfield inset from the window edges at base resolution
    pub const GRID_X_OFFSET: f32 = 50.0;
    pub const GRID_Y_OFFSET: f32 = 100.0;

    /// Ball hitbox extent at base resolution (the silhouette spans this many
    /// pixels on both axes)
    pub const BALL_RADIUS: f32 = 20.0;
    /// Ball speed in pixels per second at multiplier 1.0
    pub const BALL_SPEED_MODIFIER: f32 = 150.0;

    /// Wall build stagger: a pending cell becomes ready once its delay timer
    /// exceeds `distance * BUILD_SPEED * BUILD_SPEED_MODIFIER` milliseconds
    pub const BUILD_SPEED: f32 = 0.5;
    pub const BUILD_SPEED_MODIFIER: f32 = 400.0;

    /// Captured percentage required to finish a level
    pub const PERCENTAGE_TARGET: f32 = 75.0;
    /// Final level; completing it wins the game
    pub const MAX_LEVEL: u32 = 50;

    /// Frame pacing target for the display loop
    pub const FPS_CAP: u64 = 60;

    /// Center-delta magnitude below which a wall hit counts as an ambiguous
    /// corner and reflects on both axes. Tunable.
    pub const CORNER_EPSILON: f32 = 1.0;
    /// Separation applied between overlapping balls after resolution. Tunable.
    pub const SEPARATION_NUDGE: f32 = 1.0;

    /// End-of-game overlay flash cadence
    pub const END_FLASH_PERIOD_MS: u64 = 1500;
    pub const END_FLASH_ON_MS: u64 = 750;
}
