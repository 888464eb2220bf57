//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is injected as millisecond timestamps, never read from the system
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ball;
pub mod capture;
pub mod grid;
pub mod growth;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;
pub mod timer;

pub use ball::Ball;
pub use grid::{Arena, Cell, Grid, Side};
pub use growth::{GrowthEvent, Orientation, WallSegment};
pub use rect::Rect;
pub use state::{GamePhase, GameState, MatchState};
pub use tick::{FrameInput, tick};
pub use timer::Timer;
