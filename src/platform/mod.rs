//! Platform seams
//!
//! The simulation consumes three things from its surroundings: a monotonic
//! millisecond clock, a source of discrete input events, and a render sink it
//! hands the match state to once per frame. Everything here is a trait so the
//! core stays agnostic to how frames are actually displayed; the bundled
//! implementations cover headless and log-only runs.

use std::collections::VecDeque;
use std::time::Instant;

use thiserror::Error;

use crate::sim::{FrameInput, GamePhase, MatchState, Orientation};

/// Unrecoverable platform failures: caught once at the top level, printed,
/// process exits with status 1
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("display failure: {0}")]
    Display(String),
}

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock anchored at construction
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
}

/// Discrete input events, as a window backend would deliver them
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton, x: f32, y: f32 },
    KeyDown(Key),
    FocusChange { gained: bool },
    Quit,
}

/// Polled event source
pub trait EventSource {
    fn poll(&mut self) -> Option<InputEvent>;
}

/// Drain a source into one frame's worth of decoded input
pub fn gather_input(source: &mut dyn EventSource) -> FrameInput {
    let mut input = FrameInput::default();
    while let Some(event) = source.poll() {
        match event {
            InputEvent::PointerDown {
                button: PointerButton::Left,
                x,
                y,
            } => input.clicks.push((x, y)),
            InputEvent::PointerDown {
                button: PointerButton::Right,
                ..
            } => input.toggle_orientation = true,
            InputEvent::KeyDown(Key::Escape) => input.pause = true,
            InputEvent::FocusChange { gained } => input.focus_lost |= !gained,
            InputEvent::Quit => input.quit = true,
        }
    }
    input
}

/// Queue-backed source for tests and scripted runs
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }
}

/// Per-frame render target. The sink reads whatever it needs from the match
/// state: wall rects, ball positions, HUD digits, the overlay phase and the
/// orientation cursor hint.
pub trait RenderSink {
    fn frame(&mut self, state: &MatchState, now: u64) -> Result<(), PlatformError>;
}

/// Discards every frame (headless harness)
pub struct NullSink;

impl RenderSink for NullSink {
    fn frame(&mut self, _state: &MatchState, _now: u64) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// Logs HUD changes instead of drawing
pub struct LogSink {
    last: Option<(u32, u32, u32, GamePhase, Orientation)>,
}

impl LogSink {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for LogSink {
    fn frame(&mut self, state: &MatchState, _now: u64) -> Result<(), PlatformError> {
        let hud = (
            state.game.level,
            state.game.lives,
            state.game.percentage as u32,
            state.game.phase,
            state.orientation,
        );
        if self.last != Some(hud) {
            log::info!(
                "level {:>2}  lives {:>2}  captured {:>3}%  walls {:>3}  [{:?}/{:?}]",
                hud.0,
                hud.1,
                hud.2,
                state.walls.len(),
                hud.3,
                hud.4,
            );
            self.last = Some(hud);
        }
        Ok(())
    }
}
