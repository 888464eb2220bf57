//! Pausable millisecond timers
//!
//! Every time-dependent computation (ball integration, build delays, overlay
//! flashing) reads elapsed-while-unpaused ticks from one of these instead of
//! wall clock, so pausing the game is just "stop advancing the timer". The
//! current timestamp is always injected by the caller, which keeps the
//! simulation deterministic under test.

/// A stopwatch over an injected millisecond clock
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    start_ms: u64,
    paused_ms: u64,
    started: bool,
    paused: bool,
}

impl Timer {
    pub fn start(&mut self, now: u64) {
        self.started = true;
        self.paused = false;
        self.start_ms = now;
        self.paused_ms = 0;
    }

    pub fn stop(&mut self) {
        self.started = false;
        self.paused = false;
    }

    pub fn pause(&mut self, now: u64) {
        if self.started && !self.paused {
            self.paused = true;
            self.paused_ms = now.saturating_sub(self.start_ms);
        }
    }

    pub fn unpause(&mut self, now: u64) {
        if self.paused {
            self.paused = false;
            self.start_ms = now.saturating_sub(self.paused_ms);
            self.paused_ms = 0;
        }
    }

    /// Elapsed unpaused milliseconds; 0 when stopped
    pub fn ticks(&self, now: u64) -> u64 {
        if !self.started {
            0
        } else if self.paused {
            self.paused_ms
        } else {
            now.saturating_sub(self.start_ms)
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
