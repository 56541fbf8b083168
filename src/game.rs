//! Frame-level driver
//!
//! Owns the run state and the fixed-step clock. Commands that act on the whole
//! session (quit, restart) are handled once per frame, outside the inner
//! fixed-step loop.

use crate::sim::{FixedClock, FrameSnapshot, GameState, RunPhase, TickInput, run, tick};
use crate::tuning::Tuning;

/// Input sampled once per real frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Buttons held this frame, fed to every tick the frame runs
    pub held: TickInput,
    /// Start a new run (honored in any phase)
    pub restart: bool,
    /// End the session
    pub quit: bool,
}

/// What the caller should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    clock: FixedClock,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed, tuning),
            clock: FixedClock::default(),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn clock(&self) -> &FixedClock {
        &self.clock
    }

    /// Process one real frame of `elapsed` seconds.
    ///
    /// Returns the number of simulation steps that ran alongside the outcome.
    pub fn frame(&mut self, elapsed: f32, input: &FrameInput) -> (FrameOutcome, u32) {
        if input.quit {
            log::info!("Quit requested");
            return (FrameOutcome::Quit, 0);
        }

        if input.restart {
            run::restart(&mut self.state);
            self.clock.reset();
        }

        let steps = self.clock.advance(elapsed);
        let dt = self.clock.step();
        for _ in 0..steps {
            tick(&mut self.state, &input.held, dt);
        }

        (FrameOutcome::Continue, steps)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }
}
