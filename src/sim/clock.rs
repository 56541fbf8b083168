//! Fixed-timestep accumulator
//!
//! Real frame time goes in; a whole number of simulation steps comes out.
//! The simulation itself never sees variable time.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedClock {
    step: f64,
    max_substeps: u32,
    max_frame: f64,
    accumulator: f64,
    /// Steps handed out since creation
    total_steps: u64,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS, MAX_FRAME_DT)
    }
}

impl FixedClock {
    pub fn new(step: f32, max_substeps: u32, max_frame: f32) -> Self {
        Self {
            step: step as f64,
            max_substeps: max_substeps.max(1),
            max_frame: max_frame as f64,
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    /// Seconds per step
    pub fn step(&self) -> f32 {
        self.step as f32
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Leftover time as a fraction of one step (for render interpolation)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).min(1.0) as f32
    }

    /// Add real elapsed time and return how many steps to run now.
    ///
    /// Elapsed time is capped per frame, and at most `max_substeps` steps are
    /// returned; any whole steps left over stay in the accumulator for the
    /// next frame.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let elapsed = (elapsed as f64).clamp(0.0, self.max_frame);
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            log::trace!("Carrying {:.4}s of simulation backlog", self.accumulator);
        }

        self.total_steps += steps as u64;
        steps
    }

    /// Forget any accumulated time (after a restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
