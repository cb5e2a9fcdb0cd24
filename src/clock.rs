//! Fixed-step frame clock
//!
//! Turns elapsed wall-clock time from whatever drives the simulation
//! (animation frames, a timer, a test) into a whole number of ticks.

use crate::consts::MAX_FRAMES_PER_ADVANCE;
use crate::sim::{SimState, TickInput, tick};

/// Accumulates elapsed milliseconds and releases fixed-length frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_ms: f32,
    max_frames: u32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(frame_ms: f32) -> Self {
        Self {
            frame_ms,
            max_frames: MAX_FRAMES_PER_ADVANCE,
            accumulator: 0.0,
        }
    }

    pub fn with_max_frames(mut self, max_frames: u32) -> Self {
        self.max_frames = max_frames.max(1);
        self
    }

    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }

    /// Time carried over to the next advance
    pub fn pending_ms(&self) -> f32 {
        self.accumulator
    }

    /// Add elapsed time and return how many frames are due
    ///
    /// At most `max_frames` are released per call; time beyond that is
    /// dropped so a stalled driver does not trigger a burst of catch-up.
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        if !(elapsed_ms > 0.0) || !(self.frame_ms > 0.0) {
            return 0;
        }
        self.accumulator += elapsed_ms;

        let due = (self.accumulator / self.frame_ms).floor();
        if due > self.max_frames as f32 {
            log::warn!(
                "Frame clock behind by {:.0} frames, dropping {:.0}ms",
                due,
                self.accumulator - self.max_frames as f32 * self.frame_ms
            );
            self.accumulator = 0.0;
            self.max_frames
        } else {
            self.accumulator -= due * self.frame_ms;
            due as u32
        }
    }

    /// Advance the clock and tick `state` for every due frame
    ///
    /// `input` is applied to the first frame only, so a fire command is
    /// never repeated.
    pub fn run(&mut self, state: &mut SimState, elapsed_ms: f32, input: &TickInput) -> u32 {
        let frames = self.advance(elapsed_ms);
        let idle = TickInput {
            fire: None,
            aim: input.aim,
        };
        for frame in 0..frames {
            tick(state, if frame == 0 { input } else { &idle });
        }
        frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(crate::consts::FRAME_DELAY_MS)
    }
}
