//! Fixed-cadence frame clock
//!
//! The browser calls back whenever it likes; the clock turns elapsed time
//! into whole ticks at a fixed rate and numbers them.

use crate::consts::{MAX_CATCHUP_TICKS, MAX_FRAME_DT};

#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds per tick
    step: f32,
    accumulator: f32,
    /// Number the next tick will carry
    next_frame: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            step: 1.0 / fps.max(1) as f32,
            accumulator: 0.0,
            next_frame: 0,
        }
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Frames handed out so far
    pub fn frames_elapsed(&self) -> u64 {
        self.next_frame
    }

    /// Take the next frame number without touching the accumulator
    pub fn take_frame(&mut self) -> u64 {
        let frame = self.next_frame;
        self.next_frame += 1;
        frame
    }

    /// Feed `dt` seconds of real time and return the frame numbers now due.
    ///
    /// `dt` is capped at [`MAX_FRAME_DT`] and at most [`MAX_CATCHUP_TICKS`]
    /// ticks run per call; any backlog beyond that is dropped.
    pub fn advance(&mut self, dt: f32) -> Vec<u64> {
        if !dt.is_finite() || dt <= 0.0 {
            return Vec::new();
        }
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut due = Vec::new();
        while self.accumulator >= self.step && (due.len() as u32) < MAX_CATCHUP_TICKS {
            self.accumulator -= self.step;
            due.push(self.take_frame());
        }
        if self.accumulator >= self.step {
            self.accumulator = 0.0;
        }
        due
    }
}
