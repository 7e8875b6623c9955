//! Score-driven shortening of the obstacle interval.

use crate::config::Timing;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Difficulty {
    offset_ms: u32,
}

impl Difficulty {
    pub const fn new() -> Self {
        Self { offset_ms: 0 }
    }

    /// Called each time the obstacle timer fires. Past the score threshold
    /// every firing shaves another step off the interval, up to the cap.
    pub fn on_obstacle_tick(&mut self, score: u32, timing: &Timing) {
        if score > timing.difficulty_threshold {
            self.offset_ms = self
                .offset_ms
                .saturating_add(timing.difficulty_step_ms)
                .min(timing.max_difficulty_offset_ms);
        }
    }

    pub const fn offset_ms(&self) -> u32 {
        self.offset_ms
    }

    pub fn obstacle_interval_ms(&self, timing: &Timing) -> u32 {
        timing
            .obstacle_interval_ms
            .saturating_sub(self.offset_ms)
            .max(timing.obstacle_floor_ms())
    }

    pub fn reset(&mut self) {
        self.offset_ms = 0;
    }
}
