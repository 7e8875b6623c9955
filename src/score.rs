//! Score and life-loss bookkeeping.

use crate::config::MAX_LIFE_LOSSES;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    lives_lost: u8,
}

impl Scoreboard {
    pub const fn new() -> Self {
        Self {
            score: 0,
            lives_lost: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Records one life loss. Returns `true` when that loss used up the
    /// last life. Losses beyond the limit are not counted.
    pub fn lose_life(&mut self) -> bool {
        if self.lives_lost < MAX_LIFE_LOSSES {
            self.lives_lost += 1;
        }
        self.is_exhausted()
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn lives_lost(&self) -> u8 {
        self.lives_lost
    }

    pub const fn lives_remaining(&self) -> u8 {
        MAX_LIFE_LOSSES - self.lives_lost
    }

    pub const fn is_exhausted(&self) -> bool {
        self.lives_lost >= MAX_LIFE_LOSSES
    }
}
