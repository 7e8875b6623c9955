//! Collision rules and what each advance step did to each entity.

use heapless::Vec;

use super::{Game, GameState};
use crate::config::{MAX_OBSTACLES, MAX_PROJECTILES, SCORE_PER_HIT, TOP_ROW};
use crate::position::{Cell, PackedPosition};
use crate::render::{Colour, Output};
use crate::rng::RandomSource;

/// Result of advancing one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Stepped one row.
    Moved,
    /// Projectile left the top of the field.
    Expired,
    /// Projectile and obstacle destroyed each other; a fresh obstacle
    /// was placed at the top.
    Scored,
    /// Obstacle fell off the bottom and was replaced at the top.
    Respawned,
    /// Obstacle reached the base; a life was lost and the obstacle
    /// replaced at the top.
    LifeLost,
}

#[derive(Debug, Clone, Default)]
pub struct AdvanceReport<const N: usize> {
    outcomes: Vec<Outcome, N>,
}

pub type ProjectileReport = AdvanceReport<MAX_PROJECTILES>;
pub type ObstacleReport = AdvanceReport<MAX_OBSTACLES>;

impl<const N: usize> AdvanceReport<N> {
    pub const fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        // One outcome per live entity, never more than the store capacity.
        let _ = self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.iter().filter(|&&o| o == outcome).count()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Whether an obstacle that just stepped down to `next` has hit the base
/// centred on `base`: directly above the centre on row 1, or either
/// shoulder on row 0.
pub fn reaches_defense_line(next: Cell, base: u8) -> bool {
    match next.y() {
        1 => next.x() == base,
        0 => next.x() + 1 == base || next.x() == base + 1,
        _ => false,
    }
}

impl<R: RandomSource> Game<R> {
    /// Projectile `projectile` sits on obstacle `obstacle`: remove both,
    /// score, and place a replacement obstacle on the top row.
    pub(super) fn resolve_hit<O: Output + ?Sized>(
        &mut self,
        projectile: usize,
        obstacle: usize,
        out: &mut O,
    ) {
        let Some(cell) = self.projectiles.swap_remove(projectile) else {
            return;
        };
        self.obstacles.swap_remove(obstacle);
        self.repaint(out, cell);

        self.scoreboard.add(SCORE_PER_HIT);
        log::info!("Destroyed! Score: {}", self.scoreboard.score());

        let fresh = self.find_free_cell(TOP_ROW, TOP_ROW);
        self.obstacles.push(fresh);
        out.set_cell(fresh, Colour::OBSTACLE);
        log::debug!("obstacle spawned at {}", PackedPosition::from(fresh));

        self.publish_status(out);
    }

    /// Counts one life loss and moves to `GameOver` on the last one.
    pub(super) fn register_life_loss<O: Output + ?Sized>(&mut self, out: &mut O) {
        if self.scoreboard.lose_life() {
            self.state = GameState::GameOver;
            log::info!("Game Over! Score: {}", self.scoreboard.score());
        } else {
            log::info!("Hit! Lives: {}", self.scoreboard.lives_remaining());
        }
        self.publish_status(out);
    }
}
