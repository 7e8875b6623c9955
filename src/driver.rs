//! The polling loop body: one input, then due projectile and obstacle steps.
//!
//! Nothing here blocks. The caller samples the clock and input once per
//! iteration and hands both to [`GameLoop::poll`], which returns at once if
//! no timer is due.

use crate::clock::elapsed_ms;
use crate::config::Timing;
use crate::game::{Direction, Game, ObstacleReport, ProjectileReport};
use crate::input::Command;
use crate::render::Output;
use crate::rng::RandomSource;

/// Fires once `period` ms have passed since it was last armed. Re-arms at
/// the time it fired, so a late poll never queues extra firings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalTimer {
    last_ms: u32,
}

impl IntervalTimer {
    pub const fn new(now_ms: u32) -> Self {
        Self { last_ms: now_ms }
    }

    pub fn arm(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }

    pub fn fire_if_due(&mut self, now_ms: u32, period_ms: u32) -> bool {
        if elapsed_ms(now_ms, self.last_ms) >= period_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// What one [`GameLoop::poll`] did.
#[derive(Debug, Clone, Default)]
pub struct Step {
    /// The command applied this iteration, if it had any effect.
    pub applied: Option<Command>,
    pub projectiles: Option<ProjectileReport>,
    pub obstacles: Option<ObstacleReport>,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct GameLoop {
    timing: Timing,
    projectile_timer: IntervalTimer,
    obstacle_timer: IntervalTimer,
    paused: bool,
}

impl GameLoop {
    pub fn new(timing: Timing, now_ms: u32) -> Self {
        Self {
            timing,
            projectile_timer: IntervalTimer::new(now_ms),
            obstacle_timer: IntervalTimer::new(now_ms),
            paused: false,
        }
    }

    /// Re-arms both timers and unpauses; call when a new game starts.
    pub fn restart(&mut self, now_ms: u32) {
        self.projectile_timer.arm(now_ms);
        self.obstacle_timer.arm(now_ms);
        self.paused = false;
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn poll<R, O>(
        &mut self,
        game: &mut Game<R>,
        now_ms: u32,
        command: Option<Command>,
        out: &mut O,
    ) -> Step
    where
        R: RandomSource,
        O: Output + ?Sized,
    {
        let mut step = Step::default();

        if let Some(command) = command {
            if self.apply(game, command, now_ms, out) {
                step.applied = Some(command);
            }
        }

        if self.paused || game.is_game_over() {
            step.game_over = game.is_game_over();
            return step;
        }

        if self
            .projectile_timer
            .fire_if_due(now_ms, self.timing.projectile_interval_ms)
        {
            step.projectiles = Some(game.advance_projectiles(out));
        }

        if !game.is_game_over()
            && self
                .obstacle_timer
                .fire_if_due(now_ms, game.obstacle_interval_ms(&self.timing))
        {
            game.record_obstacle_tick(&self.timing);
            step.obstacles = Some(game.advance_obstacles(out));
        }

        step.game_over = game.is_game_over();
        step
    }

    fn apply<R, O>(&mut self, game: &mut Game<R>, command: Command, now_ms: u32, out: &mut O) -> bool
    where
        R: RandomSource,
        O: Output + ?Sized,
    {
        match command {
            Command::TogglePause => {
                self.paused = !self.paused;
                if !self.paused {
                    self.projectile_timer.arm(now_ms);
                    self.obstacle_timer.arm(now_ms);
                }
                log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
                true
            }
            _ if self.paused => false,
            Command::MoveLeft => game.move_base(Direction::Left, out),
            Command::MoveRight => game.move_base(Direction::Right, out),
            Command::Fire => game.fire_projectile(out),
        }
    }
}
