//! One game session: base, projectiles, obstacles, score and lives.
//!
//! All gameplay state lives in [`Game`], owned by the caller's loop. Every
//! mutation paints the cells it touched through the supplied [`Output`].

mod base;
mod collision;
mod obstacles;
mod projectiles;

pub use base::Direction;
pub use collision::{AdvanceReport, ObstacleReport, Outcome, ProjectileReport, reaches_defense_line};

use crate::config::{BASE_START, MAX_OBSTACLES, MAX_PROJECTILES, Timing};
use crate::difficulty::Difficulty;
use crate::position::Cell;
use crate::render::{self, Colour, Output};
use crate::rng::RandomSource;
use crate::score::Scoreboard;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    Playing,
    GameOver,
}

pub struct Game<R> {
    rng: R,
    base: u8,
    projectiles: Store<MAX_PROJECTILES>,
    obstacles: Store<MAX_OBSTACLES>,
    scoreboard: Scoreboard,
    state: GameState,
    difficulty: Difficulty,
}

impl<R: RandomSource> Game<R> {
    /// Creates a session and starts its first game.
    pub fn new<O: Output + ?Sized>(rng: R, out: &mut O) -> Self {
        let mut game = Self::empty(rng);
        game.new_game(out);
        game
    }

    /// Starts a game with a fixed obstacle layout instead of a random one.
    ///
    /// Panics if `layout` holds more than the obstacle capacity or repeats
    /// a cell.
    pub fn with_obstacles<O: Output + ?Sized>(rng: R, layout: &[Cell], out: &mut O) -> Self {
        let mut game = Self::empty(rng);
        game.reset_session();
        assert!(layout.len() <= MAX_OBSTACLES, "too many obstacles");
        for &cell in layout {
            assert!(!game.obstacles.contains(cell), "duplicate obstacle at {}", cell);
            game.obstacles.push(cell);
        }
        game.redraw_all(out);
        game
    }

    fn empty(rng: R) -> Self {
        Self {
            rng,
            base: BASE_START,
            projectiles: Store::new(),
            obstacles: Store::new(),
            scoreboard: Scoreboard::new(),
            state: GameState::Playing,
            difficulty: Difficulty::new(),
        }
    }

    /// Resets base, score, lives and entities, places a full set of
    /// obstacles and redraws everything.
    pub fn new_game<O: Output + ?Sized>(&mut self, out: &mut O) {
        self.reset_session();
        self.spawn_initial(MAX_OBSTACLES);
        self.redraw_all(out);
        log::info!("New game: {} obstacles", self.obstacles.len());
    }

    fn reset_session(&mut self) {
        self.base = BASE_START;
        self.projectiles.clear();
        self.obstacles.clear();
        self.scoreboard.reset();
        self.difficulty.reset();
        self.state = GameState::Playing;
    }

    /// `true` once the last life is gone. Seeing the terminal state also
    /// drops the difficulty offset so the next game starts at base speed.
    pub fn is_game_over(&mut self) -> bool {
        if self.state == GameState::GameOver {
            self.difficulty.reset();
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn lives_remaining(&self) -> u8 {
        self.scoreboard.lives_remaining()
    }

    pub fn base_position(&self) -> u8 {
        self.base
    }

    pub fn projectiles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.projectiles.iter()
    }

    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.obstacles.iter()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Called by the driver each time the obstacle timer fires.
    pub fn record_obstacle_tick(&mut self, timing: &Timing) {
        self.difficulty.on_obstacle_tick(self.scoreboard.score(), timing);
    }

    pub fn obstacle_interval_ms(&self, timing: &Timing) -> u32 {
        self.difficulty.obstacle_interval_ms(timing)
    }

    pub fn difficulty_offset_ms(&self) -> u32 {
        self.difficulty.offset_ms()
    }

    fn publish_status<O: Output + ?Sized>(&self, out: &mut O) {
        out.status_changed(self.score(), self.lives_remaining());
    }

    fn redraw_all<O: Output + ?Sized>(&self, out: &mut O) {
        out.clear_all();
        render::draw_base(out, self.base, Colour::BASE);
        for cell in self.obstacles.iter() {
            out.set_cell(cell, Colour::OBSTACLE);
        }
        for cell in self.projectiles.iter() {
            out.set_cell(cell, Colour::PROJECTILE);
        }
        self.publish_status(out);
    }

    /// Paints whatever currently occupies `cell`. The base is drawn over
    /// projectiles, projectiles over obstacles.
    fn repaint<O: Output + ?Sized>(&self, out: &mut O, cell: Cell) {
        let colour = if render::base_cells(self.base).any(|c| c == cell) {
            Colour::BASE
        } else if self.projectiles.contains(cell) {
            Colour::PROJECTILE
        } else if self.obstacles.contains(cell) {
            Colour::OBSTACLE
        } else {
            Colour::Black
        };
        out.set_cell(cell, colour);
    }
}


#[cfg(test)]
mod tests {
    extern crate std;
    use std::collections::HashSet;

    use super::testing::{Canvas, Scripted, game};
    use super::*;
    use crate::config::{INITIAL_OBSTACLE_MIN_ROW, MAX_LIFE_LOSSES};
    use crate::rng::Xorshift32;

    #[test]
    fn new_game_places_distinct_obstacles_above_row_three() {
        for seed in 1..50 {
            let mut canvas = Canvas::default();
            let game = Game::new(Xorshift32::new(seed), &mut canvas);
            let cells: HashSet<_> = game.obstacles().collect();
            assert_eq!(game.obstacle_count(), MAX_OBSTACLES);
            assert_eq!(cells.len(), MAX_OBSTACLES);
            assert!(cells.iter().all(|c| c.y() >= INITIAL_OBSTACLE_MIN_ROW));
        }
    }

    #[test]
    fn new_game_resets_everything() {
        let mut canvas = Canvas::default();
        let mut game = Game::new(Xorshift32::new(99), &mut canvas);
        game.move_base(Direction::Left, &mut canvas);
        game.fire_projectile(&mut canvas);
        game.scoreboard.add(5);
        game.scoreboard.lose_life();

        game.new_game(&mut canvas);
        assert_eq!(game.base_position(), BASE_START);
        assert_eq!(game.projectile_count(), 0);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lives_remaining(), MAX_LIFE_LOSSES);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(canvas.status, Some((0, MAX_LIFE_LOSSES)));
        assert_eq!(canvas.clears, 2);
    }

    #[test]
    fn game_over_clears_difficulty() {
        let (mut game, _) = game(&[], &[0]);
        let timing = Timing::default();
        game.scoreboard.add(20);
        game.record_obstacle_tick(&timing);
        assert_eq!(game.difficulty_offset_ms(), 10);

        assert!(!game.is_game_over());
        game.state = GameState::GameOver;
        assert!(game.is_game_over());
        assert!(game.is_game_over());
        assert_eq!(game.difficulty_offset_ms(), 0);
    }

    #[test]
    fn initial_draw_shows_base_and_obstacles() {
        let (_, canvas) = game(&[Cell::at(0, 10)], &[0]);
        assert_eq!(canvas.colour(Cell::at(0, 10)), Colour::OBSTACLE);
        assert_eq!(canvas.colour(Cell::at(3, 1)), Colour::BASE);
        assert_eq!(canvas.colour(Cell::at(2, 0)), Colour::BASE);
        assert_eq!(canvas.colour(Cell::at(4, 0)), Colour::BASE);
    }

    #[test]
    #[should_panic(expected = "duplicate")]
    fn layout_rejects_duplicates() {
        let mut canvas = Canvas::default();
        Game::with_obstacles(
            Scripted::new(&[0]),
            &[Cell::at(1, 5), Cell::at(1, 5)],
            &mut canvas,
        );
    }
}
