use super::collision::{Outcome, ProjectileReport};
use super::{Game, GameState};
use crate::config::PROJECTILE_SPAWN_ROW;
use crate::position::Cell;
use crate::render::{Colour, Output};
use crate::rng::RandomSource;

impl<R: RandomSource> Game<R> {
    /// Fires from the cell two rows above the base centre. Fails when all
    /// projectiles are in flight or that cell already holds one.
    pub fn fire_projectile<O: Output + ?Sized>(&mut self, out: &mut O) -> bool {
        if self.state == GameState::GameOver || self.projectiles.is_full() {
            return false;
        }
        let cell = Cell::at(self.base, PROJECTILE_SPAWN_ROW);
        if self.projectiles.contains(cell) {
            return false;
        }
        self.projectiles.push(cell);
        out.set_cell(cell, Colour::PROJECTILE);
        true
    }

    /// Moves every projectile up one row. A projectile already sharing a
    /// cell with an obstacle is consumed instead; one on the top row leaves
    /// the field.
    pub fn advance_projectiles<O: Output + ?Sized>(&mut self, out: &mut O) -> ProjectileReport {
        let mut report = ProjectileReport::new();
        if self.state == GameState::GameOver {
            return report;
        }

        // Removals swap the last projectile into slot `i`, so `i` only
        // advances after a move.
        let mut i = 0;
        while let Some(cell) = self.projectiles.get(i) {
            if let Some(obstacle) = self.obstacles.find(cell) {
                self.resolve_hit(i, obstacle, out);
                report.record(Outcome::Scored);
                continue;
            }

            match cell.up() {
                None => {
                    self.projectiles.swap_remove(i);
                    self.repaint(out, cell);
                    report.record(Outcome::Expired);
                }
                Some(next) => {
                    self.projectiles.set(i, next);
                    self.repaint(out, cell);
                    out.set_cell(next, Colour::PROJECTILE);
                    report.record(Outcome::Moved);
                    i += 1;
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::super::Direction;
    use super::super::testing::game;
    use super::*;
    use crate::config::{MAX_OBSTACLES, MAX_PROJECTILES, TOP_ROW};

    #[test]
    fn second_fire_from_same_column_fails() {
        let (mut game, mut canvas) = game(&[], &[0]);
        assert!(game.fire_projectile(&mut canvas));
        assert!(!game.fire_projectile(&mut canvas));
        assert_eq!(game.projectile_count(), 1);
        assert_eq!(canvas.colour(Cell::at(3, 2)), Colour::PROJECTILE);
    }

    #[test]
    fn capacity_limits_fire() {
        let (mut game, mut canvas) = game(&[], &[0]);
        for _ in 0..MAX_PROJECTILES {
            assert!(game.fire_projectile(&mut canvas));
            game.move_base(Direction::Left, &mut canvas);
        }
        assert!(!game.fire_projectile(&mut canvas));
        assert_eq!(game.projectile_count(), MAX_PROJECTILES);
    }

    #[test]
    fn projectiles_climb_and_expire() {
        let (mut game, mut canvas) = game(&[], &[0]);
        game.fire_projectile(&mut canvas);

        let report = game.advance_projectiles(&mut canvas);
        assert_eq!(report.outcomes(), [Outcome::Moved]);
        assert_eq!(game.projectiles().next(), Some(Cell::at(3, 3)));
        assert_eq!(canvas.colour(Cell::at(3, 2)), Colour::Black);
        assert_eq!(canvas.colour(Cell::at(3, 3)), Colour::PROJECTILE);

        for _ in 3..TOP_ROW {
            game.advance_projectiles(&mut canvas);
        }
        assert_eq!(game.projectiles().next(), Some(Cell::at(3, TOP_ROW)));

        let report = game.advance_projectiles(&mut canvas);
        assert_eq!(report.outcomes(), [Outcome::Expired]);
        assert_eq!(game.projectile_count(), 0);
        assert_eq!(canvas.colour(Cell::at(3, TOP_ROW)), Colour::Black);
    }

    #[test]
    fn hit_scores_and_replaces_obstacle() {
        // Column draw 5 for the replacement.
        let (mut game, mut canvas) = game(&[Cell::at(3, 3), Cell::at(0, 9)], &[5]);
        game.fire_projectile(&mut canvas);
        game.advance_projectiles(&mut canvas);
        assert_eq!(game.projectiles().next(), Some(Cell::at(3, 3)));

        let report = game.advance_projectiles(&mut canvas);
        assert_eq!(report.outcomes(), [Outcome::Scored]);
        assert_eq!(game.score(), 1);
        assert_eq!(game.projectile_count(), 0);
        assert_eq!(game.obstacle_count(), 2);
        assert!(!game.obstacles().any(|c| c == Cell::at(3, 3)));
        assert!(game.obstacles().any(|c| c == Cell::at(5, TOP_ROW)));
        assert_eq!(canvas.colour(Cell::at(3, 3)), Colour::Black);
        assert_eq!(canvas.colour(Cell::at(5, TOP_ROW)), Colour::OBSTACLE);
        assert_eq!(canvas.status, Some((1, 4)));
    }

    #[test]
    fn hit_with_full_obstacle_store_keeps_count() {
        let mut layout = [Cell::at(0, 0); MAX_OBSTACLES];
        layout[0] = Cell::at(3, 2);
        for (i, slot) in layout.iter_mut().enumerate().skip(1) {
            *slot = Cell::at((i % 8) as u8, 5 + (i / 8) as u8);
        }
        let (mut game, mut canvas) = game(&layout, &[1]);
        game.fire_projectile(&mut canvas);
        game.advance_projectiles(&mut canvas);
        assert_eq!(game.obstacle_count(), MAX_OBSTACLES);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn removal_does_not_skip_the_swapped_projectile() {
        let (mut game, mut canvas) = game(&[Cell::at(3, 2)], &[6]);
        // Slot 0 lands on the obstacle; its removal pulls slot 2 forward.
        game.fire_projectile(&mut canvas);
        game.move_base(Direction::Left, &mut canvas);
        game.fire_projectile(&mut canvas);
        game.move_base(Direction::Right, &mut canvas);
        game.move_base(Direction::Right, &mut canvas);
        game.fire_projectile(&mut canvas);

        let report = game.advance_projectiles(&mut canvas);
        assert_eq!(report.count(Outcome::Scored), 1);
        assert_eq!(report.count(Outcome::Moved), 2);
        let mut cells: std::vec::Vec<_> = game.projectiles().collect();
        cells.sort_by_key(|c| c.x());
        assert_eq!(cells, [Cell::at(2, 3), Cell::at(4, 3)]);
    }
}
