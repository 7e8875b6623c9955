use super::{Game, GameState};
use crate::config::BASE_MAX;
use crate::render::{self, Output};
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Left,
    Right,
}

impl<R: RandomSource> Game<R> {
    /// Moves the base one column. Returns `false` if it was already at the
    /// edge in that direction or the game is over; the cells are still
    /// repainted in the first case.
    pub fn move_base<O: Output + ?Sized>(&mut self, direction: Direction, out: &mut O) -> bool {
        if self.state == GameState::GameOver {
            return false;
        }

        let before = self.base;
        match direction {
            Direction::Left if self.base > 0 => self.base -= 1,
            Direction::Right if self.base < BASE_MAX => self.base += 1,
            _ => {}
        }

        for cell in render::base_cells(before).chain(render::base_cells(self.base)) {
            self.repaint(out, cell);
        }
        before != self.base
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::game;
    use super::*;
    use crate::position::Cell;
    use crate::render::Colour;

    #[test]
    fn stays_within_field() {
        let (mut game, mut canvas) = game(&[], &[0]);
        for _ in 0..10 {
            game.move_base(Direction::Right, &mut canvas);
        }
        assert_eq!(game.base_position(), 7);
        assert!(!game.move_base(Direction::Right, &mut canvas));
        assert_eq!(game.base_position(), 7);

        for _ in 0..10 {
            game.move_base(Direction::Left, &mut canvas);
        }
        assert_eq!(game.base_position(), 0);
        assert!(!game.move_base(Direction::Left, &mut canvas));
        assert_eq!(game.base_position(), 0);
    }

    #[test]
    fn vacated_cells_are_erased() {
        let (mut game, mut canvas) = game(&[], &[0]);
        assert!(game.move_base(Direction::Left, &mut canvas));
        assert_eq!(game.base_position(), 2);
        assert_eq!(canvas.colour(Cell::at(4, 0)), Colour::Black);
        assert_eq!(canvas.colour(Cell::at(3, 1)), Colour::Black);
        assert_eq!(canvas.colour(Cell::at(2, 1)), Colour::BASE);
        assert_eq!(canvas.colour(Cell::at(1, 0)), Colour::BASE);
        assert_eq!(canvas.colour(Cell::at(3, 0)), Colour::BASE);
    }

    #[test]
    fn vacated_cell_keeps_obstacle_visible() {
        let (mut game, mut canvas) = game(&[Cell::at(3, 1)], &[0]);
        game.move_base(Direction::Right, &mut canvas);
        assert_eq!(canvas.colour(Cell::at(3, 1)), Colour::OBSTACLE);
    }
}
