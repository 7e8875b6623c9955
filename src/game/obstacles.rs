use super::collision::{ObstacleReport, Outcome, reaches_defense_line};
use super::{Game, GameState};
use crate::config::{FIELD_WIDTH, INITIAL_OBSTACLE_MIN_ROW, PLACEMENT_ATTEMPTS, TOP_ROW};
use crate::position::{Cell, PackedPosition};
use crate::render::{self, Colour, Output};
use crate::rng::RandomSource;

impl<R: RandomSource> Game<R> {
    /// Places `count` obstacles on distinct random cells, keeping the three
    /// rows nearest the base clear.
    pub(super) fn spawn_initial(&mut self, count: usize) {
        assert!(count <= self.obstacles.capacity(), "too many obstacles");
        self.obstacles.clear();
        for _ in 0..count {
            let cell = self.find_free_cell(INITIAL_OBSTACLE_MIN_ROW, TOP_ROW);
            self.obstacles.push(cell);
        }
    }

    /// Drops every obstacle one row. Returns one outcome per obstacle that
    /// was processed; processing stops at the life loss that ends the game.
    pub fn advance_obstacles<O: Output + ?Sized>(&mut self, out: &mut O) -> ObstacleReport {
        let mut report = ObstacleReport::new();
        if self.state == GameState::GameOver {
            return report;
        }

        let mut base_hit = false;
        for i in 0..self.obstacles.len() {
            let Some(cell) = self.obstacles.get(i) else {
                break;
            };

            let outcome = match cell.down() {
                None => Outcome::Respawned,
                Some(next) if reaches_defense_line(next, self.base) => Outcome::LifeLost,
                Some(next) => {
                    self.obstacles.set(i, next);
                    self.repaint(out, cell);
                    out.set_cell(next, Colour::OBSTACLE);
                    Outcome::Moved
                }
            };

            if outcome != Outcome::Moved {
                self.respawn_in_place(i, out);
            }
            if outcome == Outcome::LifeLost {
                base_hit = true;
                self.register_life_loss(out);
            }
            report.record(outcome);

            if self.state == GameState::GameOver {
                break;
            }
        }

        let colour = if base_hit {
            Colour::BASE_HIT
        } else {
            Colour::BASE
        };
        render::draw_base(out, self.base, colour);
        report
    }

    /// Replaces obstacle `index` with a fresh one on the top row. The slot
    /// is reused so the obstacle count does not change.
    fn respawn_in_place<O: Output + ?Sized>(&mut self, index: usize, out: &mut O) {
        let Some(old) = self.obstacles.swap_remove(index) else {
            return;
        };
        self.repaint(out, old);

        let fresh = self.find_free_cell(TOP_ROW, TOP_ROW);
        let last = self.obstacles.push(fresh);
        if last != index {
            // Undo the swap: the entry moved into `index` goes back to the end.
            if let Some(moved) = self.obstacles.get(index) {
                self.obstacles.set(last, moved);
                self.obstacles.set(index, fresh);
            }
        }
        out.set_cell(fresh, Colour::OBSTACLE);
        log::debug!(
            "obstacle {} respawned {} -> {}",
            index,
            PackedPosition::from(old),
            PackedPosition::from(fresh)
        );
    }

    /// Picks a cell with no obstacle in rows `min_row..=max_row`.
    ///
    /// Columns are drawn modulo the field width, rows modulo the row span
    /// (no draw for a single row). After a bounded number of misses the
    /// field is scanned from `max_row` down, starting at a random column,
    /// so placement always terminates.
    pub(super) fn find_free_cell(&mut self, min_row: u8, max_row: u8) -> Cell {
        let span = max_row - min_row + 1;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let x = self.rng.random_u8() % FIELD_WIDTH;
            let y = if span == 1 {
                min_row
            } else {
                min_row + self.rng.random_u8() % span
            };
            let cell = Cell::at(x, y);
            if !self.obstacles.contains(cell) {
                return cell;
            }
        }

        let start = self.rng.random_u8() % FIELD_WIDTH;
        log::debug!("placement fell back to scan from column {}", start);
        (min_row..=max_row)
            .rev()
            .chain((0..min_row).rev())
            .flat_map(|y| (0..FIELD_WIDTH).map(move |dx| Cell::at((start + dx) % FIELD_WIDTH, y)))
            .find(|&cell| !self.obstacles.contains(cell))
            .unwrap_or_else(|| panic!("no free cell for obstacle"))
    }
}
