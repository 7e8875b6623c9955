//! Outward interface to the display and the score/lives readout.

use crate::config::FIELD_WIDTH;
use crate::position::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Colour {
    Black,
    Red,
    Green,
    Yellow,
    Orange,
    LightOrange,
}

impl Colour {
    pub const OBSTACLE: Colour = Colour::Green;
    pub const PROJECTILE: Colour = Colour::Red;
    pub const BASE: Colour = Colour::Yellow;
    pub const BASE_HIT: Colour = Colour::Orange;

    /// Byte for the LED-matrix protocol: green nibble high, red nibble low.
    pub const fn led_byte(self) -> u8 {
        match self {
            Colour::Black => 0x00,
            Colour::Red => 0x0F,
            Colour::Green => 0xF0,
            Colour::Yellow => 0xDF,
            Colour::Orange => 0x3C,
            Colour::LightOrange => 0x13,
        }
    }
}

/// Everything the game core draws to.
///
/// Each entity change results in one `set_cell` per affected cell; there is
/// no batching. `status_changed` fires whenever score or lives change.
pub trait Output {
    fn set_cell(&mut self, cell: Cell, colour: Colour);
    fn clear_all(&mut self);
    fn status_changed(&mut self, score: u32, lives_remaining: u8);
}

impl<O: Output + ?Sized> Output for &mut O {
    fn set_cell(&mut self, cell: Cell, colour: Colour) {
        (**self).set_cell(cell, colour)
    }

    fn clear_all(&mut self) {
        (**self).clear_all()
    }

    fn status_changed(&mut self, score: u32, lives_remaining: u8) {
        (**self).status_changed(score, lives_remaining)
    }
}

/// LED-matrix (column, row) for a game cell. The matrix is mounted sideways:
/// game rows run along matrix columns and game column 0 is matrix row 7.
pub const fn matrix_coords(cell: Cell) -> (u8, u8) {
    (cell.y(), FIELD_WIDTH - 1 - cell.x())
}

/// Cells covered by a base centred on `centre`: up to three on row 0
/// (clipped at the field edges) and one on row 1.
pub fn base_cells(centre: u8) -> impl Iterator<Item = Cell> {
    let left = centre.checked_sub(1);
    let right = Some(centre + 1).filter(|&x| x < FIELD_WIDTH);
    [left, Some(centre), right]
        .into_iter()
        .flatten()
        .filter_map(|x| Cell::new(x, 0))
        .chain(Cell::new(centre, 1))
}

pub(crate) fn draw_base<O: Output + ?Sized>(out: &mut O, centre: u8, colour: Colour) {
    for cell in base_cells(centre) {
        out.set_cell(cell, colour);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;

    #[test]
    fn base_is_clipped_at_edges() {
        let left: Vec<_> = base_cells(0).collect();
        assert_eq!(left, [Cell::at(0, 0), Cell::at(1, 0), Cell::at(0, 1)]);

        let right: Vec<_> = base_cells(7).collect();
        assert_eq!(right, [Cell::at(6, 0), Cell::at(7, 0), Cell::at(7, 1)]);

        assert_eq!(base_cells(3).count(), 4);
    }

    #[test]
    fn matrix_is_mounted_sideways() {
        assert_eq!(matrix_coords(Cell::at(0, 0)), (0, 7));
        assert_eq!(matrix_coords(Cell::at(7, 15)), (15, 0));
    }

    #[test]
    fn legacy_colour_bytes() {
        assert_eq!(Colour::OBSTACLE.led_byte(), 0xF0);
        assert_eq!(Colour::PROJECTILE.led_byte(), 0x0F);
        assert_eq!(Colour::BASE.led_byte(), 0xDF);
    }
}
