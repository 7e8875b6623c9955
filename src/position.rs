//! Grid cells and the packed one-byte position form.
//!
//! Entities store [`Cell`]. The packed byte (x in the high nibble, y in the
//! low nibble) only exists for interop with the LED-matrix protocol and for
//! compact log output.

use core::fmt;

use crate::config::{FIELD_HEIGHT, FIELD_WIDTH};

/// A cell on the 8x16 field. `y == 0` is the base row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    x: u8,
    y: u8,
}

impl Cell {
    /// Returns `None` if the coordinate lies outside the field.
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x < FIELD_WIDTH && y < FIELD_HEIGHT {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Panics on out-of-range coordinates.
    pub const fn at(x: u8, y: u8) -> Self {
        assert!(x < FIELD_WIDTH && y < FIELD_HEIGHT, "cell outside field");
        Self { x, y }
    }

    pub const fn x(self) -> u8 {
        self.x
    }

    pub const fn y(self) -> u8 {
        self.y
    }

    /// One row up, or `None` from the top row.
    pub const fn up(self) -> Option<Self> {
        Self::new(self.x, self.y + 1)
    }

    /// One row down, or `None` from the base row.
    pub const fn down(self) -> Option<Self> {
        match self.y.checked_sub(1) {
            Some(y) => Some(Self { x: self.x, y }),
            None => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A cell packed into one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedPosition(pub u8);

impl PackedPosition {
    /// "No position". x would be 15, which no valid cell has.
    pub const INVALID: Self = Self(0xFF);

    pub const fn is_valid(self) -> bool {
        (self.0 >> 4) < FIELD_WIDTH
    }
}

impl fmt::Display for PackedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The sentinel or any byte whose x nibble is off the field.
    Invalid(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Invalid(raw) => write!(f, "invalid packed position {raw:#04x}"),
        }
    }
}

impl core::error::Error for DecodeError {}

pub const fn encode(cell: Cell) -> PackedPosition {
    PackedPosition((cell.x << 4) | (cell.y & 0x0F))
}

/// Decodes a packed position, panicking on the sentinel or an invalid byte.
pub fn decode(packed: PackedPosition) -> Cell {
    match Cell::try_from(packed) {
        Ok(cell) => cell,
        Err(err) => panic!("{}", err),
    }
}

impl From<Cell> for PackedPosition {
    fn from(cell: Cell) -> Self {
        encode(cell)
    }
}

impl TryFrom<PackedPosition> for Cell {
    type Error = DecodeError;

    fn try_from(packed: PackedPosition) -> Result<Self, Self::Error> {
        Cell::new(packed.0 >> 4, packed.0 & 0x0F).ok_or(DecodeError::Invalid(packed.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_cell() {
        for x in 0..FIELD_WIDTH {
            for y in 0..FIELD_HEIGHT {
                let cell = Cell::at(x, y);
                assert_eq!(decode(encode(cell)), cell);
            }
        }
    }

    #[test]
    fn sentinel_never_collides() {
        for x in 0..FIELD_WIDTH {
            for y in 0..FIELD_HEIGHT {
                assert_ne!(encode(Cell::at(x, y)), PackedPosition::INVALID);
            }
        }
        assert!(!PackedPosition::INVALID.is_valid());
        assert_eq!(
            Cell::try_from(PackedPosition::INVALID),
            Err(DecodeError::Invalid(0xFF))
        );
    }

    #[test]
    fn packs_x_high_y_low() {
        assert_eq!(encode(Cell::at(3, 2)), PackedPosition(0x32));
        assert_eq!(encode(Cell::at(7, 15)), PackedPosition(0x7F));
    }

    #[test]
    #[should_panic]
    fn decode_of_sentinel_panics() {
        decode(PackedPosition::INVALID);
    }

    #[test]
    fn rejects_out_of_field_coordinates() {
        assert_eq!(Cell::new(8, 0), None);
        assert_eq!(Cell::new(0, 16), None);
        assert_eq!(Cell::at(0, 15).up(), None);
        assert_eq!(Cell::at(4, 0).down(), None);
        assert_eq!(Cell::at(4, 1).down(), Some(Cell::at(4, 0)));
    }
}
