//! Dense fixed-capacity entity storage.
//!
//! Live entries occupy `0..len()` with no holes. Removal swaps the last entry
//! into the freed slot, so indices are only stable until the next removal.

use heapless::Vec;

use crate::position::Cell;

#[derive(Debug, Clone)]
pub struct Store<const N: usize> {
    cells: Vec<Cell, N>,
}

impl<const N: usize> Store<N> {
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.is_full()
    }

    /// Panics when full; callers check [`Store::is_full`] first.
    pub fn push(&mut self, cell: Cell) -> usize {
        assert!(!self.is_full(), "store capacity {} exceeded", N);
        let index = self.cells.len();
        // Unreachable error: capacity checked above.
        let _ = self.cells.push(cell);
        index
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Overwrites a live slot. Panics on an index outside `0..len()`.
    pub fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Removes the entry at `index`, moving the last entry into its slot.
    /// An out-of-range index is a no-op and returns `None`.
    pub fn swap_remove(&mut self, index: usize) -> Option<Cell> {
        if index < self.cells.len() {
            Some(self.cells.swap_remove(index))
        } else {
            None
        }
    }

    /// Index of the first entry at `cell`.
    pub fn find(&self, cell: Cell) -> Option<usize> {
        self.cells.iter().position(|&c| c == cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.find(cell).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl<const N: usize> Default for Store<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_remove_moves_last_into_hole() {
        let mut store = Store::<4>::new();
        store.push(Cell::at(0, 2));
        store.push(Cell::at(1, 2));
        store.push(Cell::at(2, 2));

        assert_eq!(store.swap_remove(0), Some(Cell::at(0, 2)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0), Some(Cell::at(2, 2)));
        assert_eq!(store.get(1), Some(Cell::at(1, 2)));
    }

    #[test]
    fn out_of_range_remove_is_a_no_op() {
        let mut store = Store::<4>::new();
        store.push(Cell::at(0, 2));
        assert_eq!(store.swap_remove(1), None);
        assert_eq!(store.swap_remove(usize::MAX), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn push_past_capacity_panics() {
        let mut store = Store::<1>::new();
        store.push(Cell::at(0, 0));
        store.push(Cell::at(1, 0));
    }

    #[test]
    fn find_reports_first_match() {
        let mut store = Store::<4>::new();
        store.push(Cell::at(5, 5));
        store.push(Cell::at(6, 6));
        assert_eq!(store.find(Cell::at(6, 6)), Some(1));
        assert!(!store.contains(Cell::at(0, 0)));
    }
}
