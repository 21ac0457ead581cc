//! Board module - the 3x3 grid of cells
//!
//! Each cell is empty or holds one [`Occupant`]. Occupants carry the
//! generation of the round that spawned them and a per-spawn id, so a late
//! clear can check it still targets the live occupant before acting.

use crate::classify::Item;
use crate::types::CELL_COUNT;

/// Unique id of one spawned occupant (monotonic, never reused in a session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OccupantId(pub u32);

/// An item sitting in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub id: OccupantId,
    pub generation: u32,
    pub item: Item,
}

/// A cell on the board: `None` is empty.
pub type Cell = Option<Occupant>;

/// Fixed 9-cell board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Occupant at `idx`, `None` if empty or out of range
    pub fn get(&self, idx: usize) -> Option<&Occupant> {
        self.cells.get(idx).and_then(|c| c.as_ref())
    }

    pub fn is_empty_at(&self, idx: usize) -> bool {
        self.get(idx).is_none()
    }

    /// Put an occupant into an empty cell.
    ///
    /// Returns `false` (and leaves the cell untouched) if the cell is already
    /// occupied or out of range.
    pub fn place(&mut self, idx: usize, occupant: Occupant) -> bool {
        match self.cells.get_mut(idx) {
            Some(slot) if slot.is_none() => {
                *slot = Some(occupant);
                true
            }
            _ => false,
        }
    }

    /// Remove whatever occupies `idx`
    pub fn take(&mut self, idx: usize) -> Option<Occupant> {
        self.cells.get_mut(idx).and_then(|c| c.take())
    }

    /// Remove the occupant at `idx` only if it is still the one with `id`.
    ///
    /// A second clear of the same occupant (tap after despawn or the other
    /// way round) finds either an empty cell or a newer occupant and returns
    /// `None` without touching anything.
    pub fn take_if(&mut self, idx: usize, id: OccupantId) -> Option<Occupant> {
        let slot = self.cells.get_mut(idx)?;
        if slot.map(|o| o.id) == Some(id) {
            slot.take()
        } else {
            None
        }
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells = [None; CELL_COUNT];
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn occupant(id: u32) -> Occupant {
        Occupant {
            id: OccupantId(id),
            generation: 1,
            item: classify(0.9),
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.occupied_count(), 0);
        for i in 0..CELL_COUNT {
            assert!(board.is_empty_at(i));
        }
    }

    #[test]
    fn test_place_refuses_occupied_cell() {
        let mut board = Board::new();
        assert!(board.place(4, occupant(1)));
        assert!(!board.place(4, occupant(2)));
        assert_eq!(board.get(4).map(|o| o.id), Some(OccupantId(1)));
    }

    #[test]
    fn test_place_out_of_range() {
        let mut board = Board::new();
        assert!(!board.place(CELL_COUNT, occupant(1)));
        assert!(board.get(CELL_COUNT).is_none());
    }

    #[test]
    fn test_take_if_matches_identity() {
        let mut board = Board::new();
        board.place(2, occupant(7));

        assert!(board.take_if(2, OccupantId(8)).is_none());
        assert!(!board.is_empty_at(2));

        assert_eq!(board.take_if(2, OccupantId(7)).map(|o| o.id), Some(OccupantId(7)));
        assert!(board.is_empty_at(2));

        // Second clear is a no-op.
        assert!(board.take_if(2, OccupantId(7)).is_none());
    }

    #[test]
    fn test_take_if_ignores_newer_occupant() {
        let mut board = Board::new();
        board.place(0, occupant(1));
        board.take(0);
        board.place(0, occupant(2));

        assert!(board.take_if(0, OccupantId(1)).is_none());
        assert_eq!(board.get(0).map(|o| o.id), Some(OccupantId(2)));
    }

    #[test]
    fn test_clear() {
        let mut board = Board::new();
        board.place(0, occupant(1));
        board.place(8, occupant(2));
        assert_eq!(board.occupied_count(), 2);
        board.clear();
        assert_eq!(board.occupied_count(), 0);
    }
}
