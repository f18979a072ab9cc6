//! Core domain types for minesweeper.

use derive_new::new;
use serde::{Deserialize, Serialize};

/// Offsets of the 8 cells surrounding a position (Moore neighborhood).
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A (row, col) coordinate on the board.
///
/// Coordinates are signed so that neighbor offsets and caller input such as
/// `(-1, 5)` can be expressed. Whether a position lies on a particular board
/// is decided by [`Board::index`](super::Board::index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Position {
    /// Row, counted from the top.
    pub row: i32,
    /// Column, counted from the left.
    pub col: i32,
}

impl Position {
    /// Returns the surrounding positions, including ones off the board.
    ///
    /// Neighbors whose coordinates would overflow `i32` are omitted; they can
    /// never lie on a board.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dr, dc)| {
            Some(Position::new(
                self.row.checked_add(dr)?,
                self.col.checked_add(dc)?,
            ))
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single square of the minefield.
///
/// `nearby_mines` is only meaningful once the cell has been shown; it is
/// computed at reveal time rather than when mines are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_shown: bool,
    pub(crate) is_flagged: bool,
    pub(crate) nearby_mines: u8,
}

impl Cell {
    /// Whether this cell holds a mine.
    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Whether this cell has been revealed.
    pub fn is_shown(&self) -> bool {
        self.is_shown
    }

    /// Whether the player has flagged this cell.
    pub fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Number of mines among the 8 neighbors (0-8), valid once shown.
    pub fn nearby_mines(&self) -> u8 {
        self.nearby_mines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_excludes_self() {
        let center = Position::new(1, 1);
        let neighbors: Vec<_> = center.neighbors().collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&center));
        assert!(neighbors.contains(&Position::new(0, 0)));
        assert!(neighbors.contains(&Position::new(2, 2)));
    }

    #[test]
    fn test_neighbors_of_corner_go_negative() {
        let neighbors: Vec<_> = Position::new(0, 0).neighbors().collect();
        assert!(neighbors.contains(&Position::new(-1, -1)));
    }

    #[test]
    fn test_neighbors_at_coordinate_limits_do_not_overflow() {
        assert_eq!(Position::new(i32::MAX, 0).neighbors().count(), 5);
        assert_eq!(Position::new(i32::MIN, i32::MIN).neighbors().count(), 3);
        assert_eq!(Position::new(i32::MAX, i32::MAX).neighbors().count(), 3);
    }

    #[test]
    fn test_default_cell_is_hidden() {
        let cell = Cell::default();
        assert!(!cell.is_mine());
        assert!(!cell.is_shown());
        assert!(!cell.is_flagged());
        assert_eq!(cell.nearby_mines(), 0);
    }
}
