//! Cell reveal, flood fill, and flag toggling.
//!
//! All operations here take `&mut Board`, so callers sharing a board across
//! tasks must hold its lock for the duration of a call. Off-board
//! coordinates are silently ignored.

use super::board::Board;
use super::types::Position;
use tracing::{debug, instrument, trace};

impl Board {
    /// Counts mines among the 8 neighbors of `pos`, skipping off-board ones.
    pub fn count_nearby_mines(&self, pos: Position) -> u8 {
        pos.neighbors()
            .filter_map(|n| self.cell(n))
            .filter(|cell| cell.is_mine)
            .count() as u8
    }

    /// Reveals the cell at `pos`, flooding open contiguous zero-count regions.
    ///
    /// The flood uses an explicit worklist, so depth is bounded by the board
    /// area rather than the call stack. Each cell flips from hidden to shown
    /// at most once; already shown cells stop the traversal. Flagged cells
    /// stay hidden and block the flood, and a revealed mine does not spread.
    ///
    /// Returns the number of cells newly shown.
    #[instrument(skip(self), fields(pos = %pos))]
    pub fn show_cell(&mut self, pos: Position) -> usize {
        let mut pending = vec![pos];
        let mut shown = 0;

        while let Some(current) = pending.pop() {
            let nearby = match self.cell(current) {
                Some(cell) if !cell.is_shown && !cell.is_flagged => {
                    self.count_nearby_mines(current)
                }
                _ => continue,
            };

            let Some(cell) = self.cell_mut(current) else {
                continue;
            };
            cell.is_shown = true;
            cell.nearby_mines = nearby;
            shown += 1;
            trace!(pos = %current, nearby, "Cell shown");

            if nearby == 0 && !cell.is_mine {
                pending.extend(current.neighbors().filter(|n| self.is_valid(*n)));
            }
        }

        debug!(shown, "Reveal finished");
        shown
    }

    /// Shows every cell, mines included, for the end-of-game board.
    ///
    /// Cells that were still hidden get their adjacency count computed so the
    /// final board displays correct numbers.
    #[instrument(skip(self))]
    pub fn reveal_all(&mut self) {
        let hidden: Vec<Position> = self
            .positions()
            .filter(|&p| self.cell(p).is_some_and(|c| !c.is_shown))
            .collect();

        for pos in hidden {
            let nearby = self.count_nearby_mines(pos);
            if let Some(cell) = self.cell_mut(pos) {
                cell.nearby_mines = nearby;
            }
        }

        for cell in self.cells_mut() {
            cell.is_shown = true;
        }
    }

    /// Toggles the flag on `pos`.
    ///
    /// Returns `false` without touching the board when `pos` is off the board.
    #[instrument(skip(self), fields(pos = %pos))]
    pub fn flag_cell(&mut self, pos: Position) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.is_flagged = !cell.is_flagged;
                debug!(flagged = cell.is_flagged, "Flag toggled");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_count_nearby_mines() {
        let board = Board::with_mines(3, &[p(0, 0), p(0, 2)]);
        assert_eq!(board.count_nearby_mines(p(1, 1)), 2);
        assert_eq!(board.count_nearby_mines(p(0, 1)), 2);
        assert_eq!(board.count_nearby_mines(p(2, 2)), 0);
        assert_eq!(board.count_nearby_mines(p(1, 0)), 1);
    }

    #[test]
    fn test_count_ignores_the_cell_itself() {
        let board = Board::with_mines(3, &[p(1, 1)]);
        assert_eq!(board.count_nearby_mines(p(1, 1)), 0);
    }

    #[test]
    fn test_count_at_coordinate_limits() {
        let mut board = Board::with_mines(3, &[p(0, 0)]);
        assert_eq!(board.count_nearby_mines(p(i32::MAX, 0)), 0);
        assert_eq!(board.count_nearby_mines(p(0, i32::MIN)), 0);
        assert_eq!(board.show_cell(p(i32::MAX, i32::MAX)), 0);
    }

    #[test]
    fn test_show_numbered_cell_does_not_flood() {
        let mut board = Board::with_mines(3, &[p(0, 0)]);
        assert_eq!(board.show_cell(p(1, 1)), 1);
        let cell = board.cell(p(1, 1)).unwrap();
        assert!(cell.is_shown());
        assert_eq!(cell.nearby_mines(), 1);
        assert_eq!(board.shown_count(), 1);
    }

    #[test]
    fn test_flood_opens_everything_but_the_mine() {
        let mut board = Board::with_mines(3, &[p(0, 0)]);
        assert_eq!(board.show_cell(p(2, 2)), 8);
        assert!(!board.cell(p(0, 0)).unwrap().is_shown());
        assert_eq!(board.cell(p(2, 2)).unwrap().nearby_mines(), 0);
        assert_eq!(board.cell(p(0, 1)).unwrap().nearby_mines(), 1);
    }

    #[test]
    fn test_show_cell_is_idempotent() {
        let mut board = Board::with_mines(4, &[p(0, 3), p(3, 0)]);
        board.show_cell(p(1, 1));
        let once = board.clone();
        assert_eq!(board.show_cell(p(1, 1)), 0);
        assert_eq!(board, once);
    }

    #[test]
    fn test_invalid_position_is_ignored() {
        let mut board = Board::with_mines(3, &[p(0, 0)]);
        let before = board.clone();
        assert_eq!(board.show_cell(p(-1, 5)), 0);
        assert!(!board.flag_cell(p(-1, 5)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_flagged_cell_is_not_shown() {
        let mut board = Board::square(3);
        assert!(board.flag_cell(p(1, 1)));
        assert_eq!(board.show_cell(p(1, 1)), 0);
        assert!(!board.cell(p(1, 1)).unwrap().is_shown());

        assert!(board.flag_cell(p(1, 1)));
        assert_eq!(board.show_cell(p(1, 1)), 9);
    }

    #[test]
    fn test_flag_blocks_flood() {
        let mut board = Board::square(3);
        board.flag_cell(p(0, 0));
        assert_eq!(board.show_cell(p(2, 2)), 8);
        assert!(!board.cell(p(0, 0)).unwrap().is_shown());
        assert!(board.cell(p(0, 0)).unwrap().is_flagged());
    }

    #[test]
    fn test_revealed_mine_does_not_flood() {
        let mut board = Board::with_mines(3, &[p(0, 0)]);
        assert_eq!(board.show_cell(p(0, 0)), 1);
        assert!(board.cell(p(0, 0)).unwrap().is_shown());
        assert_eq!(board.shown_count(), 1);
    }

    #[test]
    fn test_reveal_all_computes_counts() {
        let mut board = Board::with_mines(3, &[p(0, 0)]);
        board.reveal_all();
        assert_eq!(board.shown_count(), 9);
        assert_eq!(board.cell(p(1, 1)).unwrap().nearby_mines(), 1);
        assert_eq!(board.cell(p(2, 2)).unwrap().nearby_mines(), 0);
    }

    #[test]
    fn test_flag_toggle_keeps_shown_state() {
        let mut board = Board::square(2);
        board.flag_cell(p(0, 1));
        assert!(board.cell(p(0, 1)).unwrap().is_flagged());
        assert!(!board.cell(p(0, 1)).unwrap().is_shown());
        board.flag_cell(p(0, 1));
        assert!(!board.cell(p(0, 1)).unwrap().is_flagged());
    }
}
