//! Win/loss evaluation.

use super::board::Board;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::instrument;

/// Current status of a minesweeper game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum GameStatus {
    /// Hidden safe cells remain and no mine has been shown.
    Ongoing,
    /// Every safe cell has been shown.
    Won,
    /// A mine has been shown.
    Lost,
}

impl GameStatus {
    /// Whether the game has ended.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Evaluates the board against the configured mine quantity.
///
/// A shown mine means the game is lost. Otherwise the game is won once the
/// number of cells not yet shown as safe equals `mine_quantity`. The caller
/// must hold the board lock so the scan sees a single consistent state.
#[instrument(skip(board), fields(rows = board.rows(), cols = board.cols()))]
pub fn evaluate(board: &Board, mine_quantity: usize) -> GameStatus {
    let mut shown_safe = 0;

    for cell in board.cells().filter(|c| c.is_shown()) {
        if cell.is_mine() {
            return GameStatus::Lost;
        }
        shown_safe += 1;
    }

    if board.len() - shown_safe == mine_quantity {
        GameStatus::Won
    } else {
        GameStatus::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::minesweeper::Position;

    #[test]
    fn test_fresh_board_is_ongoing() {
        let board = Board::with_mines(3, &[Position::new(0, 0)]);
        assert_eq!(evaluate(&board, 1), GameStatus::Ongoing);
    }

    #[test]
    fn test_shown_mine_is_lost() {
        let mut board = Board::with_mines(3, &[Position::new(0, 0)]);
        board.show_cell(Position::new(0, 0));
        assert_eq!(evaluate(&board, 1), GameStatus::Lost);
    }

    #[test]
    fn test_all_safe_cells_shown_is_won() {
        let mut board = Board::with_mines(3, &[Position::new(0, 0)]);
        board.show_cell(Position::new(2, 2));
        assert_eq!(evaluate(&board, 1), GameStatus::Won);
    }

    #[test]
    fn test_loss_wins_over_full_reveal() {
        let mut board = Board::with_mines(2, &[Position::new(0, 0)]);
        board.reveal_all();
        assert_eq!(evaluate(&board, 1), GameStatus::Lost);
    }

    #[test]
    fn test_zero_mines_won_only_when_all_shown() {
        let mut board = Board::square(2);
        assert_eq!(evaluate(&board, 0), GameStatus::Ongoing);
        board.show_cell(Position::new(0, 0));
        assert_eq!(evaluate(&board, 0), GameStatus::Won);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!GameStatus::Ongoing.is_terminal());
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
    }
}
