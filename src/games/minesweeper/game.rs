//! A single minesweeper game: one board plus its configured mine quantity.

use super::board::Board;
use super::status::{GameStatus, evaluate};
use crate::config::ConfigError;
use rand::Rng;
use tracing::{info, instrument};

/// Owns the board for the lifetime of one game.
///
/// Games are created at level selection and discarded when they end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    mine_quantity: usize,
}

impl Game {
    /// Creates a `board_size` × `board_size` game with randomly placed mines.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the board is empty or `mine_quantity` is not
    /// strictly less than the number of cells.
    #[instrument(skip(rng))]
    pub fn new<R: Rng>(
        board_size: usize,
        mine_quantity: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        validate_dimensions(board_size, mine_quantity)?;

        let mut board = Board::square(board_size);
        board.place_mines_randomly(mine_quantity, rng);
        info!(board_size, mine_quantity, "Game created");

        Ok(Self {
            board,
            mine_quantity,
        })
    }

    /// Wraps a board whose mines are already placed.
    pub fn from_board(board: Board) -> Self {
        let mine_quantity = board.mine_count();
        Self {
            board,
            mine_quantity,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board mutably.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Number of mines the game was configured with.
    pub fn mine_quantity(&self) -> usize {
        self.mine_quantity
    }

    /// Evaluates whether the game is ongoing, won, or lost.
    pub fn status(&self) -> GameStatus {
        evaluate(&self.board, self.mine_quantity)
    }
}

/// Largest accepted board side length.
pub const MAX_BOARD_SIZE: usize = 1_000;

/// Checks that a board of `board_size`² cells can hold `mine_quantity` mines
/// with at least one safe cell left over.
pub fn validate_dimensions(board_size: usize, mine_quantity: usize) -> Result<(), ConfigError> {
    if board_size == 0 {
        return Err(ConfigError::new("The board must have at least one cell."));
    }
    if board_size > MAX_BOARD_SIZE {
        return Err(ConfigError::new(format!(
            "Board size {board_size} is too large; the maximum is {MAX_BOARD_SIZE}."
        )));
    }
    let total = board_size * board_size;
    if mine_quantity >= total {
        return Err(ConfigError::new(
            "The number of mines must be less than the total number of cells.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::minesweeper::Position;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_places_configured_mines() {
        let game = Game::new(9, 10, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(game.board().len(), 81);
        assert_eq!(game.board().mine_count(), 10);
        assert_eq!(game.mine_quantity(), 10);
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_rejects_too_many_mines() {
        let err = Game::new(3, 9, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(err.message.contains("less than the total number of cells"));
        assert!(Game::new(3, 8, &mut StdRng::seed_from_u64(0)).is_ok());
    }

    #[test]
    fn test_rejects_empty_board() {
        assert!(Game::new(0, 0, &mut StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn test_rejects_oversized_board() {
        assert!(validate_dimensions(MAX_BOARD_SIZE, 1).is_ok());
        let err = validate_dimensions(MAX_BOARD_SIZE + 1, 1).unwrap_err();
        assert!(err.message.contains("too large"));
        assert!(validate_dimensions(100_000, 10).is_err());
        assert!(validate_dimensions(usize::MAX, 10).is_err());
    }

    #[test]
    fn test_from_board_counts_mines() {
        let board = Board::with_mines(3, &[Position::new(0, 0)]);
        let game = Game::from_board(board);
        assert_eq!(game.mine_quantity(), 1);
    }
}
