//! Invariants that must hold for a board throughout a game.
//!
//! They are checked after every reveal in debug builds and can be tested
//! independently.

use super::game::Game;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// The board holds exactly the configured number of mines.
pub struct MineCountFixed;

impl Invariant<Game> for MineCountFixed {
    fn holds(game: &Game) -> bool {
        game.board().mine_count() == game.mine_quantity()
    }

    fn description() -> &'static str {
        "Board holds exactly the configured number of mines"
    }
}

/// Every shown cell reports the true number of neighboring mines.
pub struct AdjacencyConsistent;

impl Invariant<Game> for AdjacencyConsistent {
    fn holds(game: &Game) -> bool {
        let board = game.board();
        board.positions().all(|pos| match board.cell(pos) {
            Some(cell) if cell.is_shown() => cell.nearby_mines() == board.count_nearby_mines(pos),
            _ => true,
        })
    }

    fn description() -> &'static str {
        "Shown cells report the true adjacent mine count"
    }
}

/// Checks every game invariant, returning the descriptions of any that fail.
pub fn check_all(game: &Game) -> Result<(), Vec<&'static str>> {
    let mut violations = Vec::new();

    if !MineCountFixed::holds(game) {
        violations.push(MineCountFixed::description());
    }
    if !AdjacencyConsistent::holds(game) {
        violations.push(AdjacencyConsistent::description());
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::minesweeper::{Board, Position};

    #[test]
    fn test_invariants_hold_through_play() {
        let mut game = Game::from_board(Board::with_mines(4, &[Position::new(0, 0)]));
        assert!(check_all(&game).is_ok());
        game.board_mut().show_cell(Position::new(3, 3));
        assert!(check_all(&game).is_ok());
        game.board_mut().reveal_all();
        assert!(check_all(&game).is_ok());
    }

    #[test]
    fn test_detects_stray_mine() {
        let mut game = Game::from_board(Board::square(3));
        game.board_mut().place_mines_at(&[Position::new(1, 1)]);
        assert_eq!(check_all(&game), Err(vec![MineCountFixed::description()]));
    }
}
