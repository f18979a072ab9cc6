//! Requests carried by the coordinator queues and the outcomes it reports.

use crate::games::minesweeper::{GameStatus, Position};
use serde::{Deserialize, Serialize};
use strum::Display;
use tokio::sync::oneshot;

/// Reveal the cell at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealRequest {
    /// Cell to reveal.
    pub pos: Position,
}

/// Redraw part of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRequest {
    /// Redraw every cell.
    Board,
    /// Redraw one cell.
    Cell(Position),
}

/// Re-evaluate whether the game has been won or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCheck;

/// Show every cell at game end.
#[derive(Debug)]
pub struct RevealAll {
    /// Signalled once the board has been fully revealed.
    pub done: oneshot::Sender<()>,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Outcome {
    /// Every safe cell was revealed.
    Won,
    /// A mine was revealed.
    Lost,
}

impl Outcome {
    /// Maps a terminal status to its outcome; `None` while the game is ongoing.
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::Ongoing => None,
            GameStatus::Won => Some(Outcome::Won),
            GameStatus::Lost => Some(Outcome::Lost),
        }
    }

    /// Message shown to the player once the terminal is restored.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Won => "Congratulations! You won the game!",
            Outcome::Lost => "Game Over! You hit a mine.",
        }
    }
}

/// Why the session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The game reached a terminal state.
    Finished(Outcome),
    /// The player quit.
    Quit,
}

impl Termination {
    /// Message shown to the player once the terminal is restored.
    pub fn message(self) -> &'static str {
        match self {
            Termination::Finished(outcome) => outcome.message(),
            Termination::Quit => "Terminating the game...",
        }
    }
}
