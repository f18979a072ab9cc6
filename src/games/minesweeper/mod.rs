mod board;
mod game;
pub mod invariants;
mod reveal;
mod status;
mod types;

pub use board::Board;
pub use game::{Game, MAX_BOARD_SIZE, validate_dimensions};
pub use status::{GameStatus, evaluate};
pub use types::{Cell, Position};
