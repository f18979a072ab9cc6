//! Strictly Minesweeper library - terminal minesweeper with a concurrent reveal pipeline
//!
//! # Architecture
//!
//! - **Board model**: grid of cells, random mine placement
//! - **Reveal engine**: flood reveal of zero-count regions, flag toggling
//! - **Status evaluator**: decides ongoing / won / lost from a board snapshot
//! - **Coordinator**: per-request-kind queues and workers around a shared board
//! - **TUI**: ratatui front end that owns the terminal
//!
//! # Example
//!
//! ```no_run
//! use strictly_minesweeper::{BoardRenderer, Board, GameConfig, Position, init_game};
//!
//! struct Silent;
//!
//! impl BoardRenderer for Silent {
//!     fn draw_board(&mut self, _board: &Board) {}
//!     fn render_cell(&mut self, _board: &Board, _pos: Position) {}
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::new(9, 10)?;
//! let coordinator = init_game(&config, Silent)?;
//! let handle = coordinator.handle();
//! handle.reveal(Position::new(4, 4)).await?;
//! let termination = handle.wait_for_termination().await?;
//! println!("{}", termination.message());
//! coordinator.end_game().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod coordinator;
mod games;
mod render;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{
    ConfigError, ConfigFile, ConfigOverrides, DEFAULT_END_DELAY_MS, DEFAULT_QUEUE_CAPACITY,
    GameConfig, Level,
};

// Crate-level exports - Coordinator
pub use coordinator::{
    Coordinator, CoordinatorError, CoordinatorSettings, GameHandle, Outcome, RenderRequest,
    RevealAll, RevealRequest, StatusCheck, Termination, init_game,
};

// Crate-level exports - Rendering seam
pub use render::{BoardRenderer, BoardView, Glyph};

// Crate-level exports - Game types (minesweeper)
pub use games::minesweeper::{
    Board, Cell, Game, GameStatus, MAX_BOARD_SIZE, Position, evaluate, invariants,
    validate_dimensions,
};
