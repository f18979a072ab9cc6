//! Game implementations.

pub mod minesweeper;
